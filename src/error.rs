use std::fmt;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug)]
pub enum Error {
    /// Occurs when an indexed column (object ids, radii, point counts, style or class indexes,
    /// subcategories) is shorter than the record's feature count, or a dedup index points past the
    /// end of its unique-value table. Always signals upstream corruption of the columnar record.
    BadIndex {
        column: &'static str,
        index: usize,
        len: usize,
    },
    /// A shared coordinate or z buffer ran out before every feature was reconstructed.
    LengthTooShort {
        column: &'static str,
        expected: usize,
        actual: usize,
    },
    /// Occurs when a serialized class list or subcategory payload fails to parse, or a nested
    /// payload fails to serialize.
    Json(serde_json::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Error::BadIndex { column, index, len } => write!(
                f,
                "Index {} is out of bounds for column [{}] of length {}",
                index, column, len
            ),
            Error::LengthTooShort {
                column,
                expected,
                actual,
            } => write!(
                f,
                "Expected {} more values in column [{}], but only {} remain",
                expected, column, actual
            ),
            Error::Json(ref err) => write!(f, "Nested payload failure: {}", err),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match *self {
            Error::Json(ref err) => Some(err),
            _ => None,
        }
    }
}

impl std::convert::From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Self::Json(e)
    }
}
