use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::Z_TOLERANCE;

/// The z column of a columnar record, fixed at encode time.
///
/// When every z coordinate in a batch agrees within [`Z_TOLERANCE`](crate::Z_TOLERANCE),
/// the column collapses to a single broadcast value; otherwise it carries one value per
/// point (paths) or per feature (circles). On the wire both forms are a plain list, with
/// broadcast distinguished by length 1, so the conversion impls below are the only place
/// that length is ever inspected.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<f64>", into = "Vec<f64>")]
pub enum ZValues {
    /// One value shared by every point in the batch.
    Uniform(f64),
    /// One value per point, in feature order.
    PerElement(Vec<f64>),
}

impl ZValues {
    /// Collapse a batch of z samples to a broadcast value when they all agree within
    /// tolerance of the first. An empty batch stays per-element and is absent on the wire.
    pub fn compress(samples: Vec<f64>) -> Self {
        match samples.first() {
            Some(&first) if samples.iter().all(|z| (z - first).abs() <= Z_TOLERANCE) => {
                ZValues::Uniform(first)
            }
            _ => ZValues::PerElement(samples),
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            ZValues::Uniform(_) => false,
            ZValues::PerElement(values) => values.is_empty(),
        }
    }
}

impl Default for ZValues {
    fn default() -> Self {
        ZValues::PerElement(Vec::new())
    }
}

impl From<Vec<f64>> for ZValues {
    fn from(values: Vec<f64>) -> Self {
        if values.len() == 1 {
            ZValues::Uniform(values[0])
        } else {
            ZValues::PerElement(values)
        }
    }
}

impl From<ZValues> for Vec<f64> {
    fn from(z: ZValues) -> Self {
        match z {
            ZValues::Uniform(value) => vec![value],
            ZValues::PerElement(values) => values,
        }
    }
}

/// Read cursor over a z column. A broadcast value is read repeatedly and never consumed;
/// per-element values are yielded front to back, and running past the end is a hard error.
pub(crate) struct ZCursor<'a> {
    values: &'a ZValues,
    next: usize,
}

impl<'a> ZCursor<'a> {
    pub fn new(values: &'a ZValues) -> Self {
        ZCursor { values, next: 0 }
    }

    pub fn next(&mut self, column: &'static str) -> Result<f64> {
        match self.values {
            ZValues::Uniform(value) => Ok(*value),
            ZValues::PerElement(values) => {
                let value = values.get(self.next).copied().ok_or(Error::BadIndex {
                    column,
                    index: self.next,
                    len: values.len(),
                })?;
                self.next += 1;
                Ok(value)
            }
        }
    }
}
