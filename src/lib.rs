//! prim-pack converts streams of per-object geometric primitive records (circles, polylines,
//! polygons) between a row-oriented form, one record per object, and a deduplicated
//! column-oriented form suitable for compact transmission.
//!
//! The columnar form factors out everything that repeats across a batch of features:
//!
//! - Style maps and serialized class lists are interned into ordered unique-value tables,
//!   with a per-feature index column referencing them
//! - Z coordinates that agree within [`Z_TOLERANCE`] collapse to a single broadcast value
//! - Columns where every feature holds the default value (empty id, empty style, empty
//!   class list) are dropped from the record entirely
//!
//! Encoding consumes a `Vec` of rows and builds a fresh [`ColumnarCircle`] or
//! [`ColumnarPath`]; decoding is a pure function of the columnar record, reading the shared
//! coordinate and z buffers through explicit cursors, so a record may be decoded any number
//! of times. [`encode_message`] and [`decode_message`] walk a message envelope, swapping
//! each raw primitive collection with its columnar sibling field in place.
//!
//! Structural inconsistency inside a columnar record - an index column shorter than the
//! feature count, or a shared buffer that runs dry - surfaces as a hard [`Error`] rather
//! than being padded over, since it can only mean the record was corrupted upstream.

mod columnar;
mod decode;
mod dedup;
mod encode;
mod error;
mod message;
mod row;
mod zvalue;

pub use self::columnar::{ColumnarCircle, ColumnarPath};
pub use self::error::{Error, Result};
pub use self::message::{
    decode_message, encode_message, Data, Message, PrimitiveSet, Update,
};
pub use self::row::{Base, CircleRow, PathRow, Point3, Style};
pub use self::zvalue::ZValues;

/// Absolute tolerance used when deciding whether a batch of z coordinates can collapse to a
/// single broadcast value. Two z values within this distance of each other are treated as
/// equal by the compressor and by round-trip comparisons.
pub const Z_TOLERANCE: f64 = 1e-5;
