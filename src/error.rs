//! Error type shared by chains and tables.

use crate::datum::{DatumKind, Field};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("table size must be positive, got {0}")]
    InvalidSize(i64),
    #[error("unrecognized type tag {0}")]
    UnrecognizedType(i32),
    #[error("unrecognized field selector {0}")]
    UnrecognizedField(i32),
    #[error("{field} of kind {found} given to a table expecting {expected}")]
    KindMismatch {
        field: Field,
        expected: DatumKind,
        found: DatumKind,
    },
    #[error("value is already present in bucket {bucket}")]
    DuplicateValue { bucket: usize },
    #[error("value not found in bucket {bucket}")]
    ValueNotFound { bucket: usize },
    #[error("table holds no values")]
    Empty,
    #[error("node handle does not refer to a live data node")]
    StaleNode,
    #[error("node handle was issued by a different chain")]
    WrongChain,
}

pub type Result<T> = core::result::Result<T, Error>;
