use thiserror::Error;

use crate::value::TypeTag;

/// Errors produced by type operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TypeError {
    #[error("type mismatch: expected {expected}, found {found}")]
    Mismatch { expected: TypeTag, found: TypeTag },

    #[error("label {value} out of range for {target}")]
    OutOfRange { value: i128, target: &'static str },

    #[error("scalar {value} out of range for {target}")]
    ScalarOutOfRange { value: String, target: &'static str },

    #[error("list element {index}: {source}")]
    Element {
        index: usize,
        #[source]
        source: Box<TypeError>,
    },

    #[error("invalid word {word:?}: {reason}")]
    InvalidWord { word: String, reason: String },
}
