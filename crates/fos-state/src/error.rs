use fos_dict::DictError;
use fos_types::TypeError;

/// Errors from state store operations.
#[derive(Debug, thiserror::Error)]
pub enum StateError {
    /// A stored entry cannot be decoded as the requested type.
    #[error("cannot read '{entry}': {source}")]
    TypeMismatch {
        entry: String,
        #[source]
        source: TypeError,
    },

    /// A value cannot be encoded for storage.
    #[error("cannot store '{entry}': {source}")]
    Encode {
        entry: String,
        #[source]
        source: TypeError,
    },

    /// An entry or object name is not a valid word.
    #[error("invalid name: {0}")]
    InvalidName(#[source] TypeError),

    /// An object name collides with the reserved results region.
    #[error("'{0}' is reserved for results and cannot name an object")]
    ReservedName(String),

    /// The document layout does not match the expected region shape.
    #[error(transparent)]
    Dictionary(#[from] DictError),

    /// The configuration could not be read or parsed.
    #[error("invalid configuration: {0}")]
    Config(String),
}

impl StateError {
    /// Returns `true` for decode failures, which callers usually treat as
    /// schema drift rather than a fatal error.
    pub fn is_type_mismatch(&self) -> bool {
        matches!(self, Self::TypeMismatch { .. })
    }
}

/// Result alias for state store operations.
pub type StateResult<T> = Result<T, StateError>;
