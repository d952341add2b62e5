/// Errors from dictionary operations.
#[derive(Debug, thiserror::Error)]
pub enum DictError {
    /// A sub-dictionary was required but the key holds a value.
    #[error("entry '{key}' is a value, not a dictionary")]
    NotADictionary { key: String },

    /// A value was required but the key holds a sub-dictionary.
    #[error("entry '{key}' is a dictionary, not a value")]
    NotAValue { key: String },

    /// Serialization or deserialization failure.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// I/O error while loading or saving a dictionary file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result alias for dictionary operations.
pub type DictResult<T> = Result<T, DictError>;
