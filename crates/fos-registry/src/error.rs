//! Error types for registry operations.

use fos_types::TypeError;
use thiserror::Error;

/// Errors that can occur during registry operations.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// No object is registered under this name.
    #[error("object not found: {name}")]
    NotFound { name: String },

    /// An object is already registered under this name.
    #[error("object already registered: {name}")]
    AlreadyRegistered { name: String },

    /// The object exists but is not of the requested type.
    #[error("object {name} is not a {expected}")]
    WrongType { name: String, expected: &'static str },

    /// The object name is not a valid word.
    #[error(transparent)]
    InvalidName(#[from] TypeError),
}

/// Convenience type alias for registry operations.
pub type Result<T> = std::result::Result<T, RegistryError>;
