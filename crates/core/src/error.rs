//! Error taxonomy shared by every layer.

use thiserror::Error;

/// Result type used across the workspace.
pub type Result<T> = core::result::Result<T, Error>;

/// End-to-end failure taxonomy.
///
/// Every fallible operation in the workspace reports through one of these
/// variants; the HTTP layer maps each variant to exactly one status code.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// The caller's identity could not be established.
    #[error("unauthenticated: {0}")]
    Unauthenticated(String),

    /// The caller is known but lacks the required capability.
    #[error("forbidden: {0}")]
    Forbidden(String),

    /// The referenced entity does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// A request parameter or payload failed validation.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The storage layer failed while serving the request.
    #[error("store failure: {0}")]
    StoreFailure(String),
}

impl Error {
    pub fn unauthenticated(msg: impl Into<String>) -> Self {
        Self::Unauthenticated(msg.into())
    }

    pub fn forbidden(msg: impl Into<String>) -> Self {
        Self::Forbidden(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    pub fn store(msg: impl Into<String>) -> Self {
        Self::StoreFailure(msg.into())
    }
}
