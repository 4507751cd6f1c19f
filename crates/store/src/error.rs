use thiserror::Error;

/// Failure inside a storage backend.
///
/// Kept separate from the domain taxonomy so store implementations do not
/// depend on HTTP-facing semantics; the conversion below folds every store
/// failure into [`factura_core::Error::StoreFailure`] with its message intact.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// A lock guarding the in-memory state was poisoned by a panicking writer.
    #[error("store lock poisoned")]
    Poisoned,

    /// The backend could not serve the request.
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

impl StoreError {
    pub fn unavailable(msg: impl Into<String>) -> Self {
        Self::Unavailable(msg.into())
    }
}

impl From<StoreError> for factura_core::Error {
    fn from(err: StoreError) -> Self {
        factura_core::Error::store(err.to_string())
    }
}
