use thiserror::Error;

/// Domain error taxonomy for the service layer. Repository failures
/// propagate unchanged inside `Store`; the HTTP boundary owns the final
/// status/message mapping.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Malformed or missing required input; the operation was not attempted
    #[error("{0}")]
    Validation(String),
    /// The operation's target entity does not exist
    #[error("{0}")]
    NotFound(String),
    /// Delete blocked by existing references; rows untouched
    #[error("{0}")]
    Conflict(String),
    /// Persistence-layer failure
    #[error(transparent)]
    Store(#[from] anyhow::Error),
}
