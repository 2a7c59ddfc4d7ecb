//! Error types for Horizon Datepicker core systems.

/// Deferred-task errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DeferredError {
    /// The task ID is invalid, already fired, or already cancelled.
    #[error("Invalid or expired deferred task ID")]
    InvalidTaskId,
}

/// A specialized Result type for core operations.
pub type Result<T> = std::result::Result<T, DeferredError>;
