//! # Store Errors
//!
//! Errors produced by the store runtime itself, as opposed to the
//! entity-specific errors wrapped in [`StoreError::Entity`].

/// Errors that can occur within the store actor runtime.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The actor's channel is closed; the store task is gone.
    #[error("store closed")]
    StoreClosed,

    /// The actor dropped the response channel without replying.
    #[error("store dropped response channel")]
    StoreDropped,

    /// No record with the given ID.
    #[error("record not found: {0}")]
    NotFound(String),

    /// Insertion kept violating a uniqueness guard across all retries.
    #[error("uniqueness conflict: {0}")]
    Conflict(String),

    /// An entity-level error (validation, rejected change, ...).
    #[error("entity error: {0}")]
    Entity(Box<dyn std::error::Error + Send + Sync>),
}
