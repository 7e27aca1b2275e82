//! Error types for the parcel store.

use thiserror::Error;

/// Errors that can occur during parcel operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ParcelError {
    /// The requested parcel was not found.
    #[error("Parcel not found: {0}")]
    NotFound(String),

    /// The parcel data provided is invalid.
    #[error("Parcel validation error: {0}")]
    Validation(String),

    /// A generated tracking code kept colliding with existing parcels.
    #[error("Tracking code conflict: {0}")]
    TrackingConflict(String),

    /// The referenced assignee does not exist.
    #[error("Unknown agent: {0}")]
    UnknownAgent(String),

    /// The referenced assignee exists but is not a delivery agent.
    #[error("User is not a delivery agent: {0}")]
    NotAnAgent(String),

    /// The user directory could not be consulted.
    #[error("User directory error: {0}")]
    Directory(String),

    /// An error occurred while communicating with the store task.
    #[error("Store communication error: {0}")]
    StoreCommunication(String),
}

impl From<String> for ParcelError {
    fn from(msg: String) -> Self {
        ParcelError::StoreCommunication(msg)
    }
}
