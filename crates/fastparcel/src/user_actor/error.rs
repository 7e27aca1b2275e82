//! Error types for the user directory.

use thiserror::Error;

/// Errors that can occur during user operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum UserError {
    /// The requested user was not found.
    #[error("User not found: {0}")]
    NotFound(String),

    /// A user with the same email already exists.
    #[error("User already exists: {0}")]
    AlreadyExists(String),

    /// The user data provided is invalid.
    #[error("User validation error: {0}")]
    Validation(String),

    /// An error occurred while communicating with the store task.
    #[error("Store communication error: {0}")]
    StoreCommunication(String),
}

impl From<String> for UserError {
    fn from(msg: String) -> Self {
        UserError::StoreCommunication(msg)
    }
}
