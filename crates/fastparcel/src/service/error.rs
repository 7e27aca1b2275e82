//! Service-level error taxonomy. Store and entity failures fold into these
//! five cases; the HTTP layer maps each case to exactly one status code.

use crate::parcel_actor::ParcelError;
use crate::user_actor::UserError;
use thiserror::Error;

/// Errors surfaced by the lifecycle service and tracking resolver.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Malformed or semantically invalid input.
    #[error("validation failed: {0}")]
    Validation(String),

    /// No identity was presented, or it could not be authenticated.
    #[error("authentication required")]
    Unauthorized,

    /// The caller is authenticated but not allowed to do this.
    #[error("forbidden: {0}")]
    Forbidden(String),

    /// The referenced record does not exist.
    #[error("not found")]
    NotFound,

    /// Infrastructure failure. The message is for the log, not the caller.
    #[error("internal error: {0}")]
    Internal(String),
}

impl From<ParcelError> for ServiceError {
    fn from(e: ParcelError) -> Self {
        match e {
            ParcelError::NotFound(_) => ServiceError::NotFound,
            ParcelError::Validation(msg) => ServiceError::Validation(msg),
            ParcelError::TrackingConflict(msg) => ServiceError::Validation(msg),
            ParcelError::UnknownAgent(id) => {
                ServiceError::Validation(format!("no such agent: {id}"))
            }
            ParcelError::NotAnAgent(id) => {
                ServiceError::Validation(format!("user {id} is not an agent"))
            }
            ParcelError::Directory(msg) | ParcelError::StoreCommunication(msg) => {
                ServiceError::Internal(msg)
            }
        }
    }
}

impl From<UserError> for ServiceError {
    fn from(e: UserError) -> Self {
        match e {
            UserError::NotFound(_) => ServiceError::NotFound,
            UserError::AlreadyExists(_) => {
                ServiceError::Validation("email is already registered".to_string())
            }
            UserError::Validation(msg) => ServiceError::Validation(msg),
            UserError::StoreCommunication(msg) => ServiceError::Internal(msg),
        }
    }
}
