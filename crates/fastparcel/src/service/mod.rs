//! # Lifecycle Service
//!
//! The authorization and orchestration layer. Every externally triggered
//! mutation enters through [`LifecycleService`], which loads the current
//! record, runs the pure [`authorize_update`] decision, and only then sends
//! change commands to the store actors. Public tracking bypasses the
//! service and goes through [`TrackingResolver`] instead, which carries no
//! identity at all.

pub mod authorize;
pub mod error;
pub mod identity;
pub mod lifecycle;
pub mod tracking;

pub use authorize::{authorize_update, UpdateRequest};
pub use error::ServiceError;
pub use identity::{DigestHasher, IdentityProvider, PasswordHasher, Principal, TokenRegistry};
pub use lifecycle::{CreateParcelRequest, LifecycleService, ProfileUpdate, RegisterRequest};
pub use tracking::TrackingResolver;
