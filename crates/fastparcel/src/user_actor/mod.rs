//! # User Directory
//!
//! The user store actor. Users are the actor model the lifecycle service
//! authorizes against: identity, role, block flag, and profile fields.
//! Email uniqueness is enforced at insert time by the store's conflict
//! check.
//!
//! - [`entity`]: the [`StoreEntity`](store_actor::StoreEntity)
//!   implementation, [`UserChange`], and [`UserFilter`]
//! - [`error`]: [`UserError`]
//! - [`new()`]: factory for the actor/client pair

pub mod entity;
pub mod error;

pub use entity::{UserChange, UserFilter};
pub use error::UserError;

use crate::clients::UserClient;
use crate::model::{object_id, User, UserId};
use store_actor::StoreActor;

/// Creates the user directory actor and its client. The actor has no
/// dependencies, so its run context is `()`.
pub fn new() -> (StoreActor<User>, UserClient) {
    let (actor, store_client) = StoreActor::new(32, || UserId(object_id()));
    (actor, UserClient::new(store_client))
}
