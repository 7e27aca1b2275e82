//! # Parcel Store
//!
//! The parcel store actor: durable-within-the-process persistence of
//! [`Parcel`](crate::model::Parcel) records and the schema-level invariants
//! (required fields, status enum membership, tracking-code uniqueness).
//!
//! The store applies every change command atomically but unconditionally;
//! role gating happens one layer up, in
//! [`LifecycleService`](crate::service::LifecycleService).
//!
//! - [`entity`]: the [`StoreEntity`](store_actor::StoreEntity)
//!   implementation, [`ParcelChange`], and [`ParcelFilter`]
//! - [`error`]: [`ParcelError`]
//! - [`new()`]: factory for the actor/client pair

pub mod entity;
pub mod error;

pub use entity::{ParcelChange, ParcelFilter};
pub use error::ParcelError;

use crate::clients::ParcelClient;
use crate::model::{object_id, Parcel, ParcelId};
use store_actor::StoreActor;

/// Creates the parcel store actor and its client. The actor must be run
/// with a user-directory client as context:
///
/// ```ignore
/// let (actor, client) = parcel_actor::new();
/// tokio::spawn(actor.run(user_store_client));
/// ```
pub fn new() -> (StoreActor<Parcel>, ParcelClient) {
    let (actor, store_client) = StoreActor::new(32, || ParcelId(object_id()));
    (actor, ParcelClient::new(store_client))
}
