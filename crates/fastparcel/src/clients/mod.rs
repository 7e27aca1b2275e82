//! Typed clients over the generic store clients. These hide the message
//! passing and translate [`StoreError`](store_actor::StoreError) back into
//! the per-entity error enums.

pub mod parcel_client;
pub mod user_client;

pub use parcel_client::ParcelClient;
pub use user_client::UserClient;
