//! # StoreHandle Trait
//!
//! Common surface for domain-specific client wrappers. A wrapper exposes its
//! inner [`StoreClient`] and an error mapping, and inherits `get` and
//! `remove` so that boilerplate is written once.

use crate::{StoreClient, StoreEntity, StoreError};
use async_trait::async_trait;

/// Trait for domain clients wrapping a [`StoreClient`].
///
/// ```ignore
/// #[async_trait]
/// impl StoreHandle<Parcel> for ParcelClient {
///     type Error = ParcelError;
///     fn inner(&self) -> &StoreClient<Parcel> { &self.inner }
///     fn map_error(e: StoreError) -> ParcelError { ... }
/// }
///
/// // get() and remove() come for free:
/// let parcel = client.get(id).await?;
/// ```
#[async_trait]
pub trait StoreHandle<T: StoreEntity>: Send + Sync {
    /// The wrapper's error type.
    type Error: Send + Sync;

    /// Access the inner generic client.
    fn inner(&self) -> &StoreClient<T>;

    /// Map store runtime errors to the wrapper's error type.
    fn map_error(e: StoreError) -> Self::Error;

    /// Fetch a record by ID.
    #[tracing::instrument(skip(self))]
    async fn get(&self, id: T::Id) -> Result<Option<T>, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().get(id).await.map_err(Self::map_error)
    }

    /// Hard-delete a record by ID.
    #[tracing::instrument(skip(self))]
    async fn remove(&self, id: T::Id) -> Result<(), Self::Error> {
        tracing::debug!("Sending request");
        self.inner().remove(id).await.map_err(Self::map_error)
    }
}
