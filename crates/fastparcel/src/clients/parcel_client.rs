//! # Parcel Client
//!
//! High-level API for the parcel store. Wraps a `StoreClient<Parcel>` and
//! exposes domain methods, including the dual-resolution lookup that powers
//! public tracking.

use crate::model::{Lookup, Parcel, ParcelDraft, ParcelId};
use crate::parcel_actor::{ParcelChange, ParcelError, ParcelFilter};
use async_trait::async_trait;
use store_actor::{StoreClient, StoreError, StoreHandle};
use tracing::{debug, instrument};

/// Client for interacting with the parcel store actor.
#[derive(Clone)]
pub struct ParcelClient {
    inner: StoreClient<Parcel>,
}

impl ParcelClient {
    pub fn new(inner: StoreClient<Parcel>) -> Self {
        Self { inner }
    }

    /// Access the raw store client (used to wire the parcel actor's
    /// context when another store needs it).
    pub fn store(&self) -> &StoreClient<Parcel> {
        &self.inner
    }
}

#[async_trait]
impl StoreHandle<Parcel> for ParcelClient {
    type Error = ParcelError;

    fn inner(&self) -> &StoreClient<Parcel> {
        &self.inner
    }

    fn map_error(e: StoreError) -> ParcelError {
        match e {
            StoreError::NotFound(id) => ParcelError::NotFound(id),
            StoreError::Conflict(msg) => ParcelError::TrackingConflict(msg),
            StoreError::Entity(boxed) => boxed
                .downcast::<ParcelError>()
                .map(|e| *e)
                .unwrap_or_else(|e| ParcelError::StoreCommunication(e.to_string())),
            other => ParcelError::StoreCommunication(other.to_string()),
        }
    }
}

impl ParcelClient {
    /// Creates a parcel from a fully defaulted draft. The store assigns the
    /// identifier and a unique tracking code, seeds the history, and
    /// returns the complete record.
    #[instrument(skip(self, draft))]
    pub async fn create(&self, draft: ParcelDraft) -> Result<Parcel, ParcelError> {
        debug!("Sending request");
        self.inner.insert(draft).await.map_err(Self::map_error)
    }

    /// Lookup by public tracking code.
    #[instrument(skip(self))]
    pub async fn find_by_tracking(&self, code: &str) -> Result<Option<Parcel>, ParcelError> {
        debug!("Sending request");
        self.inner
            .find_one(ParcelFilter::TrackingCode(code.to_string()))
            .await
            .map_err(Self::map_error)
    }

    /// Dual resolution over a single input slot: a 24-hex-shaped key is
    /// tried as an internal ID first, then falls back to a tracking-code
    /// lookup. An ergonomic affordance, not a security boundary.
    #[instrument(skip(self))]
    pub async fn resolve(&self, key: &str) -> Result<Option<Parcel>, ParcelError> {
        match Lookup::parse(key) {
            Lookup::ById(id) => {
                if let Some(parcel) = self.get(id).await? {
                    return Ok(Some(parcel));
                }
                self.find_by_tracking(key).await
            }
            Lookup::ByCode(code) => self.find_by_tracking(&code).await,
        }
    }

    /// Role-filtered listing, newest first.
    #[instrument(skip(self))]
    pub async fn list(&self, filter: ParcelFilter) -> Result<Vec<Parcel>, ParcelError> {
        debug!("Sending request");
        self.inner.list(filter).await.map_err(Self::map_error)
    }

    /// Applies a pre-authorized change command atomically and returns the
    /// updated record.
    #[instrument(skip(self))]
    pub async fn apply(&self, id: ParcelId, change: ParcelChange) -> Result<Parcel, ParcelError> {
        debug!("Sending request");
        self.inner.apply(id, change).await.map_err(Self::map_error)
    }
}
