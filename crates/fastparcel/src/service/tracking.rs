//! Public tracking lookups.
//!
//! This is the one read path with no caller identity: anyone holding a
//! tracking code (or an internal ID) can fetch the parcel it names. The
//! code itself is the capability.

use crate::clients::ParcelClient;
use crate::model::Parcel;
use crate::service::error::ServiceError;
use tracing::instrument;

/// Resolves a tracking key to its parcel, or [`ServiceError::NotFound`].
#[derive(Clone)]
pub struct TrackingResolver {
    parcels: ParcelClient,
}

impl TrackingResolver {
    pub fn new(parcels: ParcelClient) -> Self {
        Self { parcels }
    }

    /// Dual-resolution lookup over the single key slot: ID-shaped keys are
    /// tried as IDs first, everything falls back to the tracking-code index.
    #[instrument(skip(self))]
    pub async fn track(&self, key: &str) -> Result<Parcel, ServiceError> {
        self.parcels
            .resolve(key)
            .await?
            .ok_or(ServiceError::NotFound)
    }
}
