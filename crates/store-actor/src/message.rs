//! # Store Messages
//!
//! The request protocol spoken between [`StoreClient`](crate::StoreClient)
//! and [`StoreActor`](crate::StoreActor). The variants cover the lifecycle
//! of any persistent record (insert, point lookup, filtered lookup,
//! listing, change application, removal) and use the entity's associated
//! types so payloads cannot cross entity boundaries.

use crate::entity::StoreEntity;
use crate::error::StoreError;
use tokio::sync::oneshot;

/// One-shot response channel carried by every request.
pub type Response<T> = oneshot::Sender<Result<T, StoreError>>;

/// Requests handled by a `StoreActor<T>`.
#[derive(Debug)]
pub enum StoreRequest<T: StoreEntity> {
    /// Build a record from a draft and insert it. Replies with the full
    /// record so callers see generated fields (IDs, codes, seeded history).
    Insert {
        draft: T::Draft,
        respond_to: Response<T>,
    },
    /// Point lookup by ID. `Ok(None)` when absent.
    Get {
        id: T::Id,
        respond_to: Response<Option<T>>,
    },
    /// First record matching the filter, if any.
    FindOne {
        filter: T::Filter,
        respond_to: Response<Option<T>>,
    },
    /// All records matching the filter, highest sort key first.
    List {
        filter: T::Filter,
        respond_to: Response<Vec<T>>,
    },
    /// Apply a change command to one record atomically.
    Apply {
        id: T::Id,
        change: T::Change,
        respond_to: Response<T>,
    },
    /// Hard delete.
    Remove { id: T::Id, respond_to: Response<()> },
}
