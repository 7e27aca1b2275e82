//! [`StoreEntity`] implementation for [`Parcel`].
//!
//! A change command mutates the status field and appends the matching
//! history entry inside one store message, so the core invariant (the
//! latest history entry's status equals the parcel's status) can never be
//! observed broken, even under concurrent writers.

use crate::model::{
    generate_tracking_code, Parcel, ParcelDraft, ParcelId, ParcelStatus, Role, User, UserId,
};
use crate::parcel_actor::ParcelError;
use async_trait::async_trait;
use chrono::Utc;
use store_actor::{StoreClient, StoreEntity};

/// Change commands accepted by the parcel store. Callers must already be
/// authorized; the store applies commands unconditionally (the role gate
/// lives in the lifecycle service).
#[derive(Debug)]
pub enum ParcelChange {
    /// Set the status and append a history entry. Without a note, the
    /// generated default is `Status updated to <status>`. Rejected when the
    /// parcel is already in a terminal state.
    SetStatus {
        status: ParcelStatus,
        note: Option<String>,
    },
    /// (Re)assign or remove the delivery agent. Appends a history entry
    /// without changing the status; assignment and status advancement are
    /// independent operations a caller may compose.
    AssignAgent { agent: Option<UserId> },
}

/// Lookup filters over the parcel store.
#[derive(Debug, Clone)]
pub enum ParcelFilter {
    Any,
    ForCustomer(UserId),
    AssignedTo(UserId),
    TrackingCode(String),
}

#[async_trait]
impl StoreEntity for Parcel {
    type Id = ParcelId;
    type Draft = ParcelDraft;
    type Change = ParcelChange;
    type Filter = ParcelFilter;
    /// The user directory, consulted to validate agent assignments.
    type Context = StoreClient<User>;
    type Error = ParcelError;

    fn from_draft(id: ParcelId, draft: &ParcelDraft) -> Result<Self, ParcelError> {
        if draft.receiver.name.trim().is_empty() {
            return Err(ParcelError::Validation("receiver name is required".into()));
        }
        if draft.receiver.address.trim().is_empty() {
            return Err(ParcelError::Validation(
                "receiver address is required".into(),
            ));
        }
        if draft.description.trim().is_empty() {
            return Err(ParcelError::Validation("description is required".into()));
        }
        if !(draft.weight.is_finite() && draft.weight >= 0.0) {
            return Err(ParcelError::Validation(
                "weight must be a non-negative number".into(),
            ));
        }
        if !(draft.cost.is_finite() && draft.cost >= 0.0) {
            return Err(ParcelError::Validation(
                "cost must be a non-negative number".into(),
            ));
        }

        let now = Utc::now();
        Ok(Parcel {
            id,
            tracking_id: generate_tracking_code(),
            sender_info: draft.sender.clone(),
            receiver_info: draft.receiver.clone(),
            description: draft.description.clone(),
            weight: draft.weight,
            cost: draft.cost,
            customer_id: draft.customer_id.clone(),
            assigned_agent_id: None,
            status: ParcelStatus::Pending,
            status_history: vec![crate::model::StatusEntry {
                status: ParcelStatus::Pending,
                note: "Parcel request created".to_string(),
                timestamp: now,
            }],
            created_at: now,
            updated_at: now,
        })
    }

    /// Tracking codes are unique per store; a collision makes the actor
    /// re-draft, which draws a fresh random suffix.
    fn conflicts_with(&self, existing: &Self) -> bool {
        self.tracking_id == existing.tracking_id
    }

    fn matches(&self, filter: &ParcelFilter) -> bool {
        match filter {
            ParcelFilter::Any => true,
            ParcelFilter::ForCustomer(id) => &self.customer_id == id,
            ParcelFilter::AssignedTo(id) => self.assigned_agent_id.as_ref() == Some(id),
            ParcelFilter::TrackingCode(code) => &self.tracking_id == code,
        }
    }

    /// Newest first by creation time.
    fn sort_key(&self) -> i64 {
        self.created_at.timestamp_millis()
    }

    async fn apply(
        &mut self,
        change: ParcelChange,
        users: &StoreClient<User>,
    ) -> Result<(), ParcelError> {
        match change {
            ParcelChange::SetStatus { status, note } => {
                // Checked here, not only in the service, so a racing update
                // that loaded the parcel before it settled is still refused
                // inside the actor's atomic boundary.
                if self.status.is_terminal() {
                    return Err(ParcelError::Validation(format!(
                        "parcel is already {} and can no longer change status",
                        self.status
                    )));
                }
                self.record_status(status, note);
                Ok(())
            }
            ParcelChange::AssignAgent { agent } => {
                if let Some(agent_id) = &agent {
                    let user = users
                        .get(agent_id.clone())
                        .await
                        .map_err(|e| ParcelError::Directory(e.to_string()))?
                        .ok_or_else(|| ParcelError::UnknownAgent(agent_id.to_string()))?;
                    if user.role != Role::Agent {
                        return Err(ParcelError::NotAnAgent(agent_id.to_string()));
                    }
                }
                self.record_assignment(agent);
                Ok(())
            }
        }
    }
}
