//! The parcel-update authorization matrix as one pure function.
//!
//! `authorize_update` sees the caller, the current record, and the requested
//! change, and decides before any state is touched. Keeping the decision in
//! one place means a denied request provably leaves the parcel unchanged.

use crate::model::{Parcel, ParcelStatus, Role, UserId};
use crate::service::error::ServiceError;
use crate::service::identity::Principal;

/// A requested parcel mutation, already parsed and normalized.
///
/// `assigned_agent_id` distinguishes "leave assignment alone" (`None`) from
/// "clear the assignment" (`Some(None)`).
#[derive(Debug, Clone, Default)]
pub struct UpdateRequest {
    pub status: Option<ParcelStatus>,
    pub note: Option<String>,
    pub assigned_agent_id: Option<Option<UserId>>,
}

/// Decides whether `actor` may apply `request` to `parcel`.
///
/// Customers may not update parcels at all. Agents may update the status of
/// parcels assigned to them and nothing else. Admins may do everything.
pub fn authorize_update(
    actor: &Principal,
    parcel: &Parcel,
    request: &UpdateRequest,
) -> Result<(), ServiceError> {
    match actor.role {
        Role::Admin => Ok(()),
        Role::Customer => Err(ServiceError::Forbidden(
            "customers cannot update parcels".to_string(),
        )),
        Role::Agent => {
            if request.assigned_agent_id.is_some() {
                return Err(ServiceError::Forbidden(
                    "agents cannot change assignments".to_string(),
                ));
            }
            if parcel.assigned_agent_id.as_ref() != Some(&actor.id) {
                return Err(ServiceError::Forbidden(
                    "parcel is not assigned to this agent".to_string(),
                ));
            }
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Parcel, ParcelDraft, ParcelId, ReceiverInfo, SenderInfo};
    use store_actor::StoreEntity;

    fn parcel_assigned_to(agent: Option<&str>) -> Parcel {
        let draft = ParcelDraft {
            sender: SenderInfo {
                name: "Sender".to_string(),
                email: "sender@example.com".to_string(),
                address: "1 Origin Way".to_string(),
                phone: "N/A".to_string(),
            },
            receiver: ReceiverInfo {
                name: "Receiver".to_string(),
                address: "2 Destination Rd".to_string(),
                phone: "N/A".to_string(),
            },
            description: "Books".to_string(),
            weight: 1.2,
            cost: 60.0,
            customer_id: UserId("c".repeat(24)),
        };
        let mut parcel = Parcel::from_draft(ParcelId("a".repeat(24)), &draft)
            .unwrap_or_else(|e| panic!("draft should be valid: {e}"));
        parcel.assigned_agent_id = agent.map(|a| UserId(a.to_string()));
        parcel
    }

    fn principal(role: Role, id: &str) -> Principal {
        Principal::new(UserId(id.to_string()), role)
    }

    fn status_request() -> UpdateRequest {
        UpdateRequest {
            status: Some(ParcelStatus::Picked),
            ..Default::default()
        }
    }

    #[test]
    fn admin_may_change_anything() {
        let parcel = parcel_assigned_to(None);
        let admin = principal(Role::Admin, "admin-1");
        let request = UpdateRequest {
            status: Some(ParcelStatus::InTransit),
            note: None,
            assigned_agent_id: Some(Some(UserId("agent-1".to_string()))),
        };
        assert!(authorize_update(&admin, &parcel, &request).is_ok());
    }

    #[test]
    fn customer_is_always_denied() {
        let parcel = parcel_assigned_to(None);
        let customer = principal(Role::Customer, &"c".repeat(24));
        let denied = authorize_update(&customer, &parcel, &status_request());
        assert!(matches!(denied, Err(ServiceError::Forbidden(_))));

        // Even an empty update is not theirs to make.
        let denied = authorize_update(&customer, &parcel, &UpdateRequest::default());
        assert!(matches!(denied, Err(ServiceError::Forbidden(_))));
    }

    #[test]
    fn agent_may_update_status_of_own_parcel() {
        let parcel = parcel_assigned_to(Some("agent-1"));
        let agent = principal(Role::Agent, "agent-1");
        assert!(authorize_update(&agent, &parcel, &status_request()).is_ok());
    }

    #[test]
    fn agent_is_denied_on_unassigned_parcel() {
        let parcel = parcel_assigned_to(None);
        let agent = principal(Role::Agent, "agent-1");
        let denied = authorize_update(&agent, &parcel, &status_request());
        assert!(matches!(denied, Err(ServiceError::Forbidden(_))));
    }

    #[test]
    fn agent_is_denied_on_someone_elses_parcel() {
        let parcel = parcel_assigned_to(Some("agent-2"));
        let agent = principal(Role::Agent, "agent-1");
        let denied = authorize_update(&agent, &parcel, &status_request());
        assert!(matches!(denied, Err(ServiceError::Forbidden(_))));
    }

    #[test]
    fn agent_may_not_touch_assignment_even_on_own_parcel() {
        let parcel = parcel_assigned_to(Some("agent-1"));
        let agent = principal(Role::Agent, "agent-1");
        let request = UpdateRequest {
            status: None,
            note: None,
            assigned_agent_id: Some(None),
        };
        let denied = authorize_update(&agent, &parcel, &request);
        assert!(matches!(denied, Err(ServiceError::Forbidden(_))));
    }
}
