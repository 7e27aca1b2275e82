//! End-to-end tests of the lifecycle service with real store actors:
//! authorization matrix, audit-trail invariants, and admin operations.

use fastparcel::model::{ParcelStatus, Role, UserId};
use fastparcel::parcel_actor::{ParcelChange, ParcelError};
use fastparcel::runtime::ParcelSystem;
use fastparcel::service::{
    CreateParcelRequest, DigestHasher, LifecycleService, PasswordHasher, Principal, ProfileUpdate,
    RegisterRequest, ServiceError, UpdateRequest,
};
use std::sync::Arc;

fn service_for(system: &ParcelSystem) -> LifecycleService {
    LifecycleService::new(
        system.parcel_client.clone(),
        system.user_client.clone(),
        Arc::new(DigestHasher),
    )
}

async fn register(
    service: &LifecycleService,
    name: &str,
    email: &str,
    role: Role,
) -> Principal {
    let user = service
        .register_user(RegisterRequest {
            name: name.to_string(),
            email: email.to_string(),
            password: "secret-pw".to_string(),
            role: Some(role),
        })
        .await
        .expect("Failed to register user");
    Principal::new(user.id, user.role)
}

fn books_request() -> CreateParcelRequest {
    CreateParcelRequest {
        sender_name: None,
        sender_email: None,
        sender_address: None,
        sender_phone: None,
        receiver_name: "Jane Doe".to_string(),
        receiver_address: "7 Delivery Lane".to_string(),
        receiver_phone: None,
        description: "Books".to_string(),
        weight: 1.2,
        cost: 60.0,
    }
}

fn set_status(status: ParcelStatus) -> UpdateRequest {
    UpdateRequest {
        status: Some(status),
        ..Default::default()
    }
}

fn assign(agent: Option<UserId>) -> UpdateRequest {
    UpdateRequest {
        assigned_agent_id: Some(agent),
        ..Default::default()
    }
}

#[tokio::test]
async fn creation_seeds_status_history_and_sender_defaults() {
    let system = ParcelSystem::new();
    let service = service_for(&system);
    let customer = register(&service, "Alice", "alice@example.com", Role::Customer).await;

    let parcel = service
        .create_parcel(&customer, books_request())
        .await
        .expect("Failed to create parcel");

    assert_eq!(parcel.status, ParcelStatus::Pending);
    assert_eq!(parcel.customer_id, customer.id);
    assert_eq!(parcel.status_history.len(), 1);
    let first = &parcel.status_history[0];
    assert_eq!(first.status, ParcelStatus::Pending);
    assert_eq!(first.note, "Parcel request created");

    // Sender details fall back to the caller's profile, then placeholders.
    assert_eq!(parcel.sender_info.name, "Alice");
    assert_eq!(parcel.sender_info.email, "alice@example.com");
    assert_eq!(parcel.sender_info.address, "Not Provided");
    assert_eq!(parcel.sender_info.phone, "N/A");
    assert_eq!(parcel.receiver_info.phone, "N/A");
}

#[tokio::test]
async fn customer_cannot_update_own_parcel() {
    let system = ParcelSystem::new();
    let service = service_for(&system);
    let customer = register(&service, "Alice", "alice@example.com", Role::Customer).await;

    let parcel = service
        .create_parcel(&customer, books_request())
        .await
        .expect("Failed to create parcel");

    let denied = service
        .update_parcel(&customer, &parcel.id, set_status(ParcelStatus::Delivered))
        .await;
    assert!(matches!(denied, Err(ServiceError::Forbidden(_))));

    // A denied request must leave the record untouched.
    let unchanged = service
        .find_parcel(&parcel.id.0)
        .await
        .expect("Failed to re-fetch parcel");
    assert_eq!(unchanged.status, ParcelStatus::Pending);
    assert_eq!(unchanged.status_history.len(), 1);
}

#[tokio::test]
async fn agent_updates_status_only_on_assigned_parcels() {
    let system = ParcelSystem::new();
    let service = service_for(&system);
    let customer = register(&service, "Alice", "alice@example.com", Role::Customer).await;
    let agent = register(&service, "Bob", "bob@example.com", Role::Agent).await;
    let rival = register(&service, "Carol", "carol@example.com", Role::Agent).await;
    let admin = register(&service, "Root", "root@example.com", Role::Admin).await;

    let parcel = service
        .create_parcel(&customer, books_request())
        .await
        .expect("Failed to create parcel");

    // Unassigned: even a real agent is denied.
    let denied = service
        .update_parcel(&agent, &parcel.id, set_status(ParcelStatus::Picked))
        .await;
    assert!(matches!(denied, Err(ServiceError::Forbidden(_))));

    service
        .update_parcel(&admin, &parcel.id, assign(Some(agent.id.clone())))
        .await
        .expect("Admin failed to assign agent");

    // The wrong agent is still denied.
    let denied = service
        .update_parcel(&rival, &parcel.id, set_status(ParcelStatus::Picked))
        .await;
    assert!(matches!(denied, Err(ServiceError::Forbidden(_))));

    // The assigned agent may move the status but not the assignment.
    let updated = service
        .update_parcel(&agent, &parcel.id, set_status(ParcelStatus::Picked))
        .await
        .expect("Assigned agent failed to update status");
    assert_eq!(updated.status, ParcelStatus::Picked);

    let denied = service
        .update_parcel(&agent, &parcel.id, assign(None))
        .await;
    assert!(matches!(denied, Err(ServiceError::Forbidden(_))));
}

#[tokio::test]
async fn every_mutation_appends_exactly_one_entry_in_lockstep() {
    let system = ParcelSystem::new();
    let service = service_for(&system);
    let customer = register(&service, "Alice", "alice@example.com", Role::Customer).await;
    let agent = register(&service, "Bob", "bob@example.com", Role::Agent).await;
    let admin = register(&service, "Root", "root@example.com", Role::Admin).await;

    let parcel = service
        .create_parcel(&customer, books_request())
        .await
        .expect("Failed to create parcel");

    let steps: Vec<UpdateRequest> = vec![
        assign(Some(agent.id.clone())),
        set_status(ParcelStatus::Picked),
        set_status(ParcelStatus::InTransit),
        assign(None),
        set_status(ParcelStatus::Delivered),
    ];

    let mut expected_len = 1;
    for step in steps {
        let updated = service
            .update_parcel(&admin, &parcel.id, step)
            .await
            .expect("Update failed");
        expected_len += 1;
        assert_eq!(updated.status_history.len(), expected_len);
        let last = updated
            .status_history
            .last()
            .expect("History cannot be empty");
        assert_eq!(
            last.status, updated.status,
            "Trail head must match the current status"
        );
    }
}

#[tokio::test]
async fn assignment_changes_are_audited_without_moving_status() {
    let system = ParcelSystem::new();
    let service = service_for(&system);
    let customer = register(&service, "Alice", "alice@example.com", Role::Customer).await;
    let agent = register(&service, "Bob", "bob@example.com", Role::Agent).await;
    let admin = register(&service, "Root", "root@example.com", Role::Admin).await;

    let parcel = service
        .create_parcel(&customer, books_request())
        .await
        .expect("Failed to create parcel");

    let assigned = service
        .update_parcel(&admin, &parcel.id, assign(Some(agent.id.clone())))
        .await
        .expect("Assignment failed");
    assert_eq!(assigned.assigned_agent_id, Some(agent.id.clone()));
    assert_eq!(assigned.status, ParcelStatus::Pending);
    assert_eq!(assigned.status_history.len(), 2);
    assert_eq!(assigned.status_history[1].note, "New agent assigned");
    assert_eq!(assigned.status_history[1].status, ParcelStatus::Pending);

    let cleared = service
        .update_parcel(&admin, &parcel.id, assign(None))
        .await
        .expect("Unassignment failed");
    assert_eq!(cleared.assigned_agent_id, None);
    assert_eq!(cleared.status_history[2].note, "Agent removed");
}

#[tokio::test]
async fn assignment_rejects_non_agents_and_unknown_users() {
    let system = ParcelSystem::new();
    let service = service_for(&system);
    let customer = register(&service, "Alice", "alice@example.com", Role::Customer).await;
    let admin = register(&service, "Root", "root@example.com", Role::Admin).await;

    let parcel = service
        .create_parcel(&customer, books_request())
        .await
        .expect("Failed to create parcel");

    let denied = service
        .update_parcel(&admin, &parcel.id, assign(Some(customer.id.clone())))
        .await;
    assert!(matches!(denied, Err(ServiceError::Validation(_))));

    let ghost = UserId("f".repeat(24));
    let denied = service
        .update_parcel(&admin, &parcel.id, assign(Some(ghost)))
        .await;
    assert!(matches!(denied, Err(ServiceError::Validation(_))));

    // Both rejections leave the trail untouched.
    let unchanged = service
        .find_parcel(&parcel.id.0)
        .await
        .expect("Failed to re-fetch parcel");
    assert_eq!(unchanged.status_history.len(), 1);
    assert_eq!(unchanged.assigned_agent_id, None);
}

#[tokio::test]
async fn settled_parcels_refuse_further_status_changes() {
    let system = ParcelSystem::new();
    let service = service_for(&system);
    let customer = register(&service, "Alice", "alice@example.com", Role::Customer).await;
    let admin = register(&service, "Root", "root@example.com", Role::Admin).await;

    for terminal in [ParcelStatus::Delivered, ParcelStatus::Cancelled] {
        let parcel = service
            .create_parcel(&customer, books_request())
            .await
            .expect("Failed to create parcel");
        service
            .update_parcel(&admin, &parcel.id, set_status(terminal))
            .await
            .expect("Failed to settle parcel");

        let denied = service
            .update_parcel(&admin, &parcel.id, set_status(ParcelStatus::Pending))
            .await;
        assert!(
            matches!(denied, Err(ServiceError::Validation(_))),
            "{terminal} parcels must refuse status changes"
        );
    }
}

#[tokio::test]
async fn store_refuses_to_reopen_settled_parcels() {
    let system = ParcelSystem::new();
    let service = service_for(&system);
    let customer = register(&service, "Alice", "alice@example.com", Role::Customer).await;
    let admin = register(&service, "Root", "root@example.com", Role::Admin).await;

    let parcel = service
        .create_parcel(&customer, books_request())
        .await
        .expect("Failed to create parcel");
    service
        .update_parcel(&admin, &parcel.id, set_status(ParcelStatus::Delivered))
        .await
        .expect("Failed to settle parcel");

    // Bypass the service and send the change the store actor would see
    // from a caller that loaded the parcel before it settled. The actor
    // itself must refuse it.
    let raced = system
        .parcel_client
        .apply(
            parcel.id.clone(),
            ParcelChange::SetStatus {
                status: ParcelStatus::Pending,
                note: None,
            },
        )
        .await;
    assert!(matches!(raced, Err(ParcelError::Validation(_))));

    let unchanged = service
        .find_parcel(&parcel.id.0)
        .await
        .expect("Failed to re-fetch parcel");
    assert_eq!(unchanged.status, ParcelStatus::Delivered);
    assert_eq!(unchanged.status_history.len(), 2);
}

#[tokio::test]
async fn profile_update_rehashes_password_and_skips_blanks() {
    let system = ParcelSystem::new();
    let service = service_for(&system);
    let customer = register(&service, "Alice", "alice@example.com", Role::Customer).await;
    let hasher = DigestHasher;

    let updated = service
        .update_profile(
            &customer,
            &customer.id,
            ProfileUpdate {
                password: Some("new-secret".to_string()),
                ..Default::default()
            },
        )
        .await
        .expect("Profile update failed");
    assert!(hasher.verify("new-secret", &updated.password_hash));
    assert!(!hasher.verify("secret-pw", &updated.password_hash));

    // An empty password field keeps the current credential.
    let untouched = service
        .update_profile(
            &customer,
            &customer.id,
            ProfileUpdate {
                password: Some(String::new()),
                ..Default::default()
            },
        )
        .await
        .expect("Profile update failed");
    assert_eq!(untouched.password_hash, updated.password_hash);
}

#[tokio::test]
async fn listing_is_scoped_by_role() {
    let system = ParcelSystem::new();
    let service = service_for(&system);
    let alice = register(&service, "Alice", "alice@example.com", Role::Customer).await;
    let dave = register(&service, "Dave", "dave@example.com", Role::Customer).await;
    let agent = register(&service, "Bob", "bob@example.com", Role::Agent).await;
    let admin = register(&service, "Root", "root@example.com", Role::Admin).await;

    let mine = service
        .create_parcel(&alice, books_request())
        .await
        .expect("Failed to create parcel");
    service
        .create_parcel(&dave, books_request())
        .await
        .expect("Failed to create parcel");
    service
        .update_parcel(&admin, &mine.id, assign(Some(agent.id.clone())))
        .await
        .expect("Assignment failed");

    let alices = service
        .list_parcels(&alice)
        .await
        .expect("Customer listing failed");
    assert_eq!(alices.len(), 1);
    assert_eq!(alices[0].customer_id, alice.id);

    let agents = service
        .list_parcels(&agent)
        .await
        .expect("Agent listing failed");
    assert_eq!(agents.len(), 1);
    assert_eq!(agents[0].assigned_agent_id, Some(agent.id.clone()));

    let all = service
        .list_parcels(&admin)
        .await
        .expect("Admin listing failed");
    assert_eq!(all.len(), 2);
}

#[tokio::test]
async fn deletion_is_admin_only() {
    let system = ParcelSystem::new();
    let service = service_for(&system);
    let customer = register(&service, "Alice", "alice@example.com", Role::Customer).await;
    let agent = register(&service, "Bob", "bob@example.com", Role::Agent).await;
    let admin = register(&service, "Root", "root@example.com", Role::Admin).await;

    let parcel = service
        .create_parcel(&customer, books_request())
        .await
        .expect("Failed to create parcel");

    for actor in [&customer, &agent] {
        let denied = service.delete_parcel(actor, &parcel.id).await;
        assert!(matches!(denied, Err(ServiceError::Forbidden(_))));
    }

    service
        .delete_parcel(&admin, &parcel.id)
        .await
        .expect("Admin deletion failed");
    let gone = service.find_parcel(&parcel.id.0).await;
    assert!(matches!(gone, Err(ServiceError::NotFound)));
}

#[tokio::test]
async fn duplicate_emails_are_rejected_at_registration() {
    let system = ParcelSystem::new();
    let service = service_for(&system);
    register(&service, "Alice", "alice@example.com", Role::Customer).await;

    let duplicate = service
        .register_user(RegisterRequest {
            name: "Impostor".to_string(),
            email: "alice@example.com".to_string(),
            password: "secret-pw".to_string(),
            role: None,
        })
        .await;
    assert!(matches!(duplicate, Err(ServiceError::Validation(_))));
}

mod with_mocked_store {
    use super::*;
    use fastparcel::clients::{ParcelClient, UserClient};
    use fastparcel::model::{Parcel, User};
    use store_actor::mock::MockStoreClient;
    use store_actor::StoreError;

    fn mocked_service(
        parcels: &MockStoreClient<Parcel>,
        users: &MockStoreClient<User>,
    ) -> LifecycleService {
        LifecycleService::new(
            ParcelClient::new(parcels.client()),
            UserClient::new(users.client()),
            Arc::new(DigestHasher),
        )
    }

    #[tokio::test]
    async fn store_failure_surfaces_as_internal() {
        let mut parcels = MockStoreClient::<Parcel>::new();
        let users = MockStoreClient::<User>::new();
        parcels.expect_get().return_err(StoreError::StoreClosed);
        let service = mocked_service(&parcels, &users);

        let admin = Principal::new(UserId("a".repeat(24)), Role::Admin);
        let result = service
            .update_parcel(
                &admin,
                &fastparcel::model::ParcelId("b".repeat(24)),
                UpdateRequest::default(),
            )
            .await;
        assert!(matches!(result, Err(ServiceError::Internal(_))));
        parcels.verify();
    }

    #[tokio::test]
    async fn missing_parcel_is_not_found_before_authorization() {
        let mut parcels = MockStoreClient::<Parcel>::new();
        let users = MockStoreClient::<User>::new();
        parcels.expect_get().return_ok(None);
        let service = mocked_service(&parcels, &users);

        // Even a customer, who could never pass the matrix, sees 404 here.
        let customer = Principal::new(UserId("c".repeat(24)), Role::Customer);
        let result = service
            .update_parcel(
                &customer,
                &fastparcel::model::ParcelId("b".repeat(24)),
                UpdateRequest::default(),
            )
            .await;
        assert!(matches!(result, Err(ServiceError::NotFound)));
        parcels.verify();
    }
}
