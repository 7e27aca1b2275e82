//! Parcel and user operations, gated by the authorization matrix.

use crate::clients::{ParcelClient, UserClient};
use crate::model::{
    AccountStatus, Parcel, ParcelDraft, ParcelId, ReceiverInfo, Role, SenderInfo, User, UserDraft,
    UserId,
};
use crate::parcel_actor::{ParcelChange, ParcelFilter};
use crate::service::authorize::{authorize_update, UpdateRequest};
use crate::service::error::ServiceError;
use crate::service::identity::{PasswordHasher, Principal};
use crate::user_actor::UserChange;
use std::sync::Arc;
use store_actor::StoreHandle;
use tracing::{info, instrument, warn};

/// Input for parcel creation. Sender details are optional; anything missing
/// is filled from the caller's own profile or a placeholder.
#[derive(Debug, Clone)]
pub struct CreateParcelRequest {
    pub sender_name: Option<String>,
    pub sender_email: Option<String>,
    pub sender_address: Option<String>,
    pub sender_phone: Option<String>,
    pub receiver_name: String,
    pub receiver_address: String,
    pub receiver_phone: Option<String>,
    pub description: String,
    pub weight: f64,
    pub cost: f64,
}

/// Input for account registration.
#[derive(Debug, Clone)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: Option<Role>,
}

/// Self-service profile fields. `None` leaves a field alone; an empty
/// password string is treated as "keep the current password".
#[derive(Debug, Clone, Default)]
pub struct ProfileUpdate {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub avatar: Option<String>,
    pub password: Option<String>,
}

/// The orchestration layer over both stores.
///
/// Holds a client per store actor and the password hasher. Cheap to clone;
/// every handler shares the same underlying channels.
#[derive(Clone)]
pub struct LifecycleService {
    parcels: ParcelClient,
    users: UserClient,
    hasher: Arc<dyn PasswordHasher>,
}

impl LifecycleService {
    pub fn new(parcels: ParcelClient, users: UserClient, hasher: Arc<dyn PasswordHasher>) -> Self {
        Self {
            parcels,
            users,
            hasher,
        }
    }

    /// Creates a parcel on behalf of the caller. The caller becomes the
    /// owning customer regardless of role; sender details default to the
    /// caller's profile, then to placeholders.
    #[instrument(skip(self, request), fields(actor = %actor.id))]
    pub async fn create_parcel(
        &self,
        actor: &Principal,
        request: CreateParcelRequest,
    ) -> Result<Parcel, ServiceError> {
        let profile = self.users.get(actor.id.clone()).await?;

        let sender = SenderInfo {
            name: request
                .sender_name
                .or_else(|| profile.as_ref().map(|p| p.name.clone()))
                .unwrap_or_else(|| "Not Provided".to_string()),
            email: request
                .sender_email
                .or_else(|| profile.as_ref().map(|p| p.email.clone()))
                .unwrap_or_default(),
            address: request
                .sender_address
                .unwrap_or_else(|| "Not Provided".to_string()),
            phone: request.sender_phone.unwrap_or_else(|| "N/A".to_string()),
        };
        let receiver = ReceiverInfo {
            name: request.receiver_name,
            address: request.receiver_address,
            phone: request.receiver_phone.unwrap_or_else(|| "N/A".to_string()),
        };
        let draft = ParcelDraft {
            sender,
            receiver,
            description: request.description,
            weight: request.weight,
            cost: request.cost,
            customer_id: actor.id.clone(),
        };

        let parcel = self.parcels.create(draft).await?;
        info!(parcel_id = %parcel.id, tracking = %parcel.tracking_id, "Parcel created");
        Ok(parcel)
    }

    /// Fetches one parcel by internal ID or tracking code.
    #[instrument(skip(self))]
    pub async fn find_parcel(&self, key: &str) -> Result<Parcel, ServiceError> {
        self.parcels
            .resolve(key)
            .await?
            .ok_or(ServiceError::NotFound)
    }

    /// Lists parcels visible to the caller: customers see their own,
    /// agents see their assignments, admins see everything. Newest first.
    #[instrument(skip(self), fields(actor = %actor.id, role = %actor.role))]
    pub async fn list_parcels(&self, actor: &Principal) -> Result<Vec<Parcel>, ServiceError> {
        let filter = match actor.role {
            Role::Customer => ParcelFilter::ForCustomer(actor.id.clone()),
            Role::Agent => ParcelFilter::AssignedTo(actor.id.clone()),
            Role::Admin => ParcelFilter::Any,
        };
        Ok(self.parcels.list(filter).await?)
    }

    /// Applies a status change and/or reassignment. Authorization runs
    /// against the current record before anything is sent to the store, so
    /// a denied request cannot leave a partial write behind.
    #[instrument(skip(self, request), fields(actor = %actor.id, parcel = %id))]
    pub async fn update_parcel(
        &self,
        actor: &Principal,
        id: &ParcelId,
        request: UpdateRequest,
    ) -> Result<Parcel, ServiceError> {
        let parcel = self
            .parcels
            .get(id.clone())
            .await?
            .ok_or(ServiceError::NotFound)?;

        authorize_update(actor, &parcel, &request)?;

        // Fast path; the store re-checks inside the atomic apply, so a
        // racing update cannot slip a status change past a settling parcel.
        if request.status.is_some() && parcel.status.is_terminal() {
            warn!(status = %parcel.status, "Rejected status change on settled parcel");
            return Err(ServiceError::Validation(format!(
                "parcel is already {} and can no longer change status",
                parcel.status
            )));
        }

        let mut updated = parcel;
        if let Some(agent) = request.assigned_agent_id {
            updated = self
                .parcels
                .apply(id.clone(), ParcelChange::AssignAgent { agent })
                .await?;
        }
        if let Some(status) = request.status {
            updated = self
                .parcels
                .apply(
                    id.clone(),
                    ParcelChange::SetStatus {
                        status,
                        note: request.note,
                    },
                )
                .await?;
        }
        Ok(updated)
    }

    /// Hard-deletes a parcel. Admin only.
    #[instrument(skip(self), fields(actor = %actor.id, parcel = %id))]
    pub async fn delete_parcel(
        &self,
        actor: &Principal,
        id: &ParcelId,
    ) -> Result<(), ServiceError> {
        require_admin(actor)?;
        self.parcels.remove(id.clone()).await?;
        info!("Parcel deleted");
        Ok(())
    }

    /// Registers a new account. Emails are unique across the directory.
    #[instrument(skip(self, request), fields(email = %request.email))]
    pub async fn register_user(&self, request: RegisterRequest) -> Result<User, ServiceError> {
        if self.users.find_by_email(&request.email).await?.is_some() {
            return Err(ServiceError::Validation(
                "email is already registered".to_string(),
            ));
        }
        if request.password.len() < 6 {
            return Err(ServiceError::Validation(
                "password must be at least 6 characters".to_string(),
            ));
        }
        let draft = UserDraft {
            name: request.name,
            email: request.email,
            password_hash: self.hasher.hash(&request.password),
            role: request.role.unwrap_or(Role::Customer),
        };
        let user = self.users.register(draft).await?;
        info!(user_id = %user.id, role = %user.role, "User registered");
        Ok(user)
    }

    /// Lists accounts, optionally filtered by role. Admin only.
    #[instrument(skip(self), fields(actor = %actor.id))]
    pub async fn list_users(
        &self,
        actor: &Principal,
        role: Option<Role>,
    ) -> Result<Vec<User>, ServiceError> {
        require_admin(actor)?;
        Ok(self.users.list(role).await?)
    }

    /// Changes an account's role. Admin only.
    #[instrument(skip(self), fields(actor = %actor.id, user = %id))]
    pub async fn set_user_role(
        &self,
        actor: &Principal,
        id: &UserId,
        role: Role,
    ) -> Result<User, ServiceError> {
        require_admin(actor)?;
        Ok(self.users.set_role(id.clone(), role).await?)
    }

    /// Activates or blocks an account. Admin only.
    #[instrument(skip(self), fields(actor = %actor.id, user = %id))]
    pub async fn set_user_status(
        &self,
        actor: &Principal,
        id: &UserId,
        status: AccountStatus,
    ) -> Result<User, ServiceError> {
        require_admin(actor)?;
        Ok(self.users.set_status(id.clone(), status).await?)
    }

    /// Updates profile fields. Callers may edit themselves; admins may
    /// edit anyone.
    #[instrument(skip(self, update), fields(actor = %actor.id, user = %id))]
    pub async fn update_profile(
        &self,
        actor: &Principal,
        id: &UserId,
        update: ProfileUpdate,
    ) -> Result<User, ServiceError> {
        if actor.role != Role::Admin && actor.id != *id {
            return Err(ServiceError::Forbidden(
                "cannot edit another user's profile".to_string(),
            ));
        }
        let password_hash = update
            .password
            .filter(|p| !p.is_empty())
            .map(|p| self.hasher.hash(&p));
        let change = UserChange::UpdateProfile {
            name: update.name,
            phone: update.phone,
            address: update.address,
            avatar: update.avatar,
            password_hash,
        };
        Ok(self.users.update_profile(id.clone(), change).await?)
    }

    /// Removes an account. Admin only.
    #[instrument(skip(self), fields(actor = %actor.id, user = %id))]
    pub async fn delete_user(&self, actor: &Principal, id: &UserId) -> Result<(), ServiceError> {
        require_admin(actor)?;
        self.users.remove(id.clone()).await?;
        info!("User deleted");
        Ok(())
    }
}

fn require_admin(actor: &Principal) -> Result<(), ServiceError> {
    if actor.role == Role::Admin {
        Ok(())
    } else {
        Err(ServiceError::Forbidden(
            "admin access required".to_string(),
        ))
    }
}
