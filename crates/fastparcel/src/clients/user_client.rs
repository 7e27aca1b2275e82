//! # User Client
//!
//! High-level API for the user directory. Wraps a `StoreClient<User>` and
//! exposes domain methods.

use crate::model::{AccountStatus, Role, User, UserDraft, UserId};
use crate::user_actor::{UserChange, UserError, UserFilter};
use async_trait::async_trait;
use store_actor::{StoreClient, StoreError, StoreHandle};
use tracing::{debug, instrument};

/// Client for interacting with the user directory actor.
#[derive(Clone)]
pub struct UserClient {
    inner: StoreClient<User>,
}

impl UserClient {
    pub fn new(inner: StoreClient<User>) -> Self {
        Self { inner }
    }

    /// Access the raw store client (injected into the parcel actor as its
    /// directory context).
    pub fn store(&self) -> &StoreClient<User> {
        &self.inner
    }
}

#[async_trait]
impl StoreHandle<User> for UserClient {
    type Error = UserError;

    fn inner(&self) -> &StoreClient<User> {
        &self.inner
    }

    fn map_error(e: StoreError) -> UserError {
        match e {
            StoreError::NotFound(id) => UserError::NotFound(id),
            StoreError::Conflict(msg) => UserError::AlreadyExists(msg),
            StoreError::Entity(boxed) => boxed
                .downcast::<UserError>()
                .map(|e| *e)
                .unwrap_or_else(|e| UserError::StoreCommunication(e.to_string())),
            other => UserError::StoreCommunication(other.to_string()),
        }
    }
}

impl UserClient {
    /// Registers an account. The email uniqueness guard makes a duplicate
    /// registration fail with [`UserError::AlreadyExists`].
    #[instrument(skip(self, draft))]
    pub async fn register(&self, draft: UserDraft) -> Result<User, UserError> {
        debug!("Sending request");
        self.inner.insert(draft).await.map_err(Self::map_error)
    }

    #[instrument(skip(self))]
    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserError> {
        debug!("Sending request");
        self.inner
            .find_one(UserFilter::ByEmail(email.to_string()))
            .await
            .map_err(Self::map_error)
    }

    /// Lists accounts, optionally restricted to one role, newest first.
    #[instrument(skip(self))]
    pub async fn list(&self, role: Option<Role>) -> Result<Vec<User>, UserError> {
        debug!("Sending request");
        let filter = match role {
            Some(role) => UserFilter::WithRole(role),
            None => UserFilter::Any,
        };
        self.inner.list(filter).await.map_err(Self::map_error)
    }

    #[instrument(skip(self))]
    pub async fn set_role(&self, id: UserId, role: Role) -> Result<User, UserError> {
        debug!("Sending request");
        self.inner
            .apply(id, UserChange::SetRole(role))
            .await
            .map_err(Self::map_error)
    }

    #[instrument(skip(self))]
    pub async fn set_status(&self, id: UserId, status: AccountStatus) -> Result<User, UserError> {
        debug!("Sending request");
        self.inner
            .apply(id, UserChange::SetStatus(status))
            .await
            .map_err(Self::map_error)
    }

    #[instrument(skip(self, change))]
    pub async fn update_profile(&self, id: UserId, change: UserChange) -> Result<User, UserError> {
        debug!("Sending request");
        self.inner.apply(id, change).await.map_err(Self::map_error)
    }
}
