//! [`StoreEntity`] implementation for [`User`].

use crate::model::{AccountStatus, Role, User, UserDraft, UserId};
use crate::user_actor::UserError;
use async_trait::async_trait;
use chrono::Utc;
use store_actor::StoreEntity;

/// Change commands accepted by the user directory. Admin gating lives in
/// the lifecycle service.
#[derive(Debug)]
pub enum UserChange {
    /// Admin: change the account's role.
    SetRole(Role),
    /// Admin: block or unblock the account.
    SetStatus(AccountStatus),
    /// Self-service profile update; `None` fields are left untouched.
    /// The password arrives pre-hashed; the directory never sees plaintext.
    UpdateProfile {
        name: Option<String>,
        phone: Option<String>,
        address: Option<String>,
        avatar: Option<String>,
        password_hash: Option<String>,
    },
}

/// Lookup filters over the user directory.
#[derive(Debug, Clone)]
pub enum UserFilter {
    Any,
    WithRole(Role),
    ByEmail(String),
}

#[async_trait]
impl StoreEntity for User {
    type Id = UserId;
    type Draft = UserDraft;
    type Change = UserChange;
    type Filter = UserFilter;
    type Context = ();
    type Error = UserError;

    fn from_draft(id: UserId, draft: &UserDraft) -> Result<Self, UserError> {
        if draft.name.trim().is_empty() {
            return Err(UserError::Validation("name is required".into()));
        }
        if draft.email.trim().is_empty() || !draft.email.contains('@') {
            return Err(UserError::Validation("a valid email is required".into()));
        }
        if draft.password_hash.is_empty() {
            return Err(UserError::Validation("password is required".into()));
        }

        let now = Utc::now();
        Ok(User {
            id,
            name: draft.name.clone(),
            email: draft.email.clone(),
            password_hash: draft.password_hash.clone(),
            role: draft.role,
            status: AccountStatus::Active,
            phone: String::new(),
            address: String::new(),
            avatar: None,
            created_at: now,
            updated_at: now,
        })
    }

    /// Emails are unique. The conflict persists across insert retries, so a
    /// duplicate registration fails rather than being re-drafted away.
    fn conflicts_with(&self, existing: &Self) -> bool {
        self.email.eq_ignore_ascii_case(&existing.email)
    }

    fn matches(&self, filter: &UserFilter) -> bool {
        match filter {
            UserFilter::Any => true,
            UserFilter::WithRole(role) => &self.role == role,
            UserFilter::ByEmail(email) => self.email.eq_ignore_ascii_case(email),
        }
    }

    fn sort_key(&self) -> i64 {
        self.created_at.timestamp_millis()
    }

    async fn apply(&mut self, change: UserChange, _ctx: &()) -> Result<(), UserError> {
        match change {
            UserChange::SetRole(role) => self.role = role,
            UserChange::SetStatus(status) => self.status = status,
            UserChange::UpdateProfile {
                name,
                phone,
                address,
                avatar,
                password_hash,
            } => {
                if let Some(name) = name {
                    if name.trim().is_empty() {
                        return Err(UserError::Validation("name cannot be empty".into()));
                    }
                    self.name = name;
                }
                if let Some(phone) = phone {
                    self.phone = phone;
                }
                if let Some(address) = address {
                    self.address = address;
                }
                if let Some(avatar) = avatar {
                    self.avatar = Some(avatar);
                }
                if let Some(password_hash) = password_hash {
                    self.password_hash = password_hash;
                }
            }
        }
        self.updated_at = Utc::now();
        Ok(())
    }
}
