//! Identity seams: who is calling, and how passwords are stored.
//!
//! Authentication mechanics live behind [`IdentityProvider`], which turns a
//! bearer token into a [`Principal`]. The service layer never sees tokens,
//! only principals. Password storage is likewise behind [`PasswordHasher`].

use crate::model::{Role, UserId};
use async_trait::async_trait;
use rand::distributions::Alphanumeric;
use rand::Rng;
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::sync::RwLock;

/// An authenticated caller: an identity plus the role it acts under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    pub id: UserId,
    pub role: Role,
}

impl Principal {
    pub fn new(id: UserId, role: Role) -> Self {
        Self { id, role }
    }
}

/// One-way password digests.
pub trait PasswordHasher: Send + Sync {
    fn hash(&self, raw: &str) -> String;
    fn verify(&self, raw: &str, hashed: &str) -> bool;
}

/// Salted SHA-256 hasher. Digests are stored as `salt$hex`.
pub struct DigestHasher;

impl PasswordHasher for DigestHasher {
    fn hash(&self, raw: &str) -> String {
        let salt: String = rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(16)
            .map(char::from)
            .collect();
        format!("{salt}${}", digest(&salt, raw))
    }

    fn verify(&self, raw: &str, hashed: &str) -> bool {
        match hashed.split_once('$') {
            Some((salt, expected)) => digest(salt, raw) == expected,
            None => false,
        }
    }
}

fn digest(salt: &str, raw: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(salt.as_bytes());
    hasher.update(raw.as_bytes());
    hasher
        .finalize()
        .iter()
        .map(|b| format!("{b:02x}"))
        .collect()
}

/// Resolves a bearer token to a principal, or nothing.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    async fn authenticate(&self, token: &str) -> Option<Principal>;
}

/// In-memory token table. Backs the demo binary and the HTTP tests; a real
/// deployment would swap in a session-backed provider at the same seam.
#[derive(Default)]
pub struct TokenRegistry {
    tokens: RwLock<HashMap<String, Principal>>,
}

impl TokenRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a token for a principal, replacing any previous grant.
    pub fn grant(&self, token: impl Into<String>, principal: Principal) {
        if let Ok(mut tokens) = self.tokens.write() {
            tokens.insert(token.into(), principal);
        }
    }
}

#[async_trait]
impl IdentityProvider for TokenRegistry {
    async fn authenticate(&self, token: &str) -> Option<Principal> {
        self.tokens
            .read()
            .ok()
            .and_then(|tokens| tokens.get(token).cloned())
    }
}
