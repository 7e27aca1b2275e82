//! # Generic Store Actor
//!
//! The server half of the store: owns the record map and processes
//! [`StoreRequest`]s sequentially. Exclusive ownership of the state inside a
//! single task is what makes every operation, including "apply change and
//! append audit entry", atomic with respect to concurrent callers, without
//! any locking.

use crate::client::StoreClient;
use crate::entity::StoreEntity;
use crate::error::StoreError;
use crate::message::StoreRequest;
use std::cmp::Reverse;
use std::collections::HashMap;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// How many times an insert re-drafts before giving up on a uniqueness
/// conflict. Drafts with generated fields (random codes) resolve in one or
/// two retries; drafts with caller-supplied unique fields never will.
const MAX_INSERT_ATTEMPTS: usize = 4;

/// The generic actor that owns a collection of entities.
///
/// Created together with its [`StoreClient`] via [`StoreActor::new`], then
/// driven by [`StoreActor::run`] in a spawned task:
///
/// ```ignore
/// let (actor, client) = StoreActor::<Parcel>::new(32, new_parcel_id);
/// tokio::spawn(actor.run(user_client));
/// ```
pub struct StoreActor<T: StoreEntity> {
    receiver: mpsc::Receiver<StoreRequest<T>>,
    entries: HashMap<T::Id, T>,
    next_id: Box<dyn Fn() -> T::Id + Send + Sync>,
}

impl<T: StoreEntity> StoreActor<T> {
    /// Creates the actor and its client. `next_id` is the ID generator;
    /// the store retries it on the (unlikely) event of an ID collision.
    pub fn new(
        buffer_size: usize,
        next_id: impl Fn() -> T::Id + Send + Sync + 'static,
    ) -> (Self, StoreClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self {
            receiver,
            entries: HashMap::new(),
            next_id: Box::new(next_id),
        };
        (actor, StoreClient::new(sender))
    }

    /// Builds a record from the draft and inserts it, re-drafting while the
    /// generated ID or a uniqueness guard collides with an existing record.
    fn insert(&mut self, draft: &T::Draft) -> Result<T, StoreError> {
        for _ in 0..MAX_INSERT_ATTEMPTS {
            let id = (self.next_id)();
            let entry =
                T::from_draft(id.clone(), draft).map_err(|e| StoreError::Entity(Box::new(e)))?;
            let clash = self.entries.contains_key(&id)
                || self.entries.values().any(|e| entry.conflicts_with(e));
            if clash {
                continue;
            }
            self.entries.insert(id, entry.clone());
            return Ok(entry);
        }
        Err(StoreError::Conflict(format!(
            "insert still conflicting after {MAX_INSERT_ATTEMPTS} attempts"
        )))
    }

    /// Runs the actor's event loop until every client is dropped.
    ///
    /// `context` is handed to [`StoreEntity::apply`] on every change, which
    /// lets entities consult other stores that were wired up after this
    /// actor was constructed.
    pub async fn run(mut self, context: T::Context) {
        // Just the type name, e.g. "Parcel" instead of the full module path.
        let entity_type = std::any::type_name::<T>()
            .split("::")
            .last()
            .unwrap_or("Unknown");
        info!(entity_type, "Store started");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                StoreRequest::Insert { draft, respond_to } => {
                    debug!(entity_type, ?draft, "Insert");
                    let result = self.insert(&draft);
                    match &result {
                        Ok(_) => info!(entity_type, size = self.entries.len(), "Inserted"),
                        Err(e) => warn!(entity_type, error = %e, "Insert failed"),
                    }
                    let _ = respond_to.send(result);
                }
                StoreRequest::Get { id, respond_to } => {
                    let entry = self.entries.get(&id).cloned();
                    debug!(entity_type, %id, found = entry.is_some(), "Get");
                    let _ = respond_to.send(Ok(entry));
                }
                StoreRequest::FindOne { filter, respond_to } => {
                    let entry = self.entries.values().find(|e| e.matches(&filter)).cloned();
                    debug!(entity_type, ?filter, found = entry.is_some(), "FindOne");
                    let _ = respond_to.send(Ok(entry));
                }
                StoreRequest::List { filter, respond_to } => {
                    let mut matched: Vec<T> = self
                        .entries
                        .values()
                        .filter(|e| e.matches(&filter))
                        .cloned()
                        .collect();
                    matched.sort_by_key(|e| Reverse(e.sort_key()));
                    debug!(entity_type, ?filter, count = matched.len(), "List");
                    let _ = respond_to.send(Ok(matched));
                }
                StoreRequest::Apply {
                    id,
                    change,
                    respond_to,
                } => {
                    debug!(entity_type, %id, ?change, "Apply");
                    if let Some(current) = self.entries.get(&id) {
                        // Apply to a clone; a rejected change must leave the
                        // stored record untouched.
                        let mut updated = current.clone();
                        match updated.apply(change, &context).await {
                            Ok(()) => {
                                self.entries.insert(id.clone(), updated.clone());
                                info!(entity_type, %id, "Applied");
                                let _ = respond_to.send(Ok(updated));
                            }
                            Err(e) => {
                                warn!(entity_type, %id, error = %e, "Apply rejected");
                                let _ = respond_to.send(Err(StoreError::Entity(Box::new(e))));
                            }
                        }
                    } else {
                        warn!(entity_type, %id, "Not found");
                        let _ = respond_to.send(Err(StoreError::NotFound(id.to_string())));
                    }
                }
                StoreRequest::Remove { id, respond_to } => {
                    debug!(entity_type, %id, "Remove");
                    if self.entries.remove(&id).is_some() {
                        info!(entity_type, %id, size = self.entries.len(), "Removed");
                        let _ = respond_to.send(Ok(()));
                    } else {
                        warn!(entity_type, %id, "Not found");
                        let _ = respond_to.send(Err(StoreError::NotFound(id.to_string())));
                    }
                }
            }
        }

        info!(entity_type, size = self.entries.len(), "Shutdown");
    }
}
