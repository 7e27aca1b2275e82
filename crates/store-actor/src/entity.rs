//! # StoreEntity Trait
//!
//! The contract every stored entity type must satisfy to be managed by a
//! [`StoreActor`](crate::StoreActor). Associated types pin down the draft
//! (creation payload), the change commands, the listing filter, the injected
//! context, and the entity's own error type, so a parcel draft can never be
//! sent to a user store and vice versa.

use async_trait::async_trait;
use std::fmt::{Debug, Display};
use std::hash::Hash;

/// Trait implemented by every entity type managed by a `StoreActor`.
///
/// # Change application
///
/// `apply` is the only mutation path. The actor clones the current record,
/// applies the change to the clone, and only writes the clone back on
/// success, so a failed change never leaves a partially mutated record
/// behind. Implementations should validate before mutating anyway.
///
/// # Context
///
/// `Context` is injected into `apply` and allows an entity to consult other
/// stores (e.g. a parcel validating an agent assignment against the user
/// directory). Use `()` when no dependencies are needed.
#[async_trait]
pub trait StoreEntity: Clone + Send + Sync + 'static {
    /// Unique identifier. Generated by the store's injected ID generator.
    type Id: Eq + Hash + Clone + Send + Sync + Display + Debug;

    /// Payload required to create a new record.
    type Draft: Send + Sync + Debug;

    /// A change command applied to an existing record.
    type Change: Send + Sync + Debug;

    /// Predicate used by `find_one`/`list` lookups.
    type Filter: Send + Sync + Debug;

    /// Dependencies injected when the actor starts. `()` if none.
    type Context: Send + Sync;

    /// The entity's error type.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Builds the full record from a freshly generated ID and the draft.
    ///
    /// Taking the draft by reference lets the actor retry with a new ID (and
    /// newly drawn generated fields, such as tracking codes) when the built
    /// record conflicts with an existing one.
    fn from_draft(id: Self::Id, draft: &Self::Draft) -> Result<Self, Self::Error>;

    /// Uniqueness guard evaluated on insert against every stored record.
    ///
    /// Returning `true` makes the actor re-draft; if the conflict persists
    /// across all retries the insert fails with
    /// [`StoreError::Conflict`](crate::StoreError::Conflict). The default
    /// never conflicts.
    fn conflicts_with(&self, _existing: &Self) -> bool {
        false
    }

    /// Whether this record matches a lookup filter.
    fn matches(&self, filter: &Self::Filter) -> bool;

    /// Sort key for listings. Higher keys are returned first, so a
    /// creation-time millisecond stamp yields newest-first ordering.
    fn sort_key(&self) -> i64;

    /// Applies a change command. Must not leave the record partially
    /// modified on error (validate first, mutate last).
    async fn apply(
        &mut self,
        change: Self::Change,
        ctx: &Self::Context,
    ) -> Result<(), Self::Error>;
}
