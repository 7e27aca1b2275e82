//! # Store Actor
//!
//! Generic building blocks for actor-backed entity stores. Each entity type
//! is owned by a single [`StoreActor`] task that processes requests
//! sequentially over an mpsc channel, so every mutation is an atomic
//! read-modify-write: no locks, no lost updates, no torn writes between a
//! field change and its audit-trail append.
//!
//! ## Layers
//!
//! 1. **Entity layer** ([`StoreEntity`]): how an entity is built from a
//!    draft, which drafts conflict with existing records, how filters
//!    match, and how change commands are applied.
//! 2. **Runtime layer** ([`StoreActor`]): owns the in-memory store and the
//!    message loop.
//! 3. **Interface layer** ([`StoreClient`]): a cheaply cloneable, type-safe
//!    async client. Domain-specific wrappers implement [`StoreHandle`] to
//!    inherit `get`/`remove`.
//!
//! ## Concurrency model
//!
//! Each actor runs in its own Tokio task and processes one request at a
//! time. Multiple stores run in parallel, and a store may reach into other
//! stores through its [`StoreEntity::Context`], which is injected when the
//! actor starts (`actor.run(context)`), not when it is constructed. That
//! late binding keeps the construction order of interdependent stores
//! trivial.
//!
//! ## Testing
//!
//! [`mock::MockStoreClient`] speaks the same channel protocol as a real
//! actor but replays scripted expectations, so code built around a
//! [`StoreClient`] can be unit-tested without spawning any store task.

pub mod actor;
pub mod client;
pub mod client_trait;
pub mod entity;
pub mod error;
pub mod message;
pub mod mock;
pub mod tracing;

pub use actor::StoreActor;
pub use client::StoreClient;
pub use client_trait::StoreHandle;
pub use entity::StoreEntity;
pub use error::StoreError;
pub use message::{Response, StoreRequest};
pub use crate::tracing::setup_tracing;
