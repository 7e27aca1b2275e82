//! # FastParcel Core
//!
//! Parcel lifecycle management: role-gated status transitions over an
//! append-only audit trail, agent assignment, and public tracking.
//!
//! - **[model]**: the [`Parcel`](model::Parcel) and [`User`](model::User)
//!   records, status and role enums, tracking-code generation.
//! - **[parcel_actor]** / **[user_actor]**: [`StoreEntity`](store_actor::StoreEntity)
//!   implementations; each entity lives in its own store task, so a status
//!   change and its history append are applied atomically.
//! - **[clients]**: typed wrappers ([`ParcelClient`](clients::ParcelClient),
//!   [`UserClient`](clients::UserClient)) over the generic store clients.
//! - **[service]**: the lifecycle service, the only component with
//!   business rules. Every mutation passes through its centralized
//!   authorization matrix. Also hosts the public tracking resolver and the
//!   identity/password-hashing seams.
//! - **[http]**: the axum surface mapping the service onto the REST routes,
//!   one status code per error case (400/401/403/404/500).
//! - **[runtime]**: the [`ParcelSystem`](runtime::ParcelSystem) orchestrator
//!   that spawns and wires the store actors.

pub mod clients;
pub mod http;
pub mod model;
pub mod parcel_actor;
pub mod runtime;
pub mod service;
pub mod user_actor;
