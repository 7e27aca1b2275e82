//! # HTTP Surface
//!
//! Thin axum handlers over the lifecycle service. Handlers parse, call one
//! service method, and shape the response envelope; every decision lives
//! below this layer.

pub mod error;
pub mod extract;
pub mod parcels;
pub mod users;

pub use error::ApiError;
pub use extract::Auth;

use crate::service::{IdentityProvider, LifecycleService, TrackingResolver};
use axum::routing::{get, post};
use axum::Router;
use std::sync::Arc;

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    pub service: LifecycleService,
    pub resolver: TrackingResolver,
    pub identity: Arc<dyn IdentityProvider>,
}

/// Builds the full route table.
///
/// Everything under `/parcels` and `/users` requires a bearer token except
/// registration and the public tracking route.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/parcels", post(parcels::create).get(parcels::list))
        .route("/parcels/track/:key", get(parcels::track))
        .route(
            "/parcels/:key",
            get(parcels::find)
                .put(parcels::update)
                .delete(parcels::remove),
        )
        .route("/users", post(users::register).get(users::list))
        .route(
            "/users/:id",
            axum::routing::put(users::change_access)
                .patch(users::update_profile)
                .delete(users::remove),
        )
        .with_state(state)
}
