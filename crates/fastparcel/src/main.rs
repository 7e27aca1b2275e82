//! FastParcel server binary.
//!
//! Spawns the store actors, seeds a bootstrap admin account, and serves the
//! HTTP API. Configuration comes from the environment:
//!
//! - `FASTPARCEL_ADDR`: listen address (default `127.0.0.1:8080`)
//! - `FASTPARCEL_ADMIN_EMAIL` / `FASTPARCEL_ADMIN_PASSWORD`: bootstrap
//!   admin credentials
//! - `FASTPARCEL_ADMIN_TOKEN`: bearer token granted to the bootstrap admin
//! - `RUST_LOG`: tracing filter

use fastparcel::http::{router, AppState};
use fastparcel::model::Role;
use fastparcel::runtime::ParcelSystem;
use fastparcel::service::{
    DigestHasher, LifecycleService, Principal, RegisterRequest, TokenRegistry, TrackingResolver,
};
use std::env;
use std::sync::Arc;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    store_actor::setup_tracing();

    let system = ParcelSystem::new();
    let service = LifecycleService::new(
        system.parcel_client.clone(),
        system.user_client.clone(),
        Arc::new(DigestHasher),
    );
    let resolver = TrackingResolver::new(system.parcel_client.clone());

    let registry = Arc::new(TokenRegistry::new());
    seed_admin(&service, &registry).await?;

    let state = AppState {
        service,
        resolver,
        identity: registry,
    };

    let addr = env::var("FASTPARCEL_ADDR").unwrap_or_else(|_| "127.0.0.1:8080".to_string());
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(%addr, "Listening");
    axum::serve(listener, router(state)).await?;

    system.shutdown().await?;
    Ok(())
}

/// Registers the bootstrap admin and grants it a bearer token, so a fresh
/// instance has at least one account that can manage the rest.
async fn seed_admin(
    service: &LifecycleService,
    registry: &TokenRegistry,
) -> Result<(), Box<dyn std::error::Error>> {
    let email =
        env::var("FASTPARCEL_ADMIN_EMAIL").unwrap_or_else(|_| "admin@fastparcel.local".to_string());
    let password = env::var("FASTPARCEL_ADMIN_PASSWORD").unwrap_or_else(|_| "changeme".to_string());
    let token = env::var("FASTPARCEL_ADMIN_TOKEN").unwrap_or_else(|_| "local-admin".to_string());

    let admin = service
        .register_user(RegisterRequest {
            name: "Administrator".to_string(),
            email,
            password,
            role: Some(Role::Admin),
        })
        .await?;
    registry.grant(token, Principal::new(admin.id.clone(), admin.role));
    info!(admin_id = %admin.id, "Bootstrap admin registered");
    Ok(())
}
