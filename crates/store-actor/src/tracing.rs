//! Tracing/logging setup shared by binaries and integration tests.

/// Initializes structured logging for the process.
///
/// Filtering is controlled through `RUST_LOG`:
/// - `RUST_LOG=info`: lifecycle events (store started, inserted, applied)
/// - `RUST_LOG=debug`: full request payloads
/// - `RUST_LOG=fastparcel=debug`: debug for one crate only
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();
}
