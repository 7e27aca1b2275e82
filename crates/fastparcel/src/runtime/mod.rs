//! Runtime orchestration: starting, wiring, and shutting down the store
//! actors behind the service layer.

pub mod system;

pub use system::ParcelSystem;
