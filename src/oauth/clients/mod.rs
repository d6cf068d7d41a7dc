//! Registered OAuth clients.
//!
//! Client descriptions, their builder, and registration file loading.

pub mod loader;
pub mod registered_client;

// Re-export main types
pub use loader::{load_client_store, parse_registered_clients};
pub use registered_client::{RegisteredClient, RegisteredClientBuilder};
