//! In-memory storage implementations
//!
//! This module provides in-memory implementations of all storage traits.

mod authorizations;
mod clients;

pub use authorizations::MemoryAuthorizationStore;
pub use clients::MemoryRegisteredClientStore;
