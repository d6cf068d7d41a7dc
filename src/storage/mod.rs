//! Trait-based storage abstractions with in-memory backends.

pub mod inmemory;
pub mod traits;

// Re-export commonly used types and traits
pub use inmemory::{MemoryAuthorizationStore, MemoryRegisteredClientStore};
pub use traits::*;

use crate::errors::ConfigError;
use std::sync::Arc;

/// Storage backend configuration and factory
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StorageBackend {
    Memory,
}

/// Create an authorization store for the configured backend
pub fn create_authorization_store(backend: &StorageBackend) -> Arc<dyn AuthorizationStore> {
    match backend {
        StorageBackend::Memory => Arc::new(MemoryAuthorizationStore::new()),
    }
}

/// Parse storage backend from configuration string
pub fn parse_storage_backend(
    backend_name: &str,
) -> std::result::Result<StorageBackend, ConfigError> {
    match backend_name {
        "memory" => Ok(StorageBackend::Memory),
        other => Err(ConfigError::UnsupportedStorageBackend(other.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_storage_backend() {
        assert_eq!(parse_storage_backend("memory").unwrap(), StorageBackend::Memory);
        assert!(matches!(
            parse_storage_backend("postgres"),
            Err(ConfigError::UnsupportedStorageBackend(_))
        ));
    }
}
