//! In-memory registered client store
//!
//! Populated once at construction and read-only afterwards, so lookups
//! need no locking.

use crate::errors::StorageError;
use crate::oauth::clients::RegisteredClient;
use crate::storage::traits::*;
use std::collections::HashMap;
use std::sync::Arc;

/// In-memory implementation of [`RegisteredClientStore`]
#[derive(Debug)]
pub struct MemoryRegisteredClientStore {
    by_id: HashMap<String, Arc<RegisteredClient>>,
    by_client_id: HashMap<String, Arc<RegisteredClient>>,
}

impl MemoryRegisteredClientStore {
    /// Build the registry from a non-empty batch of clients.
    ///
    /// Fails when two clients share an `id` or a `client_id`.
    pub fn new(registrations: Vec<RegisteredClient>) -> Result<Self> {
        if registrations.is_empty() {
            return Err(StorageError::EmptyRegistrations(
                "registrations".to_string(),
            ));
        }

        let mut by_id = HashMap::with_capacity(registrations.len());
        let mut by_client_id = HashMap::with_capacity(registrations.len());

        for registration in registrations {
            if by_id.contains_key(registration.id()) {
                tracing::warn!(id = registration.id(), "duplicate registered client id");
                return Err(StorageError::DuplicateId(registration.id().to_string()));
            }
            if by_client_id.contains_key(registration.client_id()) {
                tracing::warn!(
                    client_id = registration.client_id(),
                    "duplicate registered client identifier"
                );
                return Err(StorageError::DuplicateClientId(
                    registration.client_id().to_string(),
                ));
            }

            let registration = Arc::new(registration);
            by_id.insert(registration.id().to_string(), registration.clone());
            by_client_id.insert(registration.client_id().to_string(), registration);
        }

        tracing::info!(count = by_id.len(), "registered client store created");
        Ok(Self {
            by_id,
            by_client_id,
        })
    }

    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }

    /// All registered clients, ordered by internal identifier
    pub fn clients(&self) -> Vec<RegisteredClient> {
        let mut clients: Vec<_> = self.by_id.values().map(|c| c.as_ref().clone()).collect();
        clients.sort_by(|a, b| a.id().cmp(b.id()));
        clients
    }
}

impl RegisteredClientStore for MemoryRegisteredClientStore {
    fn find_by_id(&self, id: &str) -> Result<Option<RegisteredClient>> {
        if id.is_empty() {
            return Err(StorageError::InvalidArgument("id cannot be empty".to_string()));
        }
        Ok(self.by_id.get(id).map(|client| client.as_ref().clone()))
    }

    fn find_by_client_id(&self, client_id: &str) -> Result<Option<RegisteredClient>> {
        if client_id.is_empty() {
            return Err(StorageError::InvalidArgument(
                "clientId cannot be empty".to_string(),
            ));
        }
        Ok(self
            .by_client_id
            .get(client_id)
            .map(|client| client.as_ref().clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::oauth::types::GrantType;

    fn client(id: &str, client_id: &str) -> RegisteredClient {
        RegisteredClient::with_id(id)
            .client_id(client_id)
            .client_secret("secret")
            .authorization_grant_type(GrantType::AuthorizationCode)
            .redirect_uri("https://cb")
            .build()
            .unwrap()
    }

    #[test]
    fn test_client_lookup() {
        let store =
            MemoryRegisteredClientStore::new(vec![client("1", "client-a"), client("2", "client-b")])
                .unwrap();

        assert_eq!(store.len(), 2);
        assert_eq!(store.find_by_id("1").unwrap().unwrap().client_id(), "client-a");
        assert_eq!(store.find_by_client_id("client-b").unwrap().unwrap().id(), "2");
        assert_eq!(
            store.find_by_id("2").unwrap(),
            store.find_by_client_id("client-b").unwrap()
        );
    }

    #[test]
    fn test_unknown_keys_return_none() {
        let store = MemoryRegisteredClientStore::new(vec![client("1", "client-a")]).unwrap();
        assert!(store.find_by_id("client-a").unwrap().is_none());
        assert!(store.find_by_client_id("1").unwrap().is_none());
        assert!(store.find_by_client_id("unknown").unwrap().is_none());
    }

    #[test]
    fn test_empty_keys_are_rejected() {
        let store = MemoryRegisteredClientStore::new(vec![client("1", "client-a")]).unwrap();
        assert!(matches!(
            store.find_by_id(""),
            Err(StorageError::InvalidArgument(_))
        ));
        assert!(matches!(
            store.find_by_client_id(""),
            Err(StorageError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_empty_registrations() {
        assert!(matches!(
            MemoryRegisteredClientStore::new(Vec::new()),
            Err(StorageError::EmptyRegistrations(_))
        ));
    }

    #[test]
    fn test_duplicate_id() {
        let result =
            MemoryRegisteredClientStore::new(vec![client("1", "client-a"), client("1", "client-b")]);
        assert_eq!(result.unwrap_err(), StorageError::DuplicateId("1".to_string()));
    }

    #[test]
    fn test_duplicate_client_id() {
        let result =
            MemoryRegisteredClientStore::new(vec![client("1", "client-a"), client("2", "client-a")]);
        assert_eq!(
            result.unwrap_err(),
            StorageError::DuplicateClientId("client-a".to_string())
        );
    }

    #[test]
    fn test_clients_listing() {
        let store =
            MemoryRegisteredClientStore::new(vec![client("2", "client-b"), client("1", "client-a")])
                .unwrap();
        let ids: Vec<_> = store.clients().iter().map(|c| c.id().to_string()).collect();
        assert_eq!(ids, vec!["1", "2"]);
    }

    #[test]
    fn test_concurrent_reads() {
        let store = Arc::new(
            MemoryRegisteredClientStore::new(vec![client("1", "client-a")]).unwrap(),
        );
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let store = store.clone();
                std::thread::spawn(move || store.find_by_client_id("client-a").unwrap().is_some())
            })
            .collect();
        for handle in handles {
            assert!(handle.join().unwrap());
        }
    }
}
