//! Client registration file loading.
//!
//! The file is a JSON array of client entries. Every entry passes through
//! [`RegisteredClientBuilder::build`](super::RegisteredClientBuilder::build)
//! and the whole list through [`MemoryRegisteredClientStore::new`].

use crate::errors::LoaderError;
use crate::oauth::clients::RegisteredClient;
use crate::oauth::types::{ClientAuthMethod, GrantType, generate_client_id};
use crate::storage::inmemory::MemoryRegisteredClientStore;
use serde::Deserialize;
use std::path::Path;

/// One entry of the client registration file
#[derive(Debug, Clone, Deserialize)]
pub struct ClientRegistrationEntry {
    /// Internal identifier, generated when absent
    #[serde(default)]
    pub id: Option<String>,
    pub client_id: String,
    #[serde(default)]
    pub client_secret: Option<String>,
    #[serde(default)]
    pub client_authentication_methods: Vec<ClientAuthMethod>,
    #[serde(default)]
    pub authorization_grant_types: Vec<GrantType>,
    #[serde(default)]
    pub redirect_uris: Vec<String>,
    #[serde(default)]
    pub scopes: Vec<String>,
}

impl ClientRegistrationEntry {
    fn into_registered_client(self) -> Result<RegisteredClient, crate::errors::ClientError> {
        let mut builder = RegisteredClient::with_id(self.id.unwrap_or_else(generate_client_id))
            .client_id(self.client_id)
            .client_authentication_methods(|methods| {
                methods.extend(self.client_authentication_methods)
            })
            .authorization_grant_types(|grants| grants.extend(self.authorization_grant_types))
            .redirect_uris(|uris| uris.extend(self.redirect_uris))
            .scopes(|scopes| scopes.extend(self.scopes));
        if let Some(client_secret) = self.client_secret {
            builder = builder.client_secret(client_secret);
        }
        builder.build()
    }
}

/// Parse and validate registered clients from a JSON document
pub fn parse_registered_clients(json: &str) -> Result<Vec<RegisteredClient>, LoaderError> {
    let entries: Vec<ClientRegistrationEntry> =
        serde_json::from_str(json).map_err(LoaderError::MalformedFile)?;

    entries
        .into_iter()
        .enumerate()
        .map(|(index, entry)| {
            entry
                .into_registered_client()
                .map_err(|err| LoaderError::InvalidClient(index, err))
        })
        .collect()
}

/// Read a client registration file and build the registry from it
pub fn load_client_store(path: &Path) -> Result<MemoryRegisteredClientStore, LoaderError> {
    let json = std::fs::read_to_string(path)
        .map_err(|err| LoaderError::ReadFailed(path.display().to_string(), err))?;
    let clients = parse_registered_clients(&json)?;
    tracing::debug!(path = %path.display(), count = clients.len(), "loaded client registrations");
    Ok(MemoryRegisteredClientStore::new(clients)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::{ClientError, StorageError};
    use crate::storage::traits::RegisteredClientStore;

    const CLIENTS: &str = r#"[
        {
            "id": "1",
            "client_id": "client-a",
            "client_secret": "s",
            "authorization_grant_types": ["authorization_code", "refresh_token"],
            "redirect_uris": ["https://cb"],
            "scopes": ["openid", "message.read"]
        },
        {
            "client_id": "service",
            "client_authentication_methods": ["post"],
            "authorization_grant_types": ["client_credentials"]
        }
    ]"#;

    #[test]
    fn test_parse_registered_clients() {
        let clients = parse_registered_clients(CLIENTS).unwrap();
        assert_eq!(clients.len(), 2);

        assert_eq!(clients[0].id(), "1");
        assert_eq!(clients[0].authorization_grant_types().len(), 2);
        assert!(
            clients[0]
                .client_authentication_methods()
                .contains(&ClientAuthMethod::Basic)
        );

        // generated id
        assert!(uuid::Uuid::parse_str(clients[1].id()).is_ok());
        assert!(
            clients[1]
                .client_authentication_methods()
                .contains(&ClientAuthMethod::Post)
        );
    }

    #[test]
    fn test_invalid_entry_reports_index() {
        let json = r#"[
            {"id": "1", "client_id": "a", "authorization_grant_types": ["client_credentials"]},
            {"id": "2", "client_id": "b", "authorization_grant_types": ["authorization_code"]}
        ]"#;
        let err = parse_registered_clients(json).unwrap_err();
        assert!(matches!(
            err,
            LoaderError::InvalidClient(1, ClientError::MissingClientSecret)
        ));
    }

    #[test]
    fn test_malformed_file() {
        assert!(matches!(
            parse_registered_clients("{\"client_id\": 1}"),
            Err(LoaderError::MalformedFile(_))
        ));
    }

    #[test]
    fn test_load_client_store() {
        let path = std::env::temp_dir().join(format!("clients-{}.json", generate_client_id()));
        std::fs::write(&path, CLIENTS).unwrap();

        let store = load_client_store(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        let client = store.find_by_client_id("client-a").unwrap().unwrap();
        assert_eq!(client.id(), "1");
        assert!(store.find_by_client_id("service").unwrap().is_some());
    }

    #[test]
    fn test_load_duplicate_client_ids() {
        let path = std::env::temp_dir().join(format!("clients-{}.json", generate_client_id()));
        std::fs::write(
            &path,
            r#"[
                {"id": "1", "client_id": "a", "authorization_grant_types": ["client_credentials"]},
                {"id": "2", "client_id": "a", "authorization_grant_types": ["client_credentials"]}
            ]"#,
        )
        .unwrap();

        let result = load_client_store(&path);
        std::fs::remove_file(&path).unwrap();
        assert!(matches!(
            result,
            Err(LoaderError::Registry(StorageError::DuplicateClientId(_)))
        ));
    }

    #[test]
    fn test_missing_file() {
        let result = load_client_store(Path::new("/nonexistent/clients.json"));
        assert!(matches!(result, Err(LoaderError::ReadFailed(_, _))));
    }
}
