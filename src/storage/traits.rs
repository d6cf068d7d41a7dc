//! Storage trait definitions for registered clients and authorizations.
//!
//! Both contracts are synchronous and in-memory friendly; a durable backend
//! implements the same traits without changing any call site.

use crate::errors::StorageError;
use crate::oauth::authorization::Authorization;
use crate::oauth::clients::RegisteredClient;
use crate::oauth::types::TokenType;

pub type Result<T> = std::result::Result<T, StorageError>;

/// Lookup of registered clients by internal or public identifier
pub trait RegisteredClientStore: Send + Sync {
    /// Retrieve a client by its internal identifier
    fn find_by_id(&self, id: &str) -> Result<Option<RegisteredClient>>;

    /// Retrieve a client by its public client identifier
    fn find_by_client_id(&self, client_id: &str) -> Result<Option<RegisteredClient>>;
}

/// Append-only store of authorizations
pub trait AuthorizationStore: Send + Sync {
    /// Store a new authorization
    fn save(&self, authorization: Authorization) -> Result<()>;

    /// Retrieve the first stored authorization holding `token` as the given kind
    fn find_by_token_and_type(
        &self,
        token: &str,
        token_type: &TokenType,
    ) -> Result<Option<Authorization>>;
}
