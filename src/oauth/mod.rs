//! OAuth 2.1 authorization records and registered clients.

pub mod authorization;
pub mod clients;
pub mod scope_validation;
pub mod types;

// Re-export frequently used items from each module
pub use crate::storage::{
    inmemory::{MemoryAuthorizationStore, MemoryRegisteredClientStore},
    traits::{AuthorizationStore, RegisteredClientStore},
};
pub use authorization::{Authorization, AuthorizationBuilder};
pub use clients::{RegisteredClient, RegisteredClientBuilder};
pub use types::{
    AUTHORIZATION_CODE_KEY, AccessToken, AccessTokenType, ClientAuthMethod, GrantType, TokenType,
};
