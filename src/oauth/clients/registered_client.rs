//! Registered OAuth client description and its validating builder.

use crate::errors::ClientError;
use crate::oauth::scope_validation::{validate_redirect_uri, validate_scope};
use crate::oauth::types::{ClientAuthMethod, GrantType};
use serde::Serialize;
use std::collections::BTreeSet;
use std::fmt;

/// A pre-registered OAuth client.
///
/// Instances only come out of [`RegisteredClientBuilder::build`], so every
/// value satisfies the registration rules and never changes afterwards.
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct RegisteredClient {
    id: String,
    client_id: String,
    #[serde(skip_serializing)]
    client_secret: Option<String>,
    client_authentication_methods: BTreeSet<ClientAuthMethod>,
    authorization_grant_types: BTreeSet<GrantType>,
    redirect_uris: BTreeSet<String>,
    scopes: BTreeSet<String>,
}

impl RegisteredClient {
    /// Start a builder for a client with the given internal identifier
    pub fn with_id(id: impl Into<String>) -> RegisteredClientBuilder {
        RegisteredClientBuilder {
            id: id.into(),
            ..RegisteredClientBuilder::default()
        }
    }

    /// Start a builder pre-filled from an existing client.
    ///
    /// The source client is left untouched; `build` yields a new value.
    pub fn with_registered_client(registered_client: &RegisteredClient) -> RegisteredClientBuilder {
        RegisteredClientBuilder {
            id: registered_client.id.clone(),
            client_id: registered_client.client_id.clone(),
            client_secret: registered_client.client_secret.clone(),
            client_authentication_methods: registered_client.client_authentication_methods.clone(),
            authorization_grant_types: registered_client.authorization_grant_types.clone(),
            redirect_uris: registered_client.redirect_uris.clone(),
            scopes: registered_client.scopes.clone(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    pub fn client_secret(&self) -> Option<&str> {
        self.client_secret.as_deref()
    }

    pub fn client_authentication_methods(&self) -> &BTreeSet<ClientAuthMethod> {
        &self.client_authentication_methods
    }

    pub fn authorization_grant_types(&self) -> &BTreeSet<GrantType> {
        &self.authorization_grant_types
    }

    pub fn redirect_uris(&self) -> &BTreeSet<String> {
        &self.redirect_uris
    }

    pub fn scopes(&self) -> &BTreeSet<String> {
        &self.scopes
    }
}

impl fmt::Debug for RegisteredClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegisteredClient")
            .field("id", &self.id)
            .field("client_id", &self.client_id)
            .field(
                "client_authentication_methods",
                &self.client_authentication_methods,
            )
            .field("authorization_grant_types", &self.authorization_grant_types)
            .field("redirect_uris", &self.redirect_uris)
            .field("scopes", &self.scopes)
            .finish()
    }
}

/// Accumulates client fields; [`build`](Self::build) validates them all at once.
#[derive(Debug, Clone, Default)]
pub struct RegisteredClientBuilder {
    id: String,
    client_id: String,
    client_secret: Option<String>,
    client_authentication_methods: BTreeSet<ClientAuthMethod>,
    authorization_grant_types: BTreeSet<GrantType>,
    redirect_uris: BTreeSet<String>,
    scopes: BTreeSet<String>,
}

impl RegisteredClientBuilder {
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn client_id(mut self, client_id: impl Into<String>) -> Self {
        self.client_id = client_id.into();
        self
    }

    pub fn client_secret(mut self, client_secret: impl Into<String>) -> Self {
        self.client_secret = Some(client_secret.into());
        self
    }

    pub fn client_authentication_method(mut self, method: ClientAuthMethod) -> Self {
        self.client_authentication_methods.insert(method);
        self
    }

    /// Edit the accumulated authentication methods in place
    pub fn client_authentication_methods(
        mut self,
        f: impl FnOnce(&mut BTreeSet<ClientAuthMethod>),
    ) -> Self {
        f(&mut self.client_authentication_methods);
        self
    }

    pub fn authorization_grant_type(mut self, grant_type: GrantType) -> Self {
        self.authorization_grant_types.insert(grant_type);
        self
    }

    /// Edit the accumulated grant types in place
    pub fn authorization_grant_types(mut self, f: impl FnOnce(&mut BTreeSet<GrantType>)) -> Self {
        f(&mut self.authorization_grant_types);
        self
    }

    pub fn redirect_uri(mut self, redirect_uri: impl Into<String>) -> Self {
        self.redirect_uris.insert(redirect_uri.into());
        self
    }

    /// Edit the accumulated redirect URIs in place
    pub fn redirect_uris(mut self, f: impl FnOnce(&mut BTreeSet<String>)) -> Self {
        f(&mut self.redirect_uris);
        self
    }

    pub fn scope(mut self, scope: impl Into<String>) -> Self {
        self.scopes.insert(scope.into());
        self
    }

    /// Edit the accumulated scopes in place
    pub fn scopes(mut self, f: impl FnOnce(&mut BTreeSet<String>)) -> Self {
        f(&mut self.scopes);
        self
    }

    /// Validate the accumulated fields and freeze them into a [`RegisteredClient`].
    pub fn build(mut self) -> Result<RegisteredClient, ClientError> {
        if self.id.is_empty() {
            return Err(ClientError::MissingId);
        }
        if self.client_id.is_empty() {
            return Err(ClientError::MissingClientId);
        }
        if self.authorization_grant_types.is_empty() {
            return Err(ClientError::MissingGrantTypes);
        }
        if self
            .authorization_grant_types
            .contains(&GrantType::AuthorizationCode)
        {
            if self.client_secret.as_deref().is_none_or(str::is_empty) {
                return Err(ClientError::MissingClientSecret);
            }
            if self.redirect_uris.is_empty() {
                return Err(ClientError::MissingRedirectUris);
            }
        }
        if self.client_authentication_methods.is_empty() {
            self.client_authentication_methods
                .insert(ClientAuthMethod::Basic);
        }
        if let Some(scope) = self.scopes.iter().find(|scope| !validate_scope(scope)) {
            return Err(ClientError::InvalidScope(scope.clone()));
        }
        if let Some(redirect_uri) = self
            .redirect_uris
            .iter()
            .find(|redirect_uri| !validate_redirect_uri(redirect_uri))
        {
            return Err(ClientError::InvalidRedirectUri(redirect_uri.clone()));
        }

        Ok(RegisteredClient {
            id: self.id,
            client_id: self.client_id,
            client_secret: self.client_secret,
            client_authentication_methods: self.client_authentication_methods,
            authorization_grant_types: self.authorization_grant_types,
            redirect_uris: self.redirect_uris,
            scopes: self.scopes,
        })
    }
}
