//! Authorization records binding a client, a resource owner, and the
//! access token or authorization code granted to them.

use crate::errors::AuthorizationError;
use crate::oauth::types::{AUTHORIZATION_CODE_KEY, AccessToken, TokenType};
use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;

/// One OAuth grant.
///
/// Carries either an access token or an authorization code stored under
/// [`AUTHORIZATION_CODE_KEY`] in its attributes, or both.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Authorization {
    registered_client_id: String,
    principal_name: String,
    access_token: Option<AccessToken>,
    attributes: HashMap<String, Value>,
}

impl Authorization {
    pub fn builder() -> AuthorizationBuilder {
        AuthorizationBuilder::default()
    }

    /// Start a builder pre-filled from an existing authorization
    pub fn with_authorization(authorization: &Authorization) -> AuthorizationBuilder {
        AuthorizationBuilder {
            registered_client_id: authorization.registered_client_id.clone(),
            principal_name: authorization.principal_name.clone(),
            access_token: authorization.access_token.clone(),
            attributes: authorization.attributes.clone(),
            invalid_attribute: None,
        }
    }

    pub fn registered_client_id(&self) -> &str {
        &self.registered_client_id
    }

    pub fn principal_name(&self) -> &str {
        &self.principal_name
    }

    pub fn access_token(&self) -> Option<&AccessToken> {
        self.access_token.as_ref()
    }

    pub fn attributes(&self) -> &HashMap<String, Value> {
        &self.attributes
    }

    /// Look up a single attribute; `name` must not be empty.
    pub fn attribute(&self, name: &str) -> Result<Option<&Value>, AuthorizationError> {
        if name.is_empty() {
            return Err(AuthorizationError::EmptyAttributeName);
        }
        Ok(self.attributes.get(name))
    }

    /// The authorization code, when stored as a string attribute
    pub fn authorization_code(&self) -> Option<&str> {
        self.attributes
            .get(AUTHORIZATION_CODE_KEY)
            .and_then(Value::as_str)
    }

    /// Whether `token` is the credential of the given kind held by this authorization.
    ///
    /// A code attribute that is not a JSON string never matches.
    pub fn has_token(&self, token: &str, token_type: &TokenType) -> bool {
        match token_type {
            TokenType::AuthorizationCode => self.authorization_code() == Some(token),
            TokenType::AccessToken => self
                .access_token
                .as_ref()
                .is_some_and(|access_token| access_token.token_value() == token),
            TokenType::Custom(_) => false,
        }
    }
}

/// Accumulates authorization fields; [`build`](Self::build) validates them.
#[derive(Debug, Clone, Default)]
pub struct AuthorizationBuilder {
    registered_client_id: String,
    principal_name: String,
    access_token: Option<AccessToken>,
    attributes: HashMap<String, Value>,
    invalid_attribute: Option<AuthorizationError>,
}

impl AuthorizationBuilder {
    pub fn registered_client_id(mut self, registered_client_id: impl Into<String>) -> Self {
        self.registered_client_id = registered_client_id.into();
        self
    }

    pub fn principal_name(mut self, principal_name: impl Into<String>) -> Self {
        self.principal_name = principal_name.into();
        self
    }

    pub fn access_token(mut self, access_token: AccessToken) -> Self {
        self.access_token = Some(access_token);
        self
    }

    /// Store a string attribute. An empty value is reported by `build`.
    pub fn attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let name = name.into();
        let value = value.into();
        if value.is_empty() && self.invalid_attribute.is_none() {
            self.invalid_attribute = Some(AuthorizationError::EmptyAttributeValue(name.clone()));
        }
        self.attributes.insert(name, Value::String(value));
        self
    }

    /// Edit the accumulated attributes in place
    pub fn attributes(mut self, f: impl FnOnce(&mut HashMap<String, Value>)) -> Self {
        f(&mut self.attributes);
        self
    }

    /// Validate the accumulated fields and freeze them into an [`Authorization`].
    pub fn build(self) -> Result<Authorization, AuthorizationError> {
        if self.registered_client_id.is_empty() {
            return Err(AuthorizationError::MissingRegisteredClientId);
        }
        if self.principal_name.is_empty() {
            return Err(AuthorizationError::MissingPrincipalName);
        }
        if let Some(err) = self.invalid_attribute {
            return Err(err);
        }
        if self.attributes.contains_key("") {
            return Err(AuthorizationError::EmptyAttributeName);
        }
        let has_code = self
            .attributes
            .get(AUTHORIZATION_CODE_KEY)
            .is_some_and(|code| !code.is_null());
        if self.access_token.is_none() && !has_code {
            return Err(AuthorizationError::MissingTokenOrCode(
                AUTHORIZATION_CODE_KEY.to_string(),
            ));
        }

        Ok(Authorization {
            registered_client_id: self.registered_client_id,
            principal_name: self.principal_name,
            access_token: self.access_token,
            attributes: self.attributes,
        })
    }
}
