//! OAuth 2.1 core types and data structures.
//!
//! Defines grant types, client authentication methods, token lookup kinds,
//! and the access token value object carried by an authorization.

use crate::errors::AuthorizationError;
use base64::prelude::*;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use uuid::Uuid;

/// OAuth 2.1 Grant Types
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum GrantType {
    AuthorizationCode,
    ClientCredentials,
    RefreshToken,
    Password,
    Implicit,
    /// Extension grant identified by its absolute value
    Custom(String),
}

impl GrantType {
    pub fn as_str(&self) -> &str {
        match self {
            GrantType::AuthorizationCode => "authorization_code",
            GrantType::ClientCredentials => "client_credentials",
            GrantType::RefreshToken => "refresh_token",
            GrantType::Password => "password",
            GrantType::Implicit => "implicit",
            GrantType::Custom(value) => value,
        }
    }
}

impl From<&str> for GrantType {
    fn from(value: &str) -> Self {
        match value {
            "authorization_code" => GrantType::AuthorizationCode,
            "client_credentials" => GrantType::ClientCredentials,
            "refresh_token" => GrantType::RefreshToken,
            "password" => GrantType::Password,
            "implicit" => GrantType::Implicit,
            other => GrantType::Custom(other.to_string()),
        }
    }
}

impl From<String> for GrantType {
    fn from(value: String) -> Self {
        GrantType::from(value.as_str())
    }
}

impl From<GrantType> for String {
    fn from(value: GrantType) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for GrantType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// OAuth 2.1 Client Authentication Methods
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ClientAuthMethod {
    /// HTTP Basic authentication with client credentials
    Basic,
    /// Client credentials in the request body
    Post,
    /// Public client, no authentication
    None,
    Custom(String),
}

impl ClientAuthMethod {
    pub fn as_str(&self) -> &str {
        match self {
            ClientAuthMethod::Basic => "basic",
            ClientAuthMethod::Post => "post",
            ClientAuthMethod::None => "none",
            ClientAuthMethod::Custom(value) => value,
        }
    }
}

impl From<&str> for ClientAuthMethod {
    fn from(value: &str) -> Self {
        match value {
            "basic" => ClientAuthMethod::Basic,
            "post" => ClientAuthMethod::Post,
            "none" => ClientAuthMethod::None,
            other => ClientAuthMethod::Custom(other.to_string()),
        }
    }
}

impl From<String> for ClientAuthMethod {
    fn from(value: String) -> Self {
        ClientAuthMethod::from(value.as_str())
    }
}

impl From<ClientAuthMethod> for String {
    fn from(value: ClientAuthMethod) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for ClientAuthMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind of credential presented when looking up an authorization.
///
/// Authorization codes are stored under [`AUTHORIZATION_CODE_KEY`], which is
/// separate from the `authorization_code` wire name of the kind itself.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TokenType {
    AuthorizationCode,
    AccessToken,
    Custom(String),
}

/// Attribute key holding the authorization code of an authorization.
pub const AUTHORIZATION_CODE_KEY: &str = "code";

impl TokenType {
    pub fn as_str(&self) -> &str {
        match self {
            TokenType::AuthorizationCode => "authorization_code",
            TokenType::AccessToken => "access_token",
            TokenType::Custom(value) => value,
        }
    }
}

impl From<&str> for TokenType {
    fn from(value: &str) -> Self {
        match value {
            "authorization_code" => TokenType::AuthorizationCode,
            "access_token" => TokenType::AccessToken,
            other => TokenType::Custom(other.to_string()),
        }
    }
}

impl From<String> for TokenType {
    fn from(value: String) -> Self {
        TokenType::from(value.as_str())
    }
}

impl From<TokenType> for String {
    fn from(value: TokenType) -> Self {
        value.as_str().to_string()
    }
}

/// Access token types
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AccessTokenType {
    Bearer,
}

/// OAuth Access Token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessToken {
    token_type: AccessTokenType,
    token_value: String,
    issued_at: DateTime<Utc>,
    expires_at: DateTime<Utc>,
    scopes: BTreeSet<String>,
}

impl AccessToken {
    /// Create an access token, rejecting an empty value or a non-positive lifetime.
    pub fn new(
        token_type: AccessTokenType,
        token_value: impl Into<String>,
        issued_at: DateTime<Utc>,
        expires_at: DateTime<Utc>,
        scopes: BTreeSet<String>,
    ) -> Result<Self, AuthorizationError> {
        let token_value = token_value.into();
        if token_value.is_empty() {
            return Err(AuthorizationError::InvalidAccessToken(
                "tokenValue cannot be empty".to_string(),
            ));
        }
        if expires_at <= issued_at {
            return Err(AuthorizationError::InvalidAccessToken(
                "expiresAt must be after issuedAt".to_string(),
            ));
        }
        Ok(Self {
            token_type,
            token_value,
            issued_at,
            expires_at,
            scopes,
        })
    }

    /// Bearer token issued now and valid for `lifetime`
    pub fn bearer(
        token_value: impl Into<String>,
        lifetime: chrono::Duration,
        scopes: BTreeSet<String>,
    ) -> Result<Self, AuthorizationError> {
        let issued_at = Utc::now();
        Self::new(
            AccessTokenType::Bearer,
            token_value,
            issued_at,
            issued_at + lifetime,
            scopes,
        )
    }

    pub fn token_type(&self) -> &AccessTokenType {
        &self.token_type
    }

    pub fn token_value(&self) -> &str {
        &self.token_value
    }

    pub fn issued_at(&self) -> DateTime<Utc> {
        self.issued_at
    }

    pub fn expires_at(&self) -> DateTime<Utc> {
        self.expires_at
    }

    pub fn scopes(&self) -> &BTreeSet<String> {
        &self.scopes
    }
}

/// Generate a secure random token
pub fn generate_token() -> String {
    use rand::Rng;
    let mut rng = rand::thread_rng();
    let bytes: [u8; 32] = rng.r#gen();
    BASE64_URL_SAFE_NO_PAD.encode(bytes)
}

/// Generate an internal client identifier
pub fn generate_client_id() -> String {
    Uuid::new_v4().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grant_type_values() {
        assert_eq!(GrantType::AuthorizationCode.as_str(), "authorization_code");
        assert_eq!(
            GrantType::from("client_credentials"),
            GrantType::ClientCredentials
        );
        assert_eq!(
            GrantType::from("urn:ietf:params:oauth:grant-type:device_code"),
            GrantType::Custom("urn:ietf:params:oauth:grant-type:device_code".to_string())
        );
    }

    #[test]
    fn test_grant_type_serde() {
        let grants: Vec<GrantType> =
            serde_json::from_str(r#"["authorization_code", "refresh_token", "custom"]"#).unwrap();
        assert_eq!(
            grants,
            vec![
                GrantType::AuthorizationCode,
                GrantType::RefreshToken,
                GrantType::Custom("custom".to_string())
            ]
        );
        assert_eq!(
            serde_json::to_string(&GrantType::Password).unwrap(),
            "\"password\""
        );
    }

    #[test]
    fn test_token_type_values() {
        assert_eq!(TokenType::AuthorizationCode.as_str(), "authorization_code");
        assert_eq!(
            TokenType::from("authorization_code"),
            TokenType::AuthorizationCode
        );
        assert_eq!(TokenType::from("access_token"), TokenType::AccessToken);
        assert_eq!(
            TokenType::from(AUTHORIZATION_CODE_KEY),
            TokenType::Custom("code".to_string())
        );

        let kinds: Vec<TokenType> =
            serde_json::from_str(r#"["authorization_code", "access_token"]"#).unwrap();
        assert_eq!(kinds, vec![TokenType::AuthorizationCode, TokenType::AccessToken]);
        assert_eq!(
            serde_json::to_string(&TokenType::AuthorizationCode).unwrap(),
            "\"authorization_code\""
        );
    }

    #[test]
    fn test_access_token_validation() {
        let now = Utc::now();
        let later = now + chrono::Duration::hours(1);
        assert!(AccessToken::new(AccessTokenType::Bearer, "", now, later, BTreeSet::new()).is_err());
        assert!(AccessToken::new(AccessTokenType::Bearer, "abc", now, now, BTreeSet::new()).is_err());

        let token =
            AccessToken::bearer("abc", chrono::Duration::minutes(5), BTreeSet::new()).unwrap();
        assert_eq!(token.token_value(), "abc");
        assert_eq!(token.token_type(), &AccessTokenType::Bearer);
        assert!(token.expires_at() > token.issued_at());
    }

    #[test]
    fn test_generate_token_is_random() {
        let a = generate_token();
        let b = generate_token();
        assert_eq!(a.len(), 43);
        assert_ne!(a, b);
    }
}
