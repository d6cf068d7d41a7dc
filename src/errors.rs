//! Standardized error types following the `error-authz-<domain>-<number>` format.

use thiserror::Error;

/// Configuration errors that occur during application startup
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Error when a required environment variable is not set
    #[error("error-authz-config-1 {0} must be set")]
    EnvVarRequired(String),

    /// Error when version information is not available
    #[error("error-authz-config-2 One of GIT_HASH or CARGO_PKG_VERSION must be set")]
    VersionNotSet,

    /// Error when duration string cannot be parsed
    #[error("error-authz-config-3 Failed to parse duration '{0}': {1}")]
    DurationParsingFailed(String, String),

    /// Error when the configured storage backend is not available
    #[error("error-authz-config-4 Unsupported storage backend: {0}")]
    UnsupportedStorageBackend(String),
}

/// Registered client validation errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClientError {
    /// Internal identifier is empty
    #[error("error-authz-client-1 id cannot be empty")]
    MissingId,

    /// Public client identifier is empty
    #[error("error-authz-client-2 clientId cannot be empty")]
    MissingClientId,

    /// No grant type configured
    #[error("error-authz-client-3 authorizationGrantTypes cannot be empty")]
    MissingGrantTypes,

    /// Authorization code grant without a secret
    #[error("error-authz-client-4 clientSecret cannot be empty")]
    MissingClientSecret,

    /// Authorization code grant without redirect URIs
    #[error("error-authz-client-5 redirectUris cannot be empty")]
    MissingRedirectUris,

    /// Redirect URI does not parse or carries a fragment
    #[error("error-authz-client-6 redirect_uri \"{0}\" is not a valid redirect URI or contains fragment")]
    InvalidRedirectUri(String),

    /// Scope contains characters outside the scope-token class
    #[error("error-authz-client-7 scope \"{0}\" contains invalid characters")]
    InvalidScope(String),
}

/// Authorization record validation errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthorizationError {
    /// Registered client reference is empty
    #[error("error-authz-authorization-1 registeredClientId cannot be empty")]
    MissingRegisteredClientId,

    /// Resource owner name is empty
    #[error("error-authz-authorization-2 principalName cannot be empty")]
    MissingPrincipalName,

    /// Neither an access token nor an authorization code was provided
    #[error(
        "error-authz-authorization-3 either accessToken has to be set or the authorization code with key '{0}' must be provided in the attributes map"
    )]
    MissingTokenOrCode(String),

    /// Attribute name is empty
    #[error("error-authz-authorization-4 attribute name cannot be empty")]
    EmptyAttributeName,

    /// Attribute value is empty
    #[error("error-authz-authorization-5 value for attribute '{0}' cannot be empty")]
    EmptyAttributeValue(String),

    /// Access token value object is malformed
    #[error("error-authz-authorization-6 Invalid access token: {0}")]
    InvalidAccessToken(String),
}

/// Client and authorization store errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StorageError {
    /// Required argument was empty
    #[error("error-authz-storage-1 Invalid argument: {0}")]
    InvalidArgument(String),

    /// Store constructed from an empty list
    #[error("error-authz-storage-2 {0} cannot be empty")]
    EmptyRegistrations(String),

    /// Two clients share an internal identifier
    #[error("error-authz-storage-3 Registered client must be unique. Found duplicate identifier: {0}")]
    DuplicateId(String),

    /// Two clients share a public client identifier
    #[error(
        "error-authz-storage-4 Registered client must be unique. Found duplicate client identifier: {0}"
    )]
    DuplicateClientId(String),

    /// Lock guarding the backing sequence was poisoned
    #[error("error-authz-storage-5 Lock error: {0}")]
    LockFailed(String),
}

/// Client registration file errors
#[derive(Debug, Error)]
pub enum LoaderError {
    /// Error when the registration file cannot be read
    #[error("error-authz-loader-1 Unable to read {0}: {1}")]
    ReadFailed(String, std::io::Error),

    /// Error when the registration file is not valid JSON
    #[error("error-authz-loader-2 Malformed client registration file: {0}")]
    MalformedFile(serde_json::Error),

    /// Error when an entry fails client validation
    #[error("error-authz-loader-3 Invalid client at index {0}: {1}")]
    InvalidClient(usize, ClientError),

    /// Error when the loaded clients cannot form a registry
    #[error("error-authz-loader-4 {0}")]
    Registry(#[from] StorageError),
}
