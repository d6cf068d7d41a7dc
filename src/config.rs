//! Environment-based configuration types for the operator CLI.

use anyhow::Result;
use std::path::{Path, PathBuf};

use crate::errors::ConfigError;
use crate::storage::{StorageBackend, parse_storage_backend};

/// Client registration file location
#[derive(Clone, Debug)]
pub struct RegisteredClientsFile(PathBuf);

/// Lifetime of access tokens minted by the CLI
#[derive(Clone, Debug)]
pub struct AccessTokenExpiration(chrono::Duration);

/// Main application configuration
#[derive(Clone, Debug)]
pub struct Config {
    pub version: String,
    pub registered_clients_file: RegisteredClientsFile,
    pub storage_backend: StorageBackend,
    pub access_token_expiration: AccessTokenExpiration,
}

impl Config {
    /// Create a new configuration from environment variables
    pub fn new() -> Result<Self> {
        let registered_clients_file: RegisteredClientsFile =
            default_env("REGISTERED_CLIENTS_FILE", "clients.json").try_into()?;
        let storage_backend = parse_storage_backend(&default_env("STORAGE_BACKEND", "memory"))?;
        let access_token_expiration: AccessTokenExpiration =
            default_env("ACCESS_TOKEN_EXPIRATION", "1h").try_into()?;

        Ok(Self {
            version: version()?,
            registered_clients_file,
            storage_backend,
            access_token_expiration,
        })
    }
}

/// Get application version from build environment
pub fn version() -> Result<String> {
    option_env!("GIT_HASH")
        .or(option_env!("CARGO_PKG_VERSION"))
        .map(|val| val.to_string())
        .ok_or(ConfigError::VersionNotSet.into())
}

fn default_env(name: &str, default_value: &str) -> String {
    std::env::var(name).unwrap_or_else(|_| default_value.to_string())
}

impl TryFrom<String> for RegisteredClientsFile {
    type Error = anyhow::Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        if value.trim().is_empty() {
            return Err(ConfigError::EnvVarRequired("REGISTERED_CLIENTS_FILE".to_string()).into());
        }
        Ok(Self(PathBuf::from(value)))
    }
}

impl AsRef<Path> for RegisteredClientsFile {
    fn as_ref(&self) -> &Path {
        &self.0
    }
}

impl TryFrom<String> for AccessTokenExpiration {
    type Error = anyhow::Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        let duration = duration_str::parse(&value)
            .map_err(|e| ConfigError::DurationParsingFailed(value.clone(), e.to_string()))?;
        if duration.is_zero() {
            return Err(
                ConfigError::DurationParsingFailed(value, "must be positive".to_string()).into(),
            );
        }
        Ok(Self(chrono::Duration::from_std(duration)?))
    }
}

impl AsRef<chrono::Duration> for AccessTokenExpiration {
    fn as_ref(&self) -> &chrono::Duration {
        &self.0
    }
}
