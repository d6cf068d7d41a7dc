//! In-memory authorization store
//!
//! Authorizations live in an insertion-ordered sequence behind a `RwLock`.
//! Lookups scan it front to back and return the first match.

use crate::errors::StorageError;
use crate::oauth::authorization::Authorization;
use crate::oauth::types::TokenType;
use crate::storage::traits::*;
use std::sync::{Arc, RwLock};

/// In-memory implementation of [`AuthorizationStore`]
#[derive(Debug, Default)]
pub struct MemoryAuthorizationStore {
    authorizations: RwLock<Vec<Arc<Authorization>>>,
}

impl MemoryAuthorizationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the store with a non-empty list of authorizations
    pub fn with_authorizations(authorizations: Vec<Authorization>) -> Result<Self> {
        if authorizations.is_empty() {
            return Err(StorageError::EmptyRegistrations(
                "authorizations".to_string(),
            ));
        }
        Ok(Self {
            authorizations: RwLock::new(authorizations.into_iter().map(Arc::new).collect()),
        })
    }

    pub fn len(&self) -> Result<usize> {
        let authorizations = self
            .authorizations
            .read()
            .map_err(|e| StorageError::LockFailed(e.to_string()))?;
        Ok(authorizations.len())
    }

    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }
}

impl AuthorizationStore for MemoryAuthorizationStore {
    fn save(&self, authorization: Authorization) -> Result<()> {
        let authorization = Arc::new(authorization);
        let mut authorizations = self
            .authorizations
            .write()
            .map_err(|e| StorageError::LockFailed(e.to_string()))?;
        authorizations.push(authorization);
        tracing::debug!(count = authorizations.len(), "authorization saved");
        Ok(())
    }

    fn find_by_token_and_type(
        &self,
        token: &str,
        token_type: &TokenType,
    ) -> Result<Option<Authorization>> {
        if token.is_empty() {
            return Err(StorageError::InvalidArgument(
                "token cannot be empty".to_string(),
            ));
        }

        let authorizations = self
            .authorizations
            .read()
            .map_err(|e| StorageError::LockFailed(e.to_string()))?;
        let found = authorizations
            .iter()
            .find(|authorization| authorization.has_token(token, token_type))
            .map(|authorization| authorization.as_ref().clone());

        tracing::debug!(
            token_type = token_type.as_str(),
            found = found.is_some(),
            "authorization lookup"
        );
        Ok(found)
    }
}
