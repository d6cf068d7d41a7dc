//! OAuth 2.1 authorization server core.
//!
//! Provides the registered client registry and the authorization store that
//! correlates issued access tokens and authorization codes back to their grants.

pub mod config;
pub mod errors;
pub mod oauth;
pub mod storage;
