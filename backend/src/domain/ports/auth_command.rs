//! Driving port for signup, login and bearer-token verification.
//!
//! Inbound adapters call this port without knowing how credentials are stored
//! or tokens are signed, so handler tests can substitute a double.

use async_trait::async_trait;

use crate::domain::{AuthSession, AuthenticatedUser, Credentials, Error};

/// Account and session use-cases.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AuthCommand: Send + Sync {
    /// Register a new account and issue a token for it.
    async fn signup(&self, credentials: &Credentials) -> Result<AuthSession, Error>;

    /// Check credentials and issue a token.
    async fn login(&self, credentials: &Credentials) -> Result<AuthSession, Error>;

    /// Verify a bearer token and return the identity it carries.
    fn verify_token(&self, token: &str) -> Result<AuthenticatedUser, Error>;
}
