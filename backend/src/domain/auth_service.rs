//! Account signup, login and token verification.
//!
//! Implements the [`AuthCommand`] driving port over a credential store, a
//! password hasher and a token codec.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use tracing::{info, warn};

use crate::domain::ports::{
    AuthCommand, NewUser, PasswordHashError, PasswordHasher, TokenCodec, TokenCodecError,
    UserPersistenceError, UserRepository,
};
use crate::domain::{AuthSession, AuthenticatedUser, Credentials, Error, User};

const INVALID_CREDENTIALS: &str = "invalid credentials";

fn map_user_error(error: UserPersistenceError) -> Error {
    match error {
        UserPersistenceError::Connection { message } => {
            Error::service_unavailable(format!("user repository unavailable: {message}"))
        }
        UserPersistenceError::Query { message } => {
            Error::internal(format!("user repository error: {message}"))
        }
        UserPersistenceError::DuplicateEmail { .. } => email_taken(),
    }
}

fn map_hash_error(error: PasswordHashError) -> Error {
    Error::internal(error.to_string())
}

fn map_token_error(error: TokenCodecError) -> Error {
    match error {
        TokenCodecError::Expired => Error::unauthorized("token expired"),
        TokenCodecError::Invalid { .. } => Error::unauthorized("invalid token"),
        TokenCodecError::Encoding { message } => {
            Error::internal(format!("token encoding failed: {message}"))
        }
    }
}

fn email_taken() -> Error {
    Error::conflict("email already registered")
        .with_details(json!({ "field": "email", "code": "duplicate" }))
}

/// Auth service implementing [`AuthCommand`].
#[derive(Clone)]
pub struct AuthService<U, H, T> {
    users: Arc<U>,
    hasher: Arc<H>,
    tokens: Arc<T>,
}

impl<U, H, T> AuthService<U, H, T> {
    /// Create a new service from its collaborators.
    pub fn new(users: Arc<U>, hasher: Arc<H>, tokens: Arc<T>) -> Self {
        Self {
            users,
            hasher,
            tokens,
        }
    }
}

impl<U, H, T> AuthService<U, H, T>
where
    T: TokenCodec,
{
    fn open_session(&self, user: User) -> Result<AuthSession, Error> {
        let identity = AuthenticatedUser {
            user_id: user.id(),
            email: user.email().clone(),
        };
        let token = self.tokens.issue(&identity).map_err(map_token_error)?;
        Ok(AuthSession { user, token })
    }
}

#[async_trait]
impl<U, H, T> AuthCommand for AuthService<U, H, T>
where
    U: UserRepository,
    H: PasswordHasher,
    T: TokenCodec,
{
    async fn signup(&self, credentials: &Credentials) -> Result<AuthSession, Error> {
        let existing = self
            .users
            .find_by_email(credentials.email())
            .await
            .map_err(map_user_error)?;
        if existing.is_some() {
            return Err(email_taken());
        }

        let password_hash = self
            .hasher
            .hash(credentials.password())
            .await
            .map_err(map_hash_error)?;
        let user = self
            .users
            .create(&NewUser {
                email: credentials.email().clone(),
                password_hash,
            })
            .await
            .map_err(map_user_error)?;

        info!(user_id = %user.id(), "account registered");
        self.open_session(user)
    }

    async fn login(&self, credentials: &Credentials) -> Result<AuthSession, Error> {
        let Some(stored) = self
            .users
            .find_by_email(credentials.email())
            .await
            .map_err(map_user_error)?
        else {
            return Err(Error::unauthorized(INVALID_CREDENTIALS));
        };

        let matches = self
            .hasher
            .verify(credentials.password(), &stored.password_hash)
            .await
            .map_err(map_hash_error)?;
        if !matches {
            warn!(user_id = %stored.user.id(), "password mismatch on login");
            return Err(Error::unauthorized(INVALID_CREDENTIALS));
        }

        self.open_session(stored.user)
    }

    fn verify_token(&self, token: &str) -> Result<AuthenticatedUser, Error> {
        self.tokens.verify(token).map_err(map_token_error)
    }
}

#[cfg(test)]
#[path = "auth_service_tests.rs"]
mod tests;
