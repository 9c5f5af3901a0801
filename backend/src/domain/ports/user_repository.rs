//! Port abstraction for the credential store and its errors.
use async_trait::async_trait;

use crate::domain::{Email, StoredCredentials, User};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by user repository adapters.
    pub enum UserPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "user repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "user repository query failed: {message}",
        /// The email is already registered.
        DuplicateEmail { email: String } => "email already registered: {email}",
    }
}

/// Account about to be inserted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub email: Email,
    pub password_hash: String,
}

/// Credential store used by the auth service.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Look up a user and their password hash by exact email.
    async fn find_by_email(
        &self,
        email: &Email,
    ) -> Result<Option<StoredCredentials>, UserPersistenceError>;

    /// Insert a user, returning the stored public record.
    ///
    /// Adapters report unique-constraint violations as
    /// [`UserPersistenceError::DuplicateEmail`].
    async fn create(&self, user: &NewUser) -> Result<User, UserPersistenceError>;
}
