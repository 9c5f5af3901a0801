//! Port for salted one-way password hashing.

use async_trait::async_trait;

use super::define_port_error;

define_port_error! {
    /// Errors raised by password hashing adapters.
    pub enum PasswordHashError {
        /// Producing a hash failed.
        Hashing { message: String } => "password hashing failed: {message}",
        /// A stored hash could not be parsed.
        MalformedHash { message: String } => "stored password hash is malformed: {message}",
    }
}

/// Hashes new passwords and checks candidates against stored hashes.
///
/// Methods are async so adapters can move CPU-heavy work off the request
/// executor.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PasswordHasher: Send + Sync {
    /// Hash `password` with a fresh salt.
    async fn hash(&self, password: &str) -> Result<String, PasswordHashError>;

    /// Return whether `password` matches `hash`.
    async fn verify(&self, password: &str, hash: &str) -> Result<bool, PasswordHashError>;
}

/// Reversible stand-in for tests that do not care about hash strength.
///
/// Never wire this into a running server.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixturePasswordHasher;

impl FixturePasswordHasher {
    const PREFIX: &'static str = "fixture$";
}

#[async_trait]
impl PasswordHasher for FixturePasswordHasher {
    async fn hash(&self, password: &str) -> Result<String, PasswordHashError> {
        Ok(format!("{}{password}", Self::PREFIX))
    }

    async fn verify(&self, password: &str, hash: &str) -> Result<bool, PasswordHashError> {
        let stored = hash
            .strip_prefix(Self::PREFIX)
            .ok_or_else(|| PasswordHashError::malformed_hash("missing fixture prefix"))?;
        Ok(stored == password)
    }
}
