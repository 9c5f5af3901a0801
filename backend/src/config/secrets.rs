//! Secret and connection settings read from the process environment.
//!
//! These never come from config files or the command line.

use mockable::{DefaultEnv, Env};
use zeroize::Zeroizing;

pub const DATABASE_URL_ENV: &str = "DATABASE_URL";
pub const JWT_SECRET_ENV: &str = "JWT_SECRET";

/// Errors raised while reading secrets.
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum SecretsError {
    #[error("missing required environment variable: {name}")]
    Missing { name: &'static str },
    #[error("environment variable {name} must not be blank")]
    Blank { name: &'static str },
}

/// Database URL and token signing secret.
pub struct Secrets {
    pub database_url: String,
    jwt_secret: Zeroizing<String>,
}

impl Secrets {
    /// Signing key bytes for the token codec.
    pub fn jwt_secret(&self) -> &[u8] {
        self.jwt_secret.as_bytes()
    }
}

impl std::fmt::Debug for Secrets {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Secrets")
            .field("database_url", &"<redacted>")
            .field("jwt_secret", &"<redacted>")
            .finish()
    }
}

fn required<E: Env>(env: &E, name: &'static str) -> Result<Zeroizing<String>, SecretsError> {
    let value = Zeroizing::new(env.string(name).ok_or(SecretsError::Missing { name })?);
    if value.trim().is_empty() {
        return Err(SecretsError::Blank { name });
    }
    Ok(value)
}

/// Read `DATABASE_URL` and `JWT_SECRET`.
///
/// # Examples
/// ```
/// use gadget_registry::config::secrets_from_env;
/// use mockable::MockEnv;
///
/// let mut env = MockEnv::new();
/// env.expect_string().returning(|name| match name {
///     "DATABASE_URL" => Some("postgres://localhost/gadgets".to_owned()),
///     "JWT_SECRET" => Some("not-a-real-secret".to_owned()),
///     _ => None,
/// });
///
/// let secrets = secrets_from_env(&env).expect("secrets");
/// assert_eq!(secrets.jwt_secret(), b"not-a-real-secret");
/// ```
pub fn secrets_from_env<E: Env>(env: &E) -> Result<Secrets, SecretsError> {
    let database_url = required(env, DATABASE_URL_ENV)?;
    let jwt_secret = required(env, JWT_SECRET_ENV)?;
    Ok(Secrets {
        database_url: database_url.to_string(),
        jwt_secret,
    })
}

/// Read secrets from the real process environment.
pub fn secrets_from_process_env() -> Result<Secrets, SecretsError> {
    secrets_from_env(&DefaultEnv::new())
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use env_lock::lock_env;
    use mockable::MockEnv;
    use rstest::rstest;

    use super::*;

    fn mock_env(vars: &[(&str, &str)]) -> MockEnv {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(key, value)| ((*key).to_owned(), (*value).to_owned()))
            .collect();
        let mut env = MockEnv::new();
        env.expect_string()
            .times(0..)
            .returning(move |key| vars.get(key).cloned());
        env
    }

    #[rstest]
    fn reads_both_values() {
        let env = mock_env(&[
            (DATABASE_URL_ENV, "postgres://db/gadgets"),
            (JWT_SECRET_ENV, "s3cret"),
        ]);

        let secrets = secrets_from_env(&env).expect("secrets");

        assert_eq!(secrets.database_url, "postgres://db/gadgets");
        assert_eq!(secrets.jwt_secret(), b"s3cret");
    }

    #[rstest]
    #[case(&[(JWT_SECRET_ENV, "s3cret")], SecretsError::Missing { name: DATABASE_URL_ENV })]
    #[case(&[(DATABASE_URL_ENV, "postgres://db/gadgets")], SecretsError::Missing { name: JWT_SECRET_ENV })]
    #[case(
        &[(DATABASE_URL_ENV, "postgres://db/gadgets"), (JWT_SECRET_ENV, "   ")],
        SecretsError::Blank { name: JWT_SECRET_ENV }
    )]
    fn missing_or_blank_values_are_fatal(
        #[case] vars: &[(&str, &str)],
        #[case] expected: SecretsError,
    ) {
        let err = secrets_from_env(&mock_env(vars)).expect_err("should fail");
        assert_eq!(err, expected);
    }

    #[rstest]
    fn debug_output_hides_values() {
        let env = mock_env(&[
            (DATABASE_URL_ENV, "postgres://user:pw@db/gadgets"),
            (JWT_SECRET_ENV, "s3cret"),
        ]);
        let rendered = format!("{:?}", secrets_from_env(&env).expect("secrets"));
        assert!(!rendered.contains("s3cret"));
        assert!(!rendered.contains("pw@"));
    }

    #[rstest]
    fn process_environment_is_read_directly() {
        let _guard = lock_env([
            (DATABASE_URL_ENV, Some("postgres://env/gadgets".to_owned())),
            (JWT_SECRET_ENV, Some("from-the-shell".to_owned())),
        ]);

        let secrets = secrets_from_process_env().expect("secrets");

        assert_eq!(secrets.database_url, "postgres://env/gadgets");
        assert_eq!(secrets.jwt_secret(), b"from-the-shell");
    }

    #[rstest]
    fn process_environment_without_a_secret_fails() {
        let _guard = lock_env([
            (DATABASE_URL_ENV, Some("postgres://env/gadgets".to_owned())),
            (JWT_SECRET_ENV, None::<String>),
        ]);

        let err = secrets_from_process_env().expect_err("should fail");

        assert_eq!(err, SecretsError::Missing { name: JWT_SECRET_ENV });
    }
}
