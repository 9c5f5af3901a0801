//! Startup configuration.
//!
//! [`ServerSettings`] holds tunables layered by OrthoConfig; [`Secrets`]
//! holds values that must only come from the environment.

mod secrets;
mod settings;

pub use secrets::{
    DATABASE_URL_ENV, JWT_SECRET_ENV, Secrets, SecretsError, secrets_from_env,
    secrets_from_process_env,
};
pub use settings::ServerSettings;
