//! Credential hashing and bearer-token adapters.

mod argon2_password_hasher;
mod jwt_token_codec;

pub use argon2_password_hasher::Argon2PasswordHasher;
pub use jwt_token_codec::{DEFAULT_TOKEN_TTL, JwtTokenCodec};
