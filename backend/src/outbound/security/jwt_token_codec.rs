//! HS256 JWT implementation of the `TokenCodec` port.
//!
//! Claims carry `{userId, email, iat, exp}`. Issuance time comes from the
//! injected clock; expiry is checked by `jsonwebtoken` against wall-clock time
//! with no leeway.

use std::sync::Arc;

use chrono::Duration;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use mockable::Clock;
use serde::{Deserialize, Serialize};

use crate::domain::ports::{TokenCodec, TokenCodecError};
use crate::domain::{AuthenticatedUser, BearerToken, Email, UserId};

/// Default token lifetime.
pub const DEFAULT_TOKEN_TTL: Duration = Duration::hours(24);

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Claims {
    user_id: i32,
    email: String,
    iat: i64,
    exp: i64,
}

/// Signs and verifies bearer tokens with a shared secret.
pub struct JwtTokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    ttl: Duration,
    clock: Arc<dyn Clock>,
}

impl JwtTokenCodec {
    /// Build a codec from the raw signing secret.
    pub fn new(secret: &[u8], ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "iat"]);
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation,
            ttl,
            clock,
        }
    }
}

impl TokenCodec for JwtTokenCodec {
    fn issue(&self, identity: &AuthenticatedUser) -> Result<BearerToken, TokenCodecError> {
        let issued_at = self.clock.utc();
        let claims = Claims {
            user_id: identity.user_id.get(),
            email: identity.email.as_ref().to_owned(),
            iat: issued_at.timestamp(),
            exp: (issued_at + self.ttl).timestamp(),
        };
        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map(BearerToken::new)
            .map_err(|err| TokenCodecError::encoding(err.to_string()))
    }

    fn verify(&self, token: &str) -> Result<AuthenticatedUser, TokenCodecError> {
        let data = decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|err| {
            match err.kind() {
                ErrorKind::ExpiredSignature => TokenCodecError::expired(),
                _ => TokenCodecError::invalid(err.to_string()),
            }
        })?;
        let Claims { user_id, email, .. } = data.claims;
        Ok(AuthenticatedUser {
            user_id: UserId::new(user_id).map_err(|err| TokenCodecError::invalid(err.to_string()))?,
            email: Email::new(email).map_err(|err| TokenCodecError::invalid(err.to_string()))?,
        })
    }
}
