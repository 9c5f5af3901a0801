//! Port for issuing and verifying signed bearer tokens.

use crate::domain::{AuthenticatedUser, BearerToken};

use super::define_port_error;

define_port_error! {
    /// Errors raised by token codecs.
    pub enum TokenCodecError {
        /// Signing failed.
        Encoding { message: String } => "token encoding failed: {message}",
        /// The token is malformed, carries a bad signature or bad claims.
        Invalid { message: String } => "token is invalid: {message}",
        /// The token is past its expiry.
        Expired => "token has expired",
    }
}

/// Issues tokens for authenticated identities and recovers them again.
///
/// Verification performs no I/O, so the trait is synchronous.
#[cfg_attr(test, mockall::automock)]
pub trait TokenCodec: Send + Sync {
    /// Sign a token for `identity`.
    fn issue(&self, identity: &AuthenticatedUser) -> Result<BearerToken, TokenCodecError>;

    /// Verify `token` and return the identity it was issued for.
    fn verify(&self, token: &str) -> Result<AuthenticatedUser, TokenCodecError>;
}
