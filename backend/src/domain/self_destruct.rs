//! Self-destruct handshake types.
//!
//! A request without a confirmation code yields a challenge carrying a fresh
//! code. The challenge is not remembered: any later code matching
//! [`CONFIRMATION_CODE_PATTERN`] completes the destruction.

use std::fmt;
use std::sync::OnceLock;

use chrono::{DateTime, Utc};
use rand::Rng;
use rand::seq::SliceRandom;
use regex::Regex;

use super::Gadget;

/// Length of a confirmation code.
pub const CONFIRMATION_CODE_LEN: usize = 8;

/// Accepted confirmation code shape.
pub const CONFIRMATION_CODE_PATTERN: &str = "^[A-Z0-9]{8}$";

const CONFIRMATION_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

static CONFIRMATION_CODE_RE: OnceLock<Regex> = OnceLock::new();

fn confirmation_code_regex() -> &'static Regex {
    CONFIRMATION_CODE_RE.get_or_init(|| {
        Regex::new(CONFIRMATION_CODE_PATTERN)
            .unwrap_or_else(|error| panic!("confirmation code regex failed to compile: {error}"))
    })
}

/// Rejected confirmation code input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmationCodeError {
    pub value: String,
}

impl fmt::Display for ConfirmationCodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "confirmation code must be {CONFIRMATION_CODE_LEN} uppercase letters or digits"
        )
    }
}

impl std::error::Error for ConfirmationCodeError {}

/// Eight-character uppercase alphanumeric code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmationCode(String);

impl ConfirmationCode {
    /// Validate a caller-supplied code.
    ///
    /// # Examples
    /// ```
    /// use gadget_registry::domain::ConfirmationCode;
    ///
    /// assert!(ConfirmationCode::parse("AB12CD34").is_ok());
    /// assert!(ConfirmationCode::parse("ab12cd34").is_err());
    /// ```
    pub fn parse(raw: &str) -> Result<Self, ConfirmationCodeError> {
        if !confirmation_code_regex().is_match(raw) {
            return Err(ConfirmationCodeError {
                value: raw.to_owned(),
            });
        }
        Ok(Self(raw.to_owned()))
    }

    /// Draw a fresh random code.
    pub fn generate<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let code = (0..CONFIRMATION_CODE_LEN)
            .map(|_| {
                CONFIRMATION_ALPHABET
                    .choose(rng)
                    .map_or('0', |&byte| char::from(byte))
            })
            .collect();
        Self(code)
    }
}

impl AsRef<str> for ConfirmationCode {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for ConfirmationCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

/// Result of a self-destruct request that passed the existence and status
/// checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelfDestructOutcome {
    /// No code was supplied; nothing changed.
    ChallengeIssued { confirmation_code: ConfirmationCode },
    /// The gadget is now `Destroyed`.
    Destroyed {
        gadget: Gadget,
        destruction_time: DateTime<Utc>,
        confirmation_code: ConfirmationCode,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;
    use rstest::rstest;

    #[rstest]
    #[case("AB12CD34")]
    #[case("00000000")]
    #[case("ZZZZZZZZ")]
    fn accepts_well_formed_codes(#[case] raw: &str) {
        let code = ConfirmationCode::parse(raw).expect("valid code");
        assert_eq!(code.as_ref(), raw);
    }

    #[rstest]
    #[case("")]
    #[case("ab12cd34")]
    #[case("AB12CD3")]
    #[case("AB12CD345")]
    #[case("AB12-D34")]
    #[case(" AB12CD34")]
    fn rejects_malformed_codes(#[case] raw: &str) {
        let err = ConfirmationCode::parse(raw).expect_err("invalid code");
        assert_eq!(err.value, raw);
    }

    #[rstest]
    fn generated_codes_satisfy_the_pattern() {
        let mut rng = SmallRng::seed_from_u64(99);
        for _ in 0..200 {
            let code = ConfirmationCode::generate(&mut rng);
            assert!(
                ConfirmationCode::parse(code.as_ref()).is_ok(),
                "unexpected {code}"
            );
        }
    }

    #[rstest]
    fn generation_reaches_both_ends_of_the_alphabet() {
        let mut rng = SmallRng::seed_from_u64(7);
        let drawn: String = (0..100)
            .map(|_| ConfirmationCode::generate(&mut rng).to_string())
            .collect();

        assert!(drawn.contains('A'));
        assert!(drawn.contains('9'));
        assert!(drawn.bytes().all(|byte| CONFIRMATION_ALPHABET.contains(&byte)));
    }
}
