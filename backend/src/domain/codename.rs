//! Codename vocabulary and generation.
//!
//! A codename is one prefix and one noun joined by a single space, both
//! drawn uniformly at random, e.g. `Operation Kraken`.

use rand::Rng;
use rand::seq::SliceRandom;

use super::Codename;

/// Leading word of every codename.
pub const CODENAME_PREFIXES: [&str; 4] = ["The", "Agent", "Project", "Operation"];

/// Trailing word of every codename.
pub const CODENAME_NOUNS: [&str; 20] = [
    "Nightingale",
    "Kraken",
    "Phoenix",
    "Viper",
    "Falcon",
    "Raven",
    "Cobra",
    "Wolf",
    "Tiger",
    "Dragon",
    "Shadow",
    "Thunder",
    "Lightning",
    "Storm",
    "Blaze",
    "Frost",
    "Steel",
    "Diamond",
    "Phantom",
    "Ghost",
];

/// Number of candidates checked against the store before the service gives
/// up on pre-checking and proceeds with one more.
pub const CODENAME_PRECHECK_ATTEMPTS: usize = 10;

impl Codename {
    /// Draw a random codename from the vocabulary.
    pub fn generate<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let prefix = CODENAME_PREFIXES.choose(rng).copied().unwrap_or("The");
        let noun = CODENAME_NOUNS.choose(rng).copied().unwrap_or("Ghost");
        Self(format!("{prefix} {noun}"))
    }

    /// True when this codename follows the prefix-plus-noun grammar.
    pub fn is_generated_form(&self) -> bool {
        let mut parts = self.as_ref().split(' ');
        matches!(
            (parts.next(), parts.next(), parts.next()),
            (Some(prefix), Some(noun), None)
                if CODENAME_PREFIXES.contains(&prefix) && CODENAME_NOUNS.contains(&noun)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;
    use rstest::rstest;

    #[rstest]
    fn generated_codenames_follow_grammar() {
        let mut rng = SmallRng::seed_from_u64(7);
        for _ in 0..200 {
            let codename = Codename::generate(&mut rng);
            assert!(codename.is_generated_form(), "unexpected {codename}");
        }
    }

    #[rstest]
    #[case("Operation Kraken", true)]
    #[case("The Ghost", true)]
    #[case("Operation  Kraken", false)]
    #[case("Operation Kraken Two", false)]
    #[case("Mister Kraken", false)]
    fn grammar_check(#[case] raw: &str, #[case] expected: bool) {
        let codename = Codename::new(raw).expect("non-blank");
        assert_eq!(codename.is_generated_form(), expected);
    }
}
