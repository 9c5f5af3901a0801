//! Port supplying the random values the gadget service needs.

use crate::domain::{Codename, ConfirmationCode, MissionSuccessProbability};

/// Source of codenames, confirmation codes and success probabilities.
#[cfg_attr(test, mockall::automock)]
pub trait GadgetRandomness: Send + Sync {
    /// Next codename candidate.
    fn codename(&self) -> Codename;

    /// Fresh self-destruct challenge code.
    fn confirmation_code(&self) -> ConfirmationCode;

    /// Per-read mission success probability.
    fn mission_success_probability(&self) -> MissionSuccessProbability;
}

/// [`GadgetRandomness`] backed by the thread-local RNG.
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadRngGadgetRandomness;

impl GadgetRandomness for ThreadRngGadgetRandomness {
    fn codename(&self) -> Codename {
        Codename::generate(&mut rand::thread_rng())
    }

    fn confirmation_code(&self) -> ConfirmationCode {
        ConfirmationCode::generate(&mut rand::thread_rng())
    }

    fn mission_success_probability(&self) -> MissionSuccessProbability {
        MissionSuccessProbability::random(&mut rand::thread_rng())
    }
}
