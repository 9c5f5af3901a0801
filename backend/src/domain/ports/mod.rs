//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driving ports (`AuthCommand`, `GadgetCommand`, `GadgetQuery`) are called by
//! inbound adapters. Driven ports (`UserRepository`, `GadgetRepository`,
//! `PasswordHasher`, `TokenCodec`, `GadgetRandomness`) are implemented by
//! outbound adapters.

mod macros;
pub(crate) use macros::define_port_error;

mod auth_command;
mod gadget_command;
mod gadget_query;
mod gadget_randomness;
mod gadget_repository;
mod password_hasher;
mod token_codec;
mod user_repository;

pub use auth_command::AuthCommand;
#[cfg(test)]
pub use auth_command::MockAuthCommand;
pub use gadget_command::{
    CreateGadgetRequest, GadgetCommand, SelfDestructRequest, UpdateGadgetRequest,
};
#[cfg(test)]
pub use gadget_command::MockGadgetCommand;
pub use gadget_query::GadgetQuery;
#[cfg(test)]
pub use gadget_query::MockGadgetQuery;
#[cfg(test)]
pub use gadget_randomness::MockGadgetRandomness;
pub use gadget_randomness::{GadgetRandomness, ThreadRngGadgetRandomness};
#[cfg(test)]
pub use gadget_repository::MockGadgetRepository;
pub use gadget_repository::{GadgetPersistenceError, GadgetRepository};
#[cfg(test)]
pub use password_hasher::MockPasswordHasher;
pub use password_hasher::{FixturePasswordHasher, PasswordHashError, PasswordHasher};
#[cfg(test)]
pub use token_codec::MockTokenCodec;
pub use token_codec::{TokenCodec, TokenCodecError};
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{NewUser, UserPersistenceError, UserRepository};
