//! Shared helpers for backend integration tests.

pub mod in_memory;
