//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Repositories translate between Diesel row structs (`models.rs`) and
//! validated domain types. Row structs and the table definitions in
//! `schema.rs` stay private to this module. Connections come from a
//! `diesel-async` + `bb8` pool, and every database failure is mapped to the
//! port's typed error.
//!
//! # Example
//!
//! ```ignore
//! use gadget_registry::outbound::persistence::{DbPool, DieselGadgetRepository, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/gadgets")).await?;
//! let gadgets = DieselGadgetRepository::new(pool);
//! ```

mod diesel_basic_error_mapping;
mod diesel_gadget_repository;
mod diesel_user_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_gadget_repository::DieselGadgetRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use migrations::{MIGRATIONS, MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
