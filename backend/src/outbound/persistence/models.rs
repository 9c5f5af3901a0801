//! Internal Diesel row structs.
//!
//! These types never leave the persistence layer; repositories convert them
//! into validated domain values.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use super::schema::{gadgets, users};

/// Row read from `users`.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: i32,
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

/// Insert payload for `users`; the id is assigned by the sequence.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub email: &'a str,
    pub password_hash: &'a str,
}

/// Row read from `gadgets`.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = gadgets)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct GadgetRow {
    pub id: Uuid,
    pub name: String,
    pub codename: String,
    pub description: Option<String>,
    pub status: String,
    pub created_by_id: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub decommissioned_at: Option<DateTime<Utc>>,
}

/// Insert payload for `gadgets`.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = gadgets)]
pub(crate) struct NewGadgetRow<'a> {
    pub id: Uuid,
    pub name: &'a str,
    pub codename: &'a str,
    pub description: Option<&'a str>,
    pub status: &'a str,
    pub created_by_id: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub decommissioned_at: Option<DateTime<Utc>>,
}

/// Partial update for `gadgets`.
///
/// `None` fields are skipped by Diesel. `description: Some(None)` writes
/// `NULL`.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = gadgets)]
pub(crate) struct GadgetChangeset<'a> {
    pub name: Option<&'a str>,
    pub description: Option<Option<&'a str>>,
    pub status: Option<&'a str>,
    pub updated_at: DateTime<Utc>,
    pub decommissioned_at: Option<DateTime<Utc>>,
}
