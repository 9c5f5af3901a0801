//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `backend/migrations` exactly. Regenerate with
//! `diesel print-schema` after changing a migration.

diesel::table! {
    /// Registered accounts.
    users (id) {
        /// Database-assigned serial key.
        id -> Int4,
        /// Unique, case-sensitive login email.
        email -> Varchar,
        /// Argon2 PHC string.
        password_hash -> Text,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Gadget inventory.
    gadgets (id) {
        /// UUID v4 generated by the service.
        id -> Uuid,
        name -> Varchar,
        /// Unique generated codename.
        codename -> Varchar,
        description -> Nullable<Text>,
        /// One of `Available`, `Deployed`, `Destroyed`, `Decommissioned`.
        status -> Varchar,
        /// Owning user.
        created_by_id -> Int4,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
        /// Set only by decommission.
        decommissioned_at -> Nullable<Timestamptz>,
    }
}

diesel::joinable!(gadgets -> users (created_by_id));
diesel::allow_tables_to_appear_in_same_query!(gadgets, users);
