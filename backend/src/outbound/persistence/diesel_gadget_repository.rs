//! PostgreSQL-backed `GadgetRepository` implementation using Diesel ORM.
//!
//! `codename` carries a plain index, not a unique one; repeats are allowed
//! once the vocabulary is exhausted. Partial updates are pushed down as a single `UPDATE ... RETURNING`, so
//! concurrent writers touching different fields do not clobber each other.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{GadgetPersistenceError, GadgetRepository};
use crate::domain::{
    Codename, Email, Gadget, GadgetDraft, GadgetId, GadgetMutation, GadgetName, GadgetStatus,
    GadgetWithCreator, UserId,
};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::{GadgetChangeset, GadgetRow, NewGadgetRow};
use super::pool::{DbPool, PoolError};
use super::schema::{gadgets, users};

/// Diesel-backed implementation of the gadget repository port.
#[derive(Clone)]
pub struct DieselGadgetRepository {
    pool: DbPool,
}

impl DieselGadgetRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> GadgetPersistenceError {
    map_basic_pool_error(error, GadgetPersistenceError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> GadgetPersistenceError {
    map_basic_diesel_error(
        error,
        GadgetPersistenceError::query,
        GadgetPersistenceError::connection,
    )
}

fn corrupt(field: &str, err: impl std::fmt::Display) -> GadgetPersistenceError {
    GadgetPersistenceError::query(format!("stored gadget has invalid {field}: {err}"))
}

/// Convert a database row into a validated domain gadget.
fn row_to_gadget(row: GadgetRow) -> Result<Gadget, GadgetPersistenceError> {
    let GadgetRow {
        id,
        name,
        codename,
        description,
        status,
        created_by_id,
        created_at,
        updated_at,
        decommissioned_at,
    } = row;

    Ok(Gadget::new(GadgetDraft {
        id: GadgetId::from_uuid(id),
        name: GadgetName::new(name).map_err(|err| corrupt("name", err))?,
        codename: Codename::new(codename).map_err(|err| corrupt("codename", err))?,
        description,
        status: status
            .parse::<GadgetStatus>()
            .map_err(|err| corrupt("status", err))?,
        created_by: UserId::new(created_by_id).map_err(|err| corrupt("created_by_id", err))?,
        created_at,
        updated_at,
        decommissioned_at,
    }))
}

fn row_to_listing(
    (row, creator_email): (GadgetRow, Option<String>),
) -> Result<GadgetWithCreator, GadgetPersistenceError> {
    Ok(GadgetWithCreator {
        gadget: row_to_gadget(row)?,
        creator_email: creator_email
            .map(Email::new)
            .transpose()
            .map_err(|err| corrupt("creator email", err))?,
    })
}

fn changeset(mutation: &GadgetMutation) -> GadgetChangeset<'_> {
    let changes = &mutation.changes;
    GadgetChangeset {
        name: changes.name.as_ref().map(|name| name.as_ref()),
        description: changes.description.as_ref().map(Option::as_deref),
        status: changes.status.map(GadgetStatus::as_str),
        updated_at: mutation.updated_at,
        decommissioned_at: mutation.decommissioned_at,
    }
}

#[async_trait]
impl GadgetRepository for DieselGadgetRepository {
    async fn list(
        &self,
        status: Option<GadgetStatus>,
    ) -> Result<Vec<GadgetWithCreator>, GadgetPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let mut query = gadgets::table
            .left_join(users::table)
            .select((GadgetRow::as_select(), users::email.nullable()))
            .order((gadgets::created_at.desc(), gadgets::id.desc()))
            .into_boxed();
        if let Some(status) = status {
            query = query.filter(gadgets::status.eq(status.as_str()));
        }

        let rows: Vec<(GadgetRow, Option<String>)> =
            query.load(&mut conn).await.map_err(map_diesel_error)?;

        rows.into_iter().map(row_to_listing).collect()
    }

    async fn find_by_id(&self, id: &GadgetId) -> Result<Option<Gadget>, GadgetPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = gadgets::table
            .find(id.as_uuid())
            .select(GadgetRow::as_select())
            .first::<GadgetRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_gadget).transpose()
    }

    async fn codename_exists(&self, codename: &Codename) -> Result<bool, GadgetPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        diesel::select(diesel::dsl::exists(
            gadgets::table.filter(gadgets::codename.eq(codename.as_ref())),
        ))
        .get_result::<bool>(&mut conn)
        .await
        .map_err(map_diesel_error)
    }

    async fn insert(&self, gadget: &Gadget) -> Result<(), GadgetPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = NewGadgetRow {
            id: *gadget.id().as_uuid(),
            name: gadget.name().as_ref(),
            codename: gadget.codename().as_ref(),
            description: gadget.description(),
            status: gadget.status().as_str(),
            created_by_id: gadget.created_by().get(),
            created_at: gadget.created_at(),
            updated_at: gadget.updated_at(),
            decommissioned_at: gadget.decommissioned_at(),
        };

        diesel::insert_into(gadgets::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }

    async fn apply(
        &self,
        id: &GadgetId,
        mutation: &GadgetMutation,
    ) -> Result<Option<Gadget>, GadgetPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = diesel::update(gadgets::table.find(id.as_uuid()))
            .set(&changeset(mutation))
            .returning(GadgetRow::as_returning())
            .get_result::<GadgetRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_gadget).transpose()
    }
}
