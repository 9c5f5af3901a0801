//! PostgreSQL-backed `UserRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{NewUser, UserPersistenceError, UserRepository};
use crate::domain::{Email, StoredCredentials, User, UserId};

use super::diesel_basic_error_mapping::{
    map_basic_diesel_error, map_basic_pool_error, unique_violation_constraint,
};
use super::models::{NewUserRow, UserRow};
use super::pool::{DbPool, PoolError};
use super::schema::users;

const EMAIL_UNIQUE_CONSTRAINT: &str = "users_email_key";

/// Diesel-backed credential store.
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> UserPersistenceError {
    map_basic_pool_error(error, UserPersistenceError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> UserPersistenceError {
    map_basic_diesel_error(
        error,
        UserPersistenceError::query,
        UserPersistenceError::connection,
    )
}

fn map_insert_error(error: diesel::result::Error, email: &Email) -> UserPersistenceError {
    if unique_violation_constraint(&error) == Some(EMAIL_UNIQUE_CONSTRAINT) {
        return UserPersistenceError::duplicate_email(email.as_ref());
    }
    map_diesel_error(error)
}

fn row_to_user(row: &UserRow) -> Result<User, UserPersistenceError> {
    let id = UserId::new(row.id).map_err(|err| UserPersistenceError::query(err.to_string()))?;
    let email =
        Email::new(row.email.clone()).map_err(|err| UserPersistenceError::query(err.to_string()))?;
    Ok(User::new(id, email, row.created_at))
}

fn row_to_credentials(row: UserRow) -> Result<StoredCredentials, UserPersistenceError> {
    let user = row_to_user(&row)?;
    Ok(StoredCredentials {
        user,
        password_hash: row.password_hash,
    })
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn find_by_email(
        &self,
        email: &Email,
    ) -> Result<Option<StoredCredentials>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = users::table
            .filter(users::email.eq(email.as_ref()))
            .select(UserRow::as_select())
            .first::<UserRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_credentials).transpose()
    }

    async fn create(&self, user: &NewUser) -> Result<User, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = diesel::insert_into(users::table)
            .values(&NewUserRow {
                email: user.email.as_ref(),
                password_hash: &user.password_hash,
            })
            .returning(UserRow::as_returning())
            .get_result::<UserRow>(&mut conn)
            .await
            .map_err(|err| map_insert_error(err, &user.email))?;

        row_to_user(&row)
    }
}
