use crate::{DbError, Result as DbErrorResult, UserStore};

use idp_core::{NewUser, User};

use std::panic::Location;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use error_location::ErrorLocation;
use log::warn;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, Sqlite, SqlitePool, Transaction};

const USER_COLUMNS: &str = "id, uuid, username, created_at, updated_at";

#[derive(Clone)]
pub struct UserRepository {
    pool: SqlitePool,
}

impl UserRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn find_by_id(&self, id: i64) -> DbErrorResult<Option<User>> {
        let row = sqlx::query(&format!("SELECT {USER_COLUMNS} FROM users WHERE id = ?"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(map_user_row).transpose()
    }

    pub async fn find_by_uuid(&self, uuid: &str) -> DbErrorResult<Option<User>> {
        let row = sqlx::query(&format!("SELECT {USER_COLUMNS} FROM users WHERE uuid = ?"))
            .bind(uuid)
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(map_user_row).transpose()
    }

    pub async fn find_by_username(&self, username: &str) -> DbErrorResult<Option<User>> {
        let row = sqlx::query(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE username = ?"
        ))
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(map_user_row).transpose()
    }

    pub async fn count_by_uuid(&self, uuid: &str) -> DbErrorResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE uuid = ?")
            .bind(uuid)
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    /// Insert a user in its own transaction.
    ///
    /// A uniqueness violation comes back as `DbError::UniqueViolation` with the
    /// column classified, after the transaction has been rolled back.
    pub async fn insert(&self, new_user: &NewUser) -> DbErrorResult<User> {
        let now = Utc::now().timestamp();
        let mut tx = self.pool.begin().await?;

        let result = sqlx::query(&format!(
            "INSERT INTO users (uuid, username, created_at, updated_at) \
             VALUES (?, ?, ?, ?) RETURNING {USER_COLUMNS}"
        ))
        .bind(&new_user.uuid)
        .bind(&new_user.username)
        .bind(now)
        .bind(now)
        .fetch_one(&mut *tx)
        .await;

        match result {
            Ok(row) => {
                let user = map_user_row(&row)?;
                tx.commit().await?;
                Ok(user)
            }
            Err(e) => {
                rollback(tx, "insert user").await;
                Err(DbError::from(e))
            }
        }
    }

    /// Overwrite a user's username in its own transaction.
    pub async fn update_username(&self, id: i64, username: &str) -> DbErrorResult<User> {
        let now = Utc::now().timestamp();
        let mut tx = self.pool.begin().await?;

        let result = sqlx::query(&format!(
            "UPDATE users SET username = ?, updated_at = ? WHERE id = ? RETURNING {USER_COLUMNS}"
        ))
        .bind(username)
        .bind(now)
        .bind(id)
        .fetch_optional(&mut *tx)
        .await;

        match result {
            Ok(Some(row)) => {
                let user = map_user_row(&row)?;
                tx.commit().await?;
                Ok(user)
            }
            Ok(None) => {
                rollback(tx, "update username").await;
                Err(DbError::NotFound {
                    entity: "User",
                    id: id.to_string(),
                    location: ErrorLocation::from(Location::caller()),
                })
            }
            Err(e) => {
                rollback(tx, "update username").await;
                Err(DbError::from(e))
            }
        }
    }
}

#[async_trait]
impl UserStore for UserRepository {
    async fn find_by_id(&self, id: i64) -> DbErrorResult<Option<User>> {
        self.find_by_id(id).await
    }

    async fn find_by_uuid(&self, uuid: &str) -> DbErrorResult<Option<User>> {
        self.find_by_uuid(uuid).await
    }

    async fn find_by_username(&self, username: &str) -> DbErrorResult<Option<User>> {
        self.find_by_username(username).await
    }

    async fn insert(&self, new_user: &NewUser) -> DbErrorResult<User> {
        self.insert(new_user).await
    }

    async fn update_username(&self, id: i64, username: &str) -> DbErrorResult<User> {
        self.update_username(id, username).await
    }
}

/// Roll back explicitly so the connection is clean before the caller retries.
async fn rollback(tx: Transaction<'_, Sqlite>, operation: &str) {
    if let Err(e) = tx.rollback().await {
        warn!("Rollback after failed {} also failed: {}", operation, e);
    }
}

fn map_user_row(row: &SqliteRow) -> DbErrorResult<User> {
    Ok(User {
        id: row.try_get("id")?,
        uuid: row.try_get("uuid")?,
        username: row.try_get("username")?,
        created_at: timestamp(row.try_get("created_at")?, "created_at")?,
        updated_at: timestamp(row.try_get("updated_at")?, "updated_at")?,
    })
}

#[track_caller]
fn timestamp(secs: i64, column: &str) -> DbErrorResult<DateTime<Utc>> {
    DateTime::from_timestamp(secs, 0).ok_or_else(|| DbError::Initialization {
        message: format!("Invalid timestamp in users.{}", column),
        location: ErrorLocation::from(Location::caller()),
    })
}
