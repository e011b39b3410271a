//! PostgreSQL implementation of caller repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use std::sync::Arc;

use crate::domain::StoreError;
use crate::domain::entities::{Caller, NewCaller};
use crate::domain::repositories::CallerRepository;
use crate::utils::db_error::map_sqlx_error;

const CALLER_COLUMNS: &str = "id, name, token_hash, is_active, is_admin, created_at, revoked_at";

#[derive(Debug, FromRow)]
struct CallerRow {
    id: i64,
    name: String,
    token_hash: String,
    is_active: bool,
    is_admin: bool,
    created_at: DateTime<Utc>,
    revoked_at: Option<DateTime<Utc>>,
}

impl From<CallerRow> for Caller {
    fn from(r: CallerRow) -> Self {
        Caller {
            id: r.id,
            name: r.name,
            token_hash: r.token_hash,
            is_active: r.is_active,
            is_admin: r.is_admin,
            created_at: r.created_at,
            revoked_at: r.revoked_at,
        }
    }
}

/// PostgreSQL repository for callers and their hashed tokens.
pub struct PgCallerRepository {
    pool: Arc<PgPool>,
}

impl PgCallerRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }

    async fn find_one(&self, filter: &str, bind: CallerKey<'_>) -> Result<Option<Caller>, StoreError> {
        let sql = format!("SELECT {CALLER_COLUMNS} FROM callers WHERE {filter}");
        let query = sqlx::query_as::<_, CallerRow>(&sql);
        let query = match bind {
            CallerKey::Id(id) => query.bind(id),
            CallerKey::Text(text) => query.bind(text),
        };

        let row = query
            .fetch_optional(self.pool.as_ref())
            .await
            .map_err(map_sqlx_error)?;

        Ok(row.map(Caller::from))
    }

    async fn update_one(&self, sql: &str, id: i64, flag: Option<bool>) -> Result<(), StoreError> {
        let query = sqlx::query(sql).bind(id);
        let query = match flag {
            Some(flag) => query.bind(flag),
            None => query,
        };

        let result = query
            .execute(self.pool.as_ref())
            .await
            .map_err(map_sqlx_error)?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }
}

enum CallerKey<'a> {
    Id(i64),
    Text(&'a str),
}

#[async_trait]
impl CallerRepository for PgCallerRepository {
    async fn find_by_token_hash(&self, token_hash: &str) -> Result<Option<Caller>, StoreError> {
        self.find_one(
            "token_hash = $1 AND revoked_at IS NULL",
            CallerKey::Text(token_hash),
        )
        .await
    }

    async fn create(&self, new_caller: NewCaller) -> Result<Caller, StoreError> {
        let sql = format!(
            "INSERT INTO callers (name, token_hash, is_active, is_admin) \
             VALUES ($1, $2, $3, $4) \
             RETURNING {CALLER_COLUMNS}"
        );

        let row = sqlx::query_as::<_, CallerRow>(&sql)
            .bind(&new_caller.name)
            .bind(&new_caller.token_hash)
            .bind(new_caller.is_active)
            .bind(new_caller.is_admin)
            .fetch_one(self.pool.as_ref())
            .await
            .map_err(map_sqlx_error)?;

        Ok(row.into())
    }

    async fn list(&self) -> Result<Vec<Caller>, StoreError> {
        let sql = format!("SELECT {CALLER_COLUMNS} FROM callers ORDER BY created_at DESC, id DESC");

        let rows = sqlx::query_as::<_, CallerRow>(&sql)
            .fetch_all(self.pool.as_ref())
            .await
            .map_err(map_sqlx_error)?;

        Ok(rows.into_iter().map(Caller::from).collect())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Caller>, StoreError> {
        self.find_one("id = $1", CallerKey::Id(id)).await
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Caller>, StoreError> {
        self.find_one("name = $1", CallerKey::Text(name)).await
    }

    async fn revoke(&self, id: i64) -> Result<(), StoreError> {
        self.update_one(
            "UPDATE callers SET revoked_at = NOW() WHERE id = $1 AND revoked_at IS NULL",
            id,
            None,
        )
        .await
    }

    async fn set_active(&self, id: i64, is_active: bool) -> Result<(), StoreError> {
        self.update_one("UPDATE callers SET is_active = $2 WHERE id = $1", id, Some(is_active))
            .await
    }
}
