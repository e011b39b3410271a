//! PostgreSQL implementation of link repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use std::sync::Arc;

use crate::domain::StoreError;
use crate::domain::entities::{Link, LinkWithOwner, NewLink};
use crate::domain::repositories::LinkRepository;
use crate::utils::db_error::map_sqlx_error;

const LINK_COLUMNS: &str = "id, identifier, destination, access_count, owner_id, created_at";

#[derive(Debug, FromRow)]
struct LinkRow {
    id: i64,
    identifier: String,
    destination: String,
    access_count: i64,
    owner_id: Option<i64>,
    created_at: DateTime<Utc>,
}

impl From<LinkRow> for Link {
    fn from(r: LinkRow) -> Self {
        Link::new(
            r.id,
            r.identifier,
            r.destination,
            r.access_count,
            r.owner_id,
            r.created_at,
        )
    }
}

#[derive(Debug, FromRow)]
struct LinkOwnerRow {
    #[sqlx(flatten)]
    link: LinkRow,
    owner_name: Option<String>,
}

/// PostgreSQL repository for link storage and retrieval.
///
/// Uniqueness of identifiers is enforced by the `links_identifier_key`
/// constraint; access counting is a single `UPDATE ... SET access_count =
/// access_count + 1`, so concurrent increments serialize on the row lock.
pub struct PgLinkRepository {
    pool: Arc<PgPool>,
}

impl PgLinkRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LinkRepository for PgLinkRepository {
    async fn find_by_identifier(&self, identifier: &str) -> Result<Option<Link>, StoreError> {
        let sql = format!("SELECT {LINK_COLUMNS} FROM links WHERE identifier = $1");

        let row = sqlx::query_as::<_, LinkRow>(&sql)
            .bind(identifier)
            .fetch_optional(self.pool.as_ref())
            .await
            .map_err(map_sqlx_error)?;

        Ok(row.map(Link::from))
    }

    async fn exists_by_identifier(&self, identifier: &str) -> Result<bool, StoreError> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM links WHERE identifier = $1)")
            .bind(identifier)
            .fetch_one(self.pool.as_ref())
            .await
            .map_err(map_sqlx_error)
    }

    async fn insert(&self, new_link: NewLink) -> Result<Link, StoreError> {
        let sql = format!(
            "INSERT INTO links (identifier, destination, owner_id) \
             VALUES ($1, $2, $3) \
             RETURNING {LINK_COLUMNS}"
        );

        let row = sqlx::query_as::<_, LinkRow>(&sql)
            .bind(&new_link.identifier)
            .bind(&new_link.destination)
            .bind(new_link.owner_id)
            .fetch_one(self.pool.as_ref())
            .await
            .map_err(map_sqlx_error)?;

        Ok(row.into())
    }

    async fn increment_access_count(&self, identifier: &str) -> Result<(), StoreError> {
        let result = sqlx::query(
            "UPDATE links SET access_count = access_count + 1 WHERE identifier = $1",
        )
        .bind(identifier)
        .execute(self.pool.as_ref())
        .await
        .map_err(map_sqlx_error)?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }

    async fn delete(&self, identifier: &str) -> Result<(), StoreError> {
        let result = sqlx::query("DELETE FROM links WHERE identifier = $1")
            .bind(identifier)
            .execute(self.pool.as_ref())
            .await
            .map_err(map_sqlx_error)?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }

    async fn list_by_owner(&self, owner_id: i64) -> Result<Vec<Link>, StoreError> {
        let sql = format!(
            "SELECT {LINK_COLUMNS} FROM links WHERE owner_id = $1 ORDER BY created_at DESC, id DESC"
        );

        let rows = sqlx::query_as::<_, LinkRow>(&sql)
            .bind(owner_id)
            .fetch_all(self.pool.as_ref())
            .await
            .map_err(map_sqlx_error)?;

        Ok(rows.into_iter().map(Link::from).collect())
    }

    async fn list_all(&self) -> Result<Vec<LinkWithOwner>, StoreError> {
        let rows = sqlx::query_as::<_, LinkOwnerRow>(
            r#"
            SELECT l.id, l.identifier, l.destination, l.access_count, l.owner_id, l.created_at,
                   c.name AS owner_name
            FROM links l
            LEFT JOIN callers c ON c.id = l.owner_id
            ORDER BY l.created_at DESC, l.id DESC
            "#,
        )
        .fetch_all(self.pool.as_ref())
        .await
        .map_err(map_sqlx_error)?;

        Ok(rows
            .into_iter()
            .map(|r| LinkWithOwner {
                link: r.link.into(),
                owner_name: r.owner_name,
            })
            .collect())
    }

    async fn health_check(&self) -> bool {
        sqlx::query("SELECT 1")
            .execute(self.pool.as_ref())
            .await
            .is_ok()
    }
}
