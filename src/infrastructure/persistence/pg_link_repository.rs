//! PostgreSQL implementation of the link repository.

use async_trait::async_trait;
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{Link, LinkPatch, NewLink, ResolvedLink};
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;

#[derive(sqlx::FromRow)]
struct LinkRow {
    id: i64,
    slug: String,
    target: String,
    active: bool,
    visit_count: i64,
    user_id: i64,
}

impl From<LinkRow> for Link {
    fn from(row: LinkRow) -> Self {
        Link {
            id: row.id,
            slug: row.slug,
            target: row.target,
            active: row.active,
            visit_count: row.visit_count,
            user_id: row.user_id,
        }
    }
}

#[derive(sqlx::FromRow)]
struct ResolvedRow {
    id: i64,
    slug: String,
    target: String,
}

const LINK_COLUMNS: &str = "id, slug, target, active, visit_count, user_id";

/// PostgreSQL repository for short links.
///
/// Visit recording is a single `UPDATE ... RETURNING` so concurrent visits
/// to the same slug serialize on the row write lock and never lose counts.
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
    async fn create(&self, new_link: NewLink) -> Result<Link, AppError> {
        let row: LinkRow = sqlx::query_as(&format!(
            r#"
            INSERT INTO urls (slug, target, active, user_id)
            VALUES ($1, $2, $3, $4)
            RETURNING {LINK_COLUMNS}
            "#
        ))
        .bind(&new_link.slug)
        .bind(&new_link.target)
        .bind(new_link.active)
        .bind(new_link.user_id)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(row.into())
    }

    async fn record_visit(&self, slug: &str) -> Result<Option<ResolvedLink>, AppError> {
        let row: Option<ResolvedRow> = sqlx::query_as(
            r#"
            UPDATE urls
            SET visit_count = visit_count + 1
            WHERE slug = $1 AND active = TRUE
            RETURNING id, slug, target
            "#,
        )
        .bind(slug)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(|r| ResolvedLink {
            id: r.id,
            slug: r.slug,
            target: r.target,
        }))
    }

    async fn find_owned(&self, id: i64, user_id: i64) -> Result<Option<Link>, AppError> {
        let row: Option<LinkRow> = sqlx::query_as(&format!(
            "SELECT {LINK_COLUMNS} FROM urls WHERE id = $1 AND user_id = $2"
        ))
        .bind(id)
        .bind(user_id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Into::into))
    }

    async fn list_by_owner(&self, user_id: i64) -> Result<Vec<Link>, AppError> {
        let rows: Vec<LinkRow> = sqlx::query_as(&format!(
            "SELECT {LINK_COLUMNS} FROM urls WHERE user_id = $1 ORDER BY id DESC"
        ))
        .bind(user_id)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn update(&self, id: i64, user_id: i64, patch: LinkPatch) -> Result<Link, AppError> {
        let row: Option<LinkRow> = sqlx::query_as(&format!(
            r#"
            UPDATE urls
            SET slug   = COALESCE($3, slug),
                active = COALESCE($4, active)
            WHERE id = $1 AND user_id = $2
            RETURNING {LINK_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(user_id)
        .bind(patch.slug)
        .bind(patch.active)
        .fetch_optional(self.pool.as_ref())
        .await?;

        row.map(Into::into).ok_or_else(|| {
            AppError::not_found("Short link not found", serde_json::json!({ "id": id }))
        })
    }

    async fn deactivate(&self, id: i64, user_id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("UPDATE urls SET active = FALSE WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(self.pool.as_ref())
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
