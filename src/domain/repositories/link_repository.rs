//! Repository trait for short link data access.

use crate::domain::entities::{Link, LinkPatch, NewLink, ResolvedLink};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for managing short links.
///
/// Per-link reads and mutations are scoped by the owning user id; a link
/// owned by someone else behaves exactly like a missing link.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgLinkRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LinkRepository: Send + Sync {
    /// Creates a new short link.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] when the slug already exists
    /// (unique constraint) — callers regenerate and retry.
    /// Returns [`AppError::Internal`] on database errors.
    async fn create(&self, new_link: NewLink) -> Result<Link, AppError>;

    /// Resolves an active slug and records the visit in one atomic
    /// statement (`visit_count = visit_count + 1 ... WHERE active`), so
    /// concurrent visits to the same slug cannot lose updates.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(..))` for an active slug, with the visit counted
    /// - `Ok(None)` for a missing or inactive slug
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn record_visit(&self, slug: &str) -> Result<Option<ResolvedLink>, AppError>;

    /// Finds a link by id, scoped to its owner.
    ///
    /// # Returns
    ///
    /// `Ok(None)` when the link does not exist or belongs to another user.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_owned(&self, id: i64, user_id: i64) -> Result<Option<Link>, AppError>;

    /// Lists all links owned by a user, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn list_by_owner(&self, user_id: i64) -> Result<Vec<Link>, AppError>;

    /// Partially updates a link, scoped to its owner. Only fields present in
    /// [`LinkPatch`] are modified.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no link matches `id` + `user_id`.
    /// Returns [`AppError::Conflict`] when the new slug is already taken.
    /// Returns [`AppError::Internal`] on database errors.
    async fn update(&self, id: i64, user_id: i64, patch: LinkPatch) -> Result<Link, AppError>;

    /// Logically deletes a link by setting `active = false`. The row and its
    /// visit history survive.
    ///
    /// Returns `Ok(true)` if the link was found, `Ok(false)` otherwise.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn deactivate(&self, id: i64, user_id: i64) -> Result<bool, AppError>;
}
