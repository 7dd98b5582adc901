//! Link shortening, resolution and owner-scoped mutation.

use std::sync::Arc;

use serde_json::json;

use crate::application::validators::validate_target_url;
use crate::domain::entities::{Link, LinkPatch, NewLink, ResolvedLink};
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;
use crate::utils::slug;

/// Attempts before giving up on slug generation. Each retry draws a fresh
/// timestamp, so a conflict only repeats if another process keeps winning
/// the exact same nanosecond encoding.
const MAX_SLUG_ATTEMPTS: usize = 5;

/// Maximum slug length accepted for owner-chosen slugs (storage column cap).
const MAX_SLUG_CHARS: usize = 10;

/// Requested changes for a link; `None` fields are untouched.
#[derive(Debug, Clone, Default)]
pub struct LinkUpdate {
    pub slug: Option<String>,
    pub active: Option<bool>,
}

/// Service for creating, resolving and mutating short links.
///
/// Every per-link read or mutation is scoped by the caller's user id; a
/// link owned by someone else is reported as missing, never as forbidden.
pub struct LinkService {
    links: Arc<dyn LinkRepository>,
}

impl LinkService {
    pub fn new(links: Arc<dyn LinkRepository>) -> Self {
        Self { links }
    }

    /// Shortens `target` for `user_id`.
    ///
    /// The generated slug is collision-resistant, not collision-free: the
    /// store's unique constraint is the authoritative check, and generation
    /// is retried up to [`MAX_SLUG_ATTEMPTS`] times on conflict.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] for a malformed target URL and
    /// [`AppError::Internal`] when the store fails or retries are exhausted.
    pub async fn shorten(
        &self,
        user_id: i64,
        target: &str,
        active: Option<bool>,
    ) -> Result<Link, AppError> {
        validate_target_url(target)?;

        for attempt in 1..=MAX_SLUG_ATTEMPTS {
            let new_link = NewLink {
                slug: slug::generate(),
                target: target.to_string(),
                active: active.unwrap_or(true),
                user_id,
            };

            match self.links.create(new_link).await {
                Ok(link) => return Ok(link),
                Err(AppError::Conflict { .. }) => {
                    tracing::debug!(attempt, "slug collision, regenerating");
                }
                Err(e) => return Err(e),
            }
        }

        tracing::error!("slug generation exhausted {MAX_SLUG_ATTEMPTS} attempts");
        Err(AppError::internal(
            "Please try again after sometime",
            json!({}),
        ))
    }

    /// Resolves a public slug and records the visit.
    ///
    /// Malformed slugs (empty or non-alphanumeric) short-circuit to a miss
    /// without touching the store. Inactive and nonexistent slugs are
    /// indistinguishable to the caller.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] for any miss.
    pub async fn resolve(&self, slug: &str) -> Result<ResolvedLink, AppError> {
        if !slug::is_well_formed(slug) {
            return Err(Self::resolve_miss());
        }

        self.links
            .record_visit(slug)
            .await?
            .ok_or_else(Self::resolve_miss)
    }

    /// Fetches a link owned by `user_id`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] when the link does not exist or
    /// belongs to another user.
    pub async fn get_owned(&self, user_id: i64, link_id: i64) -> Result<Link, AppError> {
        self.links
            .find_owned(link_id, user_id)
            .await?
            .ok_or_else(|| {
                AppError::not_found("Short link not found", json!({ "id": link_id }))
            })
    }

    /// Lists all links owned by `user_id`, newest first.
    pub async fn list_owned(&self, user_id: i64) -> Result<Vec<Link>, AppError> {
        self.links.list_by_owner(user_id).await
    }

    /// Applies an owner-initiated update.
    ///
    /// A slug change must be alphanumeric, at most [`MAX_SLUG_CHARS`]
    /// characters, and differ from the current slug; uniqueness is enforced
    /// by the store constraint and surfaced as a taken-slug error. The
    /// active flag is a direct set.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotModified`] when no recognized field changed,
    /// [`AppError::Validation`] for a malformed slug, [`AppError::Conflict`]
    /// for a taken slug, [`AppError::NotFound`] for a missing or foreign
    /// link.
    pub async fn update(
        &self,
        user_id: i64,
        link_id: i64,
        update: LinkUpdate,
    ) -> Result<Link, AppError> {
        let current = self.get_owned(user_id, link_id).await?;

        let mut patch = LinkPatch {
            active: update.active,
            ..Default::default()
        };

        if let Some(new_slug) = update.slug {
            if !slug::is_well_formed(&new_slug) {
                return Err(AppError::bad_request(
                    "slug can be only alphanumeric.",
                    json!({ "field": "slug" }),
                ));
            }
            if new_slug.len() > MAX_SLUG_CHARS {
                return Err(AppError::bad_request(
                    "slug must be at most 10 characters.",
                    json!({ "field": "slug" }),
                ));
            }
            if new_slug != current.slug {
                patch.slug = Some(new_slug);
            }
        }

        if patch.is_empty() {
            return Err(AppError::NotModified);
        }

        self.links.update(link_id, user_id, patch).await
    }

    /// Logically deletes a link: sets `active = false`, keeping the row and
    /// its visit history.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] for a missing or foreign link.
    pub async fn deactivate(&self, user_id: i64, link_id: i64) -> Result<(), AppError> {
        if !self.links.deactivate(link_id, user_id).await? {
            return Err(AppError::not_found(
                "Short link not found",
                json!({ "id": link_id }),
            ));
        }

        Ok(())
    }

    /// Public-path miss: carries no detail, so an inactive slug and a slug
    /// that never existed produce byte-identical responses.
    fn resolve_miss() -> AppError {
        AppError::not_found("Short link not found", json!({}))
    }
}
