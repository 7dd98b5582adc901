//! DTOs for link endpoints.

use serde::{Deserialize, Serialize};

use crate::application::services::LinkUpdate;
use crate::domain::entities::{Link, ResolvedLink};

/// Shortening request. The target URL is validated by the link service.
#[derive(Debug, Deserialize)]
pub struct ShortenRequest {
    pub url: String,
    pub active: Option<bool>,
}

/// Detailed link view returned to the owner.
#[derive(Debug, Serialize)]
pub struct LinkDetail {
    pub id: i64,
    pub slug: String,
    pub target: String,
    pub active: bool,
    pub visit_count: i64,
}

impl From<Link> for LinkDetail {
    fn from(link: Link) -> Self {
        LinkDetail {
            id: link.id,
            slug: link.slug,
            target: link.target,
            active: link.active,
            visit_count: link.visit_count,
        }
    }
}

/// Public resolution response: just enough to follow the link.
#[derive(Debug, Serialize)]
pub struct ResolveResponse {
    pub id: i64,
    pub slug: String,
    pub target: String,
}

impl From<ResolvedLink> for ResolveResponse {
    fn from(resolved: ResolvedLink) -> Self {
        ResolveResponse {
            id: resolved.id,
            slug: resolved.slug,
            target: resolved.target,
        }
    }
}

/// Link update payload; absent fields are untouched.
#[derive(Debug, Deserialize)]
pub struct LinkUpdateRequest {
    pub slug: Option<String>,
    pub active: Option<bool>,
}

impl From<LinkUpdateRequest> for LinkUpdate {
    fn from(req: LinkUpdateRequest) -> Self {
        LinkUpdate {
            slug: req.slug,
            active: req.active,
        }
    }
}
