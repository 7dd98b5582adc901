//! Link entity representing a shortened URL mapping.

/// A shortened URL owned by a user.
///
/// Deleting a link is logical: `active` flips to `false` and the row (with
/// its visit history) survives. `visit_count` only moves while the link is
/// active.
#[derive(Debug, Clone)]
pub struct Link {
    pub id: i64,
    pub slug: String,
    pub target: String,
    pub active: bool,
    pub visit_count: i64,
    pub user_id: i64,
}

/// Input data for creating a new link.
#[derive(Debug, Clone)]
pub struct NewLink {
    pub slug: String,
    pub target: String,
    pub active: bool,
    pub user_id: i64,
}

/// Partial update for an existing link.
///
/// `None` fields are left unchanged.
#[derive(Debug, Clone, Default)]
pub struct LinkPatch {
    pub slug: Option<String>,
    pub active: Option<bool>,
}

impl LinkPatch {
    /// Returns true when the patch carries no recognized change.
    pub fn is_empty(&self) -> bool {
        self.slug.is_none() && self.active.is_none()
    }
}

/// Slim view returned by the public resolution path.
///
/// Carries only what the redirect response exposes; ownership and lifecycle
/// fields stay server-side.
#[derive(Debug, Clone)]
pub struct ResolvedLink {
    pub id: i64,
    pub slug: String,
    pub target: String,
}
