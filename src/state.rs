//! Shared application state injected into all handlers.

use std::sync::Arc;

use crate::application::services::{AccountService, LinkService, TokenService};

/// Application state: the three core services behind `Arc`s.
///
/// Services hold their repositories as trait objects, so tests can swap in
/// in-memory fakes without touching the router.
#[derive(Clone)]
pub struct AppState {
    pub accounts: Arc<AccountService>,
    pub tokens: Arc<TokenService>,
    pub links: Arc<LinkService>,
}

impl AppState {
    pub fn new(
        accounts: Arc<AccountService>,
        tokens: Arc<TokenService>,
        links: Arc<LinkService>,
    ) -> Self {
        Self {
            accounts,
            tokens,
            links,
        }
    }
}
