#![allow(dead_code)]

//! Shared test harness: an in-memory store implementing the repository
//! traits, and a fully wired [`TestServer`].

use async_trait::async_trait;
use axum_test::TestServer;
use chrono::Utc;
use serde_json::{Value, json};
use std::sync::{Arc, Mutex};

use linkcut::application::services::{AccountService, LinkService, TokenService};
use linkcut::domain::entities::{
    Link, LinkPatch, NewLink, NewUser, ResolvedLink, User, UserPatch,
};
use linkcut::domain::repositories::{LinkRepository, UserRepository};
use linkcut::error::{AppError, EMAIL_TAKEN, SLUG_TAKEN, USERNAME_TAKEN};
use linkcut::infrastructure::ledger::MemoryLedger;
use linkcut::routes::app_router;
use linkcut::state::AppState;

pub const TEST_SIGNING_SECRET: &str = "integration-test-signing-secret";

#[derive(Default)]
struct StoreInner {
    next_user_id: i64,
    next_link_id: i64,
    users: Vec<User>,
    links: Vec<Link>,
}

/// In-memory stand-in for PostgreSQL, mirroring its behavior where the
/// services depend on it: unique-violation errors with the production
/// messages, owner scoping, and user-delete cascading to links.
#[derive(Default)]
pub struct InMemoryStore {
    inner: Mutex<StoreInner>,
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn create(&self, new_user: NewUser) -> Result<User, AppError> {
        let mut inner = self.inner.lock().unwrap();

        if inner.users.iter().any(|u| u.username == new_user.username) {
            return Err(AppError::conflict(USERNAME_TAKEN, json!({})));
        }
        if inner.users.iter().any(|u| u.email == new_user.email) {
            return Err(AppError::conflict(EMAIL_TAKEN, json!({})));
        }

        inner.next_user_id += 1;
        let user = User {
            id: inner.next_user_id,
            first_name: new_user.first_name,
            last_name: new_user.last_name,
            email: new_user.email,
            username: new_user.username,
            password_hash: new_user.password_hash,
            verified: false,
            active: false,
            created_at: Utc::now(),
        };
        inner.users.push(user.clone());

        Ok(user)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<User>, AppError> {
        let inner = self.inner.lock().unwrap();
        Ok(inner.users.iter().find(|u| u.id == id).cloned())
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, AppError> {
        let inner = self.inner.lock().unwrap();
        Ok(inner.users.iter().find(|u| u.username == username).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let inner = self.inner.lock().unwrap();
        Ok(inner.users.iter().find(|u| u.email == email).cloned())
    }

    async fn update(&self, id: i64, patch: UserPatch) -> Result<User, AppError> {
        let mut inner = self.inner.lock().unwrap();

        if let Some(email) = &patch.email {
            if inner.users.iter().any(|u| u.id != id && &u.email == email) {
                return Err(AppError::conflict(EMAIL_TAKEN, json!({})));
            }
        }

        let user = inner
            .users
            .iter_mut()
            .find(|u| u.id == id)
            .ok_or_else(|| AppError::not_found("User not found", json!({ "id": id })))?;

        if let Some(first_name) = patch.first_name {
            user.first_name = first_name;
        }
        if let Some(last_name) = patch.last_name {
            user.last_name = last_name;
        }
        if let Some(email) = patch.email {
            user.email = email;
        }
        if let Some(password_hash) = patch.password_hash {
            user.password_hash = password_hash;
        }

        Ok(user.clone())
    }

    async fn delete(&self, id: i64) -> Result<bool, AppError> {
        let mut inner = self.inner.lock().unwrap();

        let before = inner.users.len();
        inner.users.retain(|u| u.id != id);
        let deleted = inner.users.len() < before;

        if deleted {
            // foreign-key cascade
            inner.links.retain(|l| l.user_id != id);
        }

        Ok(deleted)
    }
}

#[async_trait]
impl LinkRepository for InMemoryStore {
    async fn create(&self, new_link: NewLink) -> Result<Link, AppError> {
        let mut inner = self.inner.lock().unwrap();

        if inner.links.iter().any(|l| l.slug == new_link.slug) {
            return Err(AppError::conflict(SLUG_TAKEN, json!({})));
        }

        inner.next_link_id += 1;
        let link = Link {
            id: inner.next_link_id,
            slug: new_link.slug,
            target: new_link.target,
            active: new_link.active,
            visit_count: 0,
            user_id: new_link.user_id,
        };
        inner.links.push(link.clone());

        Ok(link)
    }

    async fn record_visit(&self, slug: &str) -> Result<Option<ResolvedLink>, AppError> {
        let mut inner = self.inner.lock().unwrap();

        Ok(inner
            .links
            .iter_mut()
            .find(|l| l.slug == slug && l.active)
            .map(|l| {
                l.visit_count += 1;
                ResolvedLink {
                    id: l.id,
                    slug: l.slug.clone(),
                    target: l.target.clone(),
                }
            }))
    }

    async fn find_owned(&self, id: i64, user_id: i64) -> Result<Option<Link>, AppError> {
        let inner = self.inner.lock().unwrap();
        Ok(inner
            .links
            .iter()
            .find(|l| l.id == id && l.user_id == user_id)
            .cloned())
    }

    async fn list_by_owner(&self, user_id: i64) -> Result<Vec<Link>, AppError> {
        let inner = self.inner.lock().unwrap();
        let mut links: Vec<Link> = inner
            .links
            .iter()
            .filter(|l| l.user_id == user_id)
            .cloned()
            .collect();
        links.sort_by(|a, b| b.id.cmp(&a.id));
        Ok(links)
    }

    async fn update(&self, id: i64, user_id: i64, patch: LinkPatch) -> Result<Link, AppError> {
        let mut inner = self.inner.lock().unwrap();

        if let Some(slug) = &patch.slug {
            if inner.links.iter().any(|l| l.id != id && &l.slug == slug) {
                return Err(AppError::conflict(SLUG_TAKEN, json!({})));
            }
        }

        let link = inner
            .links
            .iter_mut()
            .find(|l| l.id == id && l.user_id == user_id)
            .ok_or_else(|| AppError::not_found("Short link not found", json!({ "id": id })))?;

        if let Some(slug) = patch.slug {
            link.slug = slug;
        }
        if let Some(active) = patch.active {
            link.active = active;
        }

        Ok(link.clone())
    }

    async fn deactivate(&self, id: i64, user_id: i64) -> Result<bool, AppError> {
        let mut inner = self.inner.lock().unwrap();

        let link = inner
            .links
            .iter_mut()
            .find(|l| l.id == id && l.user_id == user_id);

        Ok(match link {
            Some(l) => {
                l.active = false;
                true
            }
            None => false,
        })
    }
}

/// Builds a test server backed by a fresh in-memory store and ledger.
pub fn spawn_app() -> TestServer {
    let store = Arc::new(InMemoryStore::default());
    let users: Arc<dyn UserRepository> = store.clone();
    let links: Arc<dyn LinkRepository> = store;

    let ledger = Arc::new(MemoryLedger::new());

    let accounts = Arc::new(AccountService::new(users.clone()));
    let tokens = Arc::new(TokenService::new(TEST_SIGNING_SECRET, users, ledger));
    let link_service = Arc::new(LinkService::new(links));

    let state = AppState::new(accounts, tokens, link_service);

    TestServer::new(app_router(state)).unwrap()
}

/// Registers a user through the HTTP surface. Panics on non-201.
pub async fn register(server: &TestServer, username: &str, email: &str, password: &str) -> Value {
    let response = server
        .post("/user/register")
        .json(&json!({
            "first_name": "Alice",
            "last_name": "Doe",
            "email": email,
            "username": username,
            "password": password,
        }))
        .await;

    response.assert_status(axum::http::StatusCode::CREATED);
    response.json::<Value>()
}

/// Logs a user in and returns the access token.
pub async fn login(server: &TestServer, username: &str, password: &str) -> String {
    let response = server
        .post("/user/login")
        .json(&json!({ "username": username, "password": password }))
        .await;

    response.assert_status_ok();
    response.json::<Value>()["access_token"]
        .as_str()
        .unwrap()
        .to_string()
}

/// Registers and logs in `username` in one step, returning the token.
pub async fn register_and_login(server: &TestServer, username: &str) -> String {
    let email = format!("{username}@example.com");
    register(server, username, &email, "password1").await;
    login(server, username, "password1").await
}

/// Creates a short link and returns the response body. Panics on non-201.
pub async fn shorten(server: &TestServer, token: &str, url: &str) -> Value {
    let response = server
        .post("/url/short")
        .authorization_bearer(token)
        .json(&json!({ "url": url }))
        .await;

    response.assert_status(axum::http::StatusCode::CREATED);
    response.json::<Value>()
}
