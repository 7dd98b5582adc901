//! Account registration, credential verification and profile management.

use std::sync::Arc;

use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::{Argon2, password_hash::rand_core::OsRng};
use serde_json::json;

use crate::application::validators::{validate_email, validate_password, validate_username};
use crate::domain::entities::{NewUser, User, UserPatch};
use crate::domain::repositories::UserRepository;
use crate::error::{AppError, EMAIL_TAKEN, USERNAME_TAKEN};

/// Validated registration input.
#[derive(Debug, Clone)]
pub struct Registration {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub username: String,
    pub password: String,
}

/// Profile update input; `None` fields are untouched.
#[derive(Debug, Clone, Default)]
pub struct ProfileUpdate {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Hashes a password with argon2id and a fresh random salt.
///
/// # Errors
///
/// Returns [`AppError::Internal`] if hashing fails (effectively never with
/// default parameters).
pub fn hash_password(password: &str) -> Result<String, AppError> {
    let salt = SaltString::generate(&mut OsRng);

    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| {
            tracing::error!(error = %e, "password hashing failed");
            AppError::internal("Please try again after sometime", json!({}))
        })
}

/// Verifies a password against a stored argon2 hash.
///
/// The comparison happens inside the argon2 verifier (constant-time on the
/// derived key); plaintext is never compared directly. Malformed stored
/// hashes verify as false.
pub fn verify_password(password: &str, stored_hash: &str) -> bool {
    PasswordHash::new(stored_hash)
        .map(|parsed| {
            Argon2::default()
                .verify_password(password.as_bytes(), &parsed)
                .is_ok()
        })
        .unwrap_or(false)
}

/// Service for account lifecycle: register, authenticate, update, delete.
pub struct AccountService {
    users: Arc<dyn UserRepository>,
}

impl AccountService {
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }

    /// Registers a new account.
    ///
    /// Validators run in order (username, email, password) before any write;
    /// the first failure is returned as-is. Uniqueness is checked up front
    /// for a friendly message, and again by the store's unique constraints
    /// for concurrent registrations.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] for malformed or taken fields,
    /// [`AppError::Conflict`] when a concurrent insert wins the constraint
    /// race, [`AppError::Internal`] when the store is unavailable.
    pub async fn register(&self, registration: Registration) -> Result<User, AppError> {
        let username = validate_username(&registration.username)?;
        if self.users.find_by_username(&username).await?.is_some() {
            return Err(AppError::bad_request(
                USERNAME_TAKEN,
                json!({ "field": "username" }),
            ));
        }

        let email = validate_email(&registration.email)?;
        if self.users.find_by_email(&email).await?.is_some() {
            return Err(AppError::bad_request(
                EMAIL_TAKEN,
                json!({ "field": "email" }),
            ));
        }

        validate_password(&registration.password)?;

        let password_hash = hash_password(&registration.password)?;

        self.users
            .create(NewUser {
                first_name: registration.first_name,
                last_name: registration.last_name,
                email,
                username,
                password_hash,
            })
            .await
    }

    /// Verifies a username/password pair.
    ///
    /// # Returns
    ///
    /// `Ok(Some(user))` when the username exists and the stored hash
    /// verifies, `Ok(None)` otherwise. Unknown user and wrong password are
    /// indistinguishable to the caller.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on store errors.
    pub async fn authenticate(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Option<User>, AppError> {
        let username = username.trim().to_lowercase();

        let Some(user) = self.users.find_by_username(&username).await? else {
            return Ok(None);
        };

        if verify_password(password, &user.password_hash) {
            Ok(Some(user))
        } else {
            Ok(None)
        }
    }

    /// Applies a profile update.
    ///
    /// Email changes are validated and checked for uniqueness against other
    /// accounts; submitting the current address counts as no change.
    /// Password changes are re-validated and re-hashed.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotModified`] when no recognized field changed,
    /// [`AppError::Validation`] on malformed or taken email, and store
    /// errors otherwise.
    pub async fn update_profile(
        &self,
        user_id: i64,
        update: ProfileUpdate,
    ) -> Result<User, AppError> {
        let mut patch = UserPatch {
            first_name: update.first_name,
            last_name: update.last_name,
            ..Default::default()
        };

        if let Some(email) = update.email {
            let email = validate_email(&email)?;
            match self.users.find_by_email(&email).await? {
                Some(existing) if existing.id != user_id => {
                    return Err(AppError::bad_request(
                        EMAIL_TAKEN,
                        json!({ "field": "email" }),
                    ));
                }
                Some(_) => {} // own address, nothing to change
                None => patch.email = Some(email),
            }
        }

        if let Some(password) = update.password {
            validate_password(&password)?;
            patch.password_hash = Some(hash_password(&password)?);
        }

        if patch.is_empty() {
            return Err(AppError::NotModified);
        }

        self.users.update(user_id, patch).await
    }

    /// Hard-deletes an account; owned links go with it (store cascade).
    ///
    /// Returns `Ok(false)` when nothing was deleted.
    pub async fn delete_account(&self, user_id: i64) -> Result<bool, AppError> {
        self.users.delete(user_id).await
    }
}
