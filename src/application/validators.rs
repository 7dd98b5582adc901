//! Field validators for registration, profile update and link payloads.
//!
//! Validators run before any write and fail fast: the first failing check's
//! message is what the caller sees. Normalizing validators return the
//! canonical (lowercased) form.

use crate::error::AppError;
use regex::Regex;
use serde_json::json;
use std::sync::LazyLock;
use url::Url;

/// RFC-lite email shape: `local@domain.tld`, evaluated on the lowercased input.
static EMAIL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z0-9._%+-]+@[a-z0-9.-]+\.[a-z]{2,}$").unwrap());

/// Validates and normalizes a username: lowercased, 3-20 characters, ASCII
/// alphanumeric only.
///
/// # Errors
///
/// Returns [`AppError::Validation`] with the first failing rule's message.
pub fn validate_username(username: &str) -> Result<String, AppError> {
    let username = username.trim().to_lowercase();

    if !(3..=20).contains(&username.len()) {
        return Err(AppError::bad_request(
            "username must be between 3 to 20 characters.",
            json!({ "field": "username" }),
        ));
    }

    if !username.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(AppError::bad_request(
            "username can be only alphanumeric.",
            json!({ "field": "username" }),
        ));
    }

    Ok(username)
}

/// Validates and normalizes an email address (lowercased, RFC-lite syntax).
///
/// # Errors
///
/// Returns [`AppError::Validation`] when the address is malformed.
pub fn validate_email(email: &str) -> Result<String, AppError> {
    let email = email.trim().to_lowercase();

    if !EMAIL_REGEX.is_match(&email) {
        return Err(AppError::bad_request(
            "please provide valid email address.",
            json!({ "field": "email" }),
        ));
    }

    Ok(email)
}

/// Validates a password: length in `[8, 20]`.
///
/// # Errors
///
/// Returns [`AppError::Validation`] when the length is out of range.
pub fn validate_password(password: &str) -> Result<(), AppError> {
    if !(8..=20).contains(&password.len()) {
        return Err(AppError::bad_request(
            "password must be between 8 to 20 characters.",
            json!({ "field": "password" }),
        ));
    }

    Ok(())
}

/// Validates a shortening target: must parse as an absolute http(s) URL with
/// a host.
///
/// # Errors
///
/// Returns [`AppError::Validation`] when the URL is malformed.
pub fn validate_target_url(target: &str) -> Result<(), AppError> {
    let parsed = Url::parse(target).map_err(|_| {
        AppError::bad_request("Target URL is invalid.", json!({ "field": "url" }))
    })?;

    if !matches!(parsed.scheme(), "http" | "https") || parsed.host_str().is_none() {
        return Err(AppError::bad_request(
            "Target URL is invalid.",
            json!({ "field": "url" }),
        ));
    }

    Ok(())
}
