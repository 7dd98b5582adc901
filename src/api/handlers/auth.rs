//! Handlers for registration, login and logout.

use axum::{
    Json,
    extract::{FromRequestParts, Request, State},
    http::StatusCode,
};
use axum_auth::AuthBearer;
use serde_json::json;
use validator::Validate;

use crate::api::dto::auth::{LoginRequest, LoginResponse, RegisterRequest, TOKEN_USAGE};
use crate::api::dto::user::UserSummary;
use crate::error::AppError;
use crate::state::AppState;

/// Creates a new account.
///
/// # Endpoint
///
/// `POST /user/register`
///
/// # Errors
///
/// Returns 400 on the first failing validator (username, email, password,
/// in that order) and 500 when the store cannot persist the record.
pub async fn register_handler(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<UserSummary>), AppError> {
    payload.validate()?;

    let user = state.accounts.register(payload.into()).await?;

    Ok((StatusCode::CREATED, Json(user.into())))
}

/// Exchanges credentials for an access token.
///
/// # Endpoint
///
/// `POST /user/login`
///
/// # Errors
///
/// Returns 400 with `"Invalid credentials"` when the username is unknown or
/// the password does not verify — the two cases are indistinguishable.
pub async fn login_handler(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    let user = state
        .accounts
        .authenticate(&payload.username, &payload.password)
        .await?
        .ok_or_else(|| AppError::bad_request("Invalid credentials", json!({})))?;

    let access_token = state.tokens.issue(&user)?;

    Ok(Json(LoginResponse {
        access_token,
        usage: TOKEN_USAGE,
    }))
}

/// Revokes the caller's token, if one was presented.
///
/// # Endpoint
///
/// `GET /user/logout`
///
/// Authentication is optional: a missing, expired or invalid token still
/// yields 204 (there is nothing to revoke). A valid token has its jti
/// written to the revocation ledger; a ledger failure is a 500 — a logout
/// that cannot be recorded must not report success.
pub async fn logout_handler(
    State(state): State<AppState>,
    req: Request,
) -> Result<StatusCode, AppError> {
    let (mut parts, _body) = req.into_parts();

    if let Ok(AuthBearer(token)) = AuthBearer::from_request_parts(&mut parts, &()).await {
        if let Ok(ctx) = state.tokens.verify(&token).await {
            state.tokens.revoke(&ctx.jti).await?;
        }
    }

    Ok(StatusCode::NO_CONTENT)
}
