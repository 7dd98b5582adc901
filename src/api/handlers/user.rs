//! Handlers for the authenticated user's own account.

use axum::{Extension, Json, extract::State};
use serde_json::{Value, json};
use validator::Validate;

use crate::api::dto::user::{UserDetail, UserSummary, UserUpdateRequest};
use crate::application::services::AuthContext;
use crate::error::AppError;
use crate::state::AppState;

/// Returns the caller's account including owned links.
///
/// # Endpoint
///
/// `GET /user`
pub async fn me_handler(
    State(state): State<AppState>,
    Extension(ctx): Extension<AuthContext>,
) -> Result<Json<UserDetail>, AppError> {
    let links = state.links.list_owned(ctx.user.id).await?;

    Ok(Json(UserDetail::from_parts(ctx.user, links)))
}

/// Applies a partial profile update.
///
/// # Endpoint
///
/// `PATCH /user`
///
/// # Errors
///
/// Returns 304 when no recognized field changed and 400 for a malformed or
/// already-registered email.
pub async fn update_user_handler(
    State(state): State<AppState>,
    Extension(ctx): Extension<AuthContext>,
    Json(payload): Json<UserUpdateRequest>,
) -> Result<Json<UserSummary>, AppError> {
    payload.validate()?;

    let user = state
        .accounts
        .update_profile(ctx.user.id, payload.into())
        .await?;

    Ok(Json(user.into()))
}

/// Deletes the caller's account and revokes the presented token.
///
/// # Endpoint
///
/// `DELETE /user`
///
/// Deletion is final: the user row is removed and owned links cascade with
/// it (unlike link deletion, which is logical). Returns 304 when nothing
/// was deleted.
pub async fn delete_user_handler(
    State(state): State<AppState>,
    Extension(ctx): Extension<AuthContext>,
) -> Result<Json<Value>, AppError> {
    if !state.accounts.delete_account(ctx.user.id).await? {
        return Err(AppError::NotModified);
    }

    state.tokens.revoke(&ctx.jti).await?;

    Ok(Json(json!({ "message": "OK" })))
}
