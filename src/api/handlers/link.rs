//! Handlers for owner-scoped link management.

use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde_json::{Value, json};

use crate::api::dto::link::{LinkDetail, LinkUpdateRequest, ShortenRequest};
use crate::application::services::AuthContext;
use crate::error::AppError;
use crate::state::AppState;

/// Shortens a URL for the authenticated caller.
///
/// # Endpoint
///
/// `POST /url/short`
///
/// # Errors
///
/// Returns 400 for a malformed target URL and 500 when the store fails or
/// slug generation exhausts its retries.
pub async fn shorten_handler(
    State(state): State<AppState>,
    Extension(ctx): Extension<AuthContext>,
    Json(payload): Json<ShortenRequest>,
) -> Result<(StatusCode, Json<LinkDetail>), AppError> {
    let link = state
        .links
        .shorten(ctx.user.id, &payload.url, payload.active)
        .await?;

    Ok((StatusCode::CREATED, Json(link.into())))
}

/// Returns one of the caller's links.
///
/// # Endpoint
///
/// `GET /url/{id}`
///
/// A link owned by someone else is reported as 404, identical to a missing
/// link.
pub async fn get_link_handler(
    State(state): State<AppState>,
    Extension(ctx): Extension<AuthContext>,
    Path(id): Path<i64>,
) -> Result<Json<LinkDetail>, AppError> {
    let link = state.links.get_owned(ctx.user.id, id).await?;

    Ok(Json(link.into()))
}

/// Applies a partial update to one of the caller's links.
///
/// # Endpoint
///
/// `PATCH /url/{id}`
///
/// # Errors
///
/// Returns 304 when no recognized field changed, 400 for a malformed or
/// taken slug, 404 for a missing or foreign link.
pub async fn update_link_handler(
    State(state): State<AppState>,
    Extension(ctx): Extension<AuthContext>,
    Path(id): Path<i64>,
    Json(payload): Json<LinkUpdateRequest>,
) -> Result<Json<LinkDetail>, AppError> {
    let link = state
        .links
        .update(ctx.user.id, id, payload.into())
        .await?;

    Ok(Json(link.into()))
}

/// Logically deletes one of the caller's links.
///
/// # Endpoint
///
/// `DELETE /url/{id}`
///
/// The row survives with `active = false`; its slug stops resolving but
/// the visit history remains.
pub async fn delete_link_handler(
    State(state): State<AppState>,
    Extension(ctx): Extension<AuthContext>,
    Path(id): Path<i64>,
) -> Result<Json<Value>, AppError> {
    state.links.deactivate(ctx.user.id, id).await?;

    Ok(Json(json!({ "message": "OK" })))
}
