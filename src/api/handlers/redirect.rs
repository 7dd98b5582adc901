//! Handler for public slug resolution.

use axum::{
    Json,
    extract::{Path, State},
};

use crate::api::dto::link::ResolveResponse;
use crate::error::AppError;
use crate::state::AppState;

/// Resolves a slug to its target and records the visit.
///
/// # Endpoint
///
/// `GET /url/go/{slug}`
///
/// This is the public path: no authentication. Malformed slugs, inactive
/// links and unknown slugs all yield the same 404, so anonymous callers
/// cannot probe link lifecycle.
pub async fn go_handler(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<ResolveResponse>, AppError> {
    let resolved = state.links.resolve(&slug).await?;

    Ok(Json(resolved.into()))
}
