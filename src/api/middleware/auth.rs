//! Bearer token authentication middleware.

use axum::{
    extract::{FromRequestParts, Request, State},
    middleware::Next,
    response::Response,
};
use axum_auth::AuthBearer;

use crate::{error::AppError, state::AppState};

/// Authenticates requests using Bearer tokens from the Authorization header.
///
/// # Header Format
///
/// ```text
/// Authorization: Bearer <token>
/// ```
///
/// # Authentication Flow
///
/// 1. Extract token from the `Authorization` header
/// 2. Verify signature and expiry
/// 3. Check the token's jti against the revocation ledger
/// 4. Resolve the subject to a live user
/// 5. Insert the resulting [`AuthContext`] as a request extension
///
/// Handlers on guarded routes receive the caller as an explicit
/// `Extension<AuthContext>` — there is no ambient current-user lookup.
///
/// # Errors
///
/// Returns `401 Unauthorized` (with a `WWW-Authenticate: Bearer` challenge)
/// if the header is missing or malformed, the signature or expiry check
/// fails, the token was revoked, or the subject no longer exists.
///
/// [`AuthContext`]: crate::application::services::AuthContext
pub async fn layer(
    State(st): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let (mut parts, body) = req.into_parts();

    let AuthBearer(token) = AuthBearer::from_request_parts(&mut parts, &())
        .await
        .map_err(|_| {
            AppError::unauthorized(
                "Unauthorized",
                serde_json::json!({"reason": "Authorization header is missing or invalid"}),
            )
        })?;

    let ctx = st.tokens.verify(&token).await?;

    let mut req = Request::from_parts(parts, body);
    req.extensions_mut().insert(ctx);

    Ok(next.run(req).await)
}
