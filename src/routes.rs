//! Router configuration.
//!
//! # Route Structure
//!
//! Public:
//! - `GET  /`                 - liveness, 204
//! - `GET  /url/go/{slug}`    - slug resolution (visit counted)
//! - `POST /user/login`       - credential exchange
//! - `GET  /user/logout`      - token revocation (optional bearer)
//! - `POST /user/register`    - account creation
//!
//! Bearer-protected (via [`crate::api::middleware::auth`]):
//! - `GET/PATCH/DELETE /user` - own account
//! - `POST /url/short`        - create a short link
//! - `GET/PATCH/DELETE /url/{id}` - own links

use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Router, middleware};
use tower_http::trace::TraceLayer;

use crate::api::handlers::{
    delete_link_handler, delete_user_handler, get_link_handler, go_handler, login_handler,
    logout_handler, me_handler, register_handler, shorten_handler, update_link_handler,
    update_user_handler,
};
use crate::api::middleware::auth;
use crate::state::AppState;

/// Constructs the application router with all routes and middleware.
pub fn app_router(state: AppState) -> Router {
    let public = Router::new()
        .route("/", get(|| async { StatusCode::NO_CONTENT }))
        .route("/url/go/{slug}", get(go_handler))
        .route("/user/login", post(login_handler))
        .route("/user/logout", get(logout_handler))
        .route("/user/register", post(register_handler));

    let protected = Router::new()
        .route(
            "/user",
            get(me_handler)
                .patch(update_user_handler)
                .delete(delete_user_handler),
        )
        .route("/url/short", post(shorten_handler))
        .route(
            "/url/{id}",
            get(get_link_handler)
                .patch(update_link_handler)
                .delete(delete_link_handler),
        )
        .route_layer(middleware::from_fn_with_state(state.clone(), auth::layer));

    Router::new()
        .merge(public)
        .merge(protected)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}
