//! HTTP request handlers.

pub mod auth;
pub mod link;
pub mod redirect;
pub mod user;

pub use auth::{login_handler, logout_handler, register_handler};
pub use link::{delete_link_handler, get_link_handler, shorten_handler, update_link_handler};
pub use redirect::go_handler;
pub use user::{delete_user_handler, me_handler, update_user_handler};
