//! Business logic services orchestrating domain operations.

pub mod account_service;
pub mod link_service;
pub mod token_service;

pub use account_service::{AccountService, ProfileUpdate, Registration};
pub use link_service::{LinkService, LinkUpdate};
pub use token_service::{AuthContext, TOKEN_LIFETIME, TokenService};
