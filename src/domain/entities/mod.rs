//! Core business entities.

pub mod link;
pub mod user;

pub use link::{Link, LinkPatch, NewLink, ResolvedLink};
pub use user::{NewUser, User, UserPatch};
