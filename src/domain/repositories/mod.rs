//! Repository trait definitions for the domain layer.
//!
//! Traits define the contract for data operations; concrete implementations
//! live in `crate::infrastructure`. Mock implementations are auto-generated
//! via `mockall` for unit tests.
//!
//! # Available Repositories
//!
//! - [`UserRepository`] - account storage and credential lookup
//! - [`LinkRepository`] - short link CRUD and visit recording
//! - [`RevocationLedger`] - denylisted token identifiers with TTL

pub mod link_repository;
pub mod revocation_ledger;
pub mod user_repository;

pub use link_repository::LinkRepository;
pub use revocation_ledger::RevocationLedger;
pub use user_repository::UserRepository;

#[cfg(test)]
pub use link_repository::MockLinkRepository;
#[cfg(test)]
pub use revocation_ledger::MockRevocationLedger;
#[cfg(test)]
pub use user_repository::MockUserRepository;
