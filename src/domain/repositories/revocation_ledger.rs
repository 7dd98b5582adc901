//! Revocation ledger trait for denylisted token identifiers.

use crate::error::AppError;
use async_trait::async_trait;
use std::time::Duration;

/// Denylist of revoked token identifiers (jti claims).
///
/// Entries carry a time-to-live equal to the token lifetime cap, so a
/// revoked jti outlives the token's own validity window and then expires on
/// its own — the ledger never needs an explicit sweep and never grows
/// unbounded.
///
/// # Implementations
///
/// - [`crate::infrastructure::ledger::RedisLedger`] - Redis keys with TTL
/// - [`crate::infrastructure::ledger::MemoryLedger`] - process-local fallback
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RevocationLedger: Send + Sync {
    /// Records a jti as revoked for `ttl`.
    ///
    /// Idempotent: revoking an already-revoked or unknown jti succeeds.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] when the ledger backend is
    /// unreachable. Revocation failures are never swallowed — a logout that
    /// cannot be recorded must not report success.
    async fn revoke(&self, jti: &str, ttl: Duration) -> Result<(), AppError>;

    /// Checks whether a jti has been revoked.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] when the ledger backend is
    /// unreachable (fail-closed: verification cannot proceed without a
    /// revocation answer).
    async fn is_revoked(&self, jti: &str) -> Result<bool, AppError>;
}
