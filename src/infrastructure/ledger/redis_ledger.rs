//! Redis-backed revocation ledger.

use async_trait::async_trait;
use redis::{AsyncCommands, Client, aio::ConnectionManager};
use std::time::Duration;
use tracing::info;

use crate::domain::repositories::RevocationLedger;
use crate::error::AppError;

/// Revocation ledger backed by Redis keys with TTL.
///
/// Each revoked jti becomes a key `revoked:{jti}` with an expiry equal to
/// the token lifetime cap; Redis evicts it automatically, so the ledger
/// stays bounded without sweeps. Operations propagate errors (fail-closed):
/// authentication cannot proceed without a revocation answer.
pub struct RedisLedger {
    client: ConnectionManager,
    key_prefix: String,
}

impl RedisLedger {
    /// Connects to Redis and validates the connection with a PING.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if the URL is invalid, the connection
    /// cannot be established, or the PING health check fails.
    pub async fn connect(redis_url: &str) -> Result<Self, AppError> {
        info!("Connecting to Redis at {}", redis_url);

        let client = Client::open(redis_url)?;
        let manager = ConnectionManager::new(client).await?;

        let mut test_conn = manager.clone();
        test_conn.ping::<()>().await?;

        info!("✓ Connected to Redis");

        Ok(Self {
            client: manager,
            key_prefix: "revoked:".to_string(),
        })
    }

    fn build_key(&self, jti: &str) -> String {
        format!("{}{}", self.key_prefix, jti)
    }
}

#[async_trait]
impl RevocationLedger for RedisLedger {
    async fn revoke(&self, jti: &str, ttl: Duration) -> Result<(), AppError> {
        let key = self.build_key(jti);
        let mut conn = self.client.clone();

        // SET with EX is idempotent: re-revoking refreshes the entry.
        conn.set_ex::<_, _, ()>(&key, "", ttl.as_secs()).await?;

        Ok(())
    }

    async fn is_revoked(&self, jti: &str) -> Result<bool, AppError> {
        let key = self.build_key(jti);
        let mut conn = self.client.clone();

        let exists: bool = conn.exists(&key).await?;

        Ok(exists)
    }
}
