//! Process-local revocation ledger.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::RwLock;
use std::time::{Duration, Instant};

use crate::domain::repositories::RevocationLedger;
use crate::error::AppError;

/// In-memory revocation ledger for single-process deployments and tests.
///
/// Used when no `REDIS_URL` is configured. Revocations recorded here are
/// only visible to this process. Expired entries are evicted lazily: reads
/// treat them as absent and every write prunes the table.
#[derive(Default)]
pub struct MemoryLedger {
    deadlines: RwLock<HashMap<String, Instant>>,
}

impl MemoryLedger {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RevocationLedger for MemoryLedger {
    async fn revoke(&self, jti: &str, ttl: Duration) -> Result<(), AppError> {
        let now = Instant::now();
        let mut deadlines = self
            .deadlines
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        deadlines.retain(|_, deadline| *deadline > now);
        deadlines.insert(jti.to_string(), now + ttl);

        Ok(())
    }

    async fn is_revoked(&self, jti: &str) -> Result<bool, AppError> {
        let deadlines = self
            .deadlines
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        Ok(deadlines
            .get(jti)
            .is_some_and(|deadline| *deadline > Instant::now()))
    }
}
