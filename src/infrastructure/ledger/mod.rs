//! Revocation ledger implementations.

pub mod memory_ledger;
pub mod redis_ledger;

pub use memory_ledger::MemoryLedger;
pub use redis_ledger::RedisLedger;
