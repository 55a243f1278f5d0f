// Counting store used by the rate limiter.
// Contains cache keys, record models and the store operations.

pub mod keys;
pub mod models;
pub mod operations;

pub use models::RateLimitRecord;
pub use operations::{CacheError, CounterStore, MemoryCounterStore, RedisCounterStore};
