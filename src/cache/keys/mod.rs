/// Cache key module

pub mod rate_limit_keys;

pub use rate_limit_keys::{RATE_LIMIT_PREFIX, rate_limit_key};
