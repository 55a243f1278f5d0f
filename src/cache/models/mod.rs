/// Cache data models

pub mod rate_limit;

pub use rate_limit::RateLimitRecord;
