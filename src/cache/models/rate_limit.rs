use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// State of one client's counter in the current fixed window
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct RateLimitRecord {
    pub client_key: String,
    pub window_count: u64,
    pub window_start: DateTime<Utc>,
    pub reset_at: DateTime<Utc>,
}

impl RateLimitRecord {
    /// Whole seconds until the window closes, never below 1.
    pub fn retry_after_secs(&self, now: DateTime<Utc>) -> u64 {
        let remaining = (self.reset_at - now).num_milliseconds();
        ((remaining + 999) / 1000).max(1) as u64
    }
}
