/// Rate limit counter key prefix
pub const RATE_LIMIT_PREFIX: &str = "rate_limit:";

/// Counter key for one client in one fixed window
pub fn rate_limit_key(client: &str, window_index: i64) -> String {
    format!("{}{}:{}", RATE_LIMIT_PREFIX, client, window_index)
}
