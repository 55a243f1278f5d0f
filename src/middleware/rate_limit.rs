use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware::Next,
    response::{IntoResponse, Response},
};
use chrono::{DateTime, TimeZone, Utc};

use crate::{
    cache::{CacheError, CounterStore, RateLimitRecord, keys::rate_limit_key},
    config::Config,
    error::AppError,
    utils::client_key,
};

/// Outcome of one gated request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RateLimitDecision {
    pub allowed: bool,
    pub limit: u32,
    pub record: RateLimitRecord,
}

/// Fixed-window counter per client. Two bursts straddling a window edge can
/// admit up to twice `max_requests` within one window length.
#[derive(Clone)]
pub struct RateLimiter {
    store: Arc<dyn CounterStore>,
    max_requests: u32,
    window: Duration,
    path_prefix: String,
}

impl RateLimiter {
    pub fn new(
        store: Arc<dyn CounterStore>,
        max_requests: u32,
        window: Duration,
        path_prefix: impl Into<String>,
    ) -> Self {
        Self {
            store,
            max_requests,
            window: window.max(Duration::from_secs(1)),
            path_prefix: path_prefix.into(),
        }
    }

    pub fn from_config(store: Arc<dyn CounterStore>, config: &Config) -> Self {
        Self::new(
            store,
            config.rate_limit_requests,
            config.rate_limit_window(),
            config.rate_limit_path.clone(),
        )
    }

    pub fn guards(&self, path: &str) -> bool {
        path.starts_with(&self.path_prefix)
    }

    pub async fn check_at(
        &self,
        client: &str,
        now: DateTime<Utc>,
    ) -> Result<RateLimitDecision, CacheError> {
        let window_secs = self.window.as_secs() as i64;
        let window_index = now.timestamp().div_euclid(window_secs);
        let window_start = Utc
            .timestamp_opt(window_index * window_secs, 0)
            .single()
            .unwrap_or(now);

        let count = self
            .store
            .increment(&rate_limit_key(client, window_index), self.window)
            .await?;

        Ok(RateLimitDecision {
            allowed: count <= u64::from(self.max_requests),
            limit: self.max_requests,
            record: RateLimitRecord {
                client_key: client.to_string(),
                window_count: count,
                window_start,
                reset_at: window_start + chrono::Duration::seconds(window_secs),
            },
        })
    }
}

pub async fn rate_limit(
    State(limiter): State<Arc<RateLimiter>>,
    req: Request<Body>,
    next: Next,
) -> Response {
    if !limiter.guards(req.uri().path()) {
        return next.run(req).await;
    }

    let client = client_key(req.headers());
    let now = Utc::now();

    match limiter.check_at(&client, now).await {
        Ok(decision) if decision.allowed => next.run(req).await,
        Ok(decision) => {
            tracing::warn!(
                "Rate limit exceeded for {}: {} requests in window starting {}",
                client,
                decision.record.window_count,
                decision.record.window_start
            );
            AppError::RateLimited {
                retry_after_secs: decision.record.retry_after_secs(now),
            }
            .into_response()
        }
        Err(e) => {
            tracing::error!("Rate limit store unavailable: {}", e);
            AppError::Unknown(e.to_string()).into_response()
        }
    }
}
