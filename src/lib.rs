use std::sync::Arc;

use config::Config;
use llm::CompletionClient;
use middleware::RateLimiter;

pub mod cache;
pub mod config;
pub mod error;
pub mod llm;
pub mod middleware;
pub mod models;
pub mod router;
pub mod routes;
pub mod utils;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub completion: Arc<dyn CompletionClient>,
    pub rate_limiter: Arc<RateLimiter>,
}
