use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;

use hashtag_backend::{
    AppState,
    cache::{CounterStore, MemoryCounterStore, RedisCounterStore},
    config::Config,
    llm::OpenAiClient,
    middleware::RateLimiter,
    router::create_router,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env().expect("Failed to load configuration");

    #[cfg(debug_assertions)]
    tracing::info!("Running in debug mode with CORS enabled");

    #[cfg(not(debug_assertions))]
    tracing::info!("Running in production mode with CORS disabled");

    let completion =
        Arc::new(OpenAiClient::new(&config).expect("Failed to create completion client"));
    tracing::info!(
        "Using model {} at {}",
        config.openai_model,
        config.openai_base_url
    );

    let store: Arc<dyn CounterStore> = match &config.redis_url {
        Some(url) => Arc::new(
            RedisCounterStore::connect(url, config.redis_token.as_deref())
                .expect("Failed to create Redis client"),
        ),
        None => {
            tracing::warn!("REDIS_URL not set, rate limit counters are kept in process memory");
            Arc::new(MemoryCounterStore::new())
        }
    };

    let rate_limiter = Arc::new(RateLimiter::from_config(store, &config));
    tracing::info!(
        "Rate limiting {} to {} requests per {}s",
        config.rate_limit_path,
        config.rate_limit_requests,
        config.rate_limit_window_secs
    );

    let state = AppState {
        config: config.clone(),
        completion,
        rate_limiter,
    };

    let app = create_router(state);

    let addr = SocketAddr::new(
        config.server_host.parse().unwrap_or_else(|_| {
            tracing::warn!("Invalid server_host, falling back to dual-stack default");
            IpAddr::V6(std::net::Ipv6Addr::UNSPECIFIED)
        }),
        config.server_port,
    );
    tracing::info!("Server listening on {}", addr);
    axum::serve(
        tokio::net::TcpListener::bind(&addr)
            .await
            .expect("Failed to bind"),
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await
    .expect("Failed to start server");
}
