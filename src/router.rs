use axum::{
    Router,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use crate::{
    AppState,
    middleware::{log_errors, rate_limit},
    routes,
};

// Routes under /api
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/generate", post(routes::generate::generate))
        .route("/options", get(routes::options::get_options))
}

// Full application with the rate limit gate and error logging
pub fn create_router(state: AppState) -> Router {
    let router = Router::new()
        .route("/health", get(routes::health::health))
        .nest("/api", api_routes());

    let router = router
        .layer(axum::middleware::from_fn(log_errors))
        .layer(axum::middleware::from_fn_with_state(
            state.rate_limiter.clone(),
            rate_limit,
        ))
        .layer(TraceLayer::new_for_http());

    #[cfg(debug_assertions)]
    let router = {
        tracing::debug!("Adding CORS layer for development mode");
        router.layer(tower_http::cors::CorsLayer::permissive())
    };

    router.with_state(state)
}
