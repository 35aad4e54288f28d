//! API Routes
//!
//! Configures the Axum router with all link service endpoints.

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    cache_check_handler, delete_handler, health_handler, link_stats_handler, redirect_handler,
    rename_handler, shorten_handler, stats_handler, sweep_handler, AppState,
};

/// Creates the main router with all endpoints configured.
///
/// # Middleware
/// - CORS: Allows any origin
/// - Tracing: Logs all requests
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let links = Router::new()
        .route("/shorten", post(shorten_handler))
        .route(
            "/:code",
            get(redirect_handler)
                .put(rename_handler)
                .delete(delete_handler),
        )
        .route("/:code/stats", get(link_stats_handler));

    let admin = Router::new()
        .route("/sweep", post(sweep_handler))
        .route("/cache-check", post(cache_check_handler));

    Router::new()
        .nest("/links", links)
        .nest("/admin", admin)
        .route("/stats", get(stats_handler))
        .route("/health", get(health_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
