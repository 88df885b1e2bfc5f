use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use super::handlers;
use super::AppState;

/// Creates the main API router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health_check))
        .nest("/api/v1", api_routes())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// API routes under /api/v1
fn api_routes() -> Router<AppState> {
    Router::new()
        // Landing-page data: counts, RMSE, popular titles
        .route("/overview", get(handlers::overview))
        // Recommendations
        .route("/recommendations", post(handlers::recommend))
        .route("/popular", get(handlers::popular))
        // Model diagnostics & lifecycle
        .route("/report", get(handlers::report))
        .route("/reload", post(handlers::reload))
}
