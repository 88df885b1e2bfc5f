use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::error::AppResult;
use crate::models::{ModelStats, RecommendationItem};

use super::AppState;

/// How many popular titles the overview page shows
const OVERVIEW_POPULAR_COUNT: usize = 8;

// Request/Response types

#[derive(Debug, Deserialize)]
pub struct RecommendationRequest {
    pub user_id: u32,
    /// Requested result count; defaulted and clamped server-side
    pub n: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct RecommendationResponse {
    pub user_id: u32,
    pub n: usize,
    /// May legitimately be empty (zero similarity mass, or nothing left to
    /// recommend); distinct from the 404 returned for an unknown user
    pub recommendations: Vec<RecommendationItem>,
}

#[derive(Debug, Serialize)]
pub struct OverviewResponse {
    pub user_count: usize,
    pub movie_count: usize,
    pub rmse: f64,
    pub popular: Vec<RecommendationItem>,
}

#[derive(Debug, Deserialize)]
pub struct PopularParams {
    pub n: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct PopularResponse {
    pub n: usize,
    pub popular: Vec<RecommendationItem>,
}

// Handlers

/// Health check endpoint
pub async fn health_check() -> StatusCode {
    StatusCode::OK
}

/// Landing-page overview: matrix dimensions, fit estimate, popular titles
pub async fn overview(State(state): State<AppState>) -> AppResult<Json<OverviewResponse>> {
    let model = state.model().await?;

    Ok(Json(OverviewResponse {
        user_count: model.stats.n_users,
        movie_count: model.stats.n_movies,
        rmse: model.rmse,
        popular: model.top_popular(OVERVIEW_POPULAR_COUNT),
    }))
}

/// Personalized recommendations for one user
pub async fn recommend(
    State(state): State<AppState>,
    Json(request): Json<RecommendationRequest>,
) -> AppResult<Json<RecommendationResponse>> {
    let model = state.model().await?;
    let n = clamp_n(request.n, state.config());

    tracing::info!(
        user_id = request.user_id,
        n,
        "Processing recommendation request"
    );

    let recommendations = model.recommend(request.user_id, n, state.config().k_neighbors)?;

    if recommendations.is_empty() {
        tracing::info!(user_id = request.user_id, "No recommendations available");
    }

    Ok(Json(RecommendationResponse {
        user_id: request.user_id,
        n,
        recommendations,
    }))
}

/// Global popularity ranking
pub async fn popular(
    State(state): State<AppState>,
    Query(params): Query<PopularParams>,
) -> AppResult<Json<PopularResponse>> {
    let model = state.model().await?;
    let n = clamp_n(params.n, state.config());

    Ok(Json(PopularResponse {
        n,
        popular: model.top_popular(n),
    }))
}

/// Model diagnostics: row counts before/after filtering and the RMSE
pub async fn report(State(state): State<AppState>) -> AppResult<Json<ModelStats>> {
    let model = state.model().await?;
    Ok(Json(model.stats))
}

/// Forces a rebuild of the model from a fresh dataset fetch
pub async fn reload(State(state): State<AppState>) -> AppResult<Json<ModelStats>> {
    tracing::info!("Model reload requested");
    let model = state.reload().await?;
    Ok(Json(model.stats))
}

/// Defaults a missing `n` and clamps it to the configured bounds
fn clamp_n(n: Option<usize>, config: &Config) -> usize {
    n.unwrap_or(config.default_recommendations)
        .clamp(1, config.max_recommendations)
}
