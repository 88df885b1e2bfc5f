use std::collections::HashMap;

use crate::config::Config;
use crate::models::{ModelStats, Movie, Rating, RecommendationItem};
use crate::services::evaluate::compute_rmse;
use crate::services::matrix::{build_matrix, UserItemMatrix};
use crate::services::popularity::top_popular;
use crate::services::preprocess::{preprocess, FilteredDataset};
use crate::services::recommend::{recommend, RecommendError};
use crate::services::similarity::{compute_similarity, SimilarityMatrix};

/// A fully built recommendation model
///
/// All derived state (filtered dataset, matrices, RMSE) is computed once
/// from an immutable raw load and held read-only; per-request operations
/// never mutate it. Rebuilding happens only through a forced reload.
pub struct Model {
    /// Full movie metadata table, keyed by movie id (not restricted to the
    /// filtered set — recommendation lookups intentionally use the raw table)
    pub movies: HashMap<u32, Movie>,
    pub data: FilteredDataset,
    pub matrix: UserItemMatrix,
    pub similarity: SimilarityMatrix,
    pub rmse: f64,
    pub stats: ModelStats,
}

impl Model {
    /// Runs the full pipeline: preprocess → pivot → similarity → RMSE
    pub fn build(ratings: Vec<Rating>, movies: Vec<Movie>, config: &Config) -> Self {
        let n_ratings_raw = ratings.len();
        let n_movies_total = movies.len();

        let data = preprocess(
            &ratings,
            &movies,
            config.min_user_ratings,
            config.min_movie_ratings,
        );
        let matrix = build_matrix(&data);
        let similarity = compute_similarity(&matrix);
        let rmse = compute_rmse(&matrix, &similarity);

        let stats = ModelStats {
            n_ratings_raw,
            n_movies_total,
            n_ratings_filtered: data.len(),
            n_users: matrix.n_users(),
            n_movies: matrix.n_movies(),
            rmse,
        };

        tracing::info!(
            ratings_raw = stats.n_ratings_raw,
            ratings_filtered = stats.n_ratings_filtered,
            users = stats.n_users,
            movies = stats.n_movies,
            rmse = stats.rmse,
            "Recommendation model built"
        );

        Self {
            movies: movies.into_iter().map(|m| (m.movie_id, m)).collect(),
            data,
            matrix,
            similarity,
            rmse,
            stats,
        }
    }

    /// Top-N user-based recommendations for one user
    pub fn recommend(
        &self,
        user_id: u32,
        n: usize,
        k_neighbors: usize,
    ) -> Result<Vec<RecommendationItem>, RecommendError> {
        recommend(
            user_id,
            &self.matrix,
            &self.similarity,
            &self.movies,
            n,
            k_neighbors,
        )
    }

    /// Top-N movies by mean rating
    pub fn top_popular(&self, n: usize) -> Vec<RecommendationItem> {
        top_popular(&self.data, n)
    }
}
