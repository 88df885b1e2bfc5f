use serde::{Deserialize, Serialize};

/// A single rating row from the raw dataset
///
/// Field names map to the MovieLens `ratings.csv` header
/// (`userId,movieId,rating,timestamp`).
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Rating {
    #[serde(rename = "userId")]
    pub user_id: u32,
    #[serde(rename = "movieId")]
    pub movie_id: u32,
    pub rating: f64,
    /// Unix timestamp of the rating, carried through untouched
    pub timestamp: i64,
}

/// Movie metadata from `movies.csv`
///
/// `genres` is the raw pipe-joined label string (e.g. "Comedy|Romance").
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Movie {
    #[serde(rename = "movieId")]
    pub movie_id: u32,
    pub title: String,
    pub genres: String,
}

/// Which ranking produced a recommendation
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationKind {
    /// Global mean-rating fallback
    Popular,
    /// Similarity-weighted neighborhood score
    UserBased,
}

/// A single scored recommendation returned to the client
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationItem {
    pub movie_id: u32,
    pub title: String,
    pub genres: String,
    pub score: f64,
    pub kind: RecommendationKind,
}

/// Diagnostics counts for a built model
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ModelStats {
    /// Rating rows in the raw download, before dedup and filtering
    pub n_ratings_raw: usize,
    /// Movies in the raw metadata table
    pub n_movies_total: usize,
    /// Rating rows surviving preprocessing
    pub n_ratings_filtered: usize,
    /// Users retained in the matrix
    pub n_users: usize,
    /// Movies retained in the matrix
    pub n_movies: usize,
    /// In-sample RMSE of the similarity predictor
    pub rmse: f64,
}
