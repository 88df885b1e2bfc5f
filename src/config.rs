use serde::Deserialize;

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// URL of the MovieLens dataset archive
    #[serde(default = "default_dataset_url")]
    pub dataset_url: String,

    /// Minimum ratings a user must have to be retained
    #[serde(default = "default_min_user_ratings")]
    pub min_user_ratings: usize,

    /// Minimum ratings a movie must have to be retained
    #[serde(default = "default_min_movie_ratings")]
    pub min_movie_ratings: usize,

    /// Neighborhood size for user-based recommendations
    #[serde(default = "default_k_neighbors")]
    pub k_neighbors: usize,

    /// Number of recommendations returned when the request omits `n`
    #[serde(default = "default_recommendations")]
    pub default_recommendations: usize,

    /// Hard cap on `n` per request
    #[serde(default = "default_max_recommendations")]
    pub max_recommendations: usize,

    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_dataset_url() -> String {
    "https://files.grouplens.org/datasets/movielens/ml-latest-small.zip".to_string()
}

fn default_min_user_ratings() -> usize {
    20
}

fn default_min_movie_ratings() -> usize {
    20
}

fn default_k_neighbors() -> usize {
    5
}

fn default_recommendations() -> usize {
    10
}

fn default_max_recommendations() -> usize {
    30
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        envy::from_env::<Config>().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            dataset_url: default_dataset_url(),
            min_user_ratings: default_min_user_ratings(),
            min_movie_ratings: default_min_movie_ratings(),
            k_neighbors: default_k_neighbors(),
            default_recommendations: default_recommendations(),
            max_recommendations: default_max_recommendations(),
            host: default_host(),
            port: default_port(),
        }
    }
}
