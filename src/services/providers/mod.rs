/// Dataset source abstraction
///
/// The engine only requires two raw tables (ratings and movie metadata);
/// where they come from is pluggable. The production source downloads the
/// MovieLens archive; tests inject in-memory fixtures through the same trait.
use crate::{
    error::AppResult,
    models::{Movie, Rating},
};

pub mod movielens;

pub use movielens::MovieLensSource;

/// Trait for raw rating-data sources
#[async_trait::async_trait]
pub trait RatingsSource: Send + Sync {
    /// Fetch the raw ratings and movie metadata tables
    ///
    /// Failures are fatal for the current model build attempt; nothing is
    /// cached on error and the next build retries from scratch.
    async fn fetch(&self) -> AppResult<(Vec<Rating>, Vec<Movie>)>;

    /// Source name for logging and debugging
    fn name(&self) -> &'static str;
}
