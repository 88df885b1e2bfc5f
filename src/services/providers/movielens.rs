use std::io::Cursor;

use reqwest::Client as HttpClient;
use serde::de::DeserializeOwned;

use crate::{
    error::{AppError, AppResult},
    models::{Movie, Rating},
    services::providers::RatingsSource,
};

const RATINGS_ENTRY: &str = "ml-latest-small/ratings.csv";
const MOVIES_ENTRY: &str = "ml-latest-small/movies.csv";

/// MovieLens dataset source
///
/// Downloads the `ml-latest-small` zip archive and parses the two CSV files
/// the engine needs. The whole archive fits comfortably in memory, so
/// extraction happens over the downloaded bytes without touching disk.
pub struct MovieLensSource {
    http_client: HttpClient,
    url: String,
}

impl MovieLensSource {
    pub fn new(url: String) -> Self {
        Self {
            http_client: HttpClient::new(),
            url,
        }
    }

    fn parse_archive(bytes: &[u8]) -> AppResult<(Vec<Rating>, Vec<Movie>)> {
        let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).map_err(|e| {
            AppError::DatasetUnavailable(format!("dataset archive could not be opened: {}", e))
        })?;

        let ratings = read_csv_entry::<Rating>(&mut archive, RATINGS_ENTRY)?;
        let movies = read_csv_entry::<Movie>(&mut archive, MOVIES_ENTRY)?;
        Ok((ratings, movies))
    }
}

/// Reads and deserializes one CSV file out of the archive
///
/// A missing entry or a row that does not match the expected columns maps to
/// `DatasetUnavailable` naming the file, so shape problems in upstream data
/// are diagnosable from the error alone.
fn read_csv_entry<T: DeserializeOwned>(
    archive: &mut zip::ZipArchive<Cursor<&[u8]>>,
    entry: &str,
) -> AppResult<Vec<T>> {
    let file = archive.by_name(entry).map_err(|e| {
        AppError::DatasetUnavailable(format!("{} missing from dataset archive: {}", entry, e))
    })?;

    let mut reader = csv::Reader::from_reader(file);
    let mut rows = Vec::new();
    for result in reader.deserialize() {
        let row: T = result.map_err(|e| {
            AppError::DatasetUnavailable(format!("failed to parse {}: {}", entry, e))
        })?;
        rows.push(row);
    }
    Ok(rows)
}

#[async_trait::async_trait]
impl RatingsSource for MovieLensSource {
    async fn fetch(&self) -> AppResult<(Vec<Rating>, Vec<Movie>)> {
        tracing::info!(url = %self.url, "Downloading MovieLens dataset");

        let response = self.http_client.get(&self.url).send().await?;
        if !response.status().is_success() {
            return Err(AppError::DatasetUnavailable(format!(
                "dataset download returned status {}",
                response.status()
            )));
        }

        let bytes = response.bytes().await?;
        let (ratings, movies) = Self::parse_archive(&bytes)?;

        tracing::info!(
            ratings = ratings.len(),
            movies = movies.len(),
            source = self.name(),
            "Dataset loaded"
        );

        Ok((ratings, movies))
    }

    fn name(&self) -> &'static str {
        "movielens"
    }
}
