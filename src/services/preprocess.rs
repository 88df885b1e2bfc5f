use std::collections::{HashMap, HashSet};

use crate::models::{Movie, Rating};

/// One rating row joined with its movie metadata
#[derive(Debug, Clone, PartialEq)]
pub struct RatedTitle {
    pub user_id: u32,
    pub movie_id: u32,
    pub rating: f64,
    pub title: String,
    pub genres: String,
}

/// Ratings joined with movie metadata and filtered by activity thresholds
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilteredDataset {
    pub rows: Vec<RatedTitle>,
}

impl FilteredDataset {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Cleans and filters the raw tables into a `FilteredDataset`
///
/// Exact-duplicate rating rows are dropped first, then ratings are
/// inner-joined with movie metadata (rows without a metadata match are
/// silently discarded). Users and movies below their activity thresholds are
/// removed in a single pass: both row counts are taken on the same joined
/// table, so filtering one side never re-triggers the other. An empty result
/// is legal and must be handled downstream.
pub fn preprocess(
    ratings: &[Rating],
    movies: &[Movie],
    min_user_ratings: usize,
    min_movie_ratings: usize,
) -> FilteredDataset {
    // Exact duplicates only: all four fields must match.
    let mut seen: HashSet<(u32, u32, u64, i64)> = HashSet::new();
    let deduped: Vec<&Rating> = ratings
        .iter()
        .filter(|r| seen.insert((r.user_id, r.movie_id, r.rating.to_bits(), r.timestamp)))
        .collect();

    let metadata: HashMap<u32, &Movie> = movies.iter().map(|m| (m.movie_id, m)).collect();

    let joined: Vec<&Rating> = deduped
        .into_iter()
        .filter(|r| metadata.contains_key(&r.movie_id))
        .collect();

    let mut user_counts: HashMap<u32, usize> = HashMap::new();
    let mut movie_counts: HashMap<u32, usize> = HashMap::new();
    for r in &joined {
        *user_counts.entry(r.user_id).or_insert(0) += 1;
        *movie_counts.entry(r.movie_id).or_insert(0) += 1;
    }

    let rows: Vec<RatedTitle> = joined
        .into_iter()
        .filter(|r| {
            user_counts[&r.user_id] >= min_user_ratings
                && movie_counts[&r.movie_id] >= min_movie_ratings
        })
        .map(|r| {
            let movie = metadata[&r.movie_id];
            RatedTitle {
                user_id: r.user_id,
                movie_id: r.movie_id,
                rating: r.rating,
                title: movie.title.clone(),
                genres: movie.genres.clone(),
            }
        })
        .collect();

    tracing::debug!(
        raw = ratings.len(),
        filtered = rows.len(),
        "Preprocessing finished"
    );

    FilteredDataset { rows }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rating(user_id: u32, movie_id: u32, value: f64) -> Rating {
        Rating {
            user_id,
            movie_id,
            rating: value,
            timestamp: 0,
        }
    }

    fn movie(movie_id: u32, title: &str) -> Movie {
        Movie {
            movie_id,
            title: title.to_string(),
            genres: "Drama".to_string(),
        }
    }

    #[test]
    fn test_exact_duplicates_removed() {
        let ratings = vec![rating(1, 10, 5.0), rating(1, 10, 5.0), rating(1, 10, 5.0)];
        let movies = vec![movie(10, "A")];

        let data = preprocess(&ratings, &movies, 1, 1);
        assert_eq!(data.len(), 1);
    }

    #[test]
    fn test_near_duplicates_kept() {
        // Same user and movie but a different rating value is not an exact duplicate.
        let ratings = vec![rating(1, 10, 5.0), rating(1, 10, 4.0)];
        let movies = vec![movie(10, "A")];

        let data = preprocess(&ratings, &movies, 1, 1);
        assert_eq!(data.len(), 2);
    }

    #[test]
    fn test_orphan_ratings_silently_dropped() {
        let ratings = vec![rating(1, 10, 5.0), rating(1, 99, 3.0)];
        let movies = vec![movie(10, "A")];

        let data = preprocess(&ratings, &movies, 1, 1);
        assert_eq!(data.len(), 1);
        assert_eq!(data.rows[0].movie_id, 10);
        assert_eq!(data.rows[0].title, "A");
    }

    #[test]
    fn test_activity_thresholds() {
        let ratings = vec![
            rating(1, 10, 5.0),
            rating(1, 20, 3.0),
            rating(2, 10, 4.0),
            rating(2, 20, 4.0),
            rating(3, 10, 2.0), // user 3 has a single rating
        ];
        let movies = vec![movie(10, "A"), movie(20, "B")];

        let data = preprocess(&ratings, &movies, 2, 2);

        assert!(data.rows.iter().all(|r| r.user_id != 3));
        // Threshold invariant: every surviving user/movie met its minimum
        // when counted on the joined table.
        for r in &data.rows {
            let user_count = ratings.iter().filter(|x| x.user_id == r.user_id).count();
            let movie_count = ratings.iter().filter(|x| x.movie_id == r.movie_id).count();
            assert!(user_count >= 2);
            assert!(movie_count >= 2);
        }
    }

    #[test]
    fn test_single_pass_filtering_is_not_iterative() {
        // m1 is rated by users 1, 2 and 3; m2 only by users 1 and 2. With
        // min_user_ratings=2 and min_movie_ratings=3, user 3 and movie 2 both
        // drop out, which leaves users 1 and 2 with a single surviving row
        // each. A re-applied filter would now drop them too; the single
        // simultaneous pass keeps them.
        let ratings = vec![
            rating(1, 1, 4.0),
            rating(1, 2, 4.0),
            rating(2, 1, 3.0),
            rating(2, 2, 3.0),
            rating(3, 1, 5.0),
        ];
        let movies = vec![movie(1, "A"), movie(2, "B")];

        let data = preprocess(&ratings, &movies, 2, 3);

        assert_eq!(data.len(), 2);
        assert!(data.rows.iter().all(|r| r.movie_id == 1));
        let users: Vec<u32> = data.rows.iter().map(|r| r.user_id).collect();
        assert_eq!(users, vec![1, 2]);
    }

    #[test]
    fn test_over_strict_thresholds_yield_empty_dataset() {
        let ratings: Vec<Rating> = (0..10).map(|i| rating(i % 3, 10 + i % 4, 3.0)).collect();
        let movies: Vec<Movie> = (10..14).map(|id| movie(id, "M")).collect();

        let data = preprocess(&ratings, &movies, 100, 100);
        assert!(data.is_empty());
    }
}
