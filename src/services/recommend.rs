use std::cmp::Ordering;
use std::collections::HashMap;

use ndarray::Array1;
use thiserror::Error;

use crate::models::{Movie, RecommendationItem, RecommendationKind};
use crate::services::matrix::UserItemMatrix;
use crate::services::similarity::SimilarityMatrix;

/// Error types for the recommender
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RecommendError {
    #[error("userId {0} not found in filtered dataset")]
    UserNotFound(u32),
}

/// Generates top-N user-based recommendations for one user
///
/// Picks the `k_neighbors` users most similar to `user_id` (self excluded;
/// ties broken by similarity, then by ascending user id) and scores every
/// movie the target has not rated as the similarity-weighted mean of the
/// neighbors' ratings. Movies are ranked by descending score with ties broken
/// by ascending movie id, capped at `n`, and resolved against the full movie
/// metadata table; entries without metadata are silently dropped, so the
/// result may hold fewer than `n` items.
///
/// A zero similarity sum across the selected neighbors is a defined outcome
/// and returns an empty list, distinct from the `UserNotFound` error raised
/// when `user_id` has no row in the matrix.
pub fn recommend(
    user_id: u32,
    matrix: &UserItemMatrix,
    similarity: &SimilarityMatrix,
    movies: &HashMap<u32, Movie>,
    n: usize,
    k_neighbors: usize,
) -> Result<Vec<RecommendationItem>, RecommendError> {
    let target = matrix
        .position(user_id)
        .ok_or(RecommendError::UserNotFound(user_id))?;

    if n == 0 || k_neighbors == 0 {
        return Ok(Vec::new());
    }

    let sim_row = similarity.row(target);
    let mut neighbors: Vec<(usize, f64)> = sim_row
        .iter()
        .copied()
        .enumerate()
        .filter(|&(i, _)| i != target)
        .collect();
    neighbors.sort_by(|a, b| {
        b.1.partial_cmp(&a.1)
            .unwrap_or(Ordering::Equal)
            .then_with(|| matrix.users()[a.0].cmp(&matrix.users()[b.0]))
    });
    neighbors.truncate(k_neighbors);

    let sim_sum: f64 = neighbors.iter().map(|&(_, s)| s).sum();
    if sim_sum == 0.0 {
        return Ok(Vec::new());
    }

    let mut weighted = Array1::<f64>::zeros(matrix.n_movies());
    for &(idx, sim) in &neighbors {
        weighted.scaled_add(sim, &matrix.row(idx));
    }

    let target_row = matrix.row(target);
    let mut candidates: Vec<(u32, f64)> = matrix
        .movies()
        .iter()
        .enumerate()
        .filter(|&(m, _)| target_row[m] == 0.0)
        .map(|(m, &movie_id)| (movie_id, weighted[m] / sim_sum))
        .collect();
    candidates.sort_by(|a, b| {
        b.1.partial_cmp(&a.1)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.0.cmp(&b.0))
    });

    Ok(candidates
        .into_iter()
        .take(n)
        .filter_map(|(movie_id, score)| {
            movies.get(&movie_id).map(|movie| RecommendationItem {
                movie_id,
                title: movie.title.clone(),
                genres: movie.genres.clone(),
                score,
                kind: RecommendationKind::UserBased,
            })
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::matrix::build_matrix;
    use crate::services::preprocess::{FilteredDataset, RatedTitle};
    use crate::services::similarity::compute_similarity;

    fn row(user_id: u32, movie_id: u32, rating: f64) -> RatedTitle {
        RatedTitle {
            user_id,
            movie_id,
            rating,
            title: format!("Movie {}", movie_id),
            genres: "Drama".to_string(),
        }
    }

    fn movie(movie_id: u32) -> Movie {
        Movie {
            movie_id,
            title: format!("Movie {}", movie_id),
            genres: "Drama".to_string(),
        }
    }

    fn metadata(ids: &[u32]) -> HashMap<u32, Movie> {
        ids.iter().map(|&id| (id, movie(id))).collect()
    }

    fn scenario() -> (UserItemMatrix, SimilarityMatrix) {
        let data = FilteredDataset {
            rows: vec![
                row(1, 10, 5.0),
                row(1, 20, 3.0),
                row(2, 10, 4.0),
                row(2, 20, 4.0),
                row(2, 30, 5.0),
                row(3, 30, 2.0),
            ],
        };
        let matrix = build_matrix(&data);
        let similarity = compute_similarity(&matrix);
        (matrix, similarity)
    }

    #[test]
    fn test_recommends_unseen_movie_weighted_by_neighbors() {
        let (matrix, similarity) = scenario();
        let movies = metadata(&[10, 20, 30]);

        let recos = recommend(1, &matrix, &similarity, &movies, 1, 2).unwrap();

        assert_eq!(recos.len(), 1);
        assert_eq!(recos[0].movie_id, 30);
        assert_eq!(recos[0].kind, RecommendationKind::UserBased);
        // Only user 2 has nonzero similarity to user 1, so the weighted
        // estimate collapses to user 2's rating of movie 30.
        assert!((recos[0].score - 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_never_returns_already_rated_movies() {
        let (matrix, similarity) = scenario();
        let movies = metadata(&[10, 20, 30]);

        let recos = recommend(1, &matrix, &similarity, &movies, 10, 2).unwrap();

        assert!(recos.iter().all(|r| r.movie_id != 10 && r.movie_id != 20));
    }

    #[test]
    fn test_unknown_user_is_a_lookup_error() {
        let (matrix, similarity) = scenario();
        let movies = metadata(&[10, 20, 30]);

        let err = recommend(99, &matrix, &similarity, &movies, 5, 2).unwrap_err();
        assert_eq!(err, RecommendError::UserNotFound(99));
        assert!(err.to_string().contains("99"));
    }

    #[test]
    fn test_returns_at_most_n_items() {
        let data = FilteredDataset {
            rows: vec![
                row(1, 10, 5.0),
                row(2, 10, 4.0),
                row(2, 20, 4.0),
                row(2, 30, 5.0),
                row(2, 40, 3.0),
            ],
        };
        let matrix = build_matrix(&data);
        let similarity = compute_similarity(&matrix);
        let movies = metadata(&[10, 20, 30, 40]);

        let recos = recommend(1, &matrix, &similarity, &movies, 2, 1).unwrap();
        assert_eq!(recos.len(), 2);
    }

    #[test]
    fn test_zero_similarity_sum_yields_empty_result() {
        // user 1 shares no rated movie with anyone else
        let data = FilteredDataset {
            rows: vec![row(1, 10, 5.0), row(2, 20, 4.0), row(3, 30, 3.0)],
        };
        let matrix = build_matrix(&data);
        let similarity = compute_similarity(&matrix);
        let movies = metadata(&[10, 20, 30]);

        let recos = recommend(1, &matrix, &similarity, &movies, 5, 2).unwrap();
        assert!(recos.is_empty());
    }

    #[test]
    fn test_missing_metadata_drops_the_slot() {
        let (matrix, similarity) = scenario();
        // movie 30 disappeared from the metadata table
        let movies = metadata(&[10, 20]);

        let recos = recommend(1, &matrix, &similarity, &movies, 1, 2).unwrap();
        assert!(recos.is_empty());
    }

    #[test]
    fn test_zero_n_is_guarded() {
        let (matrix, similarity) = scenario();
        let movies = metadata(&[10, 20, 30]);

        let recos = recommend(1, &matrix, &similarity, &movies, 0, 2).unwrap();
        assert!(recos.is_empty());
    }

    #[test]
    fn test_score_ties_break_by_ascending_movie_id() {
        // Both unseen movies get the same weighted score from the single
        // neighbor, so ordering must fall back to movie id.
        let data = FilteredDataset {
            rows: vec![
                row(1, 10, 5.0),
                row(2, 10, 4.0),
                row(2, 30, 3.0),
                row(2, 20, 3.0),
            ],
        };
        let matrix = build_matrix(&data);
        let similarity = compute_similarity(&matrix);
        let movies = metadata(&[10, 20, 30]);

        let recos = recommend(1, &matrix, &similarity, &movies, 2, 1).unwrap();
        let ids: Vec<u32> = recos.iter().map(|r| r.movie_id).collect();
        assert_eq!(ids, vec![20, 30]);
    }
}
