use std::cmp::Ordering;
use std::collections::HashMap;

use crate::models::{RecommendationItem, RecommendationKind};
use crate::services::preprocess::FilteredDataset;

/// Ranks movies by mean rating over the filtered dataset
///
/// Independent of the similarity machinery; used as the landing-page and
/// cold-start fallback. Ties break by ascending movie id. Empty input yields
/// empty output.
pub fn top_popular(data: &FilteredDataset, n: usize) -> Vec<RecommendationItem> {
    struct MovieAgg<'a> {
        title: &'a str,
        genres: &'a str,
        sum: f64,
        count: usize,
    }

    let mut by_movie: HashMap<u32, MovieAgg<'_>> = HashMap::new();
    for row in &data.rows {
        let agg = by_movie.entry(row.movie_id).or_insert(MovieAgg {
            title: &row.title,
            genres: &row.genres,
            sum: 0.0,
            count: 0,
        });
        agg.sum += row.rating;
        agg.count += 1;
    }

    let mut ranked: Vec<RecommendationItem> = by_movie
        .into_iter()
        .map(|(movie_id, agg)| RecommendationItem {
            movie_id,
            title: agg.title.to_string(),
            genres: agg.genres.to_string(),
            score: agg.sum / agg.count as f64,
            kind: RecommendationKind::Popular,
        })
        .collect();

    ranked.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.movie_id.cmp(&b.movie_id))
    });
    ranked.truncate(n);
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::preprocess::RatedTitle;

    fn row(user_id: u32, movie_id: u32, rating: f64) -> RatedTitle {
        RatedTitle {
            user_id,
            movie_id,
            rating,
            title: format!("Movie {}", movie_id),
            genres: "Drama".to_string(),
        }
    }

    #[test]
    fn test_ranks_by_mean_rating_descending() {
        let data = FilteredDataset {
            rows: vec![
                row(1, 10, 5.0),
                row(2, 10, 4.0), // mean 4.5
                row(1, 20, 3.0),
                row(2, 20, 4.0), // mean 3.5
                row(1, 30, 5.0), // mean 5.0
            ],
        };

        let popular = top_popular(&data, 10);

        let ids: Vec<u32> = popular.iter().map(|r| r.movie_id).collect();
        assert_eq!(ids, vec![30, 10, 20]);
        assert!((popular[0].score - 5.0).abs() < 1e-9);
        assert!((popular[1].score - 4.5).abs() < 1e-9);
        assert!(popular.iter().all(|r| r.kind == RecommendationKind::Popular));
    }

    #[test]
    fn test_ties_break_by_ascending_movie_id() {
        let data = FilteredDataset {
            rows: vec![row(1, 30, 4.0), row(1, 10, 4.0), row(1, 20, 4.0)],
        };

        let popular = top_popular(&data, 10);
        let ids: Vec<u32> = popular.iter().map(|r| r.movie_id).collect();
        assert_eq!(ids, vec![10, 20, 30]);
    }

    #[test]
    fn test_truncates_to_n() {
        let data = FilteredDataset {
            rows: vec![row(1, 10, 5.0), row(1, 20, 4.0), row(1, 30, 3.0)],
        };

        assert_eq!(top_popular(&data, 2).len(), 2);
    }

    #[test]
    fn test_empty_input_yields_empty_output() {
        assert!(top_popular(&FilteredDataset::default(), 5).is_empty());
    }
}
