use std::collections::{HashMap, HashSet};

use ndarray::{Array2, ArrayView1};

use crate::services::preprocess::FilteredDataset;

/// Dense user × movie rating matrix
///
/// Rows are users and columns are movies, both in first-seen order of the
/// filtered rows. Cells the user never rated hold 0.0, which deliberately
/// conflates "unrated" with "rated zero"; the already-rated filter in the
/// recommender and the observed-cell mask in the evaluator both rely on it.
#[derive(Debug, Clone, PartialEq)]
pub struct UserItemMatrix {
    users: Vec<u32>,
    movies: Vec<u32>,
    user_index: HashMap<u32, usize>,
    values: Array2<f64>,
}

impl UserItemMatrix {
    pub fn n_users(&self) -> usize {
        self.users.len()
    }

    pub fn n_movies(&self) -> usize {
        self.movies.len()
    }

    pub fn users(&self) -> &[u32] {
        &self.users
    }

    pub fn movies(&self) -> &[u32] {
        &self.movies
    }

    /// Row position of a user, or `None` if the user was filtered out
    pub fn position(&self, user_id: u32) -> Option<usize> {
        self.user_index.get(&user_id).copied()
    }

    pub fn row(&self, index: usize) -> ArrayView1<'_, f64> {
        self.values.row(index)
    }

    pub fn values(&self) -> &Array2<f64> {
        &self.values
    }
}

/// Pivots the filtered dataset into a `UserItemMatrix`
///
/// A (user, movie) pair appearing more than once (cannot happen after exact
/// dedup, but guarded regardless) keeps its first value; later ones are
/// logged and ignored. Empty input yields a 0×0 matrix.
pub fn build_matrix(data: &FilteredDataset) -> UserItemMatrix {
    let mut users: Vec<u32> = Vec::new();
    let mut movies: Vec<u32> = Vec::new();
    let mut user_index: HashMap<u32, usize> = HashMap::new();
    let mut movie_index: HashMap<u32, usize> = HashMap::new();

    for row in &data.rows {
        user_index.entry(row.user_id).or_insert_with(|| {
            users.push(row.user_id);
            users.len() - 1
        });
        movie_index.entry(row.movie_id).or_insert_with(|| {
            movies.push(row.movie_id);
            movies.len() - 1
        });
    }

    let mut values = Array2::zeros((users.len(), movies.len()));
    let mut filled: HashSet<(usize, usize)> = HashSet::new();

    for row in &data.rows {
        let u = user_index[&row.user_id];
        let m = movie_index[&row.movie_id];
        if !filled.insert((u, m)) {
            tracing::warn!(
                user_id = row.user_id,
                movie_id = row.movie_id,
                "Duplicate rating pair after dedup, keeping first value"
            );
            continue;
        }
        values[[u, m]] = row.rating;
    }

    UserItemMatrix {
        users,
        movies,
        user_index,
        values,
    }
}
