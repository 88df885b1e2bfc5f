use std::collections::HashMap;

use ndarray::{Array2, ArrayView1};

use crate::services::matrix::UserItemMatrix;

/// Symmetric user-user cosine similarity matrix
///
/// Indexed by the same user ordering as the `UserItemMatrix` it was computed
/// from. The diagonal is 1.0 for every user with a nonzero rating vector.
#[derive(Debug, Clone, PartialEq)]
pub struct SimilarityMatrix {
    users: Vec<u32>,
    user_index: HashMap<u32, usize>,
    values: Array2<f64>,
}

impl SimilarityMatrix {
    pub fn n_users(&self) -> usize {
        self.users.len()
    }

    pub fn users(&self) -> &[u32] {
        &self.users
    }

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

/// Computes cosine similarity between every pair of user rating vectors
///
/// sim(u, v) = (u·v) / (‖u‖·‖v‖), defined as 0.0 when either norm is zero.
/// The gram matrix R·Rᵀ supplies both the dot products and (on its diagonal)
/// the squared norms, so the whole computation is two passes over O(users²)
/// cells. This is the dominant cost center of the system; sparse rows or an
/// approximate nearest-neighbor index would be the first place to optimize
/// at larger scale.
pub fn compute_similarity(matrix: &UserItemMatrix) -> SimilarityMatrix {
    let r = matrix.values();
    let gram = r.dot(&r.t());
    let norms: Vec<f64> = gram.diag().iter().map(|v| v.sqrt()).collect();

    let n = matrix.n_users();
    let mut values = Array2::zeros((n, n));
    for i in 0..n {
        for j in 0..n {
            if norms[i] > 0.0 && norms[j] > 0.0 {
                values[[i, j]] = if i == j {
                    1.0
                } else {
                    gram[[i, j]] / (norms[i] * norms[j])
                };
            }
        }
    }

    SimilarityMatrix {
        users: matrix.users().to_vec(),
        user_index: matrix
            .users()
            .iter()
            .enumerate()
            .map(|(i, &u)| (u, i))
            .collect(),
        values,
    }
}
