use ndarray::Axis;

use crate::services::matrix::UserItemMatrix;
use crate::services::similarity::SimilarityMatrix;

/// Root-mean-squared error of the similarity predictor over observed cells
///
/// Every user's predicted rating vector is the similarity-weighted mean of
/// all users' ratings: predicted = S·R / rowsum(|S|), with zero denominators
/// replaced by 1.0 so that users without any similarity mass predict 0.0
/// instead of dividing by zero. The error is measured only where the true
/// rating is observed (> 0.0), so this is an in-sample fit of the model, not
/// a held-out evaluation. An empty observed set yields 0.0.
pub fn compute_rmse(matrix: &UserItemMatrix, similarity: &SimilarityMatrix) -> f64 {
    if matrix.n_users() == 0 || matrix.n_movies() == 0 {
        return 0.0;
    }

    let r = matrix.values();
    let s = similarity.values();

    let denom = s
        .mapv(f64::abs)
        .sum_axis(Axis(1))
        .mapv(|d| if d == 0.0 { 1.0 } else { d });
    let predicted = s.dot(r) / &denom.insert_axis(Axis(1));

    let mut sum_sq = 0.0;
    let mut observed = 0usize;
    for ((i, j), &actual) in r.indexed_iter() {
        if actual > 0.0 {
            let diff = predicted[[i, j]] - actual;
            sum_sq += diff * diff;
            observed += 1;
        }
    }

    if observed == 0 {
        return 0.0;
    }
    (sum_sq / observed as f64).sqrt()
}
