use crate::infer::structs::ProbMatrix;
use crate::util::VecMath;

/// Combine the forward and backward matrices into posterior state
/// probabilities: gamma[t][i] = alpha[t][i] * beta[t][i] / Z, where Z
/// is the sum of the last forward row.
pub fn posterior(alpha: &ProbMatrix, beta: &ProbMatrix, gamma: &mut ProbMatrix) {
    debug_assert!(alpha.rows == beta.rows && alpha.cols == beta.cols);
    debug_assert!(gamma.rows == alpha.rows && gamma.cols == alpha.cols);

    let normalizer = match alpha.last_row() {
        Some(row) => row.sum_left(),
        None => return,
    };

    if normalizer == 0.0 {
        log::warn!("the observations have zero probability under the model");
    }

    for t in 0..alpha.rows {
        for state_idx in 0..alpha.cols {
            gamma.set(
                t,
                state_idx,
                alpha.get(t, state_idx) * beta.get(t, state_idx) / normalizer,
            );
        }
    }

    log::trace!("posterior:\n{gamma:?}");
}
