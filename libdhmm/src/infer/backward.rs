use serde::Serialize;

use crate::infer::structs::ProbMatrix;
use crate::structs::Model;
use crate::util::VecMath;

/// The output of the backward pass.
#[derive(Clone, Debug, Serialize)]
pub struct BackwardResult {
    /// The T x n backward matrix
    pub beta: ProbMatrix,
    /// initial[k] * emission[k][seq[0]] * beta[0][k], kept out of the beta matrix
    pub beta_zero: Vec<f64>,
}

impl BackwardResult {
    /// This should match the forward probability of the same sequence.
    pub fn beta_zero_sum(&self) -> f64 {
        self.beta_zero.sum_left()
    }
}

/// Fill the backward matrix and return the beta-zero vector.
///
/// The last row doesn't use the usual beta[T-1][k] = 1 boundary. Instead the
/// missing emission and beta terms past the end of the sequence are taken as
/// 1.0 inside the sum, which makes beta[T-1][k] the sum of transition row k.
pub fn backward(model: &Model, seq: &[usize], beta: &mut ProbMatrix) -> Vec<f64> {
    let num_states = model.num_states();
    let seq_len = seq.len();

    debug_assert!(!seq.is_empty());
    debug_assert!(beta.rows == seq_len);
    debug_assert!(beta.cols == num_states);

    for t in (0..seq_len).rev() {
        let at_end = t + 1 == seq_len;

        for from_state in 0..num_states {
            let mut outgoing = 0.0;
            for to_state in 0..num_states {
                let (emission, next_beta) = if at_end {
                    (1.0, 1.0)
                } else {
                    (
                        model.emission_probability(to_state, seq[t + 1]),
                        beta.get(t + 1, to_state),
                    )
                };
                outgoing +=
                    model.transition_probability(from_state, to_state) * emission * next_beta;
            }
            beta.set(t, from_state, outgoing);
        }
    }

    log::trace!("backward:\n{beta:?}");

    (0..num_states)
        .map(|state_idx| {
            model.initial_probability(state_idx)
                * model.emission_probability(state_idx, seq[0])
                * beta.get(0, state_idx)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assert_close;
    use crate::demo;
    use crate::structs::Observations;
    use assert2::assert;

    #[test]
    fn test_backward_shape() -> anyhow::Result<()> {
        let model = demo::ncsa()?;
        let result = model.backward(&Observations::from_labels(&demo::NCSA_SEQUENCE))?;
        assert!(result.beta.rows == 3);
        assert!(result.beta.cols == 3);
        assert!(result.beta_zero.len() == 3);
        Ok(())
    }

    #[test]
    fn test_backward_last_row_is_transition_row_sum() -> anyhow::Result<()> {
        let model = demo::gene()?;
        let result = model.backward(&Observations::from(vec![2, 3]))?;
        assert_close!(result.beta.get(1, 0), 0.7 + 0.3);
        assert_close!(result.beta.get(1, 1), 0.3 + 0.7);

        // beta[0][0] = 0.7 * 0.4 + 0.3 * 0.2
        assert_close!(result.beta.get(0, 0), 0.34);
        Ok(())
    }

    #[test]
    fn test_beta_zero_sum_matches_forward_probability() -> anyhow::Result<()> {
        for (model, seq) in [
            (demo::ncsa()?, Observations::from_labels(&demo::NCSA_SEQUENCE)),
            (demo::gene()?, Observations::from_labels(&demo::GENE_SEQUENCE)),
            (
                demo::rochester()?,
                Observations::from_labels(&demo::ROCHESTER_SEQUENCE),
            ),
        ] {
            let result = model.backward(&seq)?;
            let forward_probability = model.forward_probability(&seq)?;
            assert_close!(result.beta_zero_sum(), forward_probability, 1e-12);
        }
        Ok(())
    }
}
