use crate::infer::structs::ProbMatrix;
use crate::structs::Model;

/// Fill the forward matrix, where alpha[t][k] is the joint probability
/// of the first t + 1 observations and being in state k at time t.
///
/// The sequence must be non-empty and the matrix must be T x n.
pub fn forward(model: &Model, seq: &[usize], alpha: &mut ProbMatrix) {
    let num_states = model.num_states();

    debug_assert!(!seq.is_empty());
    debug_assert!(alpha.rows == seq.len());
    debug_assert!(alpha.cols == num_states);

    for state_idx in 0..num_states {
        alpha.set(
            0,
            state_idx,
            model.emission_probability(state_idx, seq[0]) * model.initial_probability(state_idx),
        );
    }

    for t in 1..seq.len() {
        for to_state in 0..num_states {
            let mut incoming = 0.0;
            for from_state in 0..num_states {
                incoming += alpha.get(t - 1, from_state)
                    * model.transition_probability(from_state, to_state);
            }
            alpha.set(
                t,
                to_state,
                incoming * model.emission_probability(to_state, seq[t]),
            );
        }
    }

    log::trace!("forward:\n{alpha:?}");
}
