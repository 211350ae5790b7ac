use crate::infer::structs::{ProbMatrix, ViterbiTrace};
use crate::structs::Model;
use crate::util::VecMath;

/// Find the most probable hidden state path for a non-empty sequence.
///
/// delta[t][k] holds the probability of the best path that ends in state k
/// at time t, and psi[t][k] holds the state at t - 1 on that path. Every
/// maximum is taken with a strict comparison, so ties go to the lowest index.
pub fn viterbi(model: &Model, seq: &[usize]) -> ViterbiTrace {
    let num_states = model.num_states();
    let seq_len = seq.len();

    debug_assert!(!seq.is_empty());

    let mut delta = ProbMatrix::new(seq_len, num_states);
    // row 0 of psi is never read
    let mut psi: Vec<usize> = vec![0; seq_len * num_states];

    for state_idx in 0..num_states {
        delta.set(
            0,
            state_idx,
            model.initial_probability(state_idx) * model.emission_probability(state_idx, seq[0]),
        );
    }

    for t in 1..seq_len {
        for to_state in 0..num_states {
            let mut best_state = 0;
            let mut best_score = delta.get(t - 1, 0) * model.transition_probability(0, to_state);

            for from_state in 1..num_states {
                let score =
                    delta.get(t - 1, from_state) * model.transition_probability(from_state, to_state);
                if score > best_score {
                    best_score = score;
                    best_state = from_state;
                }
            }

            delta.set(
                t,
                to_state,
                best_score * model.emission_probability(to_state, seq[t]),
            );
            psi[t * num_states + to_state] = best_state;
        }
    }

    log::trace!("viterbi:\n{delta:?}");

    // the sequence is non-empty, so there is a last row
    let last_row = delta.row(seq_len - 1);
    let mut state_idx = last_row.argmax().unwrap_or(0);
    let probability = last_row[state_idx];

    let mut states = vec![0; seq_len];
    states[seq_len - 1] = state_idx;
    for t in (1..seq_len).rev() {
        state_idx = psi[t * num_states + state_idx];
        states[t - 1] = state_idx;
    }

    ViterbiTrace {
        states,
        probability,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assert_close;
    use crate::demo;
    use crate::structs::{Observations, UnknownEmissionLabelError};
    use assert2::{assert, let_assert};

    #[test]
    fn test_viterbi_ncsa() -> anyhow::Result<()> {
        let model = demo::ncsa()?;
        let path = model.viterbi(&Observations::from_labels(&demo::NCSA_SEQUENCE))?;
        assert!(path == vec!["NA", "AP", "AC"]);
        Ok(())
    }

    #[test]
    fn test_viterbi_gene() -> anyhow::Result<()> {
        let model = demo::gene()?;
        let path = model.viterbi(&Observations::from_labels(&demo::GENE_SEQUENCE))?;
        assert!(path == vec!["NG", "NG", "G", "G", "G", "G", "NG", "NG"]);
        Ok(())
    }

    #[test]
    fn test_viterbi_rochester() -> anyhow::Result<()> {
        let model = demo::rochester()?;
        let trace = model.viterbi_trace(&Observations::from_labels(&demo::ROCHESTER_SEQUENCE))?;
        assert!(trace.states == vec![0, 0, 0, 0]);
        assert!(trace.labels(model.state_labels()) == vec!["S1", "S1", "S1", "S1"]);
        assert_close!(trace.probability, 0.00186624, 1e-12);
        Ok(())
    }

    #[test]
    fn test_viterbi_ties_prefer_lowest_state() -> anyhow::Result<()> {
        let model = Model::new(
            vec![vec![0.5, 0.5], vec![0.5, 0.5]],
            vec![vec![0.5, 0.5], vec![0.5, 0.5]],
        )?;
        let path = model.viterbi(&Observations::from(vec![0, 1, 1]))?;
        assert!(path == vec!["A", "A", "A"]);
        Ok(())
    }

    #[test]
    fn test_viterbi_single_observation() -> anyhow::Result<()> {
        let model = demo::rochester()?;
        let trace = model.viterbi_trace(&Observations::from_labels(&["W"]))?;
        // 0.8 * 0.4 against 0.2 * 0.3
        assert!(trace.states == vec![0]);
        assert_close!(trace.probability, 0.32);
        Ok(())
    }

    #[test]
    fn test_viterbi_labels_and_indices_agree() -> anyhow::Result<()> {
        let model = demo::gene()?;
        let by_label = model.viterbi(&Observations::from_labels(&demo::GENE_SEQUENCE))?;
        let by_index = model.viterbi(&Observations::from(vec![0, 1, 2, 3, 2, 2, 1, 0]))?;
        assert!(by_label == by_index);
        Ok(())
    }

    #[test]
    fn test_viterbi_unknown_label() -> anyhow::Result<()> {
        let model = demo::ncsa()?;
        let_assert!(Err(err) = model.viterbi(&Observations::from_labels(&["PS", "XX"])));
        let_assert!(Some(err) = err.downcast_ref::<UnknownEmissionLabelError>());
        assert!(err.label == "XX");
        Ok(())
    }
}
