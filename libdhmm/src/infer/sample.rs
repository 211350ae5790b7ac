use anyhow::Context;
use rand::distributions::{Distribution, WeightedIndex};
use rand::Rng;
use serde::Serialize;

use crate::structs::{Model, Observations};

/// A hidden state path and the emissions drawn along it.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Sample {
    pub states: Vec<usize>,
    pub emissions: Vec<usize>,
}

impl Sample {
    pub fn state_labels(&self, model: &Model) -> Vec<String> {
        self.states
            .iter()
            .map(|&idx| model.state_labels()[idx].clone())
            .collect()
    }

    pub fn observations(&self, model: &Model) -> Observations {
        Observations::Labels(
            self.emissions
                .iter()
                .map(|&idx| model.emission_labels()[idx].clone())
                .collect(),
        )
    }
}

fn row_distributions(rows: impl Iterator<Item = Vec<f64>>) -> anyhow::Result<Vec<WeightedIndex<f64>>> {
    rows.enumerate()
        .map(|(row_idx, row)| {
            WeightedIndex::new(row).with_context(|| format!("row {row_idx} can't be sampled"))
        })
        .collect()
}

/// Draw a state path of the given length from the initial and
/// transition distributions, and an emission for every state on it.
pub fn sample<R: Rng>(model: &Model, length: usize, rng: &mut R) -> anyhow::Result<Sample> {
    let initial = WeightedIndex::new(model.initial().to_vec())
        .context("initial state vector can't be sampled")?;
    let transitions = row_distributions(model.transition().to_rows().into_iter())
        .context("transition matrix can't be sampled")?;
    let emissions = row_distributions(model.emission().to_rows().into_iter())
        .context("emission matrix can't be sampled")?;

    let mut sample = Sample {
        states: Vec::with_capacity(length),
        emissions: Vec::with_capacity(length),
    };

    let mut state_idx = initial.sample(rng);
    for t in 0..length {
        if t > 0 {
            state_idx = transitions[state_idx].sample(rng);
        }
        sample.states.push(state_idx);
        sample.emissions.push(emissions[state_idx].sample(rng));
    }

    log::debug!("sampled {} observations", length);

    Ok(sample)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::demo;
    use assert2::{assert, let_assert};
    use rand::SeedableRng;
    use rand_pcg::Pcg64;

    #[test]
    fn test_sample_is_reproducible() -> anyhow::Result<()> {
        let model = demo::gene()?;
        let first = model.sample(50, &mut Pcg64::seed_from_u64(7))?;
        let second = model.sample(50, &mut Pcg64::seed_from_u64(7))?;
        assert!(first == second);
        assert!(first.states.len() == 50);
        assert!(first.emissions.len() == 50);
        Ok(())
    }

    #[test]
    fn test_sample_stays_in_bounds() -> anyhow::Result<()> {
        let model = demo::rochester()?;
        let sample = model.sample(200, &mut Pcg64::seed_from_u64(42))?;
        assert!(sample.states.iter().all(|&s| s < model.num_states()));
        assert!(sample.emissions.iter().all(|&e| e < model.num_emissions()));

        // the sampled observations are always decodable
        let gamma = model.forward_backward(&sample.observations(&model))?;
        assert!(gamma.rows == 200);
        Ok(())
    }

    #[test]
    fn test_sample_follows_deterministic_model() -> anyhow::Result<()> {
        // NA always emits PS and AP always emits SI, AC is absorbing
        let model = demo::ncsa()?;
        let sample = model.sample(20, &mut Pcg64::seed_from_u64(1))?;

        for window in sample.states.windows(2) {
            assert!(window[1] >= window[0]);
        }
        for (&state, &emission) in sample.states.iter().zip(&sample.emissions) {
            let expected = if state == 1 { 1 } else { 0 };
            assert!(emission == expected);
        }
        Ok(())
    }

    #[test]
    fn test_sample_zero_initial() -> anyhow::Result<()> {
        let model = Model::builder(vec![vec![1.0]], vec![vec![1.0]])
            .with_initial(vec![0.0])
            .build()?;
        let_assert!(Err(_) = model.sample(3, &mut Pcg64::seed_from_u64(1)));
        Ok(())
    }
}
