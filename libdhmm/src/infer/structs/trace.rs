use std::fmt::{Debug, Formatter};

use serde::Serialize;

/// The most probable hidden state path through an observation sequence.
#[derive(Default, Clone, PartialEq, Serialize)]
pub struct ViterbiTrace {
    /// The state index chosen at each time step
    pub states: Vec<usize>,
    /// The joint probability of the path and the observations
    pub probability: f64,
}

impl ViterbiTrace {
    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    pub fn labels(&self, state_labels: &[String]) -> Vec<String> {
        self.states
            .iter()
            .map(|&state_idx| state_labels[state_idx].clone())
            .collect()
    }
}

impl Debug for ViterbiTrace {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let path: Vec<String> = self.states.iter().map(|s| s.to_string()).collect();
        write!(f, "{} p: {:e}", path.join(" -> "), self.probability)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert2::assert;

    #[test]
    fn test_trace_labels() {
        let trace = ViterbiTrace {
            states: vec![1, 0, 0, 1],
            probability: 0.5,
        };

        let labels = vec!["G".to_string(), "NG".to_string()];
        assert!(trace.labels(&labels) == vec!["NG", "G", "G", "NG"]);
        assert!(trace.len() == 4);
        assert!(format!("{trace:?}") == "1 -> 0 -> 0 -> 1 p: 5e-1");
    }
}
