use std::fmt::{Display, Formatter};

use anyhow::Context;
use log::{debug, warn};
use rand::Rng;
use thiserror::Error;

use crate::infer::structs::{ProbMatrix, ViterbiTrace};
use crate::infer::{backward, forward, posterior, sample, viterbi, BackwardResult, Sample};
use crate::structs::Observations;
use crate::util::{lettered_labels, numbered_labels, VecMath};

#[derive(Error, Debug, PartialEq)]
pub enum ShapeError {
    #[error("transition matrix must be square, found {rows}x{cols}")]
    TransitionNotSquare { rows: usize, cols: usize },
    #[error("{matrix} matrix row {row} has {found} columns, expected {expected}")]
    RaggedRow {
        matrix: &'static str,
        row: usize,
        found: usize,
        expected: usize,
    },
    #[error("emission matrix has {found} rows, expected {expected} (one per state)")]
    EmissionRows { found: usize, expected: usize },
    #[error("initial state vector has length {found}, expected {expected}")]
    InitialLength { found: usize, expected: usize },
    #[error("{found} state labels were given for {expected} states")]
    StateLabels { found: usize, expected: usize },
    #[error("{found} emission labels were given for {expected} emissions")]
    EmissionLabels { found: usize, expected: usize },
    #[error("a model needs at least one state")]
    NoStates,
}

#[derive(Error, Debug, PartialEq)]
#[error("{matrix} matrix row {row} sums to {sum}, expected 1.0")]
pub struct RowSumError {
    pub matrix: &'static str,
    pub row: usize,
    pub sum: f64,
}

/// How strictly the rows of the transition and emission
/// matrices are required to sum to one.
#[derive(Default, Debug, Clone, Copy, PartialEq)]
pub enum RowSumCheck {
    /// The row sum must compare equal to 1.0
    #[default]
    Exact,
    /// The row sum must be within the given distance of 1.0
    Tolerance(f64),
}

impl RowSumCheck {
    fn accepts(&self, sum: f64) -> bool {
        match self {
            RowSumCheck::Exact => sum == 1.0,
            RowSumCheck::Tolerance(tolerance) => (sum - 1.0).abs() <= *tolerance,
        }
    }

    fn check(&self, matrix_name: &'static str, matrix: &ProbMatrix) -> Result<(), RowSumError> {
        for (row_idx, row) in matrix.row_iter().enumerate() {
            let sum = row.sum_left();
            if !self.accepts(sum) {
                return Err(RowSumError {
                    matrix: matrix_name,
                    row: row_idx,
                    sum,
                });
            }
        }
        Ok(())
    }
}

/// A discrete Hidden Markov Model.
///
/// The model is read-only once built; every query allocates its own
/// dynamic programming matrices, so a model can be shared across threads.
#[derive(Clone, Debug)]
pub struct Model {
    /// The n x n state transition probabilities: p(state j at t+1 | state i at t)
    transition: ProbMatrix,
    /// The n x m emission probabilities: p(symbol j | state i)
    emission: ProbMatrix,
    /// The length n prior state distribution at time 0
    initial: Vec<f64>,
    state_labels: Vec<String>,
    emission_labels: Vec<String>,
}

#[derive(Default)]
pub struct ModelBuilder {
    transition: Vec<Vec<f64>>,
    emission: Vec<Vec<f64>>,
    initial: Option<Vec<f64>>,
    state_labels: Option<Vec<String>>,
    emission_labels: Option<Vec<String>>,
    row_sum_check: RowSumCheck,
}

impl ModelBuilder {
    pub fn new(transition: Vec<Vec<f64>>, emission: Vec<Vec<f64>>) -> Self {
        Self {
            transition,
            emission,
            ..Default::default()
        }
    }

    pub fn with_initial(mut self, initial: Vec<f64>) -> Self {
        self.initial = Some(initial);
        self
    }

    pub fn with_state_labels<S: AsRef<str>>(mut self, labels: &[S]) -> Self {
        self.state_labels = Some(labels.iter().map(|l| l.as_ref().to_string()).collect());
        self
    }

    pub fn with_emission_labels<S: AsRef<str>>(mut self, labels: &[S]) -> Self {
        self.emission_labels = Some(labels.iter().map(|l| l.as_ref().to_string()).collect());
        self
    }

    pub fn with_row_sum_check(mut self, row_sum_check: RowSumCheck) -> Self {
        self.row_sum_check = row_sum_check;
        self
    }

    pub fn build(self) -> anyhow::Result<Model> {
        let transition = ProbMatrix::from_rows(self.transition).map_err(|e| {
            ShapeError::RaggedRow {
                matrix: "transition",
                row: e.row,
                found: e.found,
                expected: e.expected,
            }
        })?;

        let emission = ProbMatrix::from_rows(self.emission).map_err(|e| ShapeError::RaggedRow {
            matrix: "emission",
            row: e.row,
            found: e.found,
            expected: e.expected,
        })?;

        let num_states = transition.rows;

        if num_states == 0 {
            return Err(ShapeError::NoStates.into());
        }

        if !transition.is_square() {
            return Err(ShapeError::TransitionNotSquare {
                rows: transition.rows,
                cols: transition.cols,
            }
            .into());
        }

        if emission.rows != num_states {
            return Err(ShapeError::EmissionRows {
                found: emission.rows,
                expected: num_states,
            }
            .into());
        }

        let initial = self
            .initial
            .unwrap_or_else(|| vec![1.0 / num_states as f64; num_states]);

        if initial.len() != num_states {
            return Err(ShapeError::InitialLength {
                found: initial.len(),
                expected: num_states,
            }
            .into());
        }

        self.row_sum_check
            .check("transition", &transition)
            .context("invalid transition matrix")?;

        self.row_sum_check
            .check("emission", &emission)
            .context("invalid emission matrix")?;

        let state_labels = self
            .state_labels
            .unwrap_or_else(|| lettered_labels(num_states));

        if state_labels.len() != num_states {
            return Err(ShapeError::StateLabels {
                found: state_labels.len(),
                expected: num_states,
            }
            .into());
        }

        let num_emissions = emission.cols;
        let emission_labels = self
            .emission_labels
            .unwrap_or_else(|| numbered_labels(num_emissions));

        if emission_labels.len() != num_emissions {
            return Err(ShapeError::EmissionLabels {
                found: emission_labels.len(),
                expected: num_emissions,
            }
            .into());
        }

        let initial_sum = initial.sum_left();
        if (initial_sum - 1.0).abs() > 1e-6 {
            // not rejected
            warn!("initial state vector sums to {initial_sum}");
        }

        debug!(
            "built model with {} states and {} emissions",
            num_states, num_emissions
        );

        Ok(Model {
            transition,
            emission,
            initial,
            state_labels,
            emission_labels,
        })
    }
}

impl Model {
    /// Build a model with a uniform initial state vector and default labels.
    pub fn new(transition: Vec<Vec<f64>>, emission: Vec<Vec<f64>>) -> anyhow::Result<Self> {
        ModelBuilder::new(transition, emission).build()
    }

    pub fn builder(transition: Vec<Vec<f64>>, emission: Vec<Vec<f64>>) -> ModelBuilder {
        ModelBuilder::new(transition, emission)
    }

    pub fn num_states(&self) -> usize {
        self.transition.rows
    }

    pub fn num_emissions(&self) -> usize {
        self.emission.cols
    }

    pub fn transition(&self) -> &ProbMatrix {
        &self.transition
    }

    pub fn emission(&self) -> &ProbMatrix {
        &self.emission
    }

    pub fn initial(&self) -> &[f64] {
        &self.initial
    }

    pub fn state_labels(&self) -> &[String] {
        &self.state_labels
    }

    pub fn emission_labels(&self) -> &[String] {
        &self.emission_labels
    }

    #[inline]
    pub fn transition_probability(&self, from_state: usize, to_state: usize) -> f64 {
        self.transition.get(from_state, to_state)
    }

    #[inline]
    pub fn emission_probability(&self, state: usize, emission: usize) -> f64 {
        self.emission.get(state, emission)
    }

    #[inline]
    pub fn initial_probability(&self, state: usize) -> f64 {
        self.initial[state]
    }

    /// Compute the T x n forward (alpha) matrix.
    pub fn forward(&self, observations: &Observations) -> anyhow::Result<ProbMatrix> {
        let seq = observations.resolve(&self.emission_labels)?;
        let mut alpha = ProbMatrix::new(seq.len(), self.num_states());
        forward(self, &seq, &mut alpha);
        Ok(alpha)
    }

    /// The total probability of the observations: the sum of the last forward row.
    pub fn forward_probability(&self, observations: &Observations) -> anyhow::Result<f64> {
        let alpha = self.forward(observations)?;
        Ok(alpha.last_row().map_or(0.0, |row| row.sum_left()))
    }

    /// Compute the T x n backward (beta) matrix and the beta-zero vector.
    pub fn backward(&self, observations: &Observations) -> anyhow::Result<BackwardResult> {
        let seq = observations.resolve(&self.emission_labels)?;
        let mut beta = ProbMatrix::new(seq.len(), self.num_states());
        let beta_zero = backward(self, &seq, &mut beta);
        Ok(BackwardResult { beta, beta_zero })
    }

    /// Compute the T x n matrix of posterior state probabilities.
    pub fn forward_backward(&self, observations: &Observations) -> anyhow::Result<ProbMatrix> {
        let seq = observations.resolve(&self.emission_labels)?;
        let num_states = self.num_states();

        let mut alpha = ProbMatrix::new(seq.len(), num_states);
        let mut beta = ProbMatrix::new(seq.len(), num_states);
        let mut gamma = ProbMatrix::new(seq.len(), num_states);

        forward(self, &seq, &mut alpha);
        backward(self, &seq, &mut beta);
        posterior(&alpha, &beta, &mut gamma);

        Ok(gamma)
    }

    /// Decode the most probable hidden state path, as state labels.
    pub fn viterbi(&self, observations: &Observations) -> anyhow::Result<Vec<String>> {
        let trace = self.viterbi_trace(observations)?;
        Ok(trace.labels(&self.state_labels))
    }

    /// Decode the most probable hidden state path, as state indices.
    pub fn viterbi_trace(&self, observations: &Observations) -> anyhow::Result<ViterbiTrace> {
        let seq = observations.resolve(&self.emission_labels)?;
        Ok(viterbi(self, &seq))
    }

    /// Draw a hidden state path and its emissions from the model.
    pub fn sample<R: Rng>(&self, length: usize, rng: &mut R) -> anyhow::Result<Sample> {
        sample(self, length, rng)
    }
}

impl Display for Model {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.render())
    }
}
