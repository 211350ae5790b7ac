mod prob_matrix;
pub use prob_matrix::{ProbMatrix, RaggedRowError};

mod trace;
pub use trace::ViterbiTrace;
