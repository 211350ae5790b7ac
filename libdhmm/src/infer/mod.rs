pub mod structs;

mod forward;
pub use forward::forward;

mod backward;
pub use backward::{backward, BackwardResult};

mod posterior;
pub use posterior::posterior;

mod viterbi;
pub use viterbi::viterbi;

mod sample;
pub use sample::{sample, Sample};
