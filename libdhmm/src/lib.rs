//! Libdhmm models discrete Hidden Markov Models and answers two questions
//! about an observed emission sequence: how probable each hidden state is
//! at each time step (forward-backward), and which single state path is
//! most probable (Viterbi).
//!
//! ```
//! use libdhmm::demo;
//! use libdhmm::structs::Observations;
//!
//! let model = demo::gene().unwrap();
//! let seq = Observations::from_labels(&["A", "C", "G", "T", "G", "G", "C", "A"]);
//!
//! let posterior = model.forward_backward(&seq).unwrap();
//! assert!((posterior.get(0, 0) - 0.20246232).abs() < 1e-6);
//!
//! let path = model.viterbi(&seq).unwrap();
//! assert_eq!(path, vec!["NG", "NG", "G", "G", "G", "G", "NG", "NG"]);
//! ```
//!
//! All probabilities are kept in linear space, so very long
//! sequences will eventually underflow to zero.

pub mod demo;
pub mod infer;
pub mod output;
pub mod structs;
pub mod util;
