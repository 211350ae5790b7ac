//! Small reference models with known posteriors and Viterbi paths.

use crate::structs::Model;

pub const NCSA_SEQUENCE: [&str; 3] = ["PS", "SI", "PS"];
pub const GENE_SEQUENCE: [&str; 8] = ["A", "C", "G", "T", "G", "G", "C", "A"];
pub const ROCHESTER_SEQUENCE: [&str; 4] = ["R", "W", "B", "B"];

/// A three state chain that moves strictly forward, with deterministic emissions.
pub fn ncsa() -> anyhow::Result<Model> {
    Model::builder(
        vec![
            vec![0.25, 0.75, 0.00],
            vec![0.00, 0.25, 0.75],
            vec![0.00, 0.00, 1.00],
        ],
        vec![vec![1.0, 0.0], vec![0.0, 1.0], vec![1.0, 0.0]],
    )
    .with_state_labels(&["NA", "AP", "AC"])
    .with_emission_labels(&["PS", "SI"])
    .build()
}

/// Gene (G) and non-gene (NG) regions over a DNA alphabet.
pub fn gene() -> anyhow::Result<Model> {
    Model::builder(
        vec![vec![0.70, 0.30], vec![0.30, 0.70]],
        vec![vec![0.1, 0.1, 0.4, 0.4], vec![0.3, 0.3, 0.2, 0.2]],
    )
    .with_state_labels(&["G", "NG"])
    .with_emission_labels(&["A", "C", "G", "T"])
    .build()
}

/// Two states over red, white and blue, with a non-uniform prior.
pub fn rochester() -> anyhow::Result<Model> {
    Model::builder(
        vec![vec![0.60, 0.40], vec![0.30, 0.70]],
        vec![vec![0.3, 0.4, 0.3], vec![0.4, 0.3, 0.3]],
    )
    .with_initial(vec![0.8, 0.2])
    .with_state_labels(&["S1", "S2"])
    .with_emission_labels(&["R", "W", "B"])
    .build()
}
