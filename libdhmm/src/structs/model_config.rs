use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::structs::{Model, RowSumCheck};

/// The JSON description of a model.
///
/// ```json
/// {
///   "transition": [[0.7, 0.3], [0.3, 0.7]],
///   "emission": [[0.1, 0.1, 0.4, 0.4], [0.3, 0.3, 0.2, 0.2]],
///   "states": ["G", "NG"],
///   "emissions": ["A", "C", "G", "T"]
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ModelConfig {
    pub transition: Vec<Vec<f64>>,
    pub emission: Vec<Vec<f64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub initial: Option<Vec<f64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub states: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emissions: Option<Vec<String>>,
    /// Accept matrix rows that sum to within this distance of 1.0
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub row_sum_tolerance: Option<f64>,
}

impl TryFrom<ModelConfig> for Model {
    type Error = anyhow::Error;

    fn try_from(config: ModelConfig) -> Result<Self, Self::Error> {
        let mut builder = Model::builder(config.transition, config.emission);

        if let Some(initial) = config.initial {
            builder = builder.with_initial(initial);
        }
        if let Some(states) = config.states {
            builder = builder.with_state_labels(states.as_slice());
        }
        if let Some(emissions) = config.emissions {
            builder = builder.with_emission_labels(emissions.as_slice());
        }
        if let Some(tolerance) = config.row_sum_tolerance {
            builder = builder.with_row_sum_check(RowSumCheck::Tolerance(tolerance));
        }

        builder.build()
    }
}

impl From<&Model> for ModelConfig {
    fn from(model: &Model) -> Self {
        ModelConfig {
            transition: model.transition().to_rows(),
            emission: model.emission().to_rows(),
            initial: Some(model.initial().to_vec()),
            states: Some(model.state_labels().to_vec()),
            emissions: Some(model.emission_labels().to_vec()),
            row_sum_tolerance: None,
        }
    }
}

impl Model {
    pub fn from_json_str(json: &str) -> anyhow::Result<Self> {
        let config: ModelConfig =
            serde_json::from_str(json).context("failed to parse model JSON")?;
        Model::try_from(config)
    }

    pub fn from_json_path<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let file = File::open(&path).context(format!(
            "failed to open model file: {}",
            path.as_ref().to_string_lossy()
        ))?;

        let config: ModelConfig = serde_json::from_reader(BufReader::new(file)).context(format!(
            "failed to parse model file: {}",
            path.as_ref().to_string_lossy()
        ))?;

        Model::try_from(config).context(format!(
            "invalid model in: {}",
            path.as_ref().to_string_lossy()
        ))
    }

    pub fn to_config(&self) -> ModelConfig {
        ModelConfig::from(self)
    }
}
