use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
#[error("unknown emission label: {label}")]
pub struct UnknownEmissionLabelError {
    pub label: String,
}

#[derive(Error, Debug)]
#[error("emission index {index} is out of bounds for {num_emissions} emissions")]
pub struct EmissionIndexError {
    pub index: usize,
    pub num_emissions: usize,
}

#[derive(Error, Debug)]
#[error("observation sequence is empty")]
pub struct EmptySequenceError;

/// An observed emission sequence, given either as emission
/// indices or as emission labels. Mixed sequences can't be expressed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Observations {
    Indices(Vec<usize>),
    Labels(Vec<String>),
}

impl Observations {
    pub fn from_labels<S: AsRef<str>>(labels: &[S]) -> Self {
        Observations::Labels(labels.iter().map(|l| l.as_ref().to_string()).collect())
    }

    pub fn len(&self) -> usize {
        match self {
            Observations::Indices(indices) => indices.len(),
            Observations::Labels(labels) => labels.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Map the observations to emission indices.
    ///
    /// This fails on an empty sequence, on a label that isn't
    /// one of the emission labels, or on an out of bounds index.
    pub fn resolve(&self, emission_labels: &[String]) -> anyhow::Result<Vec<usize>> {
        if self.is_empty() {
            return Err(EmptySequenceError.into());
        }

        match self {
            Observations::Indices(indices) => {
                if let Some(&index) = indices.iter().find(|&&i| i >= emission_labels.len()) {
                    return Err(EmissionIndexError {
                        index,
                        num_emissions: emission_labels.len(),
                    }
                    .into());
                }
                Ok(indices.clone())
            }
            Observations::Labels(labels) => labels
                .iter()
                .map(|label| {
                    emission_labels
                        .iter()
                        .position(|l| l == label)
                        .ok_or_else(|| {
                            anyhow::Error::from(UnknownEmissionLabelError {
                                label: label.clone(),
                            })
                        })
                })
                .collect(),
        }
    }
}

impl From<Vec<usize>> for Observations {
    fn from(indices: Vec<usize>) -> Self {
        Observations::Indices(indices)
    }
}

impl From<&[usize]> for Observations {
    fn from(indices: &[usize]) -> Self {
        Observations::Indices(indices.to_vec())
    }
}

impl From<Vec<String>> for Observations {
    fn from(labels: Vec<String>) -> Self {
        Observations::Labels(labels)
    }
}

impl From<&[&str]> for Observations {
    fn from(labels: &[&str]) -> Self {
        Observations::from_labels(labels)
    }
}
