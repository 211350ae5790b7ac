pub mod model;
pub use model::{Model, ModelBuilder, RowSumCheck, RowSumError, ShapeError};

pub mod model_config;
pub use model_config::ModelConfig;

pub mod observations;
pub use observations::{
    EmissionIndexError, EmptySequenceError, Observations, UnknownEmissionLabelError,
};
