pub mod output_grid;
pub use output_grid::{Align, GridTable};

mod output_model;
