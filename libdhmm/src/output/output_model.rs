use crate::infer::structs::ProbMatrix;
use crate::output::{Align, GridTable};
use crate::structs::Model;

const PRECISION: usize = 6;

fn format_probability(value: f64) -> String {
    format!("{:.p$}", value, p = PRECISION)
}

/// Render each matrix row as a table row, with a "t=<row + 1>" row header.
fn matrix_table<S: AsRef<str>>(matrix: &ProbMatrix, headers: &[S]) -> GridTable {
    let mut all_headers = vec![" ".to_string()];
    all_headers.extend(headers.iter().map(|h| h.as_ref().to_string()));

    let mut table = GridTable::new(all_headers.as_slice()).with_alignment(0, Align::Left);
    for (row_idx, row) in matrix.row_iter().enumerate() {
        let mut cells = vec![format!("t={}", row_idx + 1)];
        cells.extend(row.iter().map(|&v| format_probability(v)));
        table.push_row(cells);
    }
    table
}

fn vector_table<S: AsRef<str>>(vector: &[f64], headers: &[S]) -> GridTable {
    let mut table = GridTable::new(headers);
    table.push_row(vector.iter().map(|&v| format_probability(v)).collect());
    table
}

impl Model {
    /// Render the transition, emission and initial state parameters.
    pub fn render(&self) -> String {
        format!(
            "Transition Matrix (A):\n{}\n\nEmission Matrix (B):\n{}\n\nInitial State Vector (pi_0):\n{}\n\n",
            matrix_table(self.transition(), self.state_labels()),
            matrix_table(self.emission(), self.emission_labels()),
            vector_table(self.initial(), self.state_labels()),
        )
    }

    /// Write the rendered model to stdout.
    pub fn print(&self) {
        print!("{}", self.render());
    }

    /// Render a T x n result matrix (alpha, beta or gamma) with the state labels as headers.
    pub fn render_matrix(&self, matrix: &ProbMatrix) -> String {
        matrix_table(matrix, self.state_labels()).to_string()
    }

    pub fn render_vector(&self, vector: &[f64]) -> String {
        vector_table(vector, self.state_labels()).to_string()
    }

    /// Render a state path as a single row, one column per time step.
    pub fn render_path<S: AsRef<str>>(&self, path: &[S]) -> String {
        let headers: Vec<String> = (1..=path.len()).map(|t| format!("t={t}")).collect();
        let mut table = GridTable::new(headers.as_slice());
        table.push_row(path.iter().map(|s| s.as_ref().to_string()).collect());
        table.to_string()
    }
}
