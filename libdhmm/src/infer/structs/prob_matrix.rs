use std::fmt::{Debug, Formatter};
use std::ops::{Index, IndexMut};

use serde::{Serialize, Serializer};
use thiserror::Error;

#[derive(Error, Debug)]
#[error("row {row} has {found} columns, expected {expected}")]
pub struct RaggedRowError {
    pub row: usize,
    pub found: usize,
    pub expected: usize,
}

/// A dense matrix of probabilities.
#[derive(Default, Clone, PartialEq)]
pub struct ProbMatrix {
    pub rows: usize,
    pub cols: usize,
    /// The matrix cells as a flat vector.
    ///
    /// It's stored in row-major order:
    ///
    /// ```text
    /// [
    ///
    ///     p_(0, 0), p_(0, 1), ..., p_(0, C),
    ///     ...
    ///     p_(R, 0), p_(R, 1), ..., p_(R, C)
    ///
    /// ]
    /// ```
    ///
    /// where:
    ///
    /// ```text
    /// R:        <rows> - 1
    /// C:        <cols> - 1
    /// p_(i, j): the probability at cell (i, j)
    /// ```
    ///
    pub data: Vec<f64>,
}

impl ProbMatrix {
    pub fn new(rows: usize, cols: usize) -> Self {
        ProbMatrix {
            rows,
            cols,
            data: vec![0.0; rows * cols],
        }
    }

    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self, RaggedRowError> {
        let num_cols = rows.first().map_or(0, |row| row.len());
        let mut data: Vec<f64> = Vec::with_capacity(rows.len() * num_cols);

        for (row_idx, row) in rows.iter().enumerate() {
            if row.len() != num_cols {
                return Err(RaggedRowError {
                    row: row_idx,
                    found: row.len(),
                    expected: num_cols,
                });
            }
            data.extend_from_slice(row);
        }

        Ok(ProbMatrix {
            rows: rows.len(),
            cols: num_cols,
            data,
        })
    }

    #[inline]
    pub fn get(&self, row: usize, col: usize) -> f64 {
        debug_assert!(row < self.rows);
        debug_assert!(col < self.cols);
        self.data[row * self.cols + col]
    }

    #[inline]
    pub fn set(&mut self, row: usize, col: usize, value: f64) {
        debug_assert!(row < self.rows);
        debug_assert!(col < self.cols);
        self.data[row * self.cols + col] = value;
    }

    #[inline]
    pub fn row(&self, row: usize) -> &[f64] {
        &self.data[row * self.cols..(row + 1) * self.cols]
    }

    pub fn row_iter(&self) -> impl Iterator<Item = &[f64]> {
        // chunks() panics on a zero chunk size
        self.data.chunks(self.cols.max(1)).take(self.rows)
    }

    pub fn last_row(&self) -> Option<&[f64]> {
        match self.rows {
            0 => None,
            rows => Some(self.row(rows - 1)),
        }
    }

    pub fn is_square(&self) -> bool {
        self.rows == self.cols
    }

    pub fn to_rows(&self) -> Vec<Vec<f64>> {
        self.row_iter().map(|row| row.to_vec()).collect()
    }
}

impl Index<(usize, usize)> for ProbMatrix {
    type Output = f64;

    fn index(&self, (row, col): (usize, usize)) -> &Self::Output {
        &self.data[row * self.cols + col]
    }
}

impl IndexMut<(usize, usize)> for ProbMatrix {
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut Self::Output {
        &mut self.data[row * self.cols + col]
    }
}

impl Serialize for ProbMatrix {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.row_iter())
    }
}

impl Debug for ProbMatrix {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let precision = 6;
        for row in self.row_iter() {
            for value in row {
                write!(f, "{:>12.p$} ", value, p = precision)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert2::{assert, let_assert};

    #[test]
    fn test_prob_matrix_flat() {
        let mut matrix = ProbMatrix::new(3, 4);

        (0..3).for_each(|row| {
            (0..4).for_each(|col| {
                matrix.set(row, col, (row * 10 + col) as f64 / 100.0);
            });
        });

        (0..3).for_each(|row| {
            (0..4).for_each(|col| {
                assert!(matrix.get(row, col) == (row * 10 + col) as f64 / 100.0);
                assert!(matrix[(row, col)] == matrix.get(row, col));
            });
        });

        assert!(matrix.row(1) == [0.10, 0.11, 0.12, 0.13]);
        assert!(matrix.last_row() == Some(&[0.20, 0.21, 0.22, 0.23][..]));
        assert!(matrix.row_iter().count() == 3);
    }

    #[test]
    fn test_from_rows() -> anyhow::Result<()> {
        let matrix = ProbMatrix::from_rows(vec![vec![0.5, 0.5], vec![0.1, 0.9]])?;
        assert!(matrix.rows == 2);
        assert!(matrix.cols == 2);
        assert!(matrix.is_square());
        assert!(matrix.to_rows() == vec![vec![0.5, 0.5], vec![0.1, 0.9]]);
        Ok(())
    }

    #[test]
    fn test_from_rows_ragged() {
        let_assert!(Err(err) = ProbMatrix::from_rows(vec![vec![0.5, 0.5], vec![1.0]]));
        assert!(err.row == 1);
        assert!(err.found == 1);
        assert!(err.expected == 2);
    }

    #[test]
    fn test_empty_matrix() {
        let matrix = ProbMatrix::new(0, 3);
        assert!(matrix.last_row() == None);
        assert!(matrix.row_iter().count() == 0);
    }

    #[test]
    fn test_serialize_as_nested_rows() -> anyhow::Result<()> {
        let matrix = ProbMatrix::from_rows(vec![vec![1.0, 0.0], vec![0.25, 0.75]])?;
        let json = serde_json::to_string(&matrix)?;
        assert!(json == "[[1.0,0.0],[0.25,0.75]]");
        Ok(())
    }
}
