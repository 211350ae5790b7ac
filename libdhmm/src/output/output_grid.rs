use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Align {
    Left,
    Right,
}

/// A table drawn with box borders, a header row and
/// a rule between every body row:
///
/// ```text
/// +-----+--------+
/// |     |      A |
/// +=====+========+
/// | t=1 | 0.2000 |
/// +-----+--------+
/// ```
#[derive(Debug, Default, Clone)]
pub struct GridTable {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
    alignments: Vec<Align>,
}

impl GridTable {
    pub fn new<S: AsRef<str>>(headers: &[S]) -> Self {
        Self {
            headers: headers.iter().map(|h| h.as_ref().to_string()).collect(),
            rows: vec![],
            alignments: vec![Align::Right; headers.len()],
        }
    }

    pub fn with_alignment(mut self, col: usize, align: Align) -> Self {
        self.alignments[col] = align;
        self
    }

    pub fn push_row(&mut self, row: Vec<String>) {
        debug_assert!(row.len() == self.headers.len());
        self.rows.push(row);
    }

    fn column_widths(&self) -> Vec<usize> {
        (0..self.headers.len())
            .map(|col| {
                self.rows
                    .iter()
                    .map(|row| row[col].chars().count())
                    .chain(std::iter::once(self.headers[col].chars().count()))
                    .max()
                    .unwrap_or(0)
            })
            .collect()
    }

    fn write_rule(f: &mut Formatter<'_>, widths: &[usize], fill: char) -> std::fmt::Result {
        write!(f, "+")?;
        for &width in widths {
            write!(f, "{}+", fill.to_string().repeat(width + 2))?;
        }
        writeln!(f)
    }

    fn write_cells(&self, f: &mut Formatter<'_>, widths: &[usize], cells: &[String]) -> std::fmt::Result {
        write!(f, "|")?;
        for ((cell, &width), align) in cells.iter().zip(widths).zip(&self.alignments) {
            match align {
                Align::Left => write!(f, " {:<w$} |", cell, w = width)?,
                Align::Right => write!(f, " {:>w$} |", cell, w = width)?,
            }
        }
        writeln!(f)
    }
}

impl Display for GridTable {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let widths = self.column_widths();

        Self::write_rule(f, &widths, '-')?;
        self.write_cells(f, &widths, &self.headers)?;
        Self::write_rule(f, &widths, '=')?;

        for row in &self.rows {
            self.write_cells(f, &widths, row)?;
            Self::write_rule(f, &widths, '-')?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert2::assert;

    #[test]
    fn test_grid_table() {
        let mut table = GridTable::new(&["", "A", "B"]).with_alignment(0, Align::Left);
        table.push_row(vec!["t=1".to_string(), "0.5".to_string(), "0.25".to_string()]);
        table.push_row(vec!["t=2".to_string(), "1".to_string(), "0".to_string()]);

        let expected = concat!(
            "+-----+-----+------+\n",
            "|     |   A |    B |\n",
            "+=====+=====+======+\n",
            "| t=1 | 0.5 | 0.25 |\n",
            "+-----+-----+------+\n",
            "| t=2 |   1 |    0 |\n",
            "+-----+-----+------+\n",
        );
        assert!(table.to_string() == expected);
    }
}
