//! Plain-text tables for listing products and bids.

use std::fmt;

/// A grid of text cells rendered with padded, pipe-separated columns.
#[derive(Debug, Clone, Default)]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    /// Start a table with the given column headers
    pub fn new<I: IntoIterator<Item = S>, S: Into<String>>(headers: I) -> Self {
        Self {
            headers: headers.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    /// Append a row. Missing cells render empty; extra cells are dropped.
    pub fn row<I: IntoIterator<Item = S>, S: Into<String>>(&mut self, cells: I) -> &mut Self {
        let mut cells = cells
            .into_iter()
            .map(Into::into)
            .take(self.headers.len())
            .collect::<Vec<String>>();
        cells.resize(self.headers.len(), String::new());
        self.rows.push(cells);
        self
    }

    /// Number of data rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether there are no data rows
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    fn widths(&self) -> Vec<usize> {
        let mut widths = self
            .headers
            .iter()
            .map(|h| h.chars().count())
            .collect::<Vec<_>>();
        for row in &self.rows {
            for (width, cell) in widths.iter_mut().zip(row) {
                *width = (*width).max(cell.chars().count());
            }
        }
        widths
    }
}

fn write_row(f: &mut fmt::Formatter<'_>, cells: &[String], widths: &[usize]) -> fmt::Result {
    for (cell, width) in cells.iter().zip(widths) {
        write!(f, " | {cell:<width$}")?;
    }
    writeln!(f, " | ")
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let widths = self.widths();
        let divider = widths.iter().map(|w| w + 3).sum::<usize>().saturating_sub(1);

        write_row(f, &self.headers, &widths)?;
        writeln!(f, " |{}| ", "-".repeat(divider))?;
        for row in &self.rows {
            write_row(f, row, &widths)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render() {
        let mut table = Table::new(["Item #", "Description"]);
        table.row(["1", "Wide fit"]).row(["2", "Best dress ever"]);

        let expected = concat!(
            " | Item # | Description     | \n",
            " |--------------------------| \n",
            " | 1      | Wide fit        | \n",
            " | 2      | Best dress ever | \n",
        );
        assert_eq!(table.to_string(), expected);
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_ragged_rows() {
        let mut table = Table::new(["A", "B"]);
        table.row(["only"]).row(["x", "y", "dropped"]);
        let rendered = table.to_string();
        assert!(rendered.contains(" | only |   | "));
        assert!(!rendered.contains("dropped"));
    }
}
