//! # MELTS Table Module
//!
//! ## Aim
//! Reading a single alphaMELTS table output file (a whitespace-separated
//! value file with a `Title:` line on top) into a structured `Table` with
//! named columns, and the in-place normalizations applied at read time:
//! dropping all-missing columns, zero-as-missing to NaN, Kelvin to Celsius
//! conversion of the Temperature column and derivation of the Mg# index
//! when both MgO and FeO are present.
//!
//! ## Main Data Structures and Logic
//! - `Table`: column names plus a dense `DMatrix<f64>` block, rows ordered
//!   by run step; NaN marks missing values. A `formula` column, when present
//!   in the source header, is carried as a parallel string vector.
//! - `TableError`: error taxonomy for a single table read. A missing file is
//!   an expected, recoverable condition for optional table kinds and gets its
//!   own variant so callers can tell it apart from a malformed file.
//! - `read_table_title`: extracts the `Title: ` line used for cross-file
//!   consistency checking.

use crate::Geochem::transform::mg_number;
use nalgebra::DMatrix;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Data rows of a MELTS table begin after this many skipped lines
/// (title line, blank line, table caption).
pub const DEFAULT_SKIPROWS: usize = 3;

/// error types for a single table read
#[derive(Debug, Error)]
pub enum TableError {
    #[error("Expected file {0} does not exist")]
    MissingFile(PathBuf),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Malformed table: {0}")]
    Malformed(String),
}

/// A parsed MELTS table: named columns over a dense f64 block with NaN as
/// the missing-value marker.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    pub columns: Vec<String>,
    pub data: DMatrix<f64>,
    /// Cells of a `formula` source column, one per row, if the header had one.
    pub formula: Option<Vec<String>>,
}

impl Default for Table {
    fn default() -> Self {
        Table::new()
    }
}

impl Table {
    pub fn new() -> Self {
        Table {
            columns: Vec::new(),
            data: DMatrix::zeros(0, 0),
            formula: None,
        }
    }

    /// Parse a header line plus data rows, all whitespace-separated.
    /// Blank lines are ignored; a cell that does not parse as a number
    /// becomes NaN, as does a cell missing from a short row. A `formula`
    /// column is diverted into the string vector instead of the matrix.
    pub fn parse(lines: &[&str]) -> Result<Table, TableError> {
        let lines: Vec<&str> = lines
            .iter()
            .copied()
            .filter(|l| !l.trim().is_empty())
            .collect();
        if lines.is_empty() {
            return Err(TableError::Malformed("no header line".to_string()));
        }
        let header: Vec<String> = lines[0].split_whitespace().map(str::to_string).collect();
        let formula_idx = header.iter().position(|c| c == "formula");
        let columns: Vec<String> = header
            .iter()
            .enumerate()
            .filter(|(i, _)| Some(*i) != formula_idx)
            .map(|(_, c)| c.clone())
            .collect();
        let ncols = columns.len();
        let nrows = lines.len() - 1;

        let mut flat: Vec<f64> = Vec::with_capacity(nrows * ncols);
        let mut formulas: Vec<String> = Vec::new();
        for line in &lines[1..] {
            let cells: Vec<&str> = line.split_whitespace().collect();
            for i in 0..header.len() {
                let cell = cells.get(i).copied();
                if Some(i) == formula_idx {
                    formulas.push(cell.unwrap_or("").to_string());
                } else {
                    flat.push(
                        cell.and_then(|c| c.parse::<f64>().ok())
                            .unwrap_or(f64::NAN),
                    );
                }
            }
        }
        Ok(Table {
            columns,
            data: DMatrix::from_row_slice(nrows, ncols, &flat),
            formula: formula_idx.map(|_| formulas),
        })
    }

    /// Read a table file, skipping `skiprows` leading lines before the
    /// column header.
    pub fn from_file(path: &Path, skiprows: usize) -> Result<Table, TableError> {
        if !path.is_file() {
            return Err(TableError::MissingFile(path.to_path_buf()));
        }
        let content = std::fs::read_to_string(path)?;
        let lines: Vec<&str> = content.lines().collect();
        if lines.len() <= skiprows {
            return Err(TableError::Malformed(format!(
                "file {} has no header after {} skipped rows",
                path.display(),
                skiprows
            )));
        }
        Table::parse(&lines[skiprows..])
    }

    pub fn nrows(&self) -> usize {
        self.data.nrows()
    }

    pub fn ncols(&self) -> usize {
        self.data.ncols()
    }

    pub fn is_empty(&self) -> bool {
        self.data.nrows() == 0 || self.data.ncols() == 0
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    /// Copy of a named column, top to bottom.
    pub fn column(&self, name: &str) -> Option<Vec<f64>> {
        let j = self.column_index(name)?;
        Some(self.data.column(j).iter().copied().collect())
    }

    /// Drop columns whose every cell is NaN. Zero-row tables keep their
    /// columns.
    pub fn drop_empty_columns(&mut self) {
        if self.data.nrows() == 0 {
            return;
        }
        let mut j = self.data.ncols();
        while j > 0 {
            j -= 1;
            if self.data.column(j).iter().all(|v| v.is_nan()) {
                let data = std::mem::replace(&mut self.data, DMatrix::zeros(0, 0));
                self.data = data.remove_column(j);
                self.columns.remove(j);
            }
        }
    }

    /// Numeric zero is the missing-value sentinel in MELTS composition
    /// columns; rewrite every zero cell to NaN.
    pub fn zero_to_nan(&mut self) {
        for v in self.data.iter_mut() {
            if *v == 0.0 {
                *v = f64::NAN;
            }
        }
    }

    /// Shift the Temperature column from Kelvin to Celsius in place.
    /// No-op when the column is absent.
    pub fn convert_temperature_to_celsius(&mut self) {
        if let Some(j) = self.column_index("Temperature") {
            for v in self.data.column_mut(j).iter_mut() {
                *v -= 273.15;
            }
        }
    }

    /// Append an `Mg#` column when both MgO and FeO are present.
    pub fn add_mg_number(&mut self) {
        let (Some(mg), Some(fe)) = (self.column_index("MgO"), self.column_index("FeO")) else {
            return;
        };
        let n = self.data.ncols();
        let mgno: Vec<f64> = (0..self.data.nrows())
            .map(|r| mg_number(self.data[(r, mg)], self.data[(r, fe)]))
            .collect();
        let data = std::mem::replace(&mut self.data, DMatrix::zeros(0, 0));
        let mut data = data.insert_column(n, f64::NAN);
        for (r, v) in mgno.iter().enumerate() {
            data[(r, n)] = *v;
        }
        self.data = data;
        self.columns.push("Mg#".to_string());
    }

    pub fn pretty_print(&self) {
        use prettytable::{Cell, Row, Table};
        let mut ptable = Table::new();
        let mut header: Vec<Cell> = self.columns.iter().map(|c| Cell::new(c)).collect();
        if self.formula.is_some() {
            header.push(Cell::new("formula"));
        }
        ptable.add_row(Row::new(header));
        for r in 0..self.data.nrows() {
            let mut cells: Vec<Cell> = (0..self.data.ncols())
                .map(|c| Cell::new(&format!("{:.4}", self.data[(r, c)])))
                .collect();
            if let Some(formulas) = &self.formula {
                cells.push(Cell::new(formulas.get(r).map(String::as_str).unwrap_or("")));
            }
            ptable.add_row(Row::new(cells));
        }
        ptable.printstd();
    }
}

/// Extract the experiment title from the first line of a table file,
/// stripping the `Title: ` prefix.
pub fn read_table_title(path: &Path) -> Result<String, TableError> {
    if !path.is_file() {
        return Err(TableError::MissingFile(path.to_path_buf()));
    }
    let file = File::open(path)?;
    let mut reader = BufReader::new(file);
    let mut first_line = String::new();
    reader.read_line(&mut first_line)?;
    Ok(first_line.replace("Title: ", "").trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn sample_lines() -> Vec<&'static str> {
        vec![
            "Pressure Temperature MgO FeO",
            "1000.0 1473.15 9.10 7.59",
            "1000.0 1453.15 8.50 7.80",
        ]
    }

    #[test]
    fn test_parse_basic() {
        let table = Table::parse(&sample_lines()).unwrap();
        assert_eq!(table.nrows(), 2);
        assert_eq!(table.columns, vec!["Pressure", "Temperature", "MgO", "FeO"]);
        assert_relative_eq!(table.column("MgO").unwrap()[1], 8.50);
        assert!(table.formula.is_none());
    }

    #[test]
    fn test_parse_short_row_gives_nan() {
        let lines = vec!["A B C", "1.0 2.0 3.0", "4.0 5.0"];
        let table = Table::parse(&lines).unwrap();
        assert!(table.data[(1, 2)].is_nan());
        assert_relative_eq!(table.data[(1, 1)], 5.0);
    }

    #[test]
    fn test_parse_no_header_is_error() {
        let lines: Vec<&str> = vec!["", "   "];
        assert!(Table::parse(&lines).is_err());
    }

    #[test]
    fn test_parse_formula_column() {
        let lines = vec![
            "Temperature mass formula",
            "1473.15 1.5 Fe''0.18Mg1.82SiO4",
            "1453.15 5.0 Fe''0.20Mg1.80SiO4",
        ];
        let table = Table::parse(&lines).unwrap();
        assert_eq!(table.columns, vec!["Temperature", "mass"]);
        let formulas = table.formula.as_ref().unwrap();
        assert_eq!(formulas.len(), 2);
        assert_eq!(formulas[0], "Fe''0.18Mg1.82SiO4");
    }

    #[test]
    fn test_drop_empty_columns() {
        let lines = vec!["A B C", "1.0 nan 3.0", "4.0 nan 6.0"];
        let mut table = Table::parse(&lines).unwrap();
        table.drop_empty_columns();
        assert_eq!(table.columns, vec!["A", "C"]);
        assert_eq!(table.ncols(), 2);
        assert_relative_eq!(table.data[(1, 1)], 6.0);
    }

    #[test]
    fn test_zero_to_nan() {
        let lines = vec!["MgO CaO", "0.0 12.45", "9.10 0.0"];
        let mut table = Table::parse(&lines).unwrap();
        table.zero_to_nan();
        assert!(table.data[(0, 0)].is_nan());
        assert!(table.data[(1, 1)].is_nan());
        assert_relative_eq!(table.data[(0, 1)], 12.45);
    }

    #[test]
    fn test_convert_temperature_to_celsius() {
        let mut table = Table::parse(&sample_lines()).unwrap();
        table.convert_temperature_to_celsius();
        let temp = table.column("Temperature").unwrap();
        assert_relative_eq!(temp[0], 1200.0, epsilon = 1e-9);
        assert_relative_eq!(temp[1], 1180.0, epsilon = 1e-9);
    }

    #[test]
    fn test_add_mg_number() {
        let mut table = Table::parse(&sample_lines()).unwrap();
        table.add_mg_number();
        assert!(table.has_column("Mg#"));
        let mgno = table.column("Mg#").unwrap();
        assert_relative_eq!(mgno[0], mg_number(9.10, 7.59), epsilon = 1e-12);
    }

    #[test]
    fn test_add_mg_number_requires_both_columns() {
        let lines = vec!["Pressure MgO", "1000.0 9.10"];
        let mut table = Table::parse(&lines).unwrap();
        table.add_mg_number();
        assert!(!table.has_column("Mg#"));
    }

    #[test]
    fn test_from_file_missing() {
        let result = Table::from_file(Path::new("no_such_table_file.txt"), DEFAULT_SKIPROWS);
        assert!(matches!(result, Err(TableError::MissingFile(_))));
    }

    #[test]
    fn test_from_file_with_skiprows_and_title() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(temp_file, "Title: Run 42").unwrap();
        writeln!(temp_file).unwrap();
        writeln!(temp_file, "Bulk composition:").unwrap();
        writeln!(temp_file, "Pressure Temperature MgO").unwrap();
        writeln!(temp_file, "1000.0 1473.15 9.10").unwrap();

        let table = Table::from_file(temp_file.path(), DEFAULT_SKIPROWS).unwrap();
        assert_eq!(table.columns, vec!["Pressure", "Temperature", "MgO"]);
        assert_eq!(table.nrows(), 1);

        let title = read_table_title(temp_file.path()).unwrap();
        assert_eq!(title, "Run 42");
    }
}
