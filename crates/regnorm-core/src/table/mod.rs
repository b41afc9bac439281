// crates/regnorm-core/src/table/mod.rs

//! # Tables
//!
//! A small in-memory, row-ordered table used by the batch matcher and the
//! field attacher. Columns are addressed by name; cells are text, numbers or
//! missing.
//!
//! Anything else that can hand out a text column and accept a new one can
//! take part in batch matching by implementing [`Tabular`].

use crate::error::{RegionError, Result};
use crate::traits::Tabular;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

#[cfg(feature = "csv")]
mod csv_io;

#[cfg(feature = "csv")]
pub use csv_io::{read_csv, write_csv};

/// One table cell.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Cell {
    /// No value (`null`, an empty CSV field, a row with no match).
    #[default]
    Missing,
    Number(f64),
    Text(String),
}

impl Cell {
    /// Text view of the cell. Numbers render without a trailing `.0` when
    /// they are whole.
    pub fn as_text(&self) -> Option<String> {
        match self {
            Cell::Missing => None,
            Cell::Text(s) => Some(s.clone()),
            Cell::Number(n) => Some(format_number(*n)),
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Cell::Number(n) => Some(*n),
            Cell::Text(s) => s.trim().parse().ok(),
            Cell::Missing => None,
        }
    }
}

fn format_number(n: f64) -> String {
    if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        n.to_string()
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Missing => Ok(()),
            Cell::Text(s) => f.write_str(s),
            Cell::Number(n) => f.write_str(&format_number(*n)),
        }
    }
}

impl From<&str> for Cell {
    fn from(s: &str) -> Self {
        Cell::Text(s.to_string())
    }
}

impl From<String> for Cell {
    fn from(s: String) -> Self {
        Cell::Text(s)
    }
}

impl From<f64> for Cell {
    fn from(n: f64) -> Self {
        Cell::Number(n)
    }
}

impl<T: Into<Cell>> From<Option<T>> for Cell {
    fn from(value: Option<T>) -> Self {
        value.map_or(Cell::Missing, Into::into)
    }
}

/// A named-column, row-ordered table.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Vec<Cell>>,
}

impl Table {
    /// An empty table with the given header.
    pub fn new<S: Into<String>>(columns: impl IntoIterator<Item = S>) -> Result<Self> {
        Self::from_rows(columns, Vec::new())
    }

    /// Builds a table, checking that column names are unique and that every
    /// row has one cell per column.
    pub fn from_rows<S: Into<String>>(
        columns: impl IntoIterator<Item = S>,
        rows: Vec<Vec<Cell>>,
    ) -> Result<Self> {
        let columns: Vec<String> = columns.into_iter().map(Into::into).collect();
        let mut seen = HashSet::with_capacity(columns.len());
        if let Some(dup) = columns.iter().find(|c| !seen.insert(c.as_str())) {
            return Err(RegionError::InvalidData(format!("duplicate column '{dup}'")));
        }
        let mut table = Self {
            columns,
            rows: Vec::with_capacity(rows.len()),
        };
        for row in rows {
            table.push_row(row)?;
        }
        Ok(table)
    }

    /// One-column table, handy for matching a plain list of strings.
    pub fn from_column<V: Into<Cell>>(name: &str, values: impl IntoIterator<Item = V>) -> Self {
        Self {
            columns: vec![name.to_string()],
            rows: values.into_iter().map(|v| vec![v.into()]).collect(),
        }
    }

    pub fn push_row(&mut self, row: Vec<Cell>) -> Result<()> {
        if row.len() != self.columns.len() {
            return Err(RegionError::InvalidData(format!(
                "row {} has {} cells, expected {}",
                self.rows.len(),
                row.len(),
                self.columns.len()
            )));
        }
        self.rows.push(row);
        Ok(())
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Cells of `name`, in row order.
    pub fn column(&self, name: &str) -> Result<Vec<&Cell>> {
        let idx = self
            .column_index(name)
            .ok_or_else(|| RegionError::ColumnNotFound(name.to_string()))?;
        Ok(self.rows.iter().map(|row| &row[idx]).collect())
    }

    pub fn cell(&self, row: usize, column: &str) -> Option<&Cell> {
        let idx = self.column_index(column)?;
        self.rows.get(row).map(|r| &r[idx])
    }
}

impl Tabular for Table {
    fn row_count(&self) -> usize {
        self.rows.len()
    }

    fn text_column(&self, column: &str) -> Result<Vec<Option<String>>> {
        Ok(self.column(column)?.into_iter().map(Cell::as_text).collect())
    }

    fn with_column(mut self, name: &str, values: Vec<Cell>) -> Result<Self> {
        if values.len() != self.rows.len() {
            return Err(RegionError::InvalidData(format!(
                "column '{name}' has {} values for {} rows",
                values.len(),
                self.rows.len()
            )));
        }
        match self.column_index(name) {
            Some(idx) => {
                for (row, value) in self.rows.iter_mut().zip(values) {
                    row[idx] = value;
                }
            }
            None => {
                self.columns.push(name.to_string());
                for (row, value) in self.rows.iter_mut().zip(values) {
                    row.push(value);
                }
            }
        }
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Table {
        Table::from_rows(
            ["region", "value"],
            vec![
                vec!["Москва".into(), Cell::Number(1.0)],
                vec![Cell::Missing, Cell::Number(2.5)],
            ],
        )
        .unwrap()
    }

    #[test]
    fn rejects_ragged_rows() {
        let err = Table::from_rows(["a", "b"], vec![vec![Cell::from("x")]]).unwrap_err();
        assert!(matches!(err, RegionError::InvalidData(_)));
    }

    #[test]
    fn rejects_duplicate_columns() {
        assert!(Table::new(["a", "a"]).is_err());
    }

    #[test]
    fn text_column_maps_missing_to_none() {
        let t = sample();
        assert_eq!(
            t.text_column("region").unwrap(),
            vec![Some("Москва".to_string()), None]
        );
        assert_eq!(
            t.text_column("value").unwrap(),
            vec![Some("1".to_string()), Some("2.5".to_string())]
        );
        assert!(matches!(
            t.text_column("nope"),
            Err(RegionError::ColumnNotFound(_))
        ));
    }

    #[test]
    fn with_column_appends_then_replaces() {
        let t = sample()
            .with_column("ter", vec!["a".into(), Cell::Missing])
            .unwrap();
        assert_eq!(t.columns(), ["region", "value", "ter"]);

        let t = t.with_column("ter", vec!["b".into(), "c".into()]).unwrap();
        assert_eq!(t.columns().len(), 3);
        assert_eq!(t.cell(1, "ter"), Some(&Cell::from("c")));
        assert_eq!(t.cell(0, "region"), Some(&Cell::from("Москва")));
    }

    #[test]
    fn with_column_checks_length() {
        assert!(sample().with_column("x", vec![Cell::Missing]).is_err());
    }

    #[test]
    fn option_converts_to_cell() {
        assert_eq!(Cell::from(None::<String>), Cell::Missing);
        assert_eq!(Cell::from(Some("x")), Cell::Text("x".into()));
        assert_eq!(Cell::Number(3.0).to_string(), "3");
    }
}
