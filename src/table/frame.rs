//! In-memory tables

use super::value::Value;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// A row: column name to cell value, in column order
pub type Row = IndexMap<String, Value>;

/// Table errors
#[derive(Error, Debug)]
pub enum TableError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP {status} fetching {url}")]
    HttpStatus { url: String, status: u16 },

    #[error("Row {row} of {table} has {found} cells, expected {expected}")]
    RowWidth {
        table: String,
        row: usize,
        expected: usize,
        found: usize,
    },
}

pub type TableResult<T> = Result<T, TableError>;

/// The four warehouse extracts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TableKind {
    PickingWave,
    Product,
    Storage,
    Support,
}

impl TableKind {
    pub const ALL: [TableKind; 4] = [
        TableKind::PickingWave,
        TableKind::Product,
        TableKind::Storage,
        TableKind::Support,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TableKind::PickingWave => "picking_wave",
            TableKind::Product => "product",
            TableKind::Storage => "storage",
            TableKind::Support => "support",
        }
    }
}

impl fmt::Display for TableKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An ordered sequence of rows over a fixed, ordered column set
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    name: String,
    columns: Vec<String>,
    rows: Vec<Row>,
}

impl Table {
    pub fn new(name: impl Into<String>, columns: Vec<String>) -> Self {
        Self {
            name: name.into(),
            columns,
            rows: Vec::new(),
        }
    }

    /// A table with neither columns nor rows
    pub fn empty(name: impl Into<String>) -> Self {
        Self::new(name, Vec::new())
    }

    /// Build a table from positional rows.
    pub fn from_rows<C, S>(name: impl Into<String>, columns: C, rows: Vec<Vec<Value>>) -> TableResult<Self>
    where
        C: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut table = Self::new(name, columns.into_iter().map(Into::into).collect());
        for values in rows {
            table.push_row(values)?;
        }
        Ok(table)
    }

    /// Append a row given in column order.
    pub fn push_row(&mut self, values: Vec<Value>) -> TableResult<()> {
        if values.len() != self.columns.len() {
            return Err(TableError::RowWidth {
                table: self.name.clone(),
                row: self.rows.len(),
                expected: self.columns.len(),
                found: values.len(),
            });
        }
        let row: Row = self.columns.iter().cloned().zip(values).collect();
        self.rows.push(row);
        Ok(())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub(crate) fn rows_mut(&mut self) -> &mut [Row] {
        &mut self.rows
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn has_column(&self, column: &str) -> bool {
        self.columns.iter().any(|c| c == column)
    }

    /// Cell lookup; `None` when the row or column does not exist
    pub fn get(&self, row: usize, column: &str) -> Option<&Value> {
        self.rows.get(row).and_then(|r| r.get(column))
    }

    /// All cells of a column, in row order. Empty if the column is absent.
    pub fn column_values<'a>(&'a self, column: &'a str) -> impl Iterator<Item = &'a Value> + 'a {
        self.rows.iter().filter_map(move |r| r.get(column))
    }

    /// Numeric cells of a column, skipping nulls and non-numeric values
    pub fn numeric_values(&self, column: &str) -> Vec<f64> {
        self.column_values(column).filter_map(Value::as_f64).collect()
    }
}
