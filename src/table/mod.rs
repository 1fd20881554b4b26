//! Tabular input
//!
//! Tables are ordered rows of named scalar cells, loaded from CSV.

pub mod cleaning;
pub mod columns;
pub mod frame;
pub mod loader;
pub mod value;

pub use cleaning::{count_nulls, fill_numeric_nulls};
pub use columns::{require_column, resolve_column, ColumnSynonyms};
pub use frame::{Row, Table, TableError, TableKind, TableResult};
pub use loader::{load_table, parse_csv, TableSource};
pub use value::Value;
