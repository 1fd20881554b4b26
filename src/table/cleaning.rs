//! Null handling for loaded tables

use super::frame::Table;
use super::value::Value;
use crate::schema::fingerprint::{infer_column_type, ColumnType};

/// Null cells in the table
pub fn count_nulls(table: &Table) -> usize {
    table
        .rows()
        .iter()
        .map(|row| row.values().filter(|v| v.is_null()).count())
        .sum()
}

/// Replace nulls with zero in integer and float columns. Text, boolean and
/// all-null columns are left untouched so identifiers keep their nulls.
///
/// Returns the number of cells filled.
pub fn fill_numeric_nulls(table: &mut Table) -> usize {
    let fills: Vec<(String, Value)> = table
        .columns()
        .iter()
        .filter_map(|c| match infer_column_type(table, c) {
            ColumnType::Integer => Some((c.clone(), Value::Integer(0))),
            ColumnType::Float => Some((c.clone(), Value::Float(0.0))),
            _ => None,
        })
        .collect();

    let mut filled = 0;
    for row in table.rows_mut() {
        for (column, zero) in &fills {
            if let Some(cell) = row.get_mut(column) {
                if cell.is_null() {
                    *cell = zero.clone();
                    filled += 1;
                }
            }
        }
    }
    filled
}
