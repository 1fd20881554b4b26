//! Data summary and input validation

use crate::table::{resolve_column, ColumnSynonyms, Table, TableKind};
use indexmap::IndexMap;
use rustc_hash::FxHashSet;
use serde::Serialize;

/// Headline figures over the four tables
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DataSummary {
    pub total_orders: usize,
    pub unique_skus: Option<usize>,
    pub storage_locations: usize,
    pub support_points: usize,
    pub avg_pick_quantity: Option<f64>,
    pub max_storage_capacity: Option<f64>,
    pub avg_storage_utilization: Option<f64>,
}

/// Missing expected columns and null counts per table
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Validation {
    pub missing_columns: IndexMap<String, Vec<String>>,
    /// Counted before numeric null-filling; absent for empty tables
    pub null_cells_found: IndexMap<String, Option<usize>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ValidationFlags {
    pub data_complete: bool,
    pub optimization_success: bool,
    pub slotting_success: bool,
}

/// Columns each extract is expected to carry
pub fn expected_columns(kind: TableKind) -> &'static [&'static str] {
    match kind {
        TableKind::PickingWave => &["SKU", "Quantity"],
        TableKind::Product => &["Category", "SKU"],
        TableKind::Storage => &["Capacity", "Utilization"],
        TableKind::Support => &["PointID"],
    }
}

fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }
}

fn column_mean(table: &Table, candidates: &[String]) -> Option<f64> {
    resolve_column(table, candidates).and_then(|c| mean(&table.numeric_values(c)))
}

pub fn summarize(
    picking: &Table,
    storage: &Table,
    support: &Table,
    synonyms: &ColumnSynonyms,
) -> DataSummary {
    let unique_skus = resolve_column(picking, &synonyms.sku).map(|c| {
        picking
            .column_values(c)
            .filter_map(|v| v.as_key())
            .collect::<FxHashSet<_>>()
            .len()
    });

    let max_storage_capacity = resolve_column(storage, &synonyms.capacity).and_then(|c| {
        storage
            .numeric_values(c)
            .into_iter()
            .fold(None, |acc: Option<f64>, v| Some(acc.map_or(v, |m| m.max(v))))
    });

    DataSummary {
        total_orders: picking.len(),
        unique_skus,
        storage_locations: storage.len(),
        support_points: support.len(),
        avg_pick_quantity: column_mean(picking, &synonyms.quantity),
        max_storage_capacity,
        avg_storage_utilization: column_mean(storage, &synonyms.utilization),
    }
}

/// Build the validation block. `null_counts` come from the tables as loaded.
pub fn validate(tables: &[(TableKind, &Table)], null_counts: &IndexMap<String, usize>) -> Validation {
    let mut missing_columns = IndexMap::new();
    let mut null_cells_found = IndexMap::new();

    for (kind, table) in tables {
        let missing: Vec<String> = expected_columns(*kind)
            .iter()
            .filter(|c| !table.has_column(c))
            .map(|c| c.to_string())
            .collect();
        missing_columns.insert(kind.as_str().to_string(), missing);

        let nulls = if table.is_empty() {
            None
        } else {
            Some(null_counts.get(kind.as_str()).copied().unwrap_or(0))
        };
        null_cells_found.insert(kind.as_str().to_string(), nulls);
    }

    Validation {
        missing_columns,
        null_cells_found,
    }
}
