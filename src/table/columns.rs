//! Column synonyms
//!
//! Each logical field accepts an ordered list of header spellings. Matching
//! is case-sensitive and the first present spelling wins.

use super::frame::Table;
use crate::stage::{StageError, StageResult};
use serde::{Deserialize, Serialize};

fn names(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

/// Accepted header spellings per logical field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnSynonyms {
    pub sku: Vec<String>,
    pub wave: Vec<String>,
    pub category: Vec<String>,
    pub quantity: Vec<String>,
    pub capacity: Vec<String>,
    pub utilization: Vec<String>,
    pub slot: Vec<String>,
    pub x: Vec<String>,
    pub y: Vec<String>,
}

impl Default for ColumnSynonyms {
    fn default() -> Self {
        Self {
            sku: names(&["SKU", "reference", "Item", "sku"]),
            wave: names(&["WaveNumber", "Wave", "WaveID", "wave_id", "wave"]),
            category: names(&["Category"]),
            quantity: names(&["Quantity"]),
            capacity: names(&["Capacity"]),
            utilization: names(&["Utilization"]),
            slot: names(&["Location", "LocationID", "SlotID", "Slot", "StorageID"]),
            x: names(&["X", "x", "PosX"]),
            y: names(&["Y", "y", "PosY"]),
        }
    }
}

/// First candidate present in the table
pub fn resolve_column<'a>(table: &Table, candidates: &'a [String]) -> Option<&'a str> {
    candidates
        .iter()
        .find(|c| table.has_column(c))
        .map(String::as_str)
}

/// Like [`resolve_column`], but a miss is a `MissingColumn` stage error.
pub fn require_column<'a>(table: &Table, field: &str, candidates: &'a [String]) -> StageResult<&'a str> {
    resolve_column(table, candidates).ok_or_else(|| StageError::MissingColumn {
        table: table.name().to_string(),
        field: field.to_string(),
        candidates: candidates.to_vec(),
    })
}
