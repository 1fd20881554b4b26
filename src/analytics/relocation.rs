//! Slot relocation suggestions
//!
//! Pairs the most-picked SKUs with the storage slots closest to the centroid
//! of all slot coordinates, most-picked SKU to closest slot.

use crate::stage::{StageError, StageResult};
use crate::table::{require_column, ColumnSynonyms, Table};
use pickwave_mining::frequency_ranking;
use serde::{Deserialize, Serialize};
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelocationSuggestion {
    pub sku: String,
    pub pick_count: u64,
    pub slot: String,
    pub distance_to_centroid: f64,
}

#[derive(Debug, Clone, PartialEq)]
struct Slot {
    id: String,
    x: f64,
    y: f64,
}

/// Storage slots with an id and both coordinates, ordered by distance to
/// their centroid (ascending, stable).
fn slots_by_centrality(storage: &Table, synonyms: &ColumnSynonyms) -> StageResult<Vec<(String, f64)>> {
    let slot_col = require_column(storage, "slot", &synonyms.slot)?;
    let x_col = require_column(storage, "x", &synonyms.x)?;
    let y_col = require_column(storage, "y", &synonyms.y)?;

    let slots: Vec<Slot> = storage
        .rows()
        .iter()
        .filter_map(|row| {
            Some(Slot {
                id: row.get(slot_col)?.as_key()?,
                x: row.get(x_col)?.as_f64().filter(|x| x.is_finite())?,
                y: row.get(y_col)?.as_f64().filter(|y| y.is_finite())?,
            })
        })
        .collect();
    if slots.is_empty() {
        return Ok(Vec::new());
    }

    let n = slots.len() as f64;
    let cx = slots.iter().map(|s| s.x).sum::<f64>() / n;
    let cy = slots.iter().map(|s| s.y).sum::<f64>() / n;
    debug!("Storage centroid at ({:.2}, {:.2}) over {} slots", cx, cy, slots.len());

    let mut ranked: Vec<(String, f64)> = slots
        .into_iter()
        .map(|s| {
            let d = ((s.x - cx).powi(2) + (s.y - cy).powi(2)).sqrt();
            (s.id, d)
        })
        .collect();
    ranked.sort_by(|a, b| a.1.total_cmp(&b.1));
    Ok(ranked)
}

/// Suggest moving the `top_skus` most-picked SKUs to the most central slots.
pub fn suggest_relocations(
    picking: &Table,
    storage: &Table,
    synonyms: &ColumnSynonyms,
    top_skus: usize,
) -> StageResult<Vec<RelocationSuggestion>> {
    if picking.is_empty() {
        return Err(StageError::EmptyInput(picking.name().to_string()));
    }
    if storage.is_empty() {
        return Err(StageError::EmptyInput(storage.name().to_string()));
    }
    let sku_col = require_column(picking, "sku", &synonyms.sku)?;
    let slots = slots_by_centrality(storage, synonyms)?;

    let hot_skus = frequency_ranking(picking.column_values(sku_col).filter_map(|v| v.as_key()));

    Ok(hot_skus
        .into_iter()
        .take(top_skus)
        .zip(slots)
        .map(|((sku, pick_count), (slot, distance_to_centroid))| RelocationSuggestion {
            sku,
            pick_count,
            slot,
            distance_to_centroid,
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::Value;

    fn storage() -> Table {
        // Centroid at (5, 5)
        Table::from_rows(
            "storage",
            ["Location", "X", "Y"],
            vec![
                vec![Value::from("EDGE"), Value::Integer(0), Value::Integer(0)],
                vec![Value::from("MID"), Value::Integer(5), Value::Integer(5)],
                vec![Value::from("FAR"), Value::Integer(10), Value::Integer(10)],
                vec![Value::from("NEAR"), Value::Float(6.0), Value::Float(5.0)],
                vec![Value::from("NEAR2"), Value::Float(4.0), Value::Float(5.0)],
                vec![Value::from("NOXY"), Value::Null, Value::Integer(5)],
            ],
        )
        .unwrap()
    }

    fn picking(skus: &[&str]) -> Table {
        let data = skus.iter().map(|s| vec![Value::from("W1"), Value::from(*s)]).collect();
        Table::from_rows("picking_wave", ["WaveNumber", "SKU"], data).unwrap()
    }

    #[test]
    fn test_hot_sku_gets_central_slot() {
        let suggestions = suggest_relocations(
            &picking(&["A", "B", "A", "C", "A", "B"]),
            &storage(),
            &ColumnSynonyms::default(),
            10,
        )
        .unwrap();

        assert_eq!(suggestions.len(), 3);
        assert_eq!(suggestions[0].sku, "A");
        assert_eq!(suggestions[0].pick_count, 3);
        assert_eq!(suggestions[0].slot, "MID");
        assert_eq!(suggestions[0].distance_to_centroid, 0.0);
        assert_eq!(suggestions[1].slot, "NEAR");
        assert_eq!(suggestions[2].sku, "C");
        assert_eq!(suggestions[2].slot, "NEAR2");
    }

    #[test]
    fn test_non_finite_coordinates_are_ignored() {
        let storage = Table::from_rows(
            "storage",
            ["Location", "X", "Y"],
            vec![
                vec![Value::from("L1"), Value::Integer(0), Value::Integer(0)],
                vec![Value::from("L2"), Value::Float(f64::INFINITY), Value::Integer(1)],
                vec![Value::from("L3"), Value::Integer(2), Value::Integer(2)],
                vec![Value::from("L4"), Value::Float(f64::NAN), Value::Integer(1)],
            ],
        )
        .unwrap();
        let suggestions =
            suggest_relocations(&picking(&["A", "A", "B"]), &storage, &ColumnSynonyms::default(), 10).unwrap();

        // Centroid of L1 and L3 is (1, 1)
        assert_eq!(suggestions.len(), 2);
        assert!(suggestions.iter().all(|s| s.slot == "L1" || s.slot == "L3"));
        assert!(suggestions.iter().all(|s| (s.distance_to_centroid - 2f64.sqrt()).abs() < 1e-12));
        assert_eq!(suggestions[0].sku, "A");
        assert_eq!(suggestions[0].slot, "L1");
    }

    #[test]
    fn test_limited_by_slots_and_top_n() {
        let skus: Vec<String> = (0..20).map(|i| format!("S{:02}", i)).collect();
        let refs: Vec<&str> = skus.iter().map(String::as_str).collect();
        let suggestions = suggest_relocations(&picking(&refs), &storage(), &ColumnSynonyms::default(), 2).unwrap();
        assert_eq!(suggestions.len(), 2);
    }

    #[test]
    fn test_missing_coordinates() {
        let table = Table::from_rows("storage", ["Location"], vec![vec![Value::from("L1")]]).unwrap();
        let err = suggest_relocations(&picking(&["A"]), &table, &ColumnSynonyms::default(), 10).unwrap_err();
        assert_eq!(err.kind(), "missing_column");
    }
}
