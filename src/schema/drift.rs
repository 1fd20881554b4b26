//! Drift detection against the previous run's fingerprint

use super::fingerprint::{SchemaFingerprint, TableFingerprint};
use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value as JsonValue;
use tracing::debug;

/// Column-level difference for a drifted table
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DriftDetail {
    pub added_columns: Vec<String>,
    pub removed_columns: Vec<String>,
}

/// Per-table drift flags
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DriftReport {
    /// True iff both hashes exist and differ
    pub changed: IndexMap<String, bool>,
    /// Only for changed tables
    pub detail: IndexMap<String, DriftDetail>,
}

impl DriftReport {
    pub fn any_changed(&self) -> bool {
        self.changed.values().any(|&c| c)
    }

    pub fn changed_tables(&self) -> Vec<&str> {
        self.changed
            .iter()
            .filter(|&(_, &c)| c)
            .map(|(name, _)| name.as_str())
            .collect()
    }
}

/// Extract the persisted fingerprint from a previous output document.
///
/// Entries that do not parse are skipped; a document without a
/// `schema_fingerprint` object yields an empty map.
pub fn previous_fingerprint(document: &JsonValue) -> SchemaFingerprint {
    let Some(entries) = document.get("schema_fingerprint").and_then(JsonValue::as_object) else {
        return SchemaFingerprint::new();
    };

    entries
        .iter()
        .filter_map(|(table, entry)| match serde_json::from_value::<TableFingerprint>(entry.clone()) {
            Ok(fp) => Some((table.clone(), fp)),
            Err(e) => {
                debug!("Ignoring unreadable fingerprint for {}: {}", table, e);
                None
            }
        })
        .collect()
}

/// Compare current fingerprints with the previous run's.
///
/// Every current table gets a flag. Without a previous fingerprint, or when
/// either side lacks a hash, the flag is `false`.
pub fn detect_drift(current: &SchemaFingerprint, previous: Option<&SchemaFingerprint>) -> DriftReport {
    let mut report = DriftReport::default();

    for (table, now) in current {
        let before = previous.and_then(|p| p.get(table));
        let changed = match (now.hash.as_deref(), before.and_then(|b| b.hash.as_deref())) {
            (Some(a), Some(b)) => a != b,
            _ => false,
        };
        report.changed.insert(table.clone(), changed);

        if let (true, Some(before)) = (changed, before) {
            report.detail.insert(
                table.clone(),
                DriftDetail {
                    added_columns: now
                        .columns
                        .iter()
                        .filter(|c| !before.columns.contains(c))
                        .cloned()
                        .collect(),
                    removed_columns: before
                        .columns
                        .iter()
                        .filter(|c| !now.columns.contains(c))
                        .cloned()
                        .collect(),
                },
            );
        }
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn fp(columns: &[&str], hash: Option<&str>) -> TableFingerprint {
        TableFingerprint {
            columns: columns.iter().map(|c| c.to_string()).collect(),
            types: Vec::new(),
            hash: hash.map(str::to_string),
        }
    }

    #[test]
    fn test_no_previous_means_no_drift() {
        let mut current = SchemaFingerprint::new();
        current.insert("product".to_string(), fp(&["SKU"], Some("aaa")));

        let report = detect_drift(&current, None);
        assert_eq!(report.changed.get("product"), Some(&false));
        assert!(!report.any_changed());
    }

    #[test]
    fn test_changed_hash_flags_table() {
        let mut current = SchemaFingerprint::new();
        current.insert("product".to_string(), fp(&["SKU", "Category", "Weight"], Some("new")));
        current.insert("storage".to_string(), fp(&["Location"], Some("same")));
        current.insert("support".to_string(), fp(&["PointID"], None));

        let mut previous = SchemaFingerprint::new();
        previous.insert("product".to_string(), fp(&["SKU", "Category", "Zone"], Some("old")));
        previous.insert("storage".to_string(), fp(&["Location"], Some("same")));
        previous.insert("support".to_string(), fp(&["PointID"], Some("whatever")));

        let report = detect_drift(&current, Some(&previous));
        assert_eq!(report.changed_tables(), vec!["product"]);
        assert_eq!(report.changed["support"], false);

        let detail = &report.detail["product"];
        assert_eq!(detail.added_columns, vec!["Weight"]);
        assert_eq!(detail.removed_columns, vec!["Zone"]);
    }

    #[test]
    fn test_previous_fingerprint_parsing() {
        let doc = json!({
            "schema_fingerprint": {
                "product": { "columns": ["SKU"], "hash": "abc" },
                "storage": { "columns": [], "hash": null },
                "support": "garbage"
            }
        });
        let parsed = previous_fingerprint(&doc);
        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed["product"].hash.as_deref(), Some("abc"));
        assert!(parsed["storage"].hash.is_none());

        assert!(previous_fingerprint(&json!({ "status": "Success" })).is_empty());
    }
}
