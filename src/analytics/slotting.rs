//! Frequency-based slotting sample
//!
//! Counts product rows per category and keeps the largest categories.

use crate::stage::{StageError, StageResult};
use crate::table::{require_column, ColumnSynonyms, Table};
use pickwave_mining::top_k_by_count;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// SKU rows in one category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryCount {
    pub category: String,
    pub sku_count: u64,
}

/// Group product rows by category and keep the `top_n` largest groups.
///
/// Every row with a non-null SKU counts, so repeated SKUs count again.
/// Groups are formed in ascending category order and ties keep that order.
pub fn aggregate_slotting(
    product: &Table,
    synonyms: &ColumnSynonyms,
    top_n: usize,
) -> StageResult<Vec<CategoryCount>> {
    if product.is_empty() {
        return Err(StageError::EmptyInput(product.name().to_string()));
    }
    let category_col = require_column(product, "category", &synonyms.category)?;
    let sku_col = require_column(product, "sku", &synonyms.sku)?;

    let mut groups: BTreeMap<String, u64> = BTreeMap::new();
    for row in product.rows() {
        let Some(category) = row.get(category_col).and_then(|v| v.as_key()) else {
            continue;
        };
        let count = groups.entry(category).or_insert(0);
        if row.get(sku_col).is_some_and(|v| !v.is_null()) {
            *count += 1;
        }
    }

    Ok(top_k_by_count(groups.into_iter().collect(), top_n)
        .into_iter()
        .map(|(category, sku_count)| CategoryCount { category, sku_count })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::Value;

    fn product(rows: &[(&str, Option<&str>)]) -> Table {
        let data = rows
            .iter()
            .map(|(cat, sku)| vec![Value::from(*cat), Value::from(sku.map(str::to_string))])
            .collect();
        Table::from_rows("product", ["Category", "SKU"], data).unwrap()
    }

    #[test]
    fn test_top_categories() {
        let table = product(&[
            ("Frozen", Some("F1")),
            ("Dry", Some("D1")),
            ("Frozen", Some("F2")),
            ("Frozen", Some("F2")),
            ("Dry", None),
            ("Chilled", Some("C1")),
        ]);
        let sample = aggregate_slotting(&table, &ColumnSynonyms::default(), 5).unwrap();
        assert_eq!(
            sample,
            vec![
                CategoryCount { category: "Frozen".to_string(), sku_count: 3 },
                CategoryCount { category: "Chilled".to_string(), sku_count: 1 },
                CategoryCount { category: "Dry".to_string(), sku_count: 1 },
            ]
        );
    }

    #[test]
    fn test_limited_to_top_n() {
        let rows: Vec<(String, Option<&str>)> = (0..8).map(|i| (format!("Cat{}", i), Some("S"))).collect();
        let rows: Vec<(&str, Option<&str>)> = rows.iter().map(|(c, s)| (c.as_str(), *s)).collect();
        let sample = aggregate_slotting(&product(&rows), &ColumnSynonyms::default(), 5).unwrap();
        assert_eq!(sample.len(), 5);
        assert_eq!(sample[0].category, "Cat0");
    }

    #[test]
    fn test_missing_category_column() {
        let table = Table::from_rows("product", ["SKU"], vec![vec![Value::from("A")]]).unwrap();
        let err = aggregate_slotting(&table, &ColumnSynonyms::default(), 5).unwrap_err();
        assert_eq!(err.kind(), "missing_column");
    }

    #[test]
    fn test_empty_product() {
        let table = Table::new("product", vec!["Category".to_string(), "SKU".to_string()]);
        let err = aggregate_slotting(&table, &ColumnSynonyms::default(), 5).unwrap_err();
        assert_eq!(err, StageError::EmptyInput("product".to_string()));
    }
}
