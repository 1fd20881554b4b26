//! Shared basket representation
//!
//! Provides a read-only, dense view of picking baskets for counting.

use std::collections::{BTreeMap, BTreeSet, HashMap};

/// Dense item index
pub type ItemIndex = usize;

/// A dense, integer-indexed view of baskets in Compressed Sparse Row (CSR) format.
///
/// Item indices follow lexicographic order of the item names, so comparing
/// two indices compares the names.
#[derive(Debug, Clone, Default)]
pub struct BasketView {
    /// Basket identifiers, ascending
    pub basket_ids: Vec<String>,
    /// Mapping from dense index back to item name
    pub index_to_item: Vec<String>,
    /// Mapping from item name to dense index
    pub item_to_index: HashMap<String, ItemIndex>,

    /// Offsets into `items`. Size = basket_count + 1
    pub offsets: Vec<usize>,
    /// Contiguous, per-basket sorted and deduplicated item indices
    pub items: Vec<ItemIndex>,
}

impl BasketView {
    /// Group `(basket_id, item)` pairs into baskets. Repeated items within a
    /// basket collapse to one.
    pub fn from_transactions<I, B, T>(transactions: I) -> Self
    where
        I: IntoIterator<Item = (B, T)>,
        B: Into<String>,
        T: Into<String>,
    {
        let mut grouped: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();
        for (basket, item) in transactions {
            grouped.entry(basket.into()).or_default().insert(item.into());
        }

        let vocabulary: BTreeSet<&String> = grouped.values().flatten().collect();
        let index_to_item: Vec<String> = vocabulary.into_iter().cloned().collect();
        let item_to_index: HashMap<String, ItemIndex> = index_to_item
            .iter()
            .enumerate()
            .map(|(idx, item)| (item.clone(), idx))
            .collect();

        let mut basket_ids = Vec::with_capacity(grouped.len());
        let mut offsets = Vec::with_capacity(grouped.len() + 1);
        let mut items = Vec::new();

        offsets.push(0);
        for (basket, members) in grouped {
            basket_ids.push(basket);
            // BTreeSet iteration is sorted, and indices follow name order
            items.extend(members.iter().map(|m| item_to_index[m]));
            offsets.push(items.len());
        }

        Self {
            basket_ids,
            index_to_item,
            item_to_index,
            offsets,
            items,
        }
    }

    /// Number of baskets
    pub fn basket_count(&self) -> usize {
        self.basket_ids.len()
    }

    /// Number of distinct items
    pub fn item_count(&self) -> usize {
        self.index_to_item.len()
    }

    /// Items of a basket (by index)
    pub fn basket(&self, idx: usize) -> &[ItemIndex] {
        let start = self.offsets[idx];
        let end = self.offsets[idx + 1];
        &self.items[start..end]
    }

    /// Item name for a dense index
    pub fn item_name(&self, idx: ItemIndex) -> &str {
        &self.index_to_item[idx]
    }

    pub fn is_empty(&self) -> bool {
        self.basket_ids.is_empty()
    }
}
