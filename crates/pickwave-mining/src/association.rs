//! Co-occurrence counting and pairwise association rules
//!
//! For baskets B, item counts n(a) and pair counts n(a,b):
//! support = n(a,b)/|B|, confidence(a→b) = n(a,b)/n(a),
//! lift = support / (n(a)/|B| · n(b)/|B|).

use super::common::{BasketView, ItemIndex};
use rustc_hash::FxHashMap;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Item and unordered-pair basket counts
#[derive(Debug, Clone, Default)]
pub struct CoOccurrence {
    /// Number of baskets
    pub baskets: u64,
    /// Baskets containing each item, by dense index
    pub items: Vec<u64>,
    /// Baskets containing each pair, keyed `(lo, hi)` with `lo < hi`
    pub pairs: FxHashMap<(ItemIndex, ItemIndex), u64>,
}

impl CoOccurrence {
    pub fn item(&self, idx: ItemIndex) -> u64 {
        self.items.get(idx).copied().unwrap_or(0)
    }

    /// Pair count, in either argument order
    pub fn pair(&self, a: ItemIndex, b: ItemIndex) -> u64 {
        let key = if a < b { (a, b) } else { (b, a) };
        self.pairs.get(&key).copied().unwrap_or(0)
    }
}

/// Thresholds for keeping a rule
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RuleConfig {
    /// Pair count must be strictly greater than this
    pub min_pair_count: u64,
    /// Confidence must be strictly greater than this
    pub min_confidence: f64,
    /// Lift must be strictly greater than this
    pub min_lift: f64,
    /// Maximum number of rules returned
    pub max_rules: usize,
}

impl Default for RuleConfig {
    fn default() -> Self {
        Self {
            min_pair_count: 5,
            min_confidence: 0.05,
            min_lift: 1.1,
            max_rules: 50,
        }
    }
}

/// A pairwise rule `antecedent → consequent`
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AssociationRule {
    pub antecedent: String,
    pub consequent: String,
    pub support: f64,
    pub confidence: f64,
    pub lift: f64,
    pub count: u64,
}

/// Count items and unordered pairs over all baskets.
///
/// Baskets with fewer than two items add no pairs.
pub fn count_items_and_pairs(view: &BasketView) -> CoOccurrence {
    let mut items = vec![0u64; view.item_count()];
    let mut pairs: FxHashMap<(ItemIndex, ItemIndex), u64> = FxHashMap::default();

    for b in 0..view.basket_count() {
        let basket = view.basket(b);
        for &item in basket {
            items[item] += 1;
        }
        if basket.len() < 2 {
            continue;
        }
        // Basket indices are sorted, so (basket[i], basket[j]) is already canonical
        for i in 0..basket.len() {
            for j in (i + 1)..basket.len() {
                *pairs.entry((basket[i], basket[j])).or_insert(0) += 1;
            }
        }
    }

    CoOccurrence {
        baskets: view.basket_count() as u64,
        items,
        pairs,
    }
}

/// Score every pair whose count exceeds `min_pair_count`, without applying
/// the confidence or lift thresholds.
///
/// Rules run from the lexicographically smaller item to the larger one and
/// are returned in canonical pair order.
pub fn candidate_rules(
    view: &BasketView,
    counts: &CoOccurrence,
    min_pair_count: u64,
) -> Vec<AssociationRule> {
    if counts.baskets == 0 {
        return Vec::new();
    }
    let total = counts.baskets as f64;

    let mut keys: Vec<(ItemIndex, ItemIndex)> = counts
        .pairs
        .iter()
        .filter(|&(_, &n)| n > min_pair_count)
        .map(|(&key, _)| key)
        .collect();
    keys.sort_unstable();

    keys.into_iter()
        .filter_map(|(a, b)| {
            let count = counts.pair(a, b);
            let count_a = counts.item(a);
            let count_b = counts.item(b);
            if count_a == 0 || count_b == 0 {
                return None;
            }
            let support = count as f64 / total;
            let support_a = count_a as f64 / total;
            let support_b = count_b as f64 / total;
            Some(AssociationRule {
                antecedent: view.item_name(a).to_string(),
                consequent: view.item_name(b).to_string(),
                support,
                confidence: count as f64 / count_a as f64,
                lift: support / (support_a * support_b),
                count,
            })
        })
        .collect()
}

/// Mine, filter and rank association rules.
///
/// Kept rules clear all three thresholds, are ordered by lift then count
/// (both descending, ties in canonical pair order) and truncated to
/// `max_rules`.
pub fn mine_rules(view: &BasketView, config: &RuleConfig) -> Vec<AssociationRule> {
    let counts = count_items_and_pairs(view);
    let mut rules: Vec<AssociationRule> = candidate_rules(view, &counts, config.min_pair_count)
        .into_iter()
        .filter(|r| r.confidence > config.min_confidence && r.lift > config.min_lift)
        .collect();

    rules.sort_by(|x, y| y.lift.total_cmp(&x.lift).then(y.count.cmp(&x.count)));
    rules.truncate(config.max_rules);
    rules
}
