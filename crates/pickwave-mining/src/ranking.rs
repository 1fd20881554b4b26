//! Count-based ranking helpers

use rustc_hash::FxHashMap;
use std::hash::Hash;

/// Keep the `k` largest counts. The sort is stable, so equal counts keep
/// their input order.
pub fn top_k_by_count<K>(mut groups: Vec<(K, u64)>, k: usize) -> Vec<(K, u64)> {
    groups.sort_by(|a, b| b.1.cmp(&a.1));
    groups.truncate(k);
    groups
}

/// Occurrence count per key, most frequent first, ties by key ascending.
pub fn frequency_ranking<K, I>(keys: I) -> Vec<(K, u64)>
where
    K: Eq + Hash + Ord,
    I: IntoIterator<Item = K>,
{
    let mut counts: FxHashMap<K, u64> = FxHashMap::default();
    for key in keys {
        *counts.entry(key).or_insert(0) += 1;
    }
    let mut ranked: Vec<(K, u64)> = counts.into_iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_top_k_is_stable() {
        let groups = vec![("a", 2), ("b", 5), ("c", 2), ("d", 5), ("e", 1)];
        let top = top_k_by_count(groups, 3);
        assert_eq!(top, vec![("b", 5), ("d", 5), ("a", 2)]);
    }

    #[test]
    fn test_top_k_shorter_than_k() {
        let top = top_k_by_count(vec![("only", 1)], 5);
        assert_eq!(top.len(), 1);
    }

    #[test]
    fn test_frequency_ranking() {
        let ranked = frequency_ranking(vec!["b", "a", "b", "c", "a", "b"]);
        assert_eq!(ranked, vec![("b", 3), ("a", 2), ("c", 1)]);
    }
}
