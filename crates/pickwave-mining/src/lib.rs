pub mod common;
pub mod association;
pub mod ranking;

pub use common::{BasketView, ItemIndex};
pub use association::{
    candidate_rules, count_items_and_pairs, mine_rules, AssociationRule, CoOccurrence, RuleConfig,
};
pub use ranking::{frequency_ranking, top_k_by_count};
