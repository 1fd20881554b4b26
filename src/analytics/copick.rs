//! Co-pick association mining adapter
//!
//! Builds a `BasketView` from the picking table and hands it to the
//! mining crate.

use crate::stage::{StageError, StageResult};
use crate::table::{require_column, ColumnSynonyms, Table};
use pickwave_mining::{mine_rules, AssociationRule, BasketView, RuleConfig};
use tracing::info;

/// Build per-wave SKU baskets from the picking table.
///
/// Rows missing either the wave id or the SKU are dropped.
pub fn build_basket_view(picking: &Table, synonyms: &ColumnSynonyms) -> StageResult<BasketView> {
    if picking.is_empty() {
        return Err(StageError::EmptyInput(picking.name().to_string()));
    }
    let wave_col = require_column(picking, "wave", &synonyms.wave)?;
    let sku_col = require_column(picking, "sku", &synonyms.sku)?;

    let transactions = picking.rows().iter().filter_map(|row| {
        let wave = row.get(wave_col)?.as_key()?;
        let sku = row.get(sku_col)?.as_key()?;
        Some((wave, sku))
    });

    Ok(BasketView::from_transactions(transactions))
}

/// Mine co-pick rules from the picking table.
pub fn mine_copick_rules(
    picking: &Table,
    synonyms: &ColumnSynonyms,
    config: &RuleConfig,
) -> StageResult<Vec<AssociationRule>> {
    let view = build_basket_view(picking, synonyms)?;
    let rules = mine_rules(&view, config);

    info!(
        "Mined {} co-pick rules from {} baskets over {} SKUs",
        rules.len(),
        view.basket_count(),
        view.item_count()
    );
    Ok(rules)
}
