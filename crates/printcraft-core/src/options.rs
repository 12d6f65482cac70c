//! # Additional Options
//!
//! Flat per-unit add-ons selected on a group (folding, tag cutting,
//! individual wrapping, …): `cost_per_item × group quantity` each.
//!
//! The breakdown map is keyed by the option's DISPLAY NAME, because that
//! is what the quote document prints. Two catalog options sharing a name
//! merge into one breakdown row; the total stays correct either way.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use ts_rs::TS;

use crate::money::Money;
use crate::snapshot::PricingSnapshot;
use crate::types::ProcessingGroup;

/// The option-pricing outcome for one processing group.
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct OptionsPricing {
    /// Cost per option display name.
    pub by_name: BTreeMap<String, Money>,

    /// Sum over all selected options.
    pub total: Money,
}

/// Prices the selected options of a group.
///
/// Selections pointing at options missing from the catalog cost zero.
pub fn calculate_options_cost(group: &ProcessingGroup, snapshot: &PricingSnapshot) -> OptionsPricing {
    let total_quantity = group.total_quantity();
    let mut by_name: BTreeMap<String, Money> = BTreeMap::new();
    let mut total = Money::zero();

    for option_id in &group.selected_option_ids {
        let Some(option) = snapshot.option(option_id) else {
            continue;
        };
        let cost = option.cost_per_item.multiply_quantity(total_quantity);
        *by_name.entry(option.name.clone()).or_default() += cost;
        total += cost;
    }

    OptionsPricing { by_name, total }
}

// =============================================================================
// Unit Tests
// =============================================================================
