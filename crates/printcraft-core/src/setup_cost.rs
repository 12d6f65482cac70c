//! # Plate Setup Cost
//!
//! One-time plate preparation cost per silkscreen design.
//!
//! A design needs one plate per color, so setup is
//! `setup_cost(size, plate type) × colors`. Reorders reuse the plates made
//! for the original job: the whole group's setup cost is waived.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use ts_rs::TS;

use crate::money::Money;
use crate::snapshot::PricingSnapshot;
use crate::types::{PrintMethod, ProcessingGroup};

/// The setup-pricing outcome for one processing group.
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct SetupPricing {
    /// Setup cost per design id.
    pub by_design: BTreeMap<String, Money>,

    /// Sum over all designs.
    pub total: Money,
}

/// Prices plate setup for every silkscreen design of a group.
///
/// DTF designs need no plates. Designs with no colors, and (size, plate
/// type) pairs missing from the plate table, cost zero.
pub fn calculate_setup_cost(
    group: &ProcessingGroup,
    snapshot: &PricingSnapshot,
    is_reorder: bool,
) -> SetupPricing {
    let mut by_design = BTreeMap::new();
    let mut total = Money::zero();

    for design in &group.designs {
        let PrintMethod::Silkscreen {
            size,
            color_count,
            plate_type,
            ..
        } = &design.method
        else {
            continue;
        };
        if *color_count <= 0 {
            continue;
        }

        let cost = if is_reorder {
            // Plates from the original job are reused
            Money::zero()
        } else {
            snapshot
                .plate_rule(*size, *plate_type)
                .map(|rule| rule.setup_cost.multiply_quantity(*color_count))
                .unwrap_or_default()
        };

        by_design.insert(design.id.clone(), cost);
        total += cost;
    }

    SetupPricing { by_design, total }
}

// =============================================================================
// Unit Tests
// =============================================================================
