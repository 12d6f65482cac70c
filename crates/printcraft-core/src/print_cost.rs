//! # Print Cost
//!
//! Prices the printing of a processing group: silkscreen tiering plus
//! ink, size, location, garment-tag and plate surcharges.
//!
//! ## Computation Steps
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                  Silkscreen Print Pricing                               │
//! │                                                                         │
//! │  1. total quantity of the group (0 → everything is 0)                   │
//! │  2. schedule id from (category of first product, customer group)        │
//! │  3. tier of that schedule containing the quantity                       │
//! │     └── no tier → every silkscreen bucket is 0 (documented gap)         │
//! │  4. per design: base + ink + size + location, × quantity                │
//! │  5. garment-tag surcharge: MAX across tags, × quantity                  │
//! │  6. decomposition plates: surcharge_per_color × colors, flat            │
//! │                                                                         │
//! │  DTF designs are priced by the external collaborator (DtfPricer);       │
//! │  this engine only sums the returned totals into by_dtf.                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use std::ops::AddAssign;
use ts_rs::TS;

use crate::money::Money;
use crate::snapshot::PricingSnapshot;
use crate::types::{CustomerInfo, PlateType, PrintMethod, ProcessingGroup};

// =============================================================================
// DTF Collaborator Seam
// =============================================================================

/// External DTF price source.
///
/// DTF transfers are priced per design from film dimensions and quantity
/// by a collaborator outside this engine; the engine treats the returned
/// total as opaque. Implementations must be pure; the quote recomputes
/// on every input change and must stay deterministic.
pub trait DtfPricer {
    /// Total cost of printing one DTF design on `total_quantity` garments.
    fn design_cost(&self, width_mm: u32, height_mm: u32, total_quantity: i64) -> Money;
}

/// DTF pricer that prices everything at zero.
///
/// Used while the DTF price tables are still loading, or by shops without
/// DTF capability.
#[derive(Debug, Clone, Copy, Default)]
pub struct ZeroDtf;

impl DtfPricer for ZeroDtf {
    fn design_cost(&self, _width_mm: u32, _height_mm: u32, _total_quantity: i64) -> Money {
        Money::zero()
    }
}

// =============================================================================
// Output Records
// =============================================================================

/// Print cost split by cost category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct PrintCostBreakdown {
    /// Tiered first-color + additional-color base, all designs.
    pub base: Money,

    /// Special-ink surcharges.
    pub by_ink: Money,

    /// Print-size surcharges.
    pub by_size: Money,

    /// Placement-location surcharges.
    pub by_location: Money,

    /// Garment-tag surcharge (maximum across the group's tags).
    pub by_item: Money,

    /// Decomposition-plate per-color surcharges.
    pub by_plate_type: Money,

    /// DTF designs, as returned by the collaborator.
    pub by_dtf: Money,

    /// Sum of all buckets.
    pub total: Money,
}

impl AddAssign for PrintCostBreakdown {
    fn add_assign(&mut self, other: Self) {
        self.base += other.base;
        self.by_ink += other.by_ink;
        self.by_size += other.by_size;
        self.by_location += other.by_location;
        self.by_item += other.by_item;
        self.by_plate_type += other.by_plate_type;
        self.by_dtf += other.by_dtf;
        self.total += other.total;
    }
}

/// Cost record for one print design.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct DesignCost {
    pub design_id: String,

    /// Per-unit print price (base + ink + size + location). Zero for DTF
    /// designs, which are priced as totals by the collaborator.
    pub unit_price: Money,

    /// Design total for the group.
    pub total: Money,
}

/// The print-pricing outcome for one processing group.
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct PrintPricing {
    pub breakdown: PrintCostBreakdown,
    pub designs: Vec<DesignCost>,
}

// =============================================================================
// Calculation
// =============================================================================

/// Prices all printing of a group.
pub fn calculate_print_cost(
    group: &ProcessingGroup,
    customer: &CustomerInfo,
    snapshot: &PricingSnapshot,
    dtf: &dyn DtfPricer,
) -> PrintPricing {
    let total_quantity = group.total_quantity();
    if total_quantity == 0 {
        return PrintPricing::default();
    }

    let mut breakdown = PrintCostBreakdown::default();
    let mut designs = Vec::new();

    // Schedule comes from the category of the group's first garment line.
    // An unresolvable product misses the schedule table and lands on the
    // default schedule.
    let category_id = group
        .items
        .first()
        .and_then(|item| snapshot.product(&item.product_id))
        .map(|p| p.category_id.as_str())
        .unwrap_or("");
    let schedule_id = snapshot.print_schedule_for(category_id, customer.group_id());

    // No band of the schedule covers this quantity: the whole silkscreen
    // side prices at zero. Kept exactly as the shop's rule table behaves
    // today; an uncovered quantity is a data-quality question, not an
    // engine error.
    let tier = snapshot.print_tier(schedule_id, total_quantity);

    if let Some(tier) = tier {
        for design in &group.designs {
            let PrintMethod::Silkscreen {
                size,
                color_count,
                special_inks,
                plate_type,
            } = &design.method
            else {
                continue;
            };
            if *color_count <= 0 {
                continue;
            }

            let base_unit = tier.first_color_price
                + tier.additional_color_price.multiply_quantity(color_count - 1);
            let ink_unit: Money = special_inks
                .iter()
                .map(|ink| snapshot.ink_unit_cost(&ink.ink_type).multiply_quantity(ink.count))
                .sum();
            let size_unit = snapshot.size_surcharge(*size);
            let location_unit = snapshot.location_surcharge(&design.location);

            let unit_price = base_unit + ink_unit + size_unit + location_unit;

            breakdown.base += base_unit.multiply_quantity(total_quantity);
            breakdown.by_ink += ink_unit.multiply_quantity(total_quantity);
            breakdown.by_size += size_unit.multiply_quantity(total_quantity);
            breakdown.by_location += location_unit.multiply_quantity(total_quantity);

            designs.push(DesignCost {
                design_id: design.id.clone(),
                unit_price,
                total: unit_price.multiply_quantity(total_quantity),
            });

            // Decomposition plates carry a flat per-color surcharge on
            // top of the tiered base.
            if *plate_type == PlateType::Decomposition {
                if let Some(rule) = snapshot.plate_rule(*size, *plate_type) {
                    breakdown.by_plate_type +=
                        rule.surcharge_per_color.multiply_quantity(*color_count);
                }
            }
        }

        // Garment-tag surcharge: one surcharge for the whole group, the
        // MAXIMUM across all tags on the referenced products (overlapping
        // tags share one underbase pass, so they never stack).
        let tags = group
            .items
            .iter()
            .filter_map(|item| snapshot.product(&item.product_id))
            .flat_map(|p| p.tags.iter().map(String::as_str));
        breakdown.by_item = snapshot
            .max_tag_surcharge(tags)
            .multiply_quantity(total_quantity);
    }

    // DTF designs are priced by the collaborator regardless of the
    // silkscreen tier tables.
    for design in &group.designs {
        if let PrintMethod::Dtf {
            width_mm,
            height_mm,
        } = &design.method
        {
            let total = dtf.design_cost(*width_mm, *height_mm, total_quantity);
            breakdown.by_dtf += total;
            designs.push(DesignCost {
                design_id: design.id.clone(),
                unit_price: Money::zero(),
                total,
            });
        }
    }

    breakdown.total = breakdown.base
        + breakdown.by_ink
        + breakdown.by_size
        + breakdown.by_location
        + breakdown.by_item
        + breakdown.by_plate_type
        + breakdown.by_dtf;

    PrintPricing { breakdown, designs }
}

// =============================================================================
// Unit Tests
// =============================================================================
