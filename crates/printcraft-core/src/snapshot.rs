//! # Pricing Snapshot
//!
//! One in-memory snapshot of every reference table the engine reads,
//! behind typed accessors.
//!
//! ## Where the data comes from
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Snapshot Lifecycle                                   │
//! │                                                                         │
//! │  Data-loading layer (out of scope)                                      │
//! │       │  assembles products, rules, tiers, regions, …                   │
//! │       ▼                                                                 │
//! │  PricingSnapshot  ──►  estimate_order(…)  ──►  CostDetails              │
//! │       ▲                                                                 │
//! │       │  re-assembled whenever a table changes; the engine              │
//! │       │  never loads or caches anything itself                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Degraded lookups
//! Tables may still be loading when a quote recomputes, so EVERY accessor
//! answers on an empty or partial snapshot: misses come back as `None` or
//! zero, never as an error. `Default` is the fully-empty snapshot.
//!
//! Scans are linear over the table rows on purpose: "first match wins"
//! semantics follow table order, which keeps resolution deterministic.

use serde::{Deserialize, Serialize};

use crate::money::{Money, Rate};
use crate::types::{
    AdditionalOption, CategoryPricingSchedule, LocationSurcharge, PlateCostRule, PlateType,
    PricingAssignment, PricingRule, PrintPricingTier, PrintSize, Product, ShippingRegion,
    SizeSurcharge, SpecialInkOption, TagSurcharge, TaxRate, VolumeDiscountTier,
};
use crate::{DEFAULT_PRINT_SCHEDULE_ID, UNIVERSAL_SCHEDULE_GROUP};

// =============================================================================
// Pricing Defaults
// =============================================================================

/// Global pricing parameters that are not tied to any table row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PricingDefaults {
    /// Markup over purchase price when no pricing rule matched (×1.3 ≙ 3000).
    pub default_selling_markup: Rate,

    /// List-price rate for the bring-in handling fee.
    pub bring_in_fee_rate: Rate,

    /// Purchase-price markup fallback for the bring-in handling fee.
    pub default_bring_in_markup: Rate,

    /// Subtotal at and above which shipping is free.
    pub free_shipping_threshold: Money,

    /// Consumption tax rate.
    pub tax_rate: TaxRate,
}

impl Default for PricingDefaults {
    fn default() -> Self {
        PricingDefaults {
            default_selling_markup: Rate::from_bps(3000),
            bring_in_fee_rate: Rate::from_bps(2000),
            default_bring_in_markup: Rate::from_bps(3000),
            free_shipping_threshold: Money::from_yen(10_000),
            tax_rate: TaxRate::from_bps(1000),
        }
    }
}

// =============================================================================
// Pricing Snapshot
// =============================================================================

/// The full set of reference tables, assembled by the data-loading layer.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PricingSnapshot {
    pub products: Vec<Product>,
    pub rules: Vec<PricingRule>,
    pub assignments: Vec<PricingAssignment>,
    pub volume_tiers: Vec<VolumeDiscountTier>,
    pub print_tiers: Vec<PrintPricingTier>,
    pub category_schedules: Vec<CategoryPricingSchedule>,
    pub plate_rules: Vec<PlateCostRule>,
    pub special_inks: Vec<SpecialInkOption>,
    pub tag_surcharges: Vec<TagSurcharge>,
    pub size_surcharges: Vec<SizeSurcharge>,
    pub location_surcharges: Vec<LocationSurcharge>,
    pub options: Vec<AdditionalOption>,
    pub shipping_regions: Vec<ShippingRegion>,
    pub defaults: PricingDefaults,
}

impl PricingSnapshot {
    /// Looks up a product by id.
    pub fn product(&self, id: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    /// Looks up a pricing rule by id.
    pub fn rule(&self, id: &str) -> Option<&PricingRule> {
        self.rules.iter().find(|r| r.id == id)
    }

    /// All pricing assignments, in table order.
    pub fn assignments(&self) -> &[PricingAssignment] {
        &self.assignments
    }

    /// The volume-discount tier of a schedule containing a quantity.
    pub fn volume_tier(&self, schedule_id: i64, quantity: i64) -> Option<&VolumeDiscountTier> {
        self.volume_tiers
            .iter()
            .find(|t| t.schedule_id == schedule_id && t.contains(quantity))
    }

    /// The print-price tier of a schedule containing a quantity.
    ///
    /// `None` when the quantity falls outside every band of the schedule;
    /// the caller prices the whole group's printing at zero in that case.
    pub fn print_tier(&self, schedule_id: i64, quantity: i64) -> Option<&PrintPricingTier> {
        self.print_tiers
            .iter()
            .find(|t| t.schedule_id == schedule_id && t.contains(quantity))
    }

    /// The print-price schedule for a (category, customer group) pair.
    ///
    /// Tries the customer's group, then the universal group `"1"`, then
    /// falls back to schedule 1.
    pub fn print_schedule_for(&self, category_id: &str, customer_group_id: &str) -> i64 {
        let row_for = |group: &str| {
            self.category_schedules
                .iter()
                .find(|s| s.category_id == category_id && s.customer_group_id == group)
        };
        row_for(customer_group_id)
            .or_else(|| row_for(UNIVERSAL_SCHEDULE_GROUP))
            .map(|s| s.schedule_id)
            .unwrap_or(DEFAULT_PRINT_SCHEDULE_ID)
    }

    /// The plate-cost rule for a (print size, plate type) pair.
    pub fn plate_rule(&self, size: PrintSize, plate_type: PlateType) -> Option<&PlateCostRule> {
        self.plate_rules
            .iter()
            .find(|r| r.print_size == size && r.plate_type == plate_type)
    }

    /// Per-unit surcharge for one use of a special ink. Zero on a miss.
    pub fn ink_unit_cost(&self, ink_type: &str) -> Money {
        self.special_inks
            .iter()
            .find(|i| i.ink_type == ink_type)
            .map(|i| i.unit_cost)
            .unwrap_or_default()
    }

    /// Per-unit surcharge for a print-size class. Zero on a miss.
    pub fn size_surcharge(&self, size: PrintSize) -> Money {
        self.size_surcharges
            .iter()
            .find(|s| s.print_size == size)
            .map(|s| s.per_unit_cost)
            .unwrap_or_default()
    }

    /// Per-unit surcharge for a placement location. Zero on a miss.
    pub fn location_surcharge(&self, location: &str) -> Money {
        self.location_surcharges
            .iter()
            .find(|s| s.location == location)
            .map(|s| s.per_unit_cost)
            .unwrap_or_default()
    }

    /// The LARGEST per-unit surcharge among a set of garment tags.
    ///
    /// Surcharged tags overlap (a polyester long-sleeve needs one
    /// underbase, not two), so the group pays the maximum, not the sum.
    pub fn max_tag_surcharge<'a, I>(&self, tags: I) -> Money
    where
        I: IntoIterator<Item = &'a str>,
    {
        tags.into_iter()
            .filter_map(|tag| {
                self.tag_surcharges
                    .iter()
                    .find(|s| s.tag == tag)
                    .map(|s| s.per_unit_cost)
            })
            .max()
            .unwrap_or_default()
    }

    /// Looks up an additional option by id.
    pub fn option(&self, id: &str) -> Option<&AdditionalOption> {
        self.options.iter().find(|o| o.id == id)
    }

    /// All shipping regions, in table order.
    pub fn shipping_regions(&self) -> &[ShippingRegion] {
        &self.shipping_regions
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
