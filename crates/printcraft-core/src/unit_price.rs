//! # Garment Unit Pricing
//!
//! Converts a resolved pricing rule + catalog prices + ordered quantity
//! into the per-unit selling price of each garment line.
//!
//! ## Fallback Chains
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │         Raw price by rule kind (first usable source wins)               │
//! │                                                                         │
//! │  no rule          purchase × (1+default markup) → list × 0.52 → 0      │
//! │  RATE             list × rate → purchase × (1+default markup) → 0      │
//! │  MARKUP           purchase × (1+markup) → list × 0.52 → 0              │
//! │  VOLUME_DISCOUNT  tier found:   purchase × multiplier → list × 0.52    │
//! │                   tier missing: the "no rule" chain                     │
//! │                                                                         │
//! │  Every branch then rounds UP to the next multiple of 10 yen.            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A source is "usable" when its catalog price is positive; zero prices
//! (not yet negotiated, not in the catalog) skip to the next source. The
//! chains are data ([`PriceSource`] slices), so each branch is testable
//! alone.
//!
//! ## Bring-in garments
//! A bring-in line always resolves to unit price 0. When the group runs in
//! bring-in fee mode, a separate handling fee per unit is computed for
//! those lines and reported in its own bucket; it never flows through the
//! unit price.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::{Money, Rate};
use crate::resolver::resolve_pricing_rule;
use crate::snapshot::{PricingDefaults, PricingSnapshot};
use crate::types::{CustomerInfo, OrderLineItem, PriceEntry, PricingModel, ProcessingGroup};
use crate::LIST_PRICE_FALLBACK;

// =============================================================================
// Price Sources
// =============================================================================

/// One step of a fallback chain: which catalog price to read and how to
/// scale it.
#[derive(Debug, Clone, Copy)]
enum PriceSource {
    /// purchase × (1 + default selling markup)
    PurchaseDefaultMarkup,
    /// list × 0.52
    ListFallback,
    /// list × rate (RATE rules, bring-in fee rate)
    ListTimesRate(Rate),
    /// purchase × (1 + markup) (MARKUP rules, bring-in markup fallback)
    PurchaseTimesMarkup(Rate),
    /// purchase × multiplier (volume-discount tiers)
    PurchaseTimesMultiplier(Rate),
}

/// Walks a chain and returns the first usable source's price, rounded up
/// to the next multiple of 10 yen. An exhausted chain prices at zero.
fn apply_chain(entry: &PriceEntry, defaults: &PricingDefaults, chain: &[PriceSource]) -> Money {
    for source in chain {
        match source {
            PriceSource::PurchaseDefaultMarkup if entry.purchase_price.is_positive() => {
                return entry
                    .purchase_price
                    .markup_ceil_to_ten(defaults.default_selling_markup);
            }
            PriceSource::ListFallback if entry.list_price.is_positive() => {
                return entry.list_price.scale_ceil_to_ten(LIST_PRICE_FALLBACK);
            }
            PriceSource::ListTimesRate(rate) if entry.list_price.is_positive() => {
                return entry.list_price.scale_ceil_to_ten(*rate);
            }
            PriceSource::PurchaseTimesMarkup(markup) if entry.purchase_price.is_positive() => {
                return entry.purchase_price.markup_ceil_to_ten(*markup);
            }
            PriceSource::PurchaseTimesMultiplier(multiplier)
                if entry.purchase_price.is_positive() =>
            {
                return entry.purchase_price.scale_ceil_to_ten(*multiplier);
            }
            _ => continue,
        }
    }
    Money::zero()
}

const NO_RULE_CHAIN: [PriceSource; 2] = [
    PriceSource::PurchaseDefaultMarkup,
    PriceSource::ListFallback,
];

/// Per-unit selling price for one price entry under a resolved rule.
///
/// `product_quantity` is the total ordered quantity of the product across
/// all of its colors and sizes in the group; it drives volume-discount
/// tier selection only.
pub fn unit_price_for_entry(
    entry: &PriceEntry,
    rule_model: Option<&PricingModel>,
    product_quantity: i64,
    snapshot: &PricingSnapshot,
) -> Money {
    let defaults = &snapshot.defaults;
    match rule_model {
        None => apply_chain(entry, defaults, &NO_RULE_CHAIN),
        Some(PricingModel::Rate { rate }) => apply_chain(
            entry,
            defaults,
            &[
                PriceSource::ListTimesRate(*rate),
                PriceSource::PurchaseDefaultMarkup,
            ],
        ),
        Some(PricingModel::Markup { markup }) => apply_chain(
            entry,
            defaults,
            &[
                PriceSource::PurchaseTimesMarkup(*markup),
                PriceSource::ListFallback,
            ],
        ),
        Some(PricingModel::VolumeDiscountMarkup { schedule_id }) => {
            match snapshot.volume_tier(*schedule_id, product_quantity) {
                Some(tier) => apply_chain(
                    entry,
                    defaults,
                    &[
                        PriceSource::PurchaseTimesMultiplier(tier.multiplier),
                        PriceSource::ListFallback,
                    ],
                ),
                None => apply_chain(entry, defaults, &NO_RULE_CHAIN),
            }
        }
    }
}

/// Per-unit bring-in handling fee for one price entry.
pub fn bring_in_fee_for_entry(entry: &PriceEntry, defaults: &PricingDefaults) -> Money {
    apply_chain(
        entry,
        defaults,
        &[
            PriceSource::ListTimesRate(defaults.bring_in_fee_rate),
            PriceSource::PurchaseTimesMarkup(defaults.default_bring_in_markup),
        ],
    )
}

// =============================================================================
// Group Garment Pricing
// =============================================================================

/// The garment-pricing outcome for one processing group.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct GarmentPricing {
    /// The group's lines, each annotated with its resolved unit price.
    pub items: Vec<OrderLineItem>,

    /// Charged garment cost: Σ effective unit price × quantity, where the
    /// effective price is the ad-hoc adjusted price when present.
    pub garment_cost: Money,

    /// Signed Σ (resolved − adjusted) × quantity over adjusted lines.
    /// Negative when lines were adjusted upward.
    pub product_discount: Money,

    /// Bring-in handling fees (bring-in lines in bring-in-mode groups).
    pub bring_in_fee: Money,
}

/// Prices every garment line of a group.
///
/// Missing products and missing (color, size) price entries resolve to a
/// unit price of 0; partial reference data never blocks a recomputation.
pub fn price_line_items(
    group: &ProcessingGroup,
    customer: &CustomerInfo,
    snapshot: &PricingSnapshot,
) -> GarmentPricing {
    let mut items = Vec::with_capacity(group.items.len());
    let mut garment_cost = Money::zero();
    let mut product_discount = Money::zero();
    let mut bring_in_fee = Money::zero();

    for item in &group.items {
        let product = snapshot.product(&item.product_id);
        let entry = product.and_then(|p| p.price_entry(&item.color, &item.size));

        let unit_price = if item.is_bring_in {
            // Customer-supplied garments carry no garment cost. The
            // handling fee is a separate bucket, charged only when the
            // group runs in bring-in fee mode.
            if group.bring_in_mode {
                if let Some(entry) = entry {
                    let fee = bring_in_fee_for_entry(entry, &snapshot.defaults);
                    bring_in_fee += fee.multiply_quantity(item.quantity);
                }
            }
            Money::zero()
        } else {
            match (product, entry) {
                (Some(product), Some(entry)) => {
                    let rule = resolve_pricing_rule(product, customer, snapshot);
                    unit_price_for_entry(
                        entry,
                        rule.map(|r| &r.model),
                        group.product_quantity(&item.product_id),
                        snapshot,
                    )
                }
                // Variant not in the catalog (or tables still loading)
                _ => Money::zero(),
            }
        };

        let effective = item.adjusted_unit_price.unwrap_or(unit_price);
        if item.adjusted_unit_price.is_some() {
            product_discount += (unit_price - effective).multiply_quantity(item.quantity);
        }
        garment_cost += effective.multiply_quantity(item.quantity);

        items.push(OrderLineItem {
            unit_price: Some(unit_price),
            ..item.clone()
        });
    }

    GarmentPricing {
        items,
        garment_cost,
        product_discount,
        bring_in_fee,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{
        AssignmentTarget, PriceEntry, PricingAssignment, PricingRule, Product, VolumeDiscountTier,
    };
    use chrono::{TimeZone, Utc};

    fn entry(list: i64, purchase: i64) -> PriceEntry {
        PriceEntry {
            color_label: "White".to_string(),
            size: "M".to_string(),
            list_price: Money::from_yen(list),
            purchase_price: Money::from_yen(purchase),
        }
    }

    fn snapshot() -> PricingSnapshot {
        PricingSnapshot::default()
    }

    // -------------------------------------------------------------------------
    // Chain branches
    // -------------------------------------------------------------------------

    #[test]
    fn test_no_rule_uses_purchase_with_default_markup() {
        // 500 × 1.3 = 650, already a multiple of 10
        let price = unit_price_for_entry(&entry(1000, 500), None, 1, &snapshot());
        assert_eq!(price.yen(), 650);
    }

    #[test]
    fn test_no_rule_falls_back_to_list_times_052() {
        // purchase missing: 1000 × 0.52 = 520
        let price = unit_price_for_entry(&entry(1000, 0), None, 1, &snapshot());
        assert_eq!(price.yen(), 520);
    }

    #[test]
    fn test_no_rule_with_no_prices_is_zero() {
        let price = unit_price_for_entry(&entry(0, 0), None, 1, &snapshot());
        assert_eq!(price.yen(), 0);
    }

    #[test]
    fn test_rate_rule_scales_list_price() {
        let model = PricingModel::Rate {
            rate: Rate::from_bps(8000),
        };
        // 1000 × 0.8 = 800
        let price = unit_price_for_entry(&entry(1000, 500), Some(&model), 1, &snapshot());
        assert_eq!(price.yen(), 800);
    }

    #[test]
    fn test_rate_rule_falls_back_to_purchase_markup() {
        let model = PricingModel::Rate {
            rate: Rate::from_bps(8000),
        };
        // list missing: 500 × 1.3 = 650, NOT list × 0.52
        let price = unit_price_for_entry(&entry(0, 500), Some(&model), 1, &snapshot());
        assert_eq!(price.yen(), 650);
    }

    #[test]
    fn test_markup_rule_scales_purchase_price() {
        let model = PricingModel::Markup {
            markup: Rate::from_bps(5000),
        };
        // 500 × 1.5 = 750
        let price = unit_price_for_entry(&entry(1000, 500), Some(&model), 1, &snapshot());
        assert_eq!(price.yen(), 750);
    }

    #[test]
    fn test_markup_rule_falls_back_to_list_times_052() {
        let model = PricingModel::Markup {
            markup: Rate::from_bps(5000),
        };
        let price = unit_price_for_entry(&entry(1000, 0), Some(&model), 1, &snapshot());
        assert_eq!(price.yen(), 520);
    }

    #[test]
    fn test_volume_discount_applies_tier_multiplier() {
        let snapshot = PricingSnapshot {
            volume_tiers: vec![VolumeDiscountTier {
                schedule_id: 7,
                min_quantity: 10,
                max_quantity: 99,
                multiplier: Rate::from_bps(18_000),
            }],
            ..PricingSnapshot::default()
        };
        let model = PricingModel::VolumeDiscountMarkup { schedule_id: 7 };
        // 300 × 1.8 = 540
        let price = unit_price_for_entry(&entry(1000, 300), Some(&model), 30, &snapshot);
        assert_eq!(price.yen(), 540);
    }

    #[test]
    fn test_volume_discount_tier_found_but_no_purchase_price() {
        let snapshot = PricingSnapshot {
            volume_tiers: vec![VolumeDiscountTier {
                schedule_id: 7,
                min_quantity: 10,
                max_quantity: 99,
                multiplier: Rate::from_bps(18_000),
            }],
            ..PricingSnapshot::default()
        };
        let model = PricingModel::VolumeDiscountMarkup { schedule_id: 7 };
        let price = unit_price_for_entry(&entry(1000, 0), Some(&model), 30, &snapshot);
        assert_eq!(price.yen(), 520);
    }

    #[test]
    fn test_volume_discount_without_tier_uses_no_rule_chain() {
        let snapshot = PricingSnapshot {
            volume_tiers: vec![VolumeDiscountTier {
                schedule_id: 7,
                min_quantity: 10,
                max_quantity: 99,
                multiplier: Rate::from_bps(18_000),
            }],
            ..PricingSnapshot::default()
        };
        let model = PricingModel::VolumeDiscountMarkup { schedule_id: 7 };
        // quantity 5 is below every band: 500 × 1.3 = 650
        let price = unit_price_for_entry(&entry(1000, 500), Some(&model), 5, &snapshot);
        assert_eq!(price.yen(), 650);
    }

    #[test]
    fn test_bring_in_fee_prefers_list_rate() {
        let defaults = PricingDefaults::default();
        // 1000 × 0.2 = 200
        assert_eq!(bring_in_fee_for_entry(&entry(1000, 500), &defaults).yen(), 200);
        // list missing: 500 × 1.3 = 650
        assert_eq!(bring_in_fee_for_entry(&entry(0, 500), &defaults).yen(), 650);
        assert_eq!(bring_in_fee_for_entry(&entry(0, 0), &defaults).yen(), 0);
    }

    // -------------------------------------------------------------------------
    // Group pricing
    // -------------------------------------------------------------------------

    fn product(id: &str, list: i64, purchase: i64) -> Product {
        Product {
            id: id.to_string(),
            manufacturer_id: "mfr_00001".to_string(),
            category_id: "cat_00001".to_string(),
            name: "Heavyweight Tee".to_string(),
            tags: vec![],
            prices: vec![entry(list, purchase)],
            created_at: Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap(),
            updated_at: Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap(),
        }
    }

    fn line(product_id: &str, quantity: i64) -> OrderLineItem {
        OrderLineItem {
            product_id: product_id.to_string(),
            color: "White".to_string(),
            size: "M".to_string(),
            quantity,
            unit_price: None,
            adjusted_unit_price: None,
            is_bring_in: false,
        }
    }

    fn group(items: Vec<OrderLineItem>, bring_in_mode: bool) -> ProcessingGroup {
        ProcessingGroup {
            id: "grp_00001".to_string(),
            name: "Main".to_string(),
            items,
            designs: vec![],
            selected_option_ids: vec![],
            custom_items: vec![],
            sample_items: vec![],
            bring_in_mode,
        }
    }

    fn customer() -> CustomerInfo {
        CustomerInfo {
            id: None,
            name: None,
            customer_group_id: None,
            address_line1: None,
        }
    }

    #[test]
    fn test_group_pricing_annotates_items_and_totals() {
        let snapshot = PricingSnapshot {
            products: vec![product("prod_00001", 1000, 500)],
            ..PricingSnapshot::default()
        };
        let pricing = price_line_items(&group(vec![line("prod_00001", 20)], false), &customer(), &snapshot);

        assert_eq!(pricing.items[0].unit_price, Some(Money::from_yen(650)));
        assert_eq!(pricing.garment_cost.yen(), 13_000);
        assert_eq!(pricing.product_discount.yen(), 0);
        assert_eq!(pricing.bring_in_fee.yen(), 0);
    }

    #[test]
    fn test_missing_price_entry_prices_at_zero() {
        let snapshot = PricingSnapshot {
            products: vec![product("prod_00001", 1000, 500)],
            ..PricingSnapshot::default()
        };
        let mut item = line("prod_00001", 20);
        item.size = "XXL".to_string(); // not in the catalog
        let pricing = price_line_items(&group(vec![item], false), &customer(), &snapshot);

        assert_eq!(pricing.items[0].unit_price, Some(Money::zero()));
        assert_eq!(pricing.garment_cost.yen(), 0);
    }

    #[test]
    fn test_unknown_product_prices_at_zero() {
        let pricing = price_line_items(
            &group(vec![line("prod_unknown", 20)], false),
            &customer(),
            &snapshot(),
        );
        assert_eq!(pricing.items[0].unit_price, Some(Money::zero()));
        assert_eq!(pricing.garment_cost.yen(), 0);
    }

    #[test]
    fn test_volume_tier_uses_product_total_across_lines() {
        // Two colors of one product: 20 + 15 = 35 units lands in the tier
        let mut navy = line("prod_00001", 15);
        navy.color = "Navy".to_string();
        let mut p = product("prod_00001", 1000, 300);
        p.prices.push(PriceEntry {
            color_label: "Navy".to_string(),
            size: "M".to_string(),
            list_price: Money::from_yen(1000),
            purchase_price: Money::from_yen(300),
        });
        let snapshot = PricingSnapshot {
            products: vec![p],
            rules: vec![PricingRule {
                id: "rule_00001".to_string(),
                model: PricingModel::VolumeDiscountMarkup { schedule_id: 7 },
            }],
            assignments: vec![PricingAssignment {
                id: "asg_00001".to_string(),
                rule_id: "rule_00001".to_string(),
                target_type: AssignmentTarget::Product,
                target_id: "prod_00001".to_string(),
                customer_group_id: None,
            }],
            volume_tiers: vec![VolumeDiscountTier {
                schedule_id: 7,
                min_quantity: 30,
                max_quantity: 99,
                multiplier: Rate::from_bps(18_000),
            }],
            ..PricingSnapshot::default()
        };
        let pricing = price_line_items(
            &group(vec![line("prod_00001", 20), navy], false),
            &customer(),
            &snapshot,
        );

        // 300 × 1.8 = 540 on both lines
        assert_eq!(pricing.items[0].unit_price, Some(Money::from_yen(540)));
        assert_eq!(pricing.items[1].unit_price, Some(Money::from_yen(540)));
        assert_eq!(pricing.garment_cost.yen(), 540 * 35);
    }

    #[test]
    fn test_adjusted_price_tracks_discount() {
        let snapshot = PricingSnapshot {
            products: vec![product("prod_00001", 1000, 500)],
            ..PricingSnapshot::default()
        };
        let mut item = line("prod_00001", 10);
        item.adjusted_unit_price = Some(Money::from_yen(600)); // 50 off the resolved 650
        let pricing = price_line_items(&group(vec![item], false), &customer(), &snapshot);

        assert_eq!(pricing.items[0].unit_price, Some(Money::from_yen(650)));
        assert_eq!(pricing.garment_cost.yen(), 6000);
        assert_eq!(pricing.product_discount.yen(), 500);
    }

    #[test]
    fn test_upward_adjustment_tracks_negative_discount() {
        let snapshot = PricingSnapshot {
            products: vec![product("prod_00001", 1000, 500)],
            ..PricingSnapshot::default()
        };
        let mut item = line("prod_00001", 10);
        item.adjusted_unit_price = Some(Money::from_yen(700));
        let pricing = price_line_items(&group(vec![item], false), &customer(), &snapshot);

        assert_eq!(pricing.garment_cost.yen(), 7000);
        assert_eq!(pricing.product_discount.yen(), -500);
    }

    #[test]
    fn test_bring_in_item_is_always_zero() {
        let snapshot = PricingSnapshot {
            products: vec![product("prod_00001", 1000, 500)],
            ..PricingSnapshot::default()
        };
        let mut item = line("prod_00001", 10);
        item.is_bring_in = true;

        // Group NOT in bring-in fee mode: no garment cost, no fee
        let pricing = price_line_items(&group(vec![item.clone()], false), &customer(), &snapshot);
        assert_eq!(pricing.items[0].unit_price, Some(Money::zero()));
        assert_eq!(pricing.garment_cost.yen(), 0);
        assert_eq!(pricing.bring_in_fee.yen(), 0);

        // Group in bring-in fee mode: unit price stays 0, fee bucket fills
        // 1000 × 0.2 = 200 per unit × 10
        let pricing = price_line_items(&group(vec![item], true), &customer(), &snapshot);
        assert_eq!(pricing.items[0].unit_price, Some(Money::zero()));
        assert_eq!(pricing.garment_cost.yen(), 0);
        assert_eq!(pricing.bring_in_fee.yen(), 2000);
    }
}
