//! # Domain Types
//!
//! Core domain types for the cost-estimation engine.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  Reference data (immutable, loaded by the app layer)                    │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │   PricingRule   │   │  PlateCostRule  │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id             │   │  id             │   │  print_size     │       │
//! │  │  category_id    │   │  model (enum)   │   │  plate_type     │       │
//! │  │  prices[]       │   │                 │   │  setup_cost     │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │   … plus assignments, tiers, schedules, regions, options, inks          │
//! │                                                                         │
//! │  Order data (authored in the quote screens)                             │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │ ProcessingGroup │   │  OrderLineItem  │   │   PrintDesign   │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Rule kinds, assignment targets, print sizes and plate types are enums,
//! never string tags: adding a variant forces every `match` to be revisited.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::{Money, Rate};
use crate::DEFAULT_CUSTOMER_GROUP;

// =============================================================================
// Tax Rate
// =============================================================================

/// Tax rate represented in basis points (bps).
///
/// 1 basis point = 0.01% = 1/10000, so 1000 bps = the 10% consumption tax.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TaxRate(u32);

impl TaxRate {
    /// Creates a tax rate from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        TaxRate(bps)
    }

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Zero tax rate.
    #[inline]
    pub const fn zero() -> Self {
        TaxRate(0)
    }
}

impl Default for TaxRate {
    fn default() -> Self {
        TaxRate::zero()
    }
}

// =============================================================================
// Product Catalog
// =============================================================================

/// One sellable variant of a product: a (color label, size) pair with its
/// catalog prices.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PriceEntry {
    /// Color label as printed in the manufacturer catalog ("White", "Navy").
    pub color_label: String,

    /// Garment size ("S", "M", "XL", …).
    pub size: String,

    /// Manufacturer list price. Zero when the catalog has no list price.
    pub list_price: Money,

    /// Our purchase price. Zero when not yet negotiated.
    pub purchase_price: Money,
}

/// A garment product. Immutable reference data.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Product {
    /// Business identifier ("prod_00042").
    pub id: String,

    /// Manufacturer this product belongs to.
    pub manufacturer_id: String,

    /// Category this product belongs to.
    pub category_id: String,

    /// Display name shown in the quote screens.
    pub name: String,

    /// Tags carried by the garment ("polyester", "long-sleeve", …).
    /// Some tags carry a per-unit print surcharge.
    pub tags: Vec<String>,

    /// Catalog prices per (color, size) variant.
    pub prices: Vec<PriceEntry>,

    /// When the product row was created.
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,

    /// When the product row was last updated.
    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Finds the price entry matching a (color, size) pair.
    ///
    /// Exactly one entry is expected per pair; `None` means the variant is
    /// not in the catalog and the item prices at zero (never an error).
    pub fn price_entry(&self, color: &str, size: &str) -> Option<&PriceEntry> {
        self.prices
            .iter()
            .find(|e| e.color_label == color && e.size == size)
    }
}

// =============================================================================
// Pricing Rules
// =============================================================================

/// How a pricing rule turns catalog prices into a selling price.
///
/// The "no rule" case is simply the absence of a rule (`Option::None` from
/// the resolver), not a variant here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(tag = "pricing_model", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PricingModel {
    /// Selling price = list price × rate.
    Rate { rate: Rate },

    /// Selling price = purchase price × (1 + markup).
    Markup { markup: Rate },

    /// Selling price = purchase price × tier multiplier, where the tier is
    /// selected by the total ordered quantity of the product.
    VolumeDiscountMarkup { schedule_id: i64 },
}

/// A pricing rule. Referenced by [`PricingAssignment`] rows.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PricingRule {
    /// Business identifier ("rule_00007").
    pub id: String,

    /// The pricing model and its parameters.
    #[serde(flatten)]
    pub model: PricingModel,
}

/// What a pricing assignment points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum AssignmentTarget {
    Product,
    Category,
    Manufacturer,
}

/// Binds a [`PricingRule`] to a product, category or manufacturer,
/// optionally scoped to one customer group.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PricingAssignment {
    pub id: String,

    /// The rule applied when this assignment wins.
    pub rule_id: String,

    pub target_type: AssignmentTarget,

    /// Id of the product / category / manufacturer, per `target_type`.
    pub target_id: String,

    /// Customer group this assignment is scoped to.
    /// Absent or `"all"` means any group.
    pub customer_group_id: Option<String>,
}

impl PricingAssignment {
    /// Whether this assignment applies to a customer group.
    pub fn applies_to_group(&self, group_id: &str) -> bool {
        match self.customer_group_id.as_deref() {
            None => true,
            Some(crate::ASSIGNMENT_ALL_GROUPS) => true,
            Some(g) => g == group_id,
        }
    }
}

/// One row of a volume-discount schedule: a quantity band selecting the
/// markup multiplier applied to the purchase price.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct VolumeDiscountTier {
    pub schedule_id: i64,

    /// Inclusive lower bound on the total ordered quantity of the product.
    pub min_quantity: i64,

    /// Inclusive upper bound.
    pub max_quantity: i64,

    /// Purchase-price multiplier (18000 bps = ×1.8).
    pub multiplier: Rate,
}

impl VolumeDiscountTier {
    /// Whether a total quantity falls inside this band.
    #[inline]
    pub fn contains(&self, quantity: i64) -> bool {
        self.min_quantity <= quantity && quantity <= self.max_quantity
    }
}

// =============================================================================
// Print Pricing
// =============================================================================

/// One row of a silkscreen print-price schedule: a quantity band selecting
/// the per-unit base print prices.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PrintPricingTier {
    pub schedule_id: i64,

    /// Inclusive lower bound on the group's total quantity.
    pub min_quantity: i64,

    /// Inclusive upper bound.
    pub max_quantity: i64,

    /// Per-unit price of the first print color.
    pub first_color_price: Money,

    /// Per-unit price of each additional print color.
    pub additional_color_price: Money,
}

impl PrintPricingTier {
    /// Whether a total quantity falls inside this band.
    #[inline]
    pub fn contains(&self, quantity: i64) -> bool {
        self.min_quantity <= quantity && quantity <= self.max_quantity
    }
}

/// Maps a (category, customer group) pair to a print-price schedule.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CategoryPricingSchedule {
    pub category_id: String,
    pub customer_group_id: String,
    pub schedule_id: i64,
}

/// Silkscreen print-area size class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum PrintSize {
    Small,
    Medium,
    Large,
}

/// Kind of silkscreen plate a design needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum PlateType {
    /// One plate per spot color.
    Normal,
    /// Color-decomposition plates (photographic designs). Carries an extra
    /// per-color surcharge on top of the setup cost.
    Decomposition,
}

/// Setup cost and per-color surcharge for a (print size, plate type) pair.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PlateCostRule {
    pub print_size: PrintSize,
    pub plate_type: PlateType,

    /// One-time plate preparation cost, per color.
    pub setup_cost: Money,

    /// Per-color print surcharge (decomposition plates).
    pub surcharge_per_color: Money,
}

/// A special-ink price row ("gold", "fluorescent", …).
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SpecialInkOption {
    pub ink_type: String,

    /// Per-unit surcharge for one use of this ink.
    pub unit_cost: Money,
}

/// Per-unit print surcharge attached to a garment tag
/// (e.g. polyester garments need a bleed-blocking underbase).
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TagSurcharge {
    pub tag: String,
    pub per_unit_cost: Money,
}

/// Flat per-unit surcharge for a print-area size class.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SizeSurcharge {
    pub print_size: PrintSize,
    pub per_unit_cost: Money,
}

/// Flat per-unit surcharge for a placement location
/// (sleeves and collars need repositioning between passes).
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct LocationSurcharge {
    pub location: String,
    pub per_unit_cost: Money,
}

// =============================================================================
// Additional Options & Shipping
// =============================================================================

/// A flat per-unit add-on selectable on a processing group
/// (folding, tag cutting, individual wrapping, …).
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct AdditionalOption {
    pub id: String,

    /// Display name. The cost breakdown is keyed by this name.
    pub name: String,

    pub cost_per_item: Money,
}

/// A shipping region: a set of prefectures sharing one flat cost.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ShippingRegion {
    /// Region name. The name `DEFAULT` marks the fallback region.
    pub name: String,

    /// Prefecture names matched as prefixes of address line 1.
    pub prefectures: Vec<String>,

    /// Flat shipping cost for the region.
    pub cost: Money,
}

// =============================================================================
// Customer
// =============================================================================

/// The customer a quote is being prepared for.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CustomerInfo {
    pub id: Option<String>,

    pub name: Option<String>,

    /// Pricing group the customer belongs to. Absent means the default
    /// group `cgrp_00001`.
    pub customer_group_id: Option<String>,

    /// First address line, starting with the prefecture ("東京都…").
    pub address_line1: Option<String>,
}

impl CustomerInfo {
    /// The effective customer group id.
    pub fn group_id(&self) -> &str {
        self.customer_group_id
            .as_deref()
            .unwrap_or(DEFAULT_CUSTOMER_GROUP)
    }
}

// =============================================================================
// Order Input
// =============================================================================

/// One garment line on a processing group.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct OrderLineItem {
    pub product_id: String,

    /// Color label, matched against [`PriceEntry::color_label`].
    pub color: String,

    /// Garment size, matched against [`PriceEntry::size`].
    pub size: String,

    /// Ordered quantity. Non-negative; zero lines are legal while the
    /// user is still typing.
    pub quantity: i64,

    /// Resolved per-unit selling price. Unset on input; the engine fills
    /// it on output.
    pub unit_price: Option<Money>,

    /// Ad-hoc per-unit price typed over the resolved one. The signed
    /// difference is tracked as product discount.
    pub adjusted_unit_price: Option<Money>,

    /// Customer supplies this garment themselves.
    pub is_bring_in: bool,
}

/// One use of a special ink in a silkscreen design.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct SpecialInkUsage {
    pub ink_type: String,

    /// How many of the design's colors use this ink.
    pub count: i64,
}

/// Method-specific print parameters.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(tag = "printMethod", rename_all = "lowercase")]
pub enum PrintMethod {
    /// Silkscreen printing: priced by this engine.
    #[serde(rename_all = "camelCase")]
    Silkscreen {
        /// Print-area size class.
        size: PrintSize,

        /// Number of print colors. Zero-color designs cost nothing.
        color_count: i64,

        /// Special inks used by the design.
        special_inks: Vec<SpecialInkUsage>,

        /// Plate kind the design needs.
        plate_type: PlateType,
    },

    /// DTF transfer printing: priced by an external collaborator
    /// (see `DtfPricer`), summed by this engine.
    #[serde(rename_all = "camelCase")]
    Dtf { width_mm: u32, height_mm: u32 },
}

/// One print design on a processing group.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct PrintDesign {
    pub id: String,

    /// Placement location ("front", "back", "left_sleeve", …).
    pub location: String,

    #[serde(flatten)]
    pub method: PrintMethod,
}

/// A free-form priced line (custom work, samples). Priced by the author,
/// no rule resolution.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ExtraLineItem {
    pub name: String,
    pub unit_price: Money,
    pub quantity: i64,
}

impl ExtraLineItem {
    /// Line total (unit price × quantity).
    #[inline]
    pub fn line_total(&self) -> Money {
        self.unit_price.multiply_quantity(self.quantity)
    }
}

/// One logical sub-order within a quote: its own garments, designs and
/// options. Costs are computed per group, then rolled up.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ProcessingGroup {
    pub id: String,

    pub name: String,

    /// Ordered garment lines.
    pub items: Vec<OrderLineItem>,

    /// Print designs applied to every garment in the group.
    pub designs: Vec<PrintDesign>,

    /// Selected additional options (ids into the option catalog).
    pub selected_option_ids: Vec<String>,

    /// Free-form custom lines.
    pub custom_items: Vec<ExtraLineItem>,

    /// Sample lines.
    pub sample_items: Vec<ExtraLineItem>,

    /// Bring-in fee mode: charge the per-unit bring-in fee for
    /// customer-supplied garments in this group.
    pub bring_in_mode: bool,
}

impl ProcessingGroup {
    /// Total garment quantity across all lines.
    pub fn total_quantity(&self) -> i64 {
        self.items.iter().map(|i| i.quantity).sum()
    }

    /// Total quantity ordered of one product, across all its colors and
    /// sizes in this group. Drives volume-discount tier selection.
    pub fn product_quantity(&self, product_id: &str) -> i64 {
        self.items
            .iter()
            .filter(|i| i.product_id == product_id)
            .map(|i| i.quantity)
            .sum()
    }
}

/// A complete quote request: the customer plus their processing groups.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct QuoteRequest {
    pub customer: CustomerInfo,

    pub groups: Vec<ProcessingGroup>,

    /// Repeat of a previous job: plates already exist, so every group's
    /// setup cost is waived.
    pub is_reorder: bool,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn product_with_prices() -> Product {
        Product {
            id: "prod_00001".to_string(),
            manufacturer_id: "mfr_00001".to_string(),
            category_id: "cat_00001".to_string(),
            name: "Heavyweight Tee".to_string(),
            tags: vec![],
            prices: vec![
                PriceEntry {
                    color_label: "White".to_string(),
                    size: "M".to_string(),
                    list_price: Money::from_yen(1000),
                    purchase_price: Money::from_yen(500),
                },
                PriceEntry {
                    color_label: "Navy".to_string(),
                    size: "M".to_string(),
                    list_price: Money::from_yen(1100),
                    purchase_price: Money::from_yen(550),
                },
            ],
            created_at: Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap(),
            updated_at: Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap(),
        }
    }

    #[test]
    fn test_price_entry_lookup() {
        let product = product_with_prices();
        let entry = product.price_entry("Navy", "M").unwrap();
        assert_eq!(entry.purchase_price.yen(), 550);

        assert!(product.price_entry("Navy", "XL").is_none());
        assert!(product.price_entry("Red", "M").is_none());
    }

    #[test]
    fn test_assignment_group_filter() {
        let mut assignment = PricingAssignment {
            id: "asg_00001".to_string(),
            rule_id: "rule_00001".to_string(),
            target_type: AssignmentTarget::Product,
            target_id: "prod_00001".to_string(),
            customer_group_id: None,
        };
        assert!(assignment.applies_to_group("cgrp_00001"));

        assignment.customer_group_id = Some("all".to_string());
        assert!(assignment.applies_to_group("cgrp_00099"));

        assignment.customer_group_id = Some("cgrp_00002".to_string());
        assert!(assignment.applies_to_group("cgrp_00002"));
        assert!(!assignment.applies_to_group("cgrp_00001"));
    }

    #[test]
    fn test_tier_bounds_inclusive() {
        let tier = VolumeDiscountTier {
            schedule_id: 1,
            min_quantity: 10,
            max_quantity: 49,
            multiplier: Rate::from_bps(18_000),
        };
        assert!(!tier.contains(9));
        assert!(tier.contains(10));
        assert!(tier.contains(49));
        assert!(!tier.contains(50));
    }

    #[test]
    fn test_group_quantities() {
        let group = ProcessingGroup {
            id: "grp_00001".to_string(),
            name: "Main".to_string(),
            items: vec![
                OrderLineItem {
                    product_id: "prod_00001".to_string(),
                    color: "White".to_string(),
                    size: "M".to_string(),
                    quantity: 20,
                    unit_price: None,
                    adjusted_unit_price: None,
                    is_bring_in: false,
                },
                OrderLineItem {
                    product_id: "prod_00001".to_string(),
                    color: "Navy".to_string(),
                    size: "L".to_string(),
                    quantity: 10,
                    unit_price: None,
                    adjusted_unit_price: None,
                    is_bring_in: false,
                },
                OrderLineItem {
                    product_id: "prod_00002".to_string(),
                    color: "White".to_string(),
                    size: "M".to_string(),
                    quantity: 5,
                    unit_price: None,
                    adjusted_unit_price: None,
                    is_bring_in: false,
                },
            ],
            designs: vec![],
            selected_option_ids: vec![],
            custom_items: vec![],
            sample_items: vec![],
            bring_in_mode: false,
        };
        assert_eq!(group.total_quantity(), 35);
        assert_eq!(group.product_quantity("prod_00001"), 30);
        assert_eq!(group.product_quantity("prod_00002"), 5);
        assert_eq!(group.product_quantity("prod_00099"), 0);
    }

    #[test]
    fn test_customer_group_default() {
        let customer = CustomerInfo {
            id: None,
            name: None,
            customer_group_id: None,
            address_line1: None,
        };
        assert_eq!(customer.group_id(), "cgrp_00001");

        let customer = CustomerInfo {
            customer_group_id: Some("cgrp_00005".to_string()),
            ..customer
        };
        assert_eq!(customer.group_id(), "cgrp_00005");
    }

    #[test]
    fn test_pricing_model_serde_tag() {
        let rule = PricingRule {
            id: "rule_00001".to_string(),
            model: PricingModel::VolumeDiscountMarkup { schedule_id: 3 },
        };
        let json = serde_json::to_string(&rule).unwrap();
        assert!(json.contains("\"pricing_model\":\"VOLUME_DISCOUNT_MARKUP\""));

        let parsed: PricingRule = serde_json::from_str(&json).unwrap();
        assert_eq!(
            parsed.model,
            PricingModel::VolumeDiscountMarkup { schedule_id: 3 }
        );
    }

    #[test]
    fn test_print_method_serde_tag() {
        let design = PrintDesign {
            id: "dsn_00001".to_string(),
            location: "front".to_string(),
            method: PrintMethod::Dtf {
                width_mm: 200,
                height_mm: 150,
            },
        };
        let json = serde_json::to_string(&design).unwrap();
        assert!(json.contains("\"printMethod\":\"dtf\""));
    }
}
