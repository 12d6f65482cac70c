//! # Cost Aggregation
//!
//! Orchestrates every calculator across the order's processing groups and
//! produces the final quote breakdown.
//!
//! ## Control Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      estimate_order                                     │
//! │                                                                         │
//! │  validate_request  ──  the only error path                              │
//! │       │                                                                 │
//! │       ▼  per processing group                                           │
//! │  price_line_items ──► calculate_print_cost ──► calculate_setup_cost    │
//! │       ──► calculate_options_cost ──► custom/sample line totals          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  roll up group subtotals ──► calculate_shipping ──► tax ──► per-unit    │
//! │                                                                         │
//! │  Tax FLOORS to the yen while unit prices CEIL to 10 yen upstream;       │
//! │  the asymmetry is intentional and matches the issued invoices.          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The same request against the same snapshot always yields bit-identical
//! output (all breakdown maps are ordered), so the surrounding UI may
//! recompute on every keystroke and simply discard stale results.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;
use ts_rs::TS;

use crate::error::CoreResult;
use crate::money::Money;
use crate::options::{calculate_options_cost, OptionsPricing};
use crate::print_cost::{calculate_print_cost, DesignCost, DtfPricer, PrintCostBreakdown};
use crate::setup_cost::{calculate_setup_cost, SetupPricing};
use crate::shipping::calculate_shipping;
use crate::snapshot::PricingSnapshot;
use crate::types::{OrderLineItem, QuoteRequest};
use crate::unit_price::price_line_items;
use crate::validation::validate_request;

// =============================================================================
// Output Records
// =============================================================================

/// The cost breakdown of one processing group.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct GroupCost {
    pub group_id: String,

    pub name: String,

    /// Total garment quantity of the group.
    pub quantity: i64,

    /// The group's lines, each annotated with its resolved unit price.
    pub items: Vec<OrderLineItem>,

    /// Charged garment cost (ad-hoc adjustments already applied).
    pub garment_cost: Money,

    /// Signed discount granted through ad-hoc price adjustments.
    pub product_discount: Money,

    /// Bring-in handling fees.
    pub bring_in_fee: Money,

    /// Print cost by category.
    pub print_cost: PrintCostBreakdown,

    /// Print cost per design.
    pub design_costs: Vec<DesignCost>,

    /// Plate setup cost.
    pub setup_cost: SetupPricing,

    /// Additional-option cost.
    pub options_cost: OptionsPricing,

    /// Free-form custom lines, summed as authored.
    pub custom_cost: Money,

    /// Sample lines, summed as authored.
    pub sample_cost: Money,

    /// Everything above, summed.
    pub subtotal: Money,
}

/// The full quote: order-level totals plus the per-group breakdown.
///
/// Consumed by the quote screens and the PDF renderer; every field is
/// JSON-serializable and covered by the generated TypeScript bindings.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CostDetails {
    /// Sum of all group subtotals, before shipping and tax.
    pub subtotal: Money,

    pub shipping_cost: Money,

    /// Consumption tax on subtotal + shipping, floored to the yen.
    pub tax: Money,

    pub total_with_tax: Money,

    /// Total garment quantity across all groups.
    pub total_quantity: i64,

    /// total_with_tax / total_quantity, rounded half-up. Zero for an
    /// empty order.
    pub per_unit_cost: Money,

    pub garment_cost: Money,

    pub product_discount: Money,

    pub bring_in_fee: Money,

    pub print_cost: PrintCostBreakdown,

    pub setup_cost: Money,

    pub options_cost: Money,

    /// Option costs keyed by display name, merged across groups.
    pub options_by_name: BTreeMap<String, Money>,

    pub custom_cost: Money,

    pub sample_cost: Money,

    pub group_costs: Vec<GroupCost>,
}

// =============================================================================
// Aggregation
// =============================================================================

/// Prices a complete quote request.
///
/// The only error path is boundary validation; with well-shaped input
/// this always produces a number, however partial the snapshot is.
pub fn estimate_order(
    request: &QuoteRequest,
    snapshot: &PricingSnapshot,
    dtf: &dyn DtfPricer,
) -> CoreResult<CostDetails> {
    validate_request(request)?;

    let mut group_costs = Vec::with_capacity(request.groups.len());

    let mut subtotal = Money::zero();
    let mut total_quantity = 0i64;
    let mut garment_cost = Money::zero();
    let mut product_discount = Money::zero();
    let mut bring_in_fee = Money::zero();
    let mut print_cost = PrintCostBreakdown::default();
    let mut setup_cost = Money::zero();
    let mut options_cost = Money::zero();
    let mut options_by_name: BTreeMap<String, Money> = BTreeMap::new();
    let mut custom_cost = Money::zero();
    let mut sample_cost = Money::zero();

    for group in &request.groups {
        let garments = price_line_items(group, &request.customer, snapshot);
        let print = calculate_print_cost(group, &request.customer, snapshot, dtf);
        let setup = calculate_setup_cost(group, snapshot, request.is_reorder);
        let options = calculate_options_cost(group, snapshot);

        let group_custom: Money = group.custom_items.iter().map(|l| l.line_total()).sum();
        let group_sample: Money = group.sample_items.iter().map(|l| l.line_total()).sum();

        let group_subtotal = garments.garment_cost
            + garments.bring_in_fee
            + print.breakdown.total
            + setup.total
            + options.total
            + group_custom
            + group_sample;

        debug!(
            group_id = %group.id,
            quantity = group.total_quantity(),
            subtotal = %group_subtotal,
            "Costed processing group"
        );

        subtotal += group_subtotal;
        total_quantity += group.total_quantity();
        garment_cost += garments.garment_cost;
        product_discount += garments.product_discount;
        bring_in_fee += garments.bring_in_fee;
        print_cost += print.breakdown;
        setup_cost += setup.total;
        options_cost += options.total;
        for (name, cost) in &options.by_name {
            *options_by_name.entry(name.clone()).or_default() += *cost;
        }
        custom_cost += group_custom;
        sample_cost += group_sample;

        group_costs.push(GroupCost {
            group_id: group.id.clone(),
            name: group.name.clone(),
            quantity: group.total_quantity(),
            items: garments.items,
            garment_cost: garments.garment_cost,
            product_discount: garments.product_discount,
            bring_in_fee: garments.bring_in_fee,
            print_cost: print.breakdown,
            design_costs: print.designs,
            setup_cost: setup,
            options_cost: options,
            custom_cost: group_custom,
            sample_cost: group_sample,
            subtotal: group_subtotal,
        });
    }

    let shipping_cost = calculate_shipping(subtotal, &request.customer, snapshot);
    let tax = (subtotal + shipping_cost).calculate_tax(snapshot.defaults.tax_rate);
    let total_with_tax = subtotal + shipping_cost + tax;
    let per_unit_cost = total_with_tax.per_unit(total_quantity);

    debug!(
        subtotal = %subtotal,
        shipping = %shipping_cost,
        tax = %tax,
        total = %total_with_tax,
        "Quote totals"
    );

    Ok(CostDetails {
        subtotal,
        shipping_cost,
        tax,
        total_with_tax,
        total_quantity,
        per_unit_cost,
        garment_cost,
        product_discount,
        bring_in_fee,
        print_cost,
        setup_cost,
        options_cost,
        options_by_name,
        custom_cost,
        sample_cost,
        group_costs,
    })
}

// =============================================================================
// Unit Tests
// =============================================================================
