//! # Pricing-Rule Resolution
//!
//! Decides which pricing rule applies to a product/customer pair.
//!
//! ## Resolution Order
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │              Assignment Precedence (first match wins)                   │
//! │                                                                         │
//! │  1. target_type = product       target_id = product.id                 │
//! │  2. target_type = category      target_id = product.category_id        │
//! │  3. target_type = manufacturer  target_id = product.manufacturer_id    │
//! │                                                                         │
//! │  An assignment only matches when its customer_group_id is absent,      │
//! │  "all", or equal to the customer's group.                              │
//! │                                                                         │
//! │  No match at any level → None → the rule-less fallback chain prices    │
//! │  the item. "No rule" is a normal outcome, never an error.              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Once an assignment wins there is no fallthrough: a winning assignment
//! whose rule id dangles resolves to `None` rather than trying the next
//! precedence level.

use crate::snapshot::PricingSnapshot;
use crate::types::{AssignmentTarget, CustomerInfo, PricingRule, Product};

/// Resolves the pricing rule for a product and customer.
///
/// Pure function of its inputs: identical snapshot + identical pair always
/// resolve identically. Ties within one precedence level go to the first
/// assignment in table order.
pub fn resolve_pricing_rule<'a>(
    product: &Product,
    customer: &CustomerInfo,
    snapshot: &'a PricingSnapshot,
) -> Option<&'a PricingRule> {
    let group_id = customer.group_id();

    let levels: [(AssignmentTarget, &str); 3] = [
        (AssignmentTarget::Product, &product.id),
        (AssignmentTarget::Category, &product.category_id),
        (AssignmentTarget::Manufacturer, &product.manufacturer_id),
    ];

    for (target_type, target_id) in levels {
        let winner = snapshot.assignments().iter().find(|a| {
            a.target_type == target_type && a.target_id == target_id && a.applies_to_group(group_id)
        });
        if let Some(assignment) = winner {
            return snapshot.rule(&assignment.rule_id);
        }
    }

    None
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Rate;
    use crate::types::{PricingAssignment, PricingModel};
    use chrono::{TimeZone, Utc};

    fn product() -> Product {
        Product {
            id: "prod_00001".to_string(),
            manufacturer_id: "mfr_00001".to_string(),
            category_id: "cat_00001".to_string(),
            name: "Heavyweight Tee".to_string(),
            tags: vec![],
            prices: vec![],
            created_at: Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap(),
            updated_at: Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap(),
        }
    }

    fn customer(group: Option<&str>) -> CustomerInfo {
        CustomerInfo {
            id: None,
            name: None,
            customer_group_id: group.map(str::to_string),
            address_line1: None,
        }
    }

    fn rule(id: &str, rate_bps: u32) -> PricingRule {
        PricingRule {
            id: id.to_string(),
            model: PricingModel::Rate {
                rate: Rate::from_bps(rate_bps),
            },
        }
    }

    fn assignment(
        id: &str,
        rule_id: &str,
        target_type: AssignmentTarget,
        target_id: &str,
        group: Option<&str>,
    ) -> PricingAssignment {
        PricingAssignment {
            id: id.to_string(),
            rule_id: rule_id.to_string(),
            target_type,
            target_id: target_id.to_string(),
            customer_group_id: group.map(str::to_string),
        }
    }

    #[test]
    fn test_product_assignment_beats_category_and_manufacturer() {
        let snapshot = PricingSnapshot {
            rules: vec![
                rule("rule_p", 8000),
                rule("rule_c", 8500),
                rule("rule_m", 9000),
            ],
            assignments: vec![
                assignment(
                    "asg_1",
                    "rule_m",
                    AssignmentTarget::Manufacturer,
                    "mfr_00001",
                    None,
                ),
                assignment(
                    "asg_2",
                    "rule_c",
                    AssignmentTarget::Category,
                    "cat_00001",
                    None,
                ),
                assignment(
                    "asg_3",
                    "rule_p",
                    AssignmentTarget::Product,
                    "prod_00001",
                    None,
                ),
            ],
            ..PricingSnapshot::default()
        };
        let resolved = resolve_pricing_rule(&product(), &customer(None), &snapshot).unwrap();
        assert_eq!(resolved.id, "rule_p");
    }

    #[test]
    fn test_category_beats_manufacturer() {
        let snapshot = PricingSnapshot {
            rules: vec![rule("rule_c", 8500), rule("rule_m", 9000)],
            assignments: vec![
                assignment(
                    "asg_1",
                    "rule_m",
                    AssignmentTarget::Manufacturer,
                    "mfr_00001",
                    None,
                ),
                assignment(
                    "asg_2",
                    "rule_c",
                    AssignmentTarget::Category,
                    "cat_00001",
                    None,
                ),
            ],
            ..PricingSnapshot::default()
        };
        let resolved = resolve_pricing_rule(&product(), &customer(None), &snapshot).unwrap();
        assert_eq!(resolved.id, "rule_c");
    }

    #[test]
    fn test_group_filter_excludes_assignment() {
        let snapshot = PricingSnapshot {
            rules: vec![rule("rule_p", 8000), rule("rule_c", 8500)],
            assignments: vec![
                // Product-level assignment scoped to another group
                assignment(
                    "asg_1",
                    "rule_p",
                    AssignmentTarget::Product,
                    "prod_00001",
                    Some("cgrp_00002"),
                ),
                // Category-level assignment open to all groups
                assignment(
                    "asg_2",
                    "rule_c",
                    AssignmentTarget::Category,
                    "cat_00001",
                    Some("all"),
                ),
            ],
            ..PricingSnapshot::default()
        };
        // Default group customer skips the scoped product assignment
        let resolved = resolve_pricing_rule(&product(), &customer(None), &snapshot).unwrap();
        assert_eq!(resolved.id, "rule_c");

        // Matching-group customer wins the product assignment
        let resolved =
            resolve_pricing_rule(&product(), &customer(Some("cgrp_00002")), &snapshot).unwrap();
        assert_eq!(resolved.id, "rule_p");
    }

    #[test]
    fn test_no_assignment_resolves_to_none() {
        let snapshot = PricingSnapshot {
            rules: vec![rule("rule_p", 8000)],
            ..PricingSnapshot::default()
        };
        assert!(resolve_pricing_rule(&product(), &customer(None), &snapshot).is_none());
    }

    #[test]
    fn test_dangling_rule_id_does_not_fall_through() {
        let snapshot = PricingSnapshot {
            rules: vec![rule("rule_c", 8500)],
            assignments: vec![
                // Winning product assignment referencing a rule that is
                // not (yet) loaded
                assignment(
                    "asg_1",
                    "rule_missing",
                    AssignmentTarget::Product,
                    "prod_00001",
                    None,
                ),
                assignment(
                    "asg_2",
                    "rule_c",
                    AssignmentTarget::Category,
                    "cat_00001",
                    None,
                ),
            ],
            ..PricingSnapshot::default()
        };
        assert!(resolve_pricing_rule(&product(), &customer(None), &snapshot).is_none());
    }

    #[test]
    fn test_first_assignment_in_table_order_wins_within_level() {
        let snapshot = PricingSnapshot {
            rules: vec![rule("rule_a", 8000), rule("rule_b", 9000)],
            assignments: vec![
                assignment(
                    "asg_1",
                    "rule_a",
                    AssignmentTarget::Product,
                    "prod_00001",
                    None,
                ),
                assignment(
                    "asg_2",
                    "rule_b",
                    AssignmentTarget::Product,
                    "prod_00001",
                    None,
                ),
            ],
            ..PricingSnapshot::default()
        };
        let resolved = resolve_pricing_rule(&product(), &customer(None), &snapshot).unwrap();
        assert_eq!(resolved.id, "rule_a");
    }
}
