//! # Shipping Cost
//!
//! Maps the delivery address to a flat shipping cost.
//!
//! ## Lookup Order
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  subtotal ≥ free-shipping threshold ───────────────► ¥0                 │
//! │  first region with a prefecture prefixing address 1 ► region cost       │
//! │  otherwise, the DEFAULT region ─────────────────────► its cost          │
//! │  no DEFAULT region loaded ──────────────────────────► ¥0                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Address line 1 starts with the prefecture ("東京都…", "大阪府…"), so a
//! plain prefix match resolves the region without parsing the address.

use crate::money::Money;
use crate::snapshot::PricingSnapshot;
use crate::types::CustomerInfo;
use crate::DEFAULT_SHIPPING_REGION;

/// Shipping cost for an order subtotal going to a customer address.
pub fn calculate_shipping(
    subtotal: Money,
    customer: &CustomerInfo,
    snapshot: &PricingSnapshot,
) -> Money {
    if subtotal >= snapshot.defaults.free_shipping_threshold {
        return Money::zero();
    }

    let address = customer.address_line1.as_deref().unwrap_or("");

    let matched = snapshot.shipping_regions().iter().find(|region| {
        region
            .prefectures
            .iter()
            .any(|prefecture| !prefecture.is_empty() && address.starts_with(prefecture.as_str()))
    });

    matched
        .or_else(|| {
            snapshot
                .shipping_regions()
                .iter()
                .find(|region| region.name == DEFAULT_SHIPPING_REGION)
        })
        .map(|region| region.cost)
        .unwrap_or_default()
}

// =============================================================================
// Unit Tests
// =============================================================================
