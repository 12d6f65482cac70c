//! # printcraft-core: Pure Business Logic for Printcraft
//!
//! This crate is the **heart** of the Printcraft back office. It contains
//! the print-job cost-estimation engine as pure functions with zero I/O
//! dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Printcraft Architecture                             │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  Quote / Order Screens (frontend)               │   │
//! │  │   Customer ──► Processing Groups ──► Live Quote ──► PDF         │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ recompute on every input change        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │             ★ printcraft-core (THIS CRATE) ★                    │   │
//! │  │                                                                 │   │
//! │  │   ┌──────────┐ ┌───────────┐ ┌────────────┐ ┌─────────────┐   │   │
//! │  │   │  money   │ │ resolver  │ │ unit_price │ │ print_cost  │   │   │
//! │  │   └──────────┘ └───────────┘ └────────────┘ └─────────────┘   │   │
//! │  │   ┌──────────┐ ┌───────────┐ ┌────────────┐ ┌─────────────┐   │   │
//! │  │   │ setup    │ │ options   │ │  shipping  │ │  estimate   │   │   │
//! │  │   └──────────┘ └───────────┘ └────────────┘ └─────────────┘   │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │          Data-loading layer (assembles PricingSnapshot)         │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, PricingRule, ProcessingGroup, …)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`snapshot`] - Typed repository over the in-memory reference tables
//! - [`error`] / [`validation`] - Boundary validation, the only error path
//! - [`resolver`] - Which pricing rule applies to a product/customer pair
//! - [`unit_price`] - Garment unit prices through ordered fallback chains
//! - [`print_cost`] - Silkscreen tiering, surcharges, the DTF seam
//! - [`setup_cost`] - One-time plate costs
//! - [`options`] - Flat per-unit option surcharges
//! - [`shipping`] - Shipping-zone lookup
//! - [`estimate`] - The aggregator producing [`estimate::CostDetails`]
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: same snapshot + same request = bit-identical quote
//! 2. **No I/O**: database, network, file system access is FORBIDDEN here
//! 3. **Integer Money**: whole yen (i64), rates in basis points, no floats
//! 4. **Degrade, don't throw**: missing reference data prices at zero;
//!    only malformed input shape is an error
//!
//! ## Example Usage
//!
//! ```rust
//! use printcraft_core::estimate::estimate_order;
//! use printcraft_core::print_cost::ZeroDtf;
//! use printcraft_core::snapshot::PricingSnapshot;
//! use printcraft_core::types::{CustomerInfo, QuoteRequest};
//!
//! // An empty snapshot (tables still loading) still produces a quote
//! let request = QuoteRequest {
//!     customer: CustomerInfo {
//!         id: None,
//!         name: None,
//!         customer_group_id: None,
//!         address_line1: None,
//!     },
//!     groups: vec![],
//!     is_reorder: false,
//! };
//! let details = estimate_order(&request, &PricingSnapshot::default(), &ZeroDtf).unwrap();
//! assert_eq!(details.total_with_tax.yen(), 0);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod estimate;
pub mod money;
pub mod options;
pub mod print_cost;
pub mod resolver;
pub mod setup_cost;
pub mod shipping;
pub mod snapshot;
pub mod types;
pub mod unit_price;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use printcraft_core::Money` instead of
// `use printcraft_core::money::Money`

pub use error::{CoreError, CoreResult, ValidationError};
pub use estimate::{estimate_order, CostDetails, GroupCost};
pub use money::{Money, Rate};
pub use print_cost::{DtfPricer, ZeroDtf};
pub use snapshot::{PricingDefaults, PricingSnapshot};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Customer group assumed when a customer carries none.
pub const DEFAULT_CUSTOMER_GROUP: &str = "cgrp_00001";

/// Wildcard customer group on pricing assignments: matches every customer.
pub const ASSIGNMENT_ALL_GROUPS: &str = "all";

/// Universal customer group in the category-schedule table, tried after
/// the customer's own group.
pub const UNIVERSAL_SCHEDULE_GROUP: &str = "1";

/// Print-price schedule used when the category-schedule table has no row.
pub const DEFAULT_PRINT_SCHEDULE_ID: i64 = 1;

/// Name of the fallback shipping region.
pub const DEFAULT_SHIPPING_REGION: &str = "DEFAULT";

/// List-price factor used when a fallback chain reaches an entry with no
/// purchase price: list × 0.52.
pub const LIST_PRICE_FALLBACK: Rate = Rate::from_bps(5200);
