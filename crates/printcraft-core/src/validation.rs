//! # Validation Module
//!
//! Boundary validation for quote requests.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Quote screens (TypeScript)                                   │
//! │  ├── Basic format checks (empty, length)                               │
//! │  └── Immediate user feedback                                           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE (entry of estimate_order)                        │
//! │  ├── Shape checks: no negative quantities, prices or color counts      │
//! │  └── Rejected BEFORE any costing runs: a quote is never half-computed  │
//! │                                                                         │
//! │  NOT validated here: reference-data quality. Unknown products,         │
//! │  unmatched tiers and missing regions are silent zero-cost fallbacks.   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Zero quantities are legal: lines exist while the user is still typing,
//! and the engine prices them at zero.

use crate::error::ValidationError;
use crate::types::{PrintMethod, ProcessingGroup, QuoteRequest};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Validates the shape of a full quote request.
///
/// ## Example
/// ```rust
/// use printcraft_core::types::{CustomerInfo, QuoteRequest};
/// use printcraft_core::validation::validate_request;
///
/// let request = QuoteRequest {
///     customer: CustomerInfo {
///         id: None,
///         name: None,
///         customer_group_id: None,
///         address_line1: None,
///     },
///     groups: vec![],
///     is_reorder: false,
/// };
/// assert!(validate_request(&request).is_ok());
/// ```
pub fn validate_request(request: &QuoteRequest) -> ValidationResult<()> {
    for group in &request.groups {
        validate_group(group)?;
    }
    Ok(())
}

/// Validates the shape of one processing group.
pub fn validate_group(group: &ProcessingGroup) -> ValidationResult<()> {
    for item in &group.items {
        validate_non_negative(&group.id, "quantity", item.quantity)?;
        if let Some(adjusted) = item.adjusted_unit_price {
            validate_non_negative(&group.id, "adjusted_unit_price", adjusted.yen())?;
        }
    }

    for design in &group.designs {
        if let PrintMethod::Silkscreen {
            color_count,
            special_inks,
            ..
        } = &design.method
        {
            validate_non_negative(&group.id, "color_count", *color_count)?;
            for ink in special_inks {
                validate_non_negative(&group.id, "special_ink count", ink.count)?;
            }
        }
    }

    for extra in group.custom_items.iter().chain(group.sample_items.iter()) {
        validate_non_negative(&group.id, "quantity", extra.quantity)?;
    }

    Ok(())
}

/// Rejects negative numeric values.
fn validate_non_negative(group_id: &str, field: &str, value: i64) -> ValidationResult<()> {
    if value < 0 {
        return Err(ValidationError::Negative {
            group_id: group_id.to_string(),
            field: field.to_string(),
            value,
        });
    }
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
