//! # Error Types
//!
//! Domain-specific error types for printcraft-core.
//!
//! ## Error Policy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Policy                                    │
//! │                                                                         │
//! │  Malformed input SHAPE (negative quantity, negative price, …)           │
//! │  └── ValidationError → CoreError → rejected at the boundary             │
//! │                                                                         │
//! │  Missing or unmatched REFERENCE DATA (no rule, no tier, no region, …)   │
//! │  └── NEVER an error: every lookup degrades to a documented              │
//! │      zero/default so a half-loaded snapshot still yields a number       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (group id, field name, value)
//! 3. Errors are enum variants, never String

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Errors surfaced by the estimation engine.
///
/// The engine's only failure class is malformed input shape; everything
/// else is a silent, documented fallback.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Input failed boundary validation (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input-shape validation errors.
///
/// These occur when an order payload doesn't meet structural requirements.
/// Raised before any costing runs, so a quote is never half-computed.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// Numeric value must not be negative.
    #[error("{field} must not be negative (got {value}) in group {group_id}")]
    Negative {
        group_id: String,
        field: String,
        value: i64,
    },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
