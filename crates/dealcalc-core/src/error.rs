//! # Error Types
//!
//! Domain-specific error types for dealcalc-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  dealcalc-core errors (this file)                                      │
//! │  ├── CoreError        - Session editing failures                       │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  CLI errors (apps/cli)                                                 │
//! │  └── CliError         - Config, params file, and output problems       │
//! │                                                                         │
//! │  The pricing pipeline itself has NO error type: every input it         │
//! │  accepts produces a result (clamped, zeroed, or "no rule applied").    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (id, field, limit)
//! 3. Errors are enum variants, never String

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Errors raised while editing calculator input.
#[derive(Debug, Error)]
pub enum CoreError {
    /// No cart line has the given id.
    #[error("Cart item not found: {0}")]
    CartItemNotFound(String),

    /// No spend-and-save or quantity rule has the given id.
    #[error("Discount rule not found: {0}")]
    RuleNotFound(String),

    /// Cart has reached the maximum number of lines.
    #[error("Cart cannot have more than {max} items")]
    CartTooLarge { max: usize },

    /// Line quantity exceeds the maximum allowed.
    #[error("Quantity {requested} exceeds maximum allowed ({max})")]
    QuantityTooLarge { requested: u32, max: u32 },

    /// Text could not be read as an amount.
    ///
    /// ## User Workflow
    /// ```text
    /// Price field: "abc"
    ///      │
    ///      ▼
    /// parse_amount_strict("abc")
    ///      │
    ///      ▼
    /// InvalidAmount { input: "abc" }
    ///      │
    ///      ▼
    /// UI shows: "Please enter a valid number"
    /// ```
    #[error("Invalid amount: '{input}'")]
    InvalidAmount { input: String },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These occur when caller input doesn't meet requirements. The pricing
/// engine assumes input has already passed through these checks.
#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Value cannot be negative.
    #[error("{field} cannot be negative")]
    Negative { field: String },

    /// Fixed discount larger than the price it applies to.
    #[error("{field} cannot exceed the current price")]
    ExceedsPrice { field: String },

    /// Invalid format (e.g., not a number).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
