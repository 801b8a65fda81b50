//! # dealcalc-core: Discount and Price Composition Engine
//!
//! Everything needed to price a purchase under stacked promotions: quantity
//! discounts, spend-and-save thresholds, other discounts, coupons, promo
//! codes, sales tax, and shipping. Pure functions with zero I/O.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Dealcalc Architecture                            │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    apps/cli (dealcalc)                          │   │
//! │  │    params.json ──► config defaults ──► validate ──► render      │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ dealcalc-core (THIS CRATE) ★                    │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │ calculator│  │ pipeline  │  │ quantity  │  │ validation│  │   │
//! │  │   │  session  │─►│  + trace  │─►│ spend_save│  │  parsing  │  │   │
//! │  │   └───────────┘  └───────────┘  │ discount  │  └───────────┘  │   │
//! │  │                                 │   cart    │                  │   │
//! │  │   ┌───────────┐  ┌───────────┐  └───────────┘  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │                 │  format   │  │   │
//! │  │   └───────────┘  └───────────┘                 └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO FLOATING-POINT MONEY • EVERY INPUT HAS A RESULT   │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`money`] - Money (cents) and Rate (basis points)
//! - [`types`] - Input, output, and rule types
//! - [`discount`] - Percentage / fixed discount primitives
//! - [`cart`] - Cart subtotal and unit count
//! - [`quantity`] - Quantity-discount selection and unit pricing
//! - [`spend_save`] - Spend-and-save selection
//! - [`pipeline`] - Ordered price composition
//! - [`trace`] - Step trace labels and recorder
//! - [`calculator`] - Editable pricing session
//! - [`validation`] - Input checks and text parsing
//! - [`format`] - Display strings
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use dealcalc_core::{calculate, CalculationParams, CartItem, Money, QuantityDiscountRule,
//!     QuantityStrategy, Rate};
//!
//! let mut params = CalculationParams::cart(vec![
//!     CartItem::new("shirt", "Shirt", Money::from_dollars(50), 4),
//! ]);
//! params.quantity_rules.push(QuantityDiscountRule::new(
//!     2,
//!     Rate::from_bps(8000), // pay 80% on two units
//!     QuantityStrategy::Highest,
//! ));
//!
//! let calculation = calculate(&params);
//! assert_eq!(calculation.result.pre_tax_price, Money::from_dollars(180));
//! assert_eq!(calculation.steps.len(), 3); // subtotal, quantity discount, shipping
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod calculator;
pub mod cart;
pub mod discount;
pub mod error;
pub mod format;
pub mod money;
pub mod pipeline;
pub mod quantity;
pub mod spend_save;
pub mod trace;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use calculator::{Calculator, CalculatorMode, CartItemUpdate, RuleUpdate};
pub use discount::{apply_discount, discount_amount};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::{Money, Rate};
pub use pipeline::{calculate, compute_result};
pub use trace::compute_steps;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum lines allowed in a single cart.
pub const MAX_CART_ITEMS: usize = 100;

/// Maximum quantity of a single cart line.
///
/// Catches typos such as 1000 for 10.
pub const MAX_ITEM_QUANTITY: u32 = 999;
