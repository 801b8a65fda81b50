//! # Validation Module
//!
//! Input validation for calculator input.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Parsing (CLI / frontend)                                     │
//! │  ├── Text → Money / Rate (parse_amount, parse_rate)                    │
//! │  └── JSON → CalculationParams (serde)                                  │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  ├── Field checks (price range, tax ceiling, quantity limits)          │
//! │  └── validate_params: whole snapshot before calculating                │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Pipeline                                                     │
//! │  └── Total over any input: clamps, zeroes, skips inert discounts       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The pipeline never fails, so nothing here is required for correctness.
//! These checks catch input that is almost certainly a typo.
//!
//! ## Usage
//! ```rust
//! use dealcalc_core::validation::{validate_price, validate_quantity};
//! use dealcalc_core::Money;
//!
//! validate_price(Money::from_cents(4999)).unwrap();
//! validate_quantity(5).unwrap();
//! ```

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::money::{Money, Rate};
use crate::types::{CalculationParams, Discount, QuantityDiscountRule, SpendSaveRule};
use crate::{MAX_CART_ITEMS, MAX_ITEM_QUANTITY};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Largest price accepted: $999,999.00.
pub const MAX_PRICE: Money = Money::from_cents(99_999_900);

/// Highest sales tax accepted: 50%.
pub const MAX_TAX_RATE: Rate = Rate::from_bps(5_000);

const MAX_NAME_LENGTH: usize = 200;

// =============================================================================
// Amount Validators
// =============================================================================

/// Validates a price.
///
/// ## Rules
/// - Must be non-negative (zero is allowed)
/// - Must not exceed [`MAX_PRICE`]
///
/// ## Example
/// ```rust
/// use dealcalc_core::validation::validate_price;
/// use dealcalc_core::Money;
///
/// assert!(validate_price(Money::from_cents(1099)).is_ok());
/// assert!(validate_price(Money::zero()).is_ok());
/// assert!(validate_price(Money::from_cents(-100)).is_err());
/// ```
pub fn validate_price(price: Money) -> ValidationResult<()> {
    check_amount("price", price)
}

fn check_amount(field: &str, amount: Money) -> ValidationResult<()> {
    if amount.is_negative() {
        return Err(ValidationError::Negative {
            field: field.to_string(),
        });
    }

    if amount > MAX_PRICE {
        return Err(ValidationError::OutOfRange {
            field: field.to_string(),
            min: 0,
            max: MAX_PRICE.dollars(),
        });
    }

    Ok(())
}

/// Validates a discount.
///
/// ## Rules
/// - Percentages must not exceed 100%
/// - Fixed amounts must not be negative
/// - Fixed amounts must not exceed `max` when one is given (usually the
///   price the discount is about to apply to)
///
/// ## Example
/// ```rust
/// use dealcalc_core::validation::validate_discount;
/// use dealcalc_core::{Discount, Money, Rate};
///
/// assert!(validate_discount(&Discount::percentage(Rate::from_bps(2500)), None).is_ok());
/// assert!(validate_discount(&Discount::percentage(Rate::from_bps(10_001)), None).is_err());
///
/// let five = Discount::fixed(Money::from_dollars(5));
/// assert!(validate_discount(&five, Some(Money::from_dollars(4))).is_err());
/// ```
pub fn validate_discount(discount: &Discount, max: Option<Money>) -> ValidationResult<()> {
    check_discount("discount", discount, max)
}

fn check_discount(field: &str, discount: &Discount, max: Option<Money>) -> ValidationResult<()> {
    match *discount {
        Discount::Percentage(rate) => {
            if rate > Rate::FULL {
                return Err(ValidationError::OutOfRange {
                    field: field.to_string(),
                    min: 0,
                    max: 100,
                });
            }
        }
        Discount::Fixed(amount) => {
            if amount.is_negative() {
                return Err(ValidationError::Negative {
                    field: field.to_string(),
                });
            }
            if max.is_some_and(|max| amount > max) {
                return Err(ValidationError::ExceedsPrice {
                    field: field.to_string(),
                });
            }
        }
    }

    Ok(())
}

/// Validates a sales tax rate.
///
/// ## Rules
/// - Must not exceed [`MAX_TAX_RATE`] (50%). Anything higher is a typo.
pub fn validate_tax_rate(rate: Rate) -> ValidationResult<()> {
    if rate > MAX_TAX_RATE {
        return Err(ValidationError::OutOfRange {
            field: "tax rate".to_string(),
            min: 0,
            max: 50,
        });
    }

    Ok(())
}

// =============================================================================
// Cart Validators
// =============================================================================

/// Validates a cart item name.
///
/// ## Rules
/// - Must not be blank
/// - At most 200 characters
pub fn validate_cart_item_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if name.chars().count() > MAX_NAME_LENGTH {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: MAX_NAME_LENGTH,
        });
    }

    Ok(())
}

/// Validates a line quantity.
///
/// ## Rules
/// - Must be positive (> 0)
/// - Must not exceed MAX_ITEM_QUANTITY (999)
///
/// ## User Workflow
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  Cart: Add Item                                                         │
/// │                                                                         │
/// │  User enters quantity: 5                                               │
/// │       │                                                                 │
/// │       ▼                                                                 │
/// │  validate_quantity(5) ← THIS FUNCTION                                  │
/// │       │                                                                 │
/// │       ├── qty == 0? → Error: "quantity must be positive"               │
/// │       │                                                                 │
/// │       ├── qty > 999? → Error: "quantity must be between 1 and 999"     │
/// │       │                                                                 │
/// │       └── OK → Proceed with add_cart_item                              │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub fn validate_quantity(qty: u32) -> ValidationResult<()> {
    if qty == 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    if qty > MAX_ITEM_QUANTITY {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: i64::from(MAX_ITEM_QUANTITY),
        });
    }

    Ok(())
}

// =============================================================================
// Rule Validators
// =============================================================================

/// Validates a spend-and-save rule: threshold and reduction both positive.
pub fn validate_spend_save_rule(rule: &SpendSaveRule) -> ValidationResult<()> {
    if !rule.threshold.is_positive() {
        return Err(ValidationError::MustBePositive {
            field: "threshold".to_string(),
        });
    }

    if !rule.reduction.is_positive() {
        return Err(ValidationError::MustBePositive {
            field: "reduction".to_string(),
        });
    }

    Ok(())
}

/// Validates a quantity-discount rule.
///
/// ## Rules
/// - `min_quantity` must be positive
/// - `pay_rate` strictly between 0% and 100%: paying nothing or paying full
///   price is not a discount
pub fn validate_quantity_rule(rule: &QuantityDiscountRule) -> ValidationResult<()> {
    if rule.min_quantity == 0 {
        return Err(ValidationError::MustBePositive {
            field: "minimum quantity".to_string(),
        });
    }

    if rule.pay_rate.is_zero() || rule.pay_rate >= Rate::FULL {
        return Err(ValidationError::InvalidFormat {
            field: "pay percentage".to_string(),
            reason: "must be strictly between 0% and 100%".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Snapshot Validator
// =============================================================================

/// Validates a whole calculation snapshot, stopping at the first problem.
///
/// Fixed discounts are checked for sign only. One larger than the price
/// it lands on is legal and clamps to zero in the pipeline.
pub fn validate_params(params: &CalculationParams) -> ValidationResult<()> {
    if params.is_cart_mode() {
        if params.cart_items.len() > MAX_CART_ITEMS {
            return Err(ValidationError::OutOfRange {
                field: "cart items".to_string(),
                min: 1,
                max: MAX_CART_ITEMS as i64,
            });
        }
        for item in &params.cart_items {
            validate_cart_item_name(&item.name)?;
            validate_price(item.price)?;
            validate_quantity(item.quantity)?;
        }
    } else {
        validate_price(params.original_price)?;
    }

    params
        .spend_save_rules
        .iter()
        .try_for_each(validate_spend_save_rule)?;
    params
        .quantity_rules
        .iter()
        .try_for_each(validate_quantity_rule)?;

    if let Some(other) = &params.other_discount {
        check_discount("other discount", &other.discount, None)?;
    }
    if let Some(coupon) = &params.coupon {
        check_discount("coupon", coupon, None)?;
    }
    if let Some(promo) = &params.promo_code {
        check_discount("promo code", promo, None)?;
    }

    validate_tax_rate(params.tax_rate)?;
    check_amount("shipping cost", params.shipping.cost)
}

// =============================================================================
// Text Parsing
// =============================================================================

/// Reads an amount typed by a person, e.g. `"$1,299.99"`.
///
/// Everything except digits and `.` is dropped, then the leading number is
/// read. Input with no number in it reads as zero, so a half-typed field
/// never blocks a calculation. The result is rounded to the cent.
///
/// ## Example
/// ```rust
/// use dealcalc_core::validation::parse_amount;
///
/// assert_eq!(parse_amount("$1,299.99").cents(), 129_999);
/// assert_eq!(parse_amount("abc").cents(), 0);
/// ```
pub fn parse_amount(input: &str) -> Money {
    leading_number(input)
        .map(|value| Money::from_cents((value * 100.0).round() as i64))
        .unwrap_or_default()
}

/// Same as [`parse_amount`], but for percentages: `"8.25%"` is 825 bps.
pub fn parse_rate(input: &str) -> Rate {
    leading_number(input)
        .map(Rate::from_percentage)
        .unwrap_or_default()
}

/// Like [`parse_amount`], but input with no number in it is an error.
pub fn parse_amount_strict(input: &str) -> CoreResult<Money> {
    leading_number(input)
        .map(|value| Money::from_cents((value * 100.0).round() as i64))
        .ok_or_else(|| CoreError::InvalidAmount {
            input: input.to_string(),
        })
}

/// The longest `digits[.digits]` prefix of `input` with every other
/// character removed. `"1.2.3"` reads as 1.2.
fn leading_number(input: &str) -> Option<f64> {
    let mut number = String::new();
    let mut seen_point = false;

    for c in input.chars().filter(|c| c.is_ascii_digit() || *c == '.') {
        if c == '.' {
            if seen_point {
                break;
            }
            seen_point = true;
        }
        number.push(c);
    }

    number.parse::<f64>().ok().filter(|v| v.is_finite())
}

// =============================================================================
// Unit Tests
// =============================================================================
