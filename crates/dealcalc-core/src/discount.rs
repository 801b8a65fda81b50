//! # Discount Primitives
//!
//! The two operations every discount in the pipeline goes through.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  discount_amount(price, d) ──► what the breakdown and trace report     │
//! │  apply_discount(price, d)  ──► the running price after the step        │
//! │                                                                         │
//! │  INVARIANT: discount_amount + apply_discount == price                  │
//! │             apply_discount >= 0                                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! `apply_discount` is defined as `price - discount_amount`, so the two can
//! never drift apart.

use crate::money::Money;
use crate::types::Discount;

/// How much `discount` removes from `price`.
///
/// - Percentage: `price × rate`, rounded to the cent
/// - Fixed: `min(value, price)`
///
/// Capped at `price` either way: a discount can take a price to zero but
/// never below it.
///
/// ## Example
/// ```rust
/// use dealcalc_core::discount::discount_amount;
/// use dealcalc_core::{Discount, Money, Rate};
///
/// let price = Money::from_dollars(40);
/// assert_eq!(discount_amount(price, &Discount::fixed(Money::from_dollars(50))), price);
/// assert_eq!(
///     discount_amount(price, &Discount::percentage(Rate::from_bps(2500))).cents(),
///     1000
/// );
/// ```
pub fn discount_amount(price: Money, discount: &Discount) -> Money {
    let price = price.non_negative();
    let amount = match discount {
        Discount::Percentage(rate) => price.percentage(*rate),
        Discount::Fixed(value) => *value,
    };
    amount.non_negative().min(price)
}

/// The price left after `discount`. Never negative.
///
/// ## Example
/// ```rust
/// use dealcalc_core::discount::apply_discount;
/// use dealcalc_core::{Discount, Money, Rate};
///
/// let price = Money::from_dollars(100);
/// let coupon = Discount::percentage(Rate::from_bps(1000));
/// assert_eq!(apply_discount(price, &coupon), Money::from_dollars(90));
/// ```
pub fn apply_discount(price: Money, discount: &Discount) -> Money {
    (price - discount_amount(price, discount)).non_negative()
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Rate;

    #[test]
    fn test_percentage_discount() {
        let price = Money::from_dollars(100);
        let d = Discount::percentage(Rate::from_bps(1000));
        assert_eq!(discount_amount(price, &d), Money::from_dollars(10));
        assert_eq!(apply_discount(price, &d), Money::from_dollars(90));
    }

    #[test]
    fn test_fixed_discount() {
        let price = Money::from_dollars(100);
        let d = Discount::fixed(Money::from_cents(2550));
        assert_eq!(discount_amount(price, &d).cents(), 2550);
        assert_eq!(apply_discount(price, &d).cents(), 7450);
    }

    #[test]
    fn test_fixed_discount_larger_than_price_is_clamped() {
        let price = Money::from_dollars(20);
        let d = Discount::fixed(Money::from_dollars(30));
        assert_eq!(discount_amount(price, &d), price);
        assert_eq!(apply_discount(price, &d), Money::zero());
    }

    #[test]
    fn test_percentage_over_hundred_never_goes_negative() {
        let price = Money::from_dollars(20);
        let d = Discount::percentage(Rate::from_bps(15000));
        assert_eq!(apply_discount(price, &d), Money::zero());
        assert_eq!(discount_amount(price, &d), price);
    }

    #[test]
    fn test_amount_and_remainder_add_up() {
        let price = Money::from_cents(1999);
        for bps in [1, 333, 1250, 5000, 9999, 10000] {
            let d = Discount::percentage(Rate::from_bps(bps));
            assert_eq!(discount_amount(price, &d) + apply_discount(price, &d), price);
        }
    }

    #[test]
    fn test_zero_price() {
        let d = Discount::fixed(Money::from_dollars(5));
        assert_eq!(discount_amount(Money::zero(), &d), Money::zero());
        assert_eq!(apply_discount(Money::zero(), &d), Money::zero());
    }
}
