//! # Cart Aggregation
//!
//! Reducers over cart lines. Empty carts yield zero.

use crate::money::Money;
use crate::types::CartItem;

/// Sum of `price × quantity` over every line.
pub fn subtotal(items: &[CartItem]) -> Money {
    items.iter().map(CartItem::line_total).sum()
}

/// Total number of units across every line.
pub fn total_quantity(items: &[CartItem]) -> u64 {
    items.iter().map(|i| u64::from(i.quantity)).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subtotal_and_quantity() {
        let items = vec![
            CartItem::new("1", "Coffee", Money::from_cents(999), 2),
            CartItem::new("2", "Filter", Money::from_cents(350), 3),
        ];
        assert_eq!(subtotal(&items).cents(), 1998 + 1050);
        assert_eq!(total_quantity(&items), 5);
    }

    #[test]
    fn test_empty_cart() {
        assert_eq!(subtotal(&[]), Money::zero());
        assert_eq!(total_quantity(&[]), 0);
    }

    #[test]
    fn test_zero_quantity_line_contributes_nothing() {
        let items = vec![CartItem::new("1", "Ghost", Money::from_dollars(10), 0)];
        assert_eq!(subtotal(&items), Money::zero());
        assert_eq!(total_quantity(&items), 0);
    }
}
