//! # Quantity-Discount Resolver
//!
//! Picks the best quantity rule for a cart and prices its units.
//!
//! ## Resolution Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Cart: [Shirt $50 ×4]      Rule: min 2, pay 80%, Highest                │
//! │                                                                         │
//! │  1. SELECT   total qty 4 ≥ 2 ──► rule applies                          │
//! │              several apply? ──► lowest pay_rate wins (first on tie)    │
//! │                                                                         │
//! │  2. EXPAND   one unit record per item, tagged with its cart line       │
//! │              [L0 $50] [L0 $50] [L0 $50] [L0 $50]                        │
//! │                                                                         │
//! │  3. RANK     Highest: price desc │ Lowest: price asc │ All: as is      │
//! │                                                                         │
//! │  4. DISCOUNT first min_quantity units (every unit for All)             │
//! │              [L0 $40] [L0 $40] [L0 $50] [L0 $50]   savings $20         │
//! │                                                                         │
//! │  5. REGROUP  by (line, unit price)                                      │
//! │              [Shirt $40 ×2] [Shirt $50 ×2]                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Ranking is cart-wide: a rule with `min_quantity` 3 can discount units
//! from three different lines.

use std::collections::HashMap;
use std::iter;

use tracing::debug;

use crate::cart::total_quantity;
use crate::money::Money;
use crate::types::{CartItem, QuantityDiscountRule, QuantityStrategy};

/// What the resolver did to a cart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuantityDiscountOutcome<'a> {
    /// Regrouped cart. Equal to the input when no rule applied.
    pub items: Vec<CartItem>,
    /// Sum of `original - discounted` over every discounted unit.
    pub savings: Money,
    pub rule: Option<&'a QuantityDiscountRule>,
}

/// One unit of a cart line.
#[derive(Debug, Clone, Copy)]
struct Unit {
    line: usize,
    price: Money,
}

/// Regrouping key: units merge only when they share a line and a price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct UnitKey {
    line: usize,
    price: Money,
}

/// The applicable rule with the lowest pay rate, i.e. the deepest discount.
/// The first declared rule wins a tie.
pub fn best_quantity_rule(
    total_quantity: u64,
    rules: &[QuantityDiscountRule],
) -> Option<&QuantityDiscountRule> {
    rules
        .iter()
        .filter(|rule| rule.applies_to(total_quantity))
        .reduce(|best, rule| if rule.pay_rate < best.pay_rate { rule } else { best })
}

/// Applies the best quantity rule to `items`.
///
/// ## Example
/// ```rust
/// use dealcalc_core::quantity::apply_best_quantity_discount;
/// use dealcalc_core::{CartItem, Money, QuantityDiscountRule, QuantityStrategy, Rate};
///
/// let cart = vec![CartItem::new("shirt", "Shirt", Money::from_dollars(50), 4)];
/// let rules = vec![QuantityDiscountRule::new(2, Rate::from_bps(8000), QuantityStrategy::Highest)];
///
/// let outcome = apply_best_quantity_discount(&cart, &rules);
/// assert_eq!(outcome.savings, Money::from_dollars(20));
/// assert_eq!(outcome.items.len(), 2);
/// ```
pub fn apply_best_quantity_discount<'a>(
    items: &[CartItem],
    rules: &'a [QuantityDiscountRule],
) -> QuantityDiscountOutcome<'a> {
    let Some(rule) = best_quantity_rule(total_quantity(items), rules) else {
        return QuantityDiscountOutcome {
            items: items.to_vec(),
            savings: Money::zero(),
            rule: None,
        };
    };

    let mut units = expand(items);
    let discounted_count = match rule.strategy {
        QuantityStrategy::Highest => {
            units.sort_by(|a, b| b.price.cmp(&a.price));
            rule.min_quantity as usize
        }
        QuantityStrategy::Lowest => {
            units.sort_by(|a, b| a.price.cmp(&b.price));
            rule.min_quantity as usize
        }
        QuantityStrategy::All => units.len(),
    };

    let mut savings = Money::zero();
    for unit in units.iter_mut().take(discounted_count) {
        let discounted = rule.discounted_price(unit.price);
        savings += unit.price - discounted;
        unit.price = discounted;
    }

    debug!(
        rule_id = %rule.id,
        strategy = ?rule.strategy,
        units = units.len(),
        savings = %savings,
        "Quantity discount applied"
    );

    QuantityDiscountOutcome {
        items: regroup(items, &units),
        savings,
        rule: Some(rule),
    }
}

fn expand(items: &[CartItem]) -> Vec<Unit> {
    items
        .iter()
        .enumerate()
        .flat_map(|(line, item)| {
            iter::repeat(Unit {
                line,
                price: item.price,
            })
            .take(item.quantity as usize)
        })
        .collect()
}

/// Collapses units back into cart lines, in cart order. Within a line,
/// groups keep the order they were first seen in `units`.
fn regroup(items: &[CartItem], units: &[Unit]) -> Vec<CartItem> {
    let mut slots: HashMap<UnitKey, usize> = HashMap::new();
    let mut lines: Vec<(usize, CartItem)> = Vec::new();

    for unit in units {
        let key = UnitKey {
            line: unit.line,
            price: unit.price,
        };
        let slot = *slots.entry(key).or_insert_with(|| {
            let origin = &items[unit.line];
            lines.push((
                unit.line,
                CartItem {
                    id: origin.id.clone(),
                    name: origin.name.clone(),
                    price: unit.price,
                    quantity: 0,
                },
            ));
            lines.len() - 1
        });
        lines[slot].1.quantity += 1;
    }

    lines.sort_by_key(|(line, _)| *line);
    lines.into_iter().map(|(_, item)| item).collect()
}

// =============================================================================
// Unit Tests
// =============================================================================
