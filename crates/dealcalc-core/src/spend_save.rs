//! # Spend-and-Save Resolver
//!
//! Picks the single spend-and-save rule that saves the customer the most.
//!
//! ```text
//! Subtotal $90.00
//!   Spend $50  get $5  off  ── applies
//!   Spend $80  get $20 off  ── applies   ◄── largest reduction wins
//!   Spend $100 get $15 off  ── threshold not met
//! ```
//!
//! The largest *reduction* wins, not the highest threshold. On a tie the
//! first declared rule wins.

use tracing::debug;

use crate::money::Money;
use crate::types::SpendSaveRule;

/// The chosen rule and its reduction, or zero and `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpendSaveOutcome<'a> {
    pub reduction: Money,
    pub rule: Option<&'a SpendSaveRule>,
}

/// Resolves the best rule against `subtotal`, the running price after any
/// quantity discount.
pub fn best_spend_save(subtotal: Money, rules: &[SpendSaveRule]) -> SpendSaveOutcome<'_> {
    let best = rules
        .iter()
        .filter(|rule| rule.applies_to(subtotal))
        .reduce(|best, rule| if rule.reduction > best.reduction { rule } else { best });

    match best {
        Some(rule) => {
            debug!(
                rule_id = %rule.id,
                reduction = %rule.reduction,
                "Spend-and-save rule selected"
            );
            SpendSaveOutcome {
                reduction: rule.reduction,
                rule: Some(rule),
            }
        }
        None => SpendSaveOutcome {
            reduction: Money::zero(),
            rule: None,
        },
    }
}
