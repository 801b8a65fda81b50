//! # Calculator Session
//!
//! Owns the input of one pricing session and edits it in place.
//!
//! ## Session Operations
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Calculator Operations                                │
//! │                                                                         │
//! │  Edit                          Session Change                          │
//! │  ────                          ──────────────                          │
//! │  add_cart_item() ────────────► cart_items.push(item)  (new uuid)       │
//! │  update_cart_item() ─────────► fields patched; qty 0 removes the line  │
//! │  remove_cart_item() ─────────► cart_items.retain(..)                   │
//! │  add/update/remove rules ────► spend_save_rules / quantity_rules       │
//! │  set_*() ────────────────────► price, tax, shipping, discounts         │
//! │  switch_mode(Single) ────────► cart cleared                            │
//! │  switch_mode(Cart) ──────────► original price zeroed                   │
//! │  reset() ────────────────────► defaults, single mode                   │
//! │                                                                         │
//! │  calculate() ────────────────► Some(Calculation) once has_input()      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Invariants
//! - At most `MAX_CART_ITEMS` (100) lines
//! - Every line quantity is 1..=`MAX_ITEM_QUANTITY` (999)
//! - Every stored rule and discount has passed [`crate::validation`]

use std::borrow::Cow;

use serde::{Deserialize, Serialize};
use tracing::debug;
use ts_rs::TS;
use uuid::Uuid;

use crate::error::{CoreError, CoreResult};
use crate::money::{Money, Rate};
use crate::pipeline;
use crate::types::{
    Calculation, CalculationParams, CartItem, Discount, OtherDiscount, QuantityDiscountRule,
    ShippingOption, SpendSaveRule,
};
use crate::validation::{
    validate_cart_item_name, validate_discount, validate_price, validate_quantity,
    validate_quantity_rule, validate_spend_save_rule, validate_tax_rate,
};
use crate::{MAX_CART_ITEMS, MAX_ITEM_QUANTITY};

/// Which entry the session prices from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum CalculatorMode {
    #[default]
    Single,
    Cart,
}

/// Partial edit of a cart line. `None` leaves a field unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CartItemUpdate {
    pub name: Option<String>,
    pub price: Option<Money>,
    pub quantity: Option<u32>,
}

/// Partial edit of a discount rule.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct RuleUpdate {
    pub enabled: Option<bool>,
    /// Blank descriptions are ignored.
    pub description: Option<String>,
}

/// A pricing session.
///
/// ## Example
/// ```rust
/// use dealcalc_core::{Calculator, CalculatorMode, Money, Rate};
///
/// let mut calc = Calculator::new();
/// calc.switch_mode(CalculatorMode::Cart);
/// calc.add_cart_item("Shirt", Money::from_dollars(50), 2).unwrap();
/// calc.set_tax_rate(Rate::from_bps(800)).unwrap();
///
/// let calculation = calc.calculate().unwrap();
/// assert_eq!(calculation.result.final_price, Money::from_dollars(108));
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Calculator {
    params: CalculationParams,
    mode: CalculatorMode,
}

impl Calculator {
    /// Creates an empty single-item session.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn params(&self) -> &CalculationParams {
        &self.params
    }

    pub fn mode(&self) -> CalculatorMode {
        self.mode
    }

    // =========================================================================
    // Cart Items
    // =========================================================================

    /// Adds a cart line and returns its generated id.
    pub fn add_cart_item(&mut self, name: &str, price: Money, quantity: u32) -> CoreResult<String> {
        if self.params.cart_items.len() >= MAX_CART_ITEMS {
            return Err(CoreError::CartTooLarge {
                max: MAX_CART_ITEMS,
            });
        }
        check_quantity(quantity)?;
        validate_cart_item_name(name)?;
        validate_price(price)?;

        let id = Uuid::new_v4().to_string();
        debug!(id = %id, price = %price, quantity, "Cart item added");
        self.params
            .cart_items
            .push(CartItem::new(id.clone(), name.trim(), price, quantity));
        Ok(id)
    }

    /// Patches a cart line.
    ///
    /// ## Behavior
    /// - Quantity 0 removes the line
    /// - Nothing is changed if any field fails validation
    pub fn update_cart_item(&mut self, id: &str, update: CartItemUpdate) -> CoreResult<()> {
        if update.quantity == Some(0) {
            return self.remove_cart_item(id).map(|_| ());
        }

        if let Some(quantity) = update.quantity {
            check_quantity(quantity)?;
        }
        if let Some(name) = &update.name {
            validate_cart_item_name(name)?;
        }
        if let Some(price) = update.price {
            validate_price(price)?;
        }

        let item = self
            .params
            .cart_items
            .iter_mut()
            .find(|i| i.id == id)
            .ok_or_else(|| CoreError::CartItemNotFound(id.to_string()))?;

        if let Some(name) = update.name {
            item.name = name.trim().to_string();
        }
        if let Some(price) = update.price {
            item.price = price;
        }
        if let Some(quantity) = update.quantity {
            item.quantity = quantity;
        }
        debug!(id = %id, "Cart item updated");
        Ok(())
    }

    /// Removes a cart line and returns it.
    pub fn remove_cart_item(&mut self, id: &str) -> CoreResult<CartItem> {
        let index = self
            .params
            .cart_items
            .iter()
            .position(|i| i.id == id)
            .ok_or_else(|| CoreError::CartItemNotFound(id.to_string()))?;
        debug!(id = %id, "Cart item removed");
        Ok(self.params.cart_items.remove(index))
    }

    /// Drops every cart line.
    pub fn clear_cart(&mut self) {
        self.params.cart_items.clear();
    }

    // =========================================================================
    // Rules
    // =========================================================================

    /// Adds a spend-and-save rule and returns its id.
    pub fn add_spend_save_rule(&mut self, rule: SpendSaveRule) -> CoreResult<String> {
        validate_spend_save_rule(&rule)?;
        let id = rule.id.clone();
        self.params.spend_save_rules.push(rule);
        Ok(id)
    }

    pub fn update_spend_save_rule(&mut self, id: &str, update: RuleUpdate) -> CoreResult<()> {
        let rule = self
            .params
            .spend_save_rules
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| CoreError::RuleNotFound(id.to_string()))?;

        if let Some(enabled) = update.enabled {
            rule.enabled = enabled;
        }
        if let Some(description) = update.description {
            *rule = rule.clone().with_description(&description);
        }
        Ok(())
    }

    pub fn remove_spend_save_rule(&mut self, id: &str) -> CoreResult<SpendSaveRule> {
        let index = self
            .params
            .spend_save_rules
            .iter()
            .position(|r| r.id == id)
            .ok_or_else(|| CoreError::RuleNotFound(id.to_string()))?;
        Ok(self.params.spend_save_rules.remove(index))
    }

    /// Adds a quantity-discount rule and returns its id.
    pub fn add_quantity_rule(&mut self, rule: QuantityDiscountRule) -> CoreResult<String> {
        validate_quantity_rule(&rule)?;
        let id = rule.id.clone();
        self.params.quantity_rules.push(rule);
        Ok(id)
    }

    pub fn update_quantity_rule(&mut self, id: &str, update: RuleUpdate) -> CoreResult<()> {
        let rule = self
            .params
            .quantity_rules
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| CoreError::RuleNotFound(id.to_string()))?;

        if let Some(enabled) = update.enabled {
            rule.enabled = enabled;
        }
        if let Some(description) = update.description {
            *rule = rule.clone().with_description(&description);
        }
        Ok(())
    }

    pub fn remove_quantity_rule(&mut self, id: &str) -> CoreResult<QuantityDiscountRule> {
        let index = self
            .params
            .quantity_rules
            .iter()
            .position(|r| r.id == id)
            .ok_or_else(|| CoreError::RuleNotFound(id.to_string()))?;
        Ok(self.params.quantity_rules.remove(index))
    }

    // =========================================================================
    // Scalar Inputs
    // =========================================================================

    pub fn set_original_price(&mut self, price: Money) -> CoreResult<()> {
        validate_price(price)?;
        self.params.original_price = price;
        Ok(())
    }

    pub fn set_tax_rate(&mut self, rate: Rate) -> CoreResult<()> {
        validate_tax_rate(rate)?;
        self.params.tax_rate = rate;
        Ok(())
    }

    pub fn set_shipping(&mut self, shipping: ShippingOption) -> CoreResult<()> {
        validate_price(shipping.cost)?;
        self.params.shipping = shipping;
        Ok(())
    }

    pub fn set_coupon(&mut self, coupon: Option<Discount>) -> CoreResult<()> {
        if let Some(discount) = &coupon {
            validate_discount(discount, None)?;
        }
        self.params.coupon = coupon;
        Ok(())
    }

    pub fn set_promo_code(&mut self, promo: Option<Discount>) -> CoreResult<()> {
        if let Some(discount) = &promo {
            validate_discount(discount, None)?;
        }
        self.params.promo_code = promo;
        Ok(())
    }

    pub fn set_other_discount(&mut self, other: Option<OtherDiscount>) -> CoreResult<()> {
        if let Some(other) = &other {
            validate_discount(&other.discount, None)?;
        }
        self.params.other_discount = other;
        Ok(())
    }

    // =========================================================================
    // Session
    // =========================================================================

    /// Switches entry mode. Input belonging to the other mode is dropped.
    pub fn switch_mode(&mut self, mode: CalculatorMode) {
        match mode {
            CalculatorMode::Single => self.clear_cart(),
            CalculatorMode::Cart => self.params.original_price = Money::zero(),
        }
        self.mode = mode;
        debug!(?mode, "Calculator mode switched");
    }

    /// Back to an empty single-item session with free shipping and no tax.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Whether there is anything to price: cart lines in cart mode, a
    /// positive price in single-item mode.
    pub fn has_input(&self) -> bool {
        match self.mode {
            CalculatorMode::Cart => !self.params.cart_items.is_empty(),
            CalculatorMode::Single => self.params.original_price.is_positive(),
        }
    }

    /// Prices the session, or `None` when [`Self::has_input`] is false.
    pub fn calculate(&self) -> Option<Calculation> {
        if !self.has_input() {
            return None;
        }
        Some(pipeline::calculate(&self.snapshot()))
    }

    /// The params as the current mode sees them. Single-item mode never
    /// prices cart lines.
    fn snapshot(&self) -> Cow<'_, CalculationParams> {
        match self.mode {
            CalculatorMode::Single if self.params.is_cart_mode() => {
                let mut params = self.params.clone();
                params.cart_items.clear();
                Cow::Owned(params)
            }
            _ => Cow::Borrowed(&self.params),
        }
    }
}

fn check_quantity(quantity: u32) -> CoreResult<()> {
    if quantity > MAX_ITEM_QUANTITY {
        return Err(CoreError::QuantityTooLarge {
            requested: quantity,
            max: MAX_ITEM_QUANTITY,
        });
    }
    validate_quantity(quantity)?;
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
