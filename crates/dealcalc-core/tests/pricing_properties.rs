//! Property tests for the pricing invariants.

use dealcalc_core::cart::{subtotal, total_quantity};
use dealcalc_core::quantity::apply_best_quantity_discount;
use dealcalc_core::{
    apply_discount, calculate, discount_amount, CalculationParams, CartItem, Discount,
    DiscountCategory, Money, OtherDiscount, QuantityDiscountRule, QuantityStrategy, Rate,
    SpendSaveRule, StepKind,
};
use proptest::prelude::*;

fn money() -> impl Strategy<Value = Money> {
    (0i64..10_000_000).prop_map(Money::from_cents)
}

fn discount() -> impl Strategy<Value = Discount> {
    prop_oneof![
        (0u32..=10_000).prop_map(|bps| Discount::percentage(Rate::from_bps(bps))),
        money().prop_map(Discount::fixed),
    ]
}

fn strategy() -> impl Strategy<Value = QuantityStrategy> {
    prop_oneof![
        Just(QuantityStrategy::Highest),
        Just(QuantityStrategy::Lowest),
        Just(QuantityStrategy::All),
    ]
}

fn cart() -> impl Strategy<Value = Vec<CartItem>> {
    prop::collection::vec((0i64..50_000, 0u32..20), 0..8).prop_map(|lines| {
        lines
            .into_iter()
            .enumerate()
            .map(|(i, (cents, qty))| {
                CartItem::new(i.to_string(), format!("Item {}", i), Money::from_cents(cents), qty)
            })
            .collect()
    })
}

fn quantity_rules() -> impl Strategy<Value = Vec<QuantityDiscountRule>> {
    prop::collection::vec((1u32..10, 1u32..10_000, strategy(), any::<bool>()), 0..4).prop_map(
        |rules| {
            rules
                .into_iter()
                .map(|(min, pay, strategy, enabled)| {
                    let rule = QuantityDiscountRule::new(min, Rate::from_bps(pay), strategy);
                    if enabled {
                        rule
                    } else {
                        rule.disabled()
                    }
                })
                .collect()
        },
    )
}

proptest! {
    #[test]
    fn amount_and_remainder_rebuild_price(price in money(), d in discount()) {
        let amount = discount_amount(price, &d);
        let applied = apply_discount(price, &d);
        prop_assert!(!applied.is_negative());
        prop_assert!(!amount.is_negative());
        prop_assert_eq!(amount + applied, price);
    }

    #[test]
    fn quantity_resolver_preserves_units(items in cart(), rules in quantity_rules()) {
        let outcome = apply_best_quantity_discount(&items, &rules);
        prop_assert_eq!(total_quantity(&outcome.items), total_quantity(&items));
        prop_assert!(!outcome.savings.is_negative());
        prop_assert_eq!(subtotal(&items) - outcome.savings, subtotal(&outcome.items));
        if outcome.rule.is_none() {
            prop_assert_eq!(&outcome.items, &items);
        }
    }

    #[test]
    fn trace_and_result_agree(
        items in cart(),
        rules in quantity_rules(),
        threshold in money(),
        reduction in money(),
        other in prop::option::of(discount()),
        coupon in prop::option::of(discount()),
        promo in prop::option::of(discount()),
        tax_bps in 0u32..5_000,
    ) {
        let mut params = CalculationParams::cart(items);
        params.original_price = Money::from_dollars(25);
        params.quantity_rules = rules;
        params.spend_save_rules = vec![SpendSaveRule::new(threshold, reduction)];
        params.other_discount =
            other.map(|d| OtherDiscount::new(DiscountCategory::Membership, d));
        params.coupon = coupon;
        params.promo_code = promo;
        params.tax_rate = Rate::from_bps(tax_bps);

        let calculation = calculate(&params);
        let result = &calculation.result;

        let (first, rest) = calculation.steps.split_first().expect("opening step");
        prop_assert_eq!(first.kind, StepKind::Subtotal);
        prop_assert_eq!(first.running_total, result.cart_subtotal);
        let mut running = first.running_total;
        let mut deducted = Money::zero();
        for step in rest {
            if step.is_deduction {
                running -= step.amount;
                deducted += step.amount;
            } else {
                running += step.amount;
            }
            prop_assert_eq!(step.running_total, running, "step {:?}", step.kind);
        }
        prop_assert_eq!(deducted, result.discount_breakdown.total());

        prop_assert!(!result.pre_tax_price.is_negative());
        prop_assert_eq!(
            calculation.steps.last().map(|s| s.running_total),
            Some(result.final_price)
        );
        prop_assert_eq!(result.total_savings, result.discount_breakdown.total());
        for (_, amount) in result.discount_breakdown.entries() {
            prop_assert!(!amount.is_negative());
        }
        prop_assert_eq!(
            result.final_price,
            result.pre_tax_price + result.estimated_tax + result.shipping_cost
        );
    }
}
