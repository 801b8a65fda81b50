//! End-to-end pricing scenarios through the public API.

use dealcalc_core::{
    calculate, compute_result, compute_steps, CalculationParams, CartItem, Discount,
    DiscountCategory, Money, OtherDiscount, QuantityDiscountRule, QuantityStrategy, Rate,
    ShippingKind, ShippingOption, SpendSaveRule, StepKind,
};

fn shirts() -> CalculationParams {
    let mut params = CalculationParams::cart(vec![CartItem::new(
        "shirt",
        "Shirt",
        Money::from_dollars(50),
        4,
    )]);
    params.quantity_rules = vec![QuantityDiscountRule::new(
        2,
        Rate::from_bps(8000),
        QuantityStrategy::Highest,
    )
    .with_id("pair")];
    params
}

#[test]
fn single_item_with_coupon_and_tax() {
    let mut params = CalculationParams::single(Money::from_dollars(100));
    params.coupon = Some(Discount::percentage(Rate::from_bps(1000)));
    params.tax_rate = Rate::from_bps(800);

    let calculation = calculate(&params);
    let result = &calculation.result;
    assert_eq!(result.pre_tax_price.cents(), 9000);
    assert_eq!(result.estimated_tax.cents(), 720);
    assert_eq!(result.final_price.cents(), 9720);
    assert_eq!(result.total_savings.cents(), 1000);
    assert_eq!(result.savings_percentage, 10.0);

    let descriptions: Vec<&str> = calculation
        .steps
        .iter()
        .map(|s| s.description.as_str())
        .collect();
    assert_eq!(
        descriptions,
        vec![
            "Original Price",
            "Coupon (10%)",
            "Sales Tax (8%)",
            "Shipping: free"
        ]
    );
}

#[test]
fn cart_quantity_rule_on_uniform_line() {
    let calculation = calculate(&shirts());
    let result = &calculation.result;

    assert_eq!(result.cart_subtotal, Money::from_dollars(200));
    assert_eq!(result.quantity_discount_savings, Money::from_dollars(20));
    assert_eq!(result.pre_tax_price, Money::from_dollars(180));
    assert_eq!(result.applied_quantity_rule.as_deref(), Some("pair"));

    let step = &calculation.steps[1];
    assert_eq!(step.kind, StepKind::QuantityDiscount);
    assert_eq!(step.description, "Buy 2+ items, 20% off (Most Expensive)");
    assert!(step.is_deduction);
    assert_eq!(step.running_total, Money::from_dollars(180));
}

#[test]
fn spend_save_picks_largest_reduction_after_quantity_discount() {
    let mut params = shirts();
    params.spend_save_rules = vec![
        SpendSaveRule::new(Money::from_dollars(150), Money::from_dollars(30)).with_id("thirty"),
        SpendSaveRule::new(Money::from_dollars(100), Money::from_dollars(10)).with_id("ten"),
    ];

    let result = compute_result(&params);
    assert_eq!(result.spend_save_savings, Money::from_dollars(30));
    assert_eq!(result.applied_spend_save_rule.as_deref(), Some("thirty"));
    assert_eq!(result.pre_tax_price, Money::from_dollars(150));
}

#[test]
fn full_stack_in_documented_order() {
    // 200 → qty 180 → spend 150 → member 5% 142.50 → coupon $10 132.50
    //     → promo 10% 119.25 → tax 8.25% +9.84 → express +12.99
    let mut params = shirts();
    params.spend_save_rules = vec![SpendSaveRule::new(
        Money::from_dollars(150),
        Money::from_dollars(30),
    )];
    params.other_discount = Some(
        OtherDiscount::new(
            DiscountCategory::Membership,
            Discount::percentage(Rate::from_bps(500)),
        )
        .with_label("Gold member"),
    );
    params.coupon = Some(Discount::fixed(Money::from_dollars(10)));
    params.promo_code = Some(Discount::percentage(Rate::from_bps(1000)));
    params.tax_rate = Rate::from_bps(825);
    params.shipping = ShippingOption::paid(ShippingKind::Express, Money::from_cents(1299));

    let calculation = calculate(&params);
    let result = &calculation.result;
    let breakdown = result.discount_breakdown;

    assert_eq!(breakdown.quantity_discount.cents(), 2000);
    assert_eq!(breakdown.spend_save.cents(), 3000);
    assert_eq!(breakdown.other_discount.cents(), 750);
    assert_eq!(breakdown.coupon.cents(), 1000);
    assert_eq!(breakdown.promo_code.cents(), 1325);
    assert_eq!(result.pre_tax_price.cents(), 11925);
    assert_eq!(result.estimated_tax.cents(), 984);
    assert_eq!(result.shipping_cost.cents(), 1299);
    assert_eq!(result.final_price.cents(), 11925 + 984 + 1299);
    assert_eq!(result.total_savings, breakdown.total());

    let kinds: Vec<StepKind> = calculation.steps.iter().map(|s| s.kind).collect();
    assert_eq!(
        kinds,
        vec![
            StepKind::Subtotal,
            StepKind::QuantityDiscount,
            StepKind::SpendSave,
            StepKind::OtherDiscount,
            StepKind::Coupon,
            StepKind::PromoCode,
            StepKind::Tax,
            StepKind::Shipping,
        ]
    );
    assert_eq!(calculation.steps[3].description, "Gold member (5%)");
    assert_eq!(calculation.steps[7].description, "Shipping: express");
}

#[test]
fn trace_ends_at_final_price() {
    let mut params = shirts();
    params.tax_rate = Rate::from_bps(700);
    params.shipping = ShippingOption::paid(ShippingKind::Standard, Money::from_cents(599));

    let steps = compute_steps(&params);
    let result = compute_result(&params);
    assert_eq!(steps.last().map(|s| s.running_total), Some(result.final_price));
}

#[test]
fn compute_result_is_idempotent() {
    let params = shirts();
    assert_eq!(compute_result(&params), compute_result(&params));
    assert_eq!(compute_steps(&params), compute_steps(&params));
}

#[test]
fn empty_cart_falls_back_to_single_item() {
    let params = CalculationParams::single(Money::from_cents(1999));
    let result = compute_result(&params);
    assert_eq!(result.cart_item_count, 1);
    assert_eq!(result.final_price.cents(), 1999);
    assert_eq!(result.savings_percentage, 0.0);
}

#[test]
fn params_round_trip_from_json() {
    let json = r#"{
        "cartItems": [{ "id": "a", "name": "Shirt", "price": 5000, "quantity": 4 }],
        "quantityRules": [{
            "id": "q", "minQuantity": 2, "payRate": 8000, "strategy": "highest",
            "description": "Two for less", "enabled": true
        }],
        "coupon": { "kind": "percentage", "value": 1000 },
        "taxRate": 800,
        "shipping": { "kind": "standard", "cost": 499 }
    }"#;
    let params: CalculationParams = serde_json::from_str(json).unwrap();
    let result = compute_result(&params);

    // 200 → 180 → coupon 162 → tax 12.96 → shipping 4.99
    assert_eq!(result.pre_tax_price.cents(), 16200);
    assert_eq!(result.final_price.cents(), 16200 + 1296 + 499);

    let value = serde_json::to_value(&result).unwrap();
    assert_eq!(value["finalPrice"], 16200 + 1296 + 499);
    assert_eq!(value["appliedQuantityRule"], "q");
}
