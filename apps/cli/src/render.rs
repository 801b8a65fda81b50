//! # Output Rendering
//!
//! ```text
//! Original Price                          $100.00       $100.00
//! Coupon (10%)                           -$10.00         $90.00
//! Sales Tax (8%)                          +$7.20         $97.20
//! Shipping: free                           $0.00         $97.20
//! ───────────────────────────────────────────────────────────────
//! Total savings                           $10.00 (10.0%)
//! Final price                             $97.20
//! ```

use serde::Serialize;

use dealcalc_core::format::{
    format_currency, format_percentage, format_shipping, share_text, summary_text,
};
use dealcalc_core::{Calculation, CalculationResult, CalculationStep, StepKind};

use crate::config::OutputFormat;
use crate::error::CliResult;

/// What to print besides the totals.
#[derive(Debug, Clone, Copy, Default)]
pub struct RenderOptions {
    pub show_steps: bool,
    pub summary: bool,
}

pub fn render(
    calculation: &Calculation,
    format: OutputFormat,
    options: RenderOptions,
) -> CliResult<String> {
    match format {
        OutputFormat::Human => Ok(render_human(calculation, options)),
        OutputFormat::Json => render_json(calculation, options),
    }
}

const WIDTH: usize = 40;

fn render_human(calculation: &Calculation, options: RenderOptions) -> String {
    let result = &calculation.result;
    let mut out = String::new();

    if options.show_steps {
        for step in &calculation.steps {
            out.push_str(&step_line(step));
            out.push('\n');
        }
        out.push_str(&"─".repeat(WIDTH + 24));
        out.push('\n');
    }

    out.push_str(&totals(result));

    if options.summary {
        out.push('\n');
        out.push_str(&summary_text(result));
        out.push_str("\n\n");
        out.push_str(&share_text(result));
        out.push('\n');
    }

    out
}

fn step_line(step: &CalculationStep) -> String {
    let sign = match step.kind {
        StepKind::Subtotal => "",
        _ if step.amount.is_zero() => "",
        _ if step.is_deduction => "-",
        _ => "+",
    };
    let amount = format!("{}{}", sign, format_currency(step.amount));
    format!(
        "{:<width$}{:>12}{:>12}",
        step.description,
        amount,
        format_currency(step.running_total),
        width = WIDTH
    )
}

fn totals(result: &CalculationResult) -> String {
    let mut out = String::new();
    let mut line = |label: &str, value: String| {
        out.push_str(&format!("{:<width$}{}\n", label, value, width = WIDTH));
    };

    line("Original price", format_currency(result.original_price));
    if result.total_savings.is_positive() {
        line(
            "Total savings",
            format!(
                "{} ({})",
                format_currency(result.total_savings),
                format_percentage(result.savings_percentage)
            ),
        );
    }
    line("Pre-tax price", format_currency(result.pre_tax_price));
    line("Estimated tax", format_currency(result.estimated_tax));
    line("Shipping", format_shipping(result.shipping_cost));
    line("Final price", format_currency(result.final_price));
    out
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonOutput<'a> {
    result: &'a CalculationResult,
    #[serde(skip_serializing_if = "Option::is_none")]
    steps: Option<&'a [CalculationStep]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    summary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    share: Option<String>,
}

fn render_json(calculation: &Calculation, options: RenderOptions) -> CliResult<String> {
    let output = JsonOutput {
        result: &calculation.result,
        steps: options.show_steps.then_some(calculation.steps.as_slice()),
        summary: options.summary.then(|| summary_text(&calculation.result)),
        share: options.summary.then(|| share_text(&calculation.result)),
    };
    Ok(serde_json::to_string_pretty(&output)?)
}
