//! Output formatting utilities.

use rust_decimal::Decimal;
use serde::Serialize;
use tabled::{
    settings::{object::Columns, Alignment, Modify, Style},
    Table, Tabled,
};

use frameshop_core::PriceBreakdown;

use crate::cli::OutputFormat;

/// A simple label/value row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Tabled)]
pub struct KeyValue {
    #[tabled(rename = "Item")]
    pub key: String,
    #[tabled(rename = "Value")]
    pub value: String,
}

impl KeyValue {
    pub fn new(key: impl Into<String>, value: impl ToString) -> Self {
        Self {
            key: key.into(),
            value: value.to_string(),
        }
    }
}

/// Prints a section header.
pub fn print_header(title: &str) {
    println!("\n{}", title);
    println!("{}", "=".repeat(title.len()));
}

/// Prints rows as a rounded table, labels left-aligned.
pub fn print_table<T: Tabled>(data: &[T]) {
    if data.is_empty() {
        println!("No results.");
        return;
    }

    let table = Table::new(data)
        .with(Style::rounded())
        .with(Modify::new(Columns::first()).with(Alignment::left()))
        .to_string();

    println!("{}", table);
}

/// Prints any serializable value as pretty JSON.
pub fn print_json<T: Serialize + ?Sized>(data: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(data)?);
    Ok(())
}

// =============================================================================
// Price Breakdown
// =============================================================================

/// Customer-facing lines of a breakdown.
pub fn breakdown_rows(breakdown: &PriceBreakdown) -> Vec<KeyValue> {
    vec![
        KeyValue::new("Frame", breakdown.frame),
        KeyValue::new("Mat", breakdown.mat),
        KeyValue::new("Glass", breakdown.glass),
        KeyValue::new("Backing", breakdown.backing),
        KeyValue::new("Materials", breakdown.material_cost),
        KeyValue::new(
            format!("Labor ({} h)", breakdown.labor_hours.round_dp(2)),
            breakdown.labor,
        ),
        KeyValue::new("Subtotal", breakdown.subtotal),
        KeyValue::new(format!("Tax ({})", breakdown.tax_rate), breakdown.tax),
        KeyValue::new("Unit total", breakdown.total),
        KeyValue::new("Quantity", breakdown.quantity),
        KeyValue::new("Grand total", breakdown.grand_total),
    ]
}

/// Cost lines, empty unless the breakdown carries cost data.
pub fn profitability_rows(breakdown: &PriceBreakdown) -> Vec<KeyValue> {
    let mut rows = Vec::new();

    if let Some(wholesale) = &breakdown.wholesale {
        rows.push(KeyValue::new("Frame wholesale", wholesale.frame));
        rows.push(KeyValue::new("Mat wholesale", wholesale.mat));
        rows.push(KeyValue::new("Glass wholesale", wholesale.glass));
        rows.push(KeyValue::new("Backing wholesale", wholesale.backing));
    }

    if let Some(profit) = &breakdown.profitability {
        rows.push(KeyValue::new("Wholesale cost", profit.wholesale_cost));
        rows.push(KeyValue::new("Overhead", profit.overhead_cost));
        rows.push(KeyValue::new("Gross profit", profit.gross_profit));
        rows.push(KeyValue::new(
            "Gross margin",
            format!("{}%", (profit.gross_margin * Decimal::ONE_HUNDRED).round_dp(2)),
        ));
        rows.push(KeyValue::new(
            "Markup",
            profit
                .markup_multiplier
                .map(|m| format!("{}x", m.round_dp(2)))
                .unwrap_or_else(|| "n/a".to_string()),
        ));
    }

    rows
}

/// Prints a breakdown in the requested format.
pub fn print_breakdown(breakdown: &PriceBreakdown, format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => print_json(breakdown)?,
        OutputFormat::Table => {
            print_header("Price Breakdown");
            print_table(&breakdown_rows(breakdown));

            let costs = profitability_rows(breakdown);
            if !costs.is_empty() {
                print_header("Cost & Profitability");
                print_table(&costs);
            }

            if breakdown.used_default_wholesale_price {
                let names: Vec<String> = breakdown
                    .defaulted_components
                    .iter()
                    .map(ToString::to_string)
                    .collect();
                println!(
                    "\nNote: default wholesale price used for {}",
                    names.join(", ")
                );
            }
        }
    }
    Ok(())
}
