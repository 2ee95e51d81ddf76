//! Receipt
//!
//! Rendering for the checkout console: the pricing rule table and the
//! formatted checkout total.

use std::io;

use rust_decimal::Decimal;
use rusty_money::{Money, iso::Currency};
use tabled::{
    builder::Builder,
    settings::{Alignment, Style, object::Columns},
};
use thiserror::Error;

use crate::rules::PricingRules;

/// Errors that can occur when writing receipt output.
#[derive(Debug, Error)]
pub enum ReceiptError {
    /// Writing to the output failed.
    #[error("failed to write receipt output: {0}")]
    Io(#[from] io::Error),
}

/// Writes `rules` as a table sorted by item, writing nothing for an empty set.
///
/// # Errors
///
/// Returns a [`ReceiptError`] if the table cannot be written to `out`.
pub fn write_rules_table(mut out: impl io::Write, rules: &PricingRules) -> Result<(), ReceiptError> {
    if rules.is_empty() {
        return Ok(());
    }

    let mut builder = Builder::default();

    builder.push_record(["Item", "Unit Price", "Special Price"]);

    for rule in rules.sorted_by_item() {
        builder.push_record([
            rule.item().to_string(),
            rule.unit_price().to_string(),
            rule.formatted_special_price(),
        ]);
    }

    let mut table = builder.build();

    table.with(Style::modern_rounded());
    table.modify(Columns::new(1..2), Alignment::right());

    writeln!(out, "{table}")?;

    Ok(())
}

/// Formats a checkout total in `currency`, e.g. `£255.00`.
pub fn format_total(total: Decimal, currency: &'static Currency) -> String {
    Money::from_decimal(total, currency).to_string()
}

/// The line printed after a checkout.
pub fn checkout_summary(basket: &str, formatted_total: &str) -> String {
    format!("The checkout total for the basket {basket} is: {formatted_total}")
}
