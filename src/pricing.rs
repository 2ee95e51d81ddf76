//! Pricing
//!
//! Applies pricing rules to a parsed basket to produce the checkout total.

use rust_decimal::Decimal;
use thiserror::Error;
use tracing::trace;

use crate::{
    basket::ParsedBasket,
    rules::{PricingRule, PricingRules},
};

/// Errors that can occur while pricing a basket.
#[derive(Debug, Error, PartialEq)]
pub enum PricingError {
    /// A line total or the running total does not fit in a `Decimal` (item).
    #[error("checkout total overflowed while pricing item {0:?}")]
    Overflow(String),
}

/// Calculates the checkout total of `basket` under `rules`.
///
/// Returns zero if either side is empty. Items without a rule contribute
/// nothing.
///
/// # Errors
///
/// Returns [`PricingError::Overflow`] if the total cannot be represented.
pub fn calculate_total(basket: &ParsedBasket, rules: &PricingRules) -> Result<Decimal, PricingError> {
    if basket.is_empty() || rules.is_empty() {
        return Ok(Decimal::ZERO);
    }

    basket.iter().try_fold(Decimal::ZERO, |acc, (item, count)| {
        let Some(rule) = rules.find(item) else {
            trace!(item, count, "no pricing rule for item");
            return Ok(acc);
        };

        let total = line_total(count, rule)?;
        trace!(item, count, %total, "priced basket line");

        acc.checked_add(total)
            .ok_or_else(|| PricingError::Overflow(item.to_string()))
    })
}

/// Price of `count` units under a single rule.
///
/// With a bulk price, every complete bundle of `quantity` units is charged
/// at the bundle price when `units % quantity` is either zero or `units`
/// itself (otherwise at the unit price), and leftover units at the unit price.
///
/// # Errors
///
/// Returns [`PricingError::Overflow`] if the line total cannot be represented.
pub fn line_total(count: usize, rule: &PricingRule) -> Result<Decimal, PricingError> {
    let overflow = || PricingError::Overflow(rule.item().to_string());
    let unit_price = rule.unit_price();

    let Some(special) = rule.special_price() else {
        return unit_price
            .checked_mul(Decimal::from(count))
            .ok_or_else(overflow);
    };

    let quantity = u64::from(special.quantity().get());
    let count = count as u64;

    let remainder = count % quantity;
    let units = (count - remainder) / quantity;

    let per_bundle = if bundle_price_applies(units, quantity) {
        special.bundle_price()
    } else {
        unit_price
    };

    let bundles = Decimal::from(units)
        .checked_mul(per_bundle)
        .ok_or_else(overflow)?;

    let leftovers = Decimal::from(remainder)
        .checked_mul(unit_price)
        .ok_or_else(overflow)?;

    bundles.checked_add(leftovers).ok_or_else(overflow)
}

fn bundle_price_applies(units: u64, quantity: u64) -> bool {
    let cycle = units % quantity;

    cycle == 0 || cycle == units
}
