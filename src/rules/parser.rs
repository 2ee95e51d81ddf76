//! Rule text parsing

use std::num::{NonZeroU32, ParseIntError};

use rust_decimal::Decimal;
use thiserror::Error;
use tracing::debug;

use crate::{
    rules::{
        PricingRule, PricingRules, SpecialPrice,
        validation::{BULK_SEPARATOR, FIELD_SEPARATOR, ROW_SEPARATOR},
    },
    utils::split_fields,
};

/// Errors raised while parsing rule rows that passed validation.
///
/// These mean the rule text slipped past [`is_valid_rules`](super::validation::is_valid_rules)
/// with malformed numbers, and are not meant to be retried.
#[derive(Debug, Error, PartialEq)]
pub enum RuleParseError {
    /// The unit price is not a number (row, field).
    #[error("invalid unit price {1:?} in rule {0:?}")]
    InvalidUnitPrice(String, String),

    /// The bulk quantity is not a whole number (row, source).
    #[error("invalid bulk quantity in rule {0:?}: {1}")]
    InvalidQuantity(String, #[source] ParseIntError),

    /// The bulk quantity is zero.
    #[error("bulk quantity must be at least one in rule {0:?}")]
    ZeroQuantity(String),

    /// The bulk price is not a whole number (row, source).
    #[error("invalid bulk price in rule {0:?}: {1}")]
    InvalidBundlePrice(String, #[source] ParseIntError),

    /// Nothing follows `for` in the bulk price.
    #[error("missing bulk price in rule {0:?}")]
    MissingBundlePrice(String),
}

/// Splits raw rule text into rows, ready for [`parse_rules`].
pub fn split_rows(raw_rules: &str) -> impl Iterator<Item = &str> {
    split_fields(raw_rules, ROW_SEPARATOR).into_iter()
}

/// Parses rule rows such as `["A,50,3 for 130", "B,30,2 for 45", "C,20"]`
/// into a rule set.
///
/// Rows without a comma are skipped. Rows are not re-validated: a malformed
/// number fails the whole parse. No rows gives an empty set.
///
/// # Errors
///
/// Returns a [`RuleParseError`] for the first row with a price or bulk field
/// that is not a number.
pub fn parse_rules<I>(rows: I) -> Result<PricingRules, RuleParseError>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    let rules = rows
        .into_iter()
        .filter_map(|row| {
            let row = row.as_ref();
            row.contains(FIELD_SEPARATOR).then(|| parse_rule(row))
        })
        .collect::<Result<PricingRules, _>>()?;

    debug!(rule_count = rules.len(), "parsed pricing rules");

    Ok(rules)
}

fn parse_rule(row: &str) -> Result<PricingRule, RuleParseError> {
    let fields = split_fields(row, FIELD_SEPARATOR);

    let item = fields.first().copied().unwrap_or_default();
    let price = fields.get(1).copied().unwrap_or_default();

    let unit_price = price
        .trim()
        .parse::<Decimal>()
        .map_err(|_err| RuleParseError::InvalidUnitPrice(row.to_string(), price.to_string()))?;

    match fields.get(2) {
        Some(special) if fields.len() == 3 => {
            let special_price = parse_special_price(row, special)?;

            Ok(PricingRule::with_special_price(item, unit_price, special_price))
        }
        _ => Ok(PricingRule::new(item, unit_price)),
    }
}

/// Parses a bulk price such as `3 for 130`, ignoring all whitespace.
fn parse_special_price(row: &str, special: &str) -> Result<SpecialPrice, RuleParseError> {
    let compact: String = special.chars().filter(|c| !c.is_whitespace()).collect();

    let (quantity, bundle_price) = compact
        .split_once(BULK_SEPARATOR)
        .filter(|(_, bundle_price)| !bundle_price.is_empty())
        .ok_or_else(|| RuleParseError::MissingBundlePrice(row.to_string()))?;

    let quantity = quantity
        .parse::<u32>()
        .map_err(|err| RuleParseError::InvalidQuantity(row.to_string(), err))?;

    let quantity =
        NonZeroU32::new(quantity).ok_or_else(|| RuleParseError::ZeroQuantity(row.to_string()))?;

    let bundle_price = bundle_price
        .parse::<i64>()
        .map_err(|err| RuleParseError::InvalidBundlePrice(row.to_string(), err))?;

    Ok(SpecialPrice::new(quantity, Decimal::from(bundle_price)))
}

#[cfg(test)]
mod tests {
    use std::num::NonZeroU32;

    use rust_decimal::Decimal;
    use testresult::TestResult;

    use super::*;
    use crate::rules::validation::is_valid_rules;

    fn special(rule: &PricingRule) -> Option<(u32, Decimal)> {
        rule.special_price()
            .map(|special| (special.quantity().get(), special.bundle_price()))
    }

    #[test]
    fn parses_rules_with_and_without_bulk_prices() -> TestResult {
        let rules = parse_rules(["A,50,3 for 130", "B,30,2 for 45", "C,20"])?;

        assert_eq!(rules.len(), 3);

        let a = rules.find("A").ok_or("Expected rule A")?;
        assert_eq!(a.unit_price(), Decimal::from(50));
        assert_eq!(special(a), Some((3, Decimal::from(130))));

        let b = rules.find("B").ok_or("Expected rule B")?;
        assert_eq!(b.unit_price(), Decimal::from(30));
        assert_eq!(special(b), Some((2, Decimal::from(45))));

        let c = rules.find("C").ok_or("Expected rule C")?;
        assert_eq!(c.unit_price(), Decimal::from(20));
        assert_eq!(special(c), None);

        Ok(())
    }

    #[test]
    fn no_rows_gives_empty_set() -> TestResult {
        assert!(parse_rules(std::iter::empty::<&str>())?.is_empty());
        assert!(parse_rules(None::<&str>)?.is_empty());

        Ok(())
    }

    #[test]
    fn rows_without_comma_are_skipped() -> TestResult {
        let rules = parse_rules(["A,50", "garbage", ""])?;

        assert_eq!(rules.len(), 1);

        Ok(())
    }

    #[test]
    fn keeps_sku_case_as_supplied() -> TestResult {
        let rules = parse_rules(["a,50"])?;

        assert!(rules.find("a").is_some());
        assert!(rules.find("A").is_none());

        Ok(())
    }

    #[test]
    fn parses_decimal_unit_price_and_compact_bulk_price() -> TestResult {
        let rules = parse_rules(["D,0.15,4for50"])?;
        let d = rules.find("D").ok_or("Expected rule D")?;

        assert_eq!(d.unit_price(), Decimal::new(15, 2));
        assert_eq!(special(d), Some((4, Decimal::from(50))));

        Ok(())
    }

    #[test]
    fn split_rows_feeds_parser() -> TestResult {
        let rules = parse_rules(split_rows("A,50,3 for 130;B,30,2 for 45;C,20;"))?;

        assert_eq!(rules.len(), 3);

        Ok(())
    }

    #[test]
    fn non_numeric_unit_price_fails() {
        let result = parse_rules(["A,fifty"]);

        assert_eq!(
            result,
            Err(RuleParseError::InvalidUnitPrice(
                "A,fifty".to_string(),
                "fifty".to_string()
            ))
        );
    }

    #[test]
    fn non_numeric_bulk_quantity_fails() {
        let result = parse_rules(["A,50,x for 130"]);

        assert!(matches!(result, Err(RuleParseError::InvalidQuantity(..))));
    }

    #[test]
    fn negative_bulk_quantity_fails() {
        assert!(is_valid_rules("A,50,-3 for 130"));

        let result = parse_rules(["A,50,-3 for 130"]);

        assert!(matches!(result, Err(RuleParseError::InvalidQuantity(..))));
    }

    #[test]
    fn non_numeric_bulk_price_fails() {
        let result = parse_rules(["A,50,3 for lots"]);

        assert!(matches!(result, Err(RuleParseError::InvalidBundlePrice(..))));
    }

    #[test]
    fn missing_bulk_price_fails() {
        let result = parse_rules(["A,50,3 for"]);

        assert_eq!(
            result,
            Err(RuleParseError::MissingBundlePrice("A,50,3 for".to_string()))
        );
    }

    #[test]
    fn zero_bulk_quantity_fails() {
        let result = parse_rules(["A,50,0 for 10"]);

        assert_eq!(
            result,
            Err(RuleParseError::ZeroQuantity("A,50,0 for 10".to_string()))
        );
    }

    #[test]
    fn special_price_keeps_non_zero_quantity() -> TestResult {
        let rules = parse_rules(["A,50,1 for 40"])?;
        let a = rules.find("A").ok_or("Expected rule A")?;

        assert_eq!(
            a.special_price().map(SpecialPrice::quantity),
            NonZeroU32::new(1)
        );

        Ok(())
    }
}
