//! Pricing Rules
//!
//! A pricing rule prices one item type: a unit price and an optional
//! "N for P" bulk price. Rules are built from user supplied text such as
//! `A,50,3 for 130;B,30,2 for 45;C,20`, checked first by
//! [`validation::is_valid_rules`] and then turned into a [`PricingRules`]
//! set by [`parser::parse_rules`].

use std::{fmt, num::NonZeroU32};

use rust_decimal::Decimal;
use smallvec::SmallVec;

pub mod parser;
pub mod validation;

/// Bulk price: every `quantity` units cost `bundle_price` in total.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct SpecialPrice {
    quantity: NonZeroU32,
    bundle_price: Decimal,
}

impl SpecialPrice {
    /// Creates a new bulk price.
    pub fn new(quantity: NonZeroU32, bundle_price: Decimal) -> Self {
        Self {
            quantity,
            bundle_price,
        }
    }

    /// Number of units in one bundle
    pub fn quantity(&self) -> NonZeroU32 {
        self.quantity
    }

    /// Price of one complete bundle
    pub fn bundle_price(&self) -> Decimal {
        self.bundle_price
    }
}

impl fmt::Display for SpecialPrice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} for {}", self.quantity, self.bundle_price)
    }
}

/// Pricing for a single item type.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PricingRule {
    item: String,
    unit_price: Decimal,
    special_price: Option<SpecialPrice>,
}

impl PricingRule {
    /// Creates a rule charging `unit_price` for every unit of `item`.
    pub fn new(item: impl Into<String>, unit_price: Decimal) -> Self {
        Self {
            item: item.into(),
            unit_price,
            special_price: None,
        }
    }

    /// Creates a rule with a bulk price on top of the unit price.
    pub fn with_special_price(
        item: impl Into<String>,
        unit_price: Decimal,
        special_price: SpecialPrice,
    ) -> Self {
        Self {
            item: item.into(),
            unit_price,
            special_price: Some(special_price),
        }
    }

    /// Item identifier (SKU)
    pub fn item(&self) -> &str {
        &self.item
    }

    /// Price of a single unit
    pub fn unit_price(&self) -> Decimal {
        self.unit_price
    }

    /// Bulk price, if the item has one
    pub fn special_price(&self) -> Option<&SpecialPrice> {
        self.special_price.as_ref()
    }

    /// The bulk price rendered as `"<qty> for <price>"`, or an empty string.
    pub fn formatted_special_price(&self) -> String {
        self.special_price
            .as_ref()
            .map(ToString::to_string)
            .unwrap_or_default()
    }
}

/// A set of pricing rules for one checkout cycle.
///
/// Lookups return the first rule for an item. Duplicate items are rejected
/// by validation, never merged here.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PricingRules {
    rules: SmallVec<[PricingRule; 8]>,
}

impl PricingRules {
    /// Creates an empty rule set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a rule to the set.
    pub fn push(&mut self, rule: PricingRule) {
        self.rules.push(rule);
    }

    /// Finds the first rule for `item`.
    pub fn find(&self, item: &str) -> Option<&PricingRule> {
        self.rules.iter().find(|rule| rule.item == item)
    }

    /// Whether any rule prices `item`.
    pub fn contains_item(&self, item: &str) -> bool {
        self.find(item).is_some()
    }

    /// Number of rules in the set.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Whether the set has no rules.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Iterate over the rules in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &PricingRule> {
        self.rules.iter()
    }

    /// Rules ordered by item identifier, ascending.
    pub fn sorted_by_item(&self) -> SmallVec<[&PricingRule; 8]> {
        let mut sorted: SmallVec<[&PricingRule; 8]> = self.iter().collect();
        sorted.sort_by(|a, b| a.item.cmp(&b.item));
        sorted
    }
}

impl FromIterator<PricingRule> for PricingRules {
    fn from_iter<I: IntoIterator<Item = PricingRule>>(iter: I) -> Self {
        Self {
            rules: iter.into_iter().collect(),
        }
    }
}
