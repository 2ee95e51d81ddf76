//! Basket
//!
//! A basket is entered as a run of item letters, one per unit purchased,
//! e.g. `ABBABBA`. It is checked against the current rules with
//! [`is_valid_basket`] and grouped into per-item counts with [`parse_basket`].

use rustc_hash::FxHashMap;
use tracing::debug;

use crate::{rules::PricingRules, utils::is_blank};

/// Item counts for a single checkout.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ParsedBasket {
    counts: FxHashMap<String, usize>,
}

impl ParsedBasket {
    /// Create an empty basket.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one more unit of `item`.
    pub fn add(&mut self, item: impl Into<String>) {
        *self.counts.entry(item.into()).or_default() += 1;
    }

    /// Number of units of `item` in the basket.
    pub fn count(&self, item: &str) -> usize {
        self.counts.get(item).copied().unwrap_or_default()
    }

    /// Number of distinct items in the basket.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Check if the basket is empty.
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Iterate over `(item, count)` pairs in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.counts
            .iter()
            .map(|(item, count)| (item.as_str(), *count))
    }
}

impl<S: Into<String>> FromIterator<S> for ParsedBasket {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut basket = Self::new();

        for item in iter {
            basket.add(item);
        }

        basket
    }
}

/// Checks that every letter of `basket` is an item priced by `rules`.
pub fn is_valid_basket(basket: &str, rules: &PricingRules) -> bool {
    if is_blank(basket) {
        debug!("basket is blank");
        return false;
    }

    if let Some(c) = basket.chars().find(|c| !c.is_alphabetic()) {
        debug!(basket, character = %c, "basket has a non-alphabetic character");
        return false;
    }

    let mut buf = [0; 4];

    if let Some(c) = basket
        .chars()
        .find(|c| !rules.contains_item(c.encode_utf8(&mut buf)))
    {
        debug!(basket, item = %c, "basket item has no pricing rule");
        return false;
    }

    true
}

/// Groups the letters of `basket` into per-item counts.
///
/// A blank basket, or one with any non-alphabetic character, gives an empty
/// result rather than an error.
pub fn parse_basket(basket: &str) -> ParsedBasket {
    if is_blank(basket) || basket.chars().any(|c| !c.is_alphabetic()) {
        return ParsedBasket::new();
    }

    basket.chars().map(String::from).collect()
}
