//! Checkout prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    basket::{ParsedBasket, is_valid_basket, parse_basket},
    pricing::{PricingError, calculate_total, line_total},
    receipt::{ReceiptError, checkout_summary, format_total, write_rules_table},
    rules::{
        PricingRule, PricingRules, SpecialPrice,
        parser::{RuleParseError, parse_rules, split_rows},
        validation::is_valid_rules,
    },
    session::{CheckoutSession, SessionError, is_valid_continue},
};
