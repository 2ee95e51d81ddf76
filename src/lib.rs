//! Checkout
//!
//! A checkout pricing calculator. Pricing rules give each item (a single
//! letter SKU) a unit price and optionally an "N for P" bulk price, e.g.
//! `A,50,3 for 130;B,30,2 for 45;C,20`. A basket such as `AAAABBB` is then
//! priced against those rules:
//!
//! ```
//! use checkout::prelude::*;
//! use rust_decimal::Decimal;
//!
//! let raw_rules = "A,50,3 for 130;B,30,2 for 45;C,20";
//! assert!(is_valid_rules(raw_rules));
//!
//! let rules = parse_rules(split_rows(raw_rules))?;
//! assert!(is_valid_basket("AAAABBB", &rules));
//!
//! let total = calculate_total(&parse_basket("AAAABBB"), &rules)?;
//! assert_eq!(total, Decimal::from(255));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod basket;
pub mod config;
pub mod prelude;
pub mod pricing;
pub mod receipt;
pub mod rules;
pub mod session;
pub mod utils;
