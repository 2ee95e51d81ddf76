//! Rule text validation
//!
//! Structural checks run over raw rule text before it is parsed. The whole
//! text is accepted or rejected; there is no per-row reporting.

use rustc_hash::FxHashSet;
use tracing::debug;

use crate::utils::{is_blank, split_fields};

/// Separates rule rows in raw rule text.
pub const ROW_SEPARATOR: char = ';';

/// Separates the fields of a single rule row.
pub const FIELD_SEPARATOR: char = ',';

/// Separates the bulk quantity from the bulk price, as in `3 for 130`.
pub const BULK_SEPARATOR: &str = "for";

/// Checks that raw rule text such as `A,50,3 for 130;B,30,2 for 45;C,20` is
/// well formed.
///
/// Each row needs a leading letter (the SKU), a unit price and optionally a
/// bulk price containing `for`. Leading SKU letters must be unique across
/// rows, ignoring case.
pub fn is_valid_rules(raw_rules: &str) -> bool {
    if is_blank(raw_rules) {
        debug!("rule text is blank");
        return false;
    }

    let rows = split_fields(raw_rules, ROW_SEPARATOR);
    if rows.is_empty() {
        debug!("rule text has no rows");
        return false;
    }

    if let Some(row) = rows.iter().find(|row| !row.contains(FIELD_SEPARATOR)) {
        debug!(row, "rule row has no comma");
        return false;
    }

    let mut skus = FxHashSet::default();

    for row in &rows {
        let Some(sku) = leading_sku(row) else {
            debug!(row, "rule row does not start with a letter");
            return false;
        };

        let field_count = split_fields(row, FIELD_SEPARATOR).len();
        if !(2..=3).contains(&field_count) {
            debug!(row, field_count, "rule row has the wrong number of fields");
            return false;
        }

        if !skus.insert(sku) {
            debug!(row, %sku, "duplicate SKU in rule text");
            return false;
        }
    }

    let missing_bulk_separator = rows.iter().find(|row| {
        split_fields(row, FIELD_SEPARATOR)
            .get(2)
            .is_some_and(|special| !special.contains(BULK_SEPARATOR))
    });

    if let Some(row) = missing_bulk_separator {
        debug!(row, "bulk price has no `for`");
        return false;
    }

    true
}

/// Upper-cased first character of a row, if it is a letter.
fn leading_sku(row: &str) -> Option<char> {
    row.chars()
        .next()
        .and_then(|c| c.to_uppercase().next())
        .filter(|c| c.is_alphabetic())
}
