//! Utils

use smallvec::SmallVec;

/// Split `text` on `separator`, dropping any empty segments at the end.
///
/// Interior empty segments are kept, so `"A,50;;B,20"` still yields an empty
/// middle row. A string made only of separators yields no segments at all.
pub fn split_fields<'a>(text: &'a str, separator: char) -> SmallVec<[&'a str; 4]> {
    let mut fields: SmallVec<[&'a str; 4]> = text.split(separator).collect();

    while fields.last().is_some_and(|field| field.is_empty()) {
        fields.pop();
    }

    fields
}

/// Whether `text` is empty or whitespace only.
pub fn is_blank(text: &str) -> bool {
    text.trim().is_empty()
}
