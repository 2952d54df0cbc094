//! Per-record boolean checks and the substring helpers they share.
//!
//! # Substring semantics
//!
//! Indices count characters (Unicode scalar values), not bytes:
//! - a range that starts at or beyond the end yields `""`
//! - a range that runs past the end is truncated at the end
//! - [`tail`] of a string shorter than `n` is the whole string
//!
//! Empty strings are neither numeric nor alphanumeric, so a short or missing
//! negotiation code fails every substring rule instead of raising.
//!
//! [`is_numeric`] and [`is_alphanumeric`] only accept ASCII digits and
//! letters. Negotiation codes are ASCII, so a non-ASCII digit or letter in a
//! code segment is a failure.

use crate::domain::asset_class::Subset;

/// Unit prices accepted as "sold at par" markers. Matched exactly.
pub const UNIT_PRICES: [f64; 4] = [0.1, 1.0, 100.0, 1000.0];

pub const NEGOTIATION_CODE_LENGTH: usize = 11;

pub fn check_unit_price(price: Option<f64>) -> bool {
    match price {
        Some(p) => UNIT_PRICES.contains(&p),
        None => false,
    }
}

/// Missing dates never match, not even each other.
pub fn check_bought_on_issue_date(issue_date: Option<&str>, buy_date: Option<&str>) -> bool {
    match (issue_date, buy_date) {
        (Some(issue), Some(buy)) => issue == buy,
        _ => false,
    }
}

/// XNOR: a unit price and a purchase on the issue date must go together.
pub fn check_unit_and_date(unit_price: bool, bought_on_issue_date: bool) -> bool {
    unit_price == bought_on_issue_date
}

pub fn check_asset_class(asset_class: &str, subset: Subset) -> bool {
    asset_class == subset.key()
}

pub fn check_length_of_negotiation_code(code: &str) -> bool {
    code.chars().count() == NEGOTIATION_CODE_LENGTH
}

/// Characters `[start, end)` of `s`.
pub fn slice(s: &str, start: usize, end: usize) -> &str {
    if start >= end {
        return "";
    }
    let from = byte_offset(s, start);
    let to = byte_offset(s, end);
    &s[from..to]
}

/// Last `n` characters of `s`.
pub fn tail(s: &str, n: usize) -> &str {
    let len = s.chars().count();
    slice(s, len.saturating_sub(n), len)
}

pub fn is_numeric(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| c.is_ascii_digit())
}

pub fn is_alphanumeric(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| c.is_ascii_alphanumeric())
}

fn byte_offset(s: &str, char_index: usize) -> usize {
    s.char_indices()
        .nth(char_index)
        .map(|(i, _)| i)
        .unwrap_or(s.len())
}
