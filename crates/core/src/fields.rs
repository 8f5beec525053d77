//! Field-level predicates and display formatting.
//!
//! Everything here is pure and total: no allocation failures are surfaced,
//! no input makes these functions panic.

use rust_decimal::{Decimal, RoundingStrategy};
use time::macros::format_description;
use time::Date;
use uuid::Uuid;

/// Maximum accepted length of a payment identifier.
pub const PAYMENT_ID_MAX_LEN: usize = 36;

/// Placeholder rendered for absent values in the results table.
pub const PLACEHOLDER: &str = "-";

/// Length of the hyphenated 8-4-4-4-12 UUID form.
const UUID_HYPHENATED_LEN: usize = 36;

/// Characters kept verbatim at each end of a masked card number.
const CARD_VISIBLE_EDGE: usize = 4;

/// True if `value` is empty or whitespace only.
pub fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// True if `value` is in the canonical 8-4-4-4-12 hex UUID form.
///
/// Hex digits may be upper or lower case. Braced, URN and hyphen-less
/// forms are rejected.
pub fn is_uuid(value: &str) -> bool {
    value.len() == UUID_HYPHENATED_LEN && Uuid::try_parse(value).is_ok()
}

/// True if `value` has the `YYYY-MM-DD` shape (digits only, no calendar check).
pub fn is_iso_date_shape(value: &str) -> bool {
    let bytes = value.as_bytes();
    bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        })
}

/// Parse a `YYYY-MM-DD` string into a calendar date.
///
/// Returns `None` for anything that is not the exact shape or does not name
/// a real day (e.g. `2023-02-29`).
pub fn parse_iso_date(value: &str) -> Option<Date> {
    if !is_iso_date_shape(value) {
        return None;
    }
    Date::parse(value, format_description!("[year]-[month]-[day]")).ok()
}

/// Render a calendar date as `YYYY-MM-DD`.
pub fn format_iso_date(date: Date) -> String {
    format!(
        "{:04}-{:02}-{:02}",
        date.year(),
        u8::from(date.month()),
        date.day()
    )
}

/// Mask the middle of a card number and group it in blocks of four.
///
/// The first and last four characters stay visible; every character strictly
/// between them becomes `*`. Numbers of eight characters or fewer have no
/// hidden middle and are only regrouped.
///
/// `1234567812345678` → `1234 **** **** 5678`
pub fn mask_card(card_number: &str) -> String {
    let chars: Vec<char> = card_number.chars().collect();
    let len = chars.len();

    let masked: Vec<char> = chars
        .iter()
        .enumerate()
        .map(|(i, c)| {
            if i < CARD_VISIBLE_EDGE || i + CARD_VISIBLE_EDGE >= len {
                *c
            } else {
                '*'
            }
        })
        .collect();

    masked
        .chunks(4)
        .map(|block| block.iter().collect::<String>())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Format an amount with exactly two decimal places.
///
/// Midpoints round away from zero: `0.125` → `0.13`.
pub fn format_amount(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    format!("{:.2}", rounded)
}

/// Upper-case the first character of a status, leaving the rest untouched.
///
/// `captured` → `Captured`, `vOIDED` → `VOIDED`.
pub fn status_label(status: &str) -> String {
    let mut chars = status.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Render an optional timestamp literally, or [`PLACEHOLDER`] when absent or empty.
pub fn timestamp_or_placeholder(value: Option<&str>) -> String {
    match value {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => PLACEHOLDER.to_string(),
    }
}
