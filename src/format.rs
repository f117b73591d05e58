//! Display rules for decimal amounts.
//!
//! Amounts are rounded to a precision that depends on their magnitude, so
//! that large values stay short and small values keep their significant
//! digits. Malformed input never fails, it renders as `"0"`.

use alloy::primitives::Address;
use fastnum::{
    D128, dec128,
    decimal::{Context, RoundingMode},
};
use itertools::Itertools;

/// Renders the amount with precision tiered by magnitude.
///
/// * Zero, or values of at least `1` in magnitude that round to the same
///   number at 3 decimals and at 0 decimals, render as a plain integer.
/// * `|x| >= 1000` renders as an integer with thousands separators.
/// * `|x| >= 100` renders with 2 decimals.
/// * `|x| >= 10` renders with up to 3 decimals.
/// * `|x| >= 0.1` renders with up to 5 decimals.
/// * anything smaller renders with up to 6 decimals.
///
/// `max_precision` caps the last three tiers, `None` or `Some(0)` leave them
/// uncapped.
pub fn format_to_display(amount: D128, max_precision: Option<u8>) -> String {
    if amount.is_nan() || amount.is_infinite() {
        return "0".to_string();
    }
    let max_precision = match max_precision {
        Some(p) if p > 0 => p as i16,
        _ => i16::MAX,
    };
    let magnitude = amount.abs();

    let rounded = round_half_up_ceiling(amount);
    if (amount.is_zero() || magnitude >= D128::ONE)
        && amount.with_rounding_mode(RoundingMode::HalfUp).rescale(3) == rounded
    {
        return to_fixed(rounded, 0);
    }

    if magnitude >= dec128!(1000) {
        group_thousands(&to_fixed(rounded, 0))
    } else if magnitude >= dec128!(100) {
        to_fixed(amount, 2)
    } else if magnitude >= dec128!(10) {
        to_fixed(amount, max_precision.min(3))
    } else if magnitude >= dec128!(0.1) {
        to_fixed(amount, max_precision.min(5))
    } else {
        to_fixed(amount, max_precision.min(6))
    }
}

/// Parses the text and renders it with [`format_to_display`].
/// Non-numeric text renders as `"0"`.
pub fn format_str_to_display(text: &str, max_precision: Option<u8>) -> String {
    match D128::from_str(text.trim(), Context::default()) {
        Ok(amount) => format_to_display(amount, max_precision),
        Err(_) => "0".to_string(),
    }
}

/// Renders PnL with an explicit sign.
///
/// When `is_negative` is not given it follows the sign of the value. Positive
/// values flagged negative (unsigned on-chain PnL with a separate flag) get a
/// `-` prefix, values that are already negative carry their own sign.
/// Percentages are limited to 2 decimals. Missing PnL renders empty.
pub fn format_pnl(pnl: Option<D128>, is_negative: Option<bool>, is_percent: bool) -> String {
    let Some(pnl) = pnl else {
        return String::new();
    };
    let is_negative = is_negative.unwrap_or(pnl.is_negative() && !pnl.is_zero());
    let prefix = if !is_negative {
        "+"
    } else if pnl > D128::ZERO {
        "-"
    } else {
        ""
    };
    let precision = if is_percent { Some(2) } else { None };
    format!("{prefix}{}", format_to_display(pnl, precision))
}

/// Shortened `0x1234...abcd` form of the address.
pub fn short_address(address: &Address) -> String {
    let full = address.to_string();
    format!("{}...{}", &full[..6], &full[full.len() - 4..])
}

/// Nearest integer, ties towards positive infinity.
fn round_half_up_ceiling(amount: D128) -> D128 {
    let mode = if amount.is_negative() {
        RoundingMode::HalfDown
    } else {
        RoundingMode::HalfUp
    };
    amount.with_rounding_mode(mode).rescale(0)
}

/// Fixed-point rendering with exactly `places` decimals, ties away from zero.
fn to_fixed(amount: D128, places: i16) -> String {
    let rounded = amount
        .with_rounding_mode(RoundingMode::HalfUp)
        .rescale(places);
    let mut digits: String = rounded
        .digits()
        .to_radix_le(10)
        .iter()
        .rev()
        .map(|d| char::from(b'0' + d))
        .collect();
    // Values too wide for the coefficient keep a coarser scale.
    let missing = places as i32 - rounded.fractional_digits_count() as i32;
    if missing > 0 && !rounded.is_zero() {
        digits.push_str(&"0".repeat(missing as usize));
    }
    let places = places as usize;
    if digits.len() <= places {
        digits = format!("{}{digits}", "0".repeat(places + 1 - digits.len()));
    }
    let sign = if rounded.is_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    let (int, frac) = digits.split_at(digits.len() - places);
    if places == 0 {
        format!("{sign}{int}")
    } else {
        format!("{sign}{int}.{frac}")
    }
}

fn group_thousands(integer: &str) -> String {
    let (sign, digits) = match integer.strip_prefix('-') {
        Some(digits) => ("-", digits),
        None => ("", integer),
    };
    let head = digits.len() % 3;
    let mut groups = Vec::with_capacity(digits.len() / 3 + 1);
    if head > 0 {
        groups.push(&digits[..head]);
    }
    groups.extend(
        digits.as_bytes()[head..]
            .chunks(3)
            .map(|chunk| std::str::from_utf8(chunk).unwrap_or_default()),
    );
    format!("{sign}{}", groups.iter().join(","))
}
