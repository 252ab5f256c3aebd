//! String formatting of token amounts, USD values and percentages.

use anyhow::{Context, Result};
use num_bigint::BigInt;

use super::display::{render_decimal, round_to_scale, Locale, Rounding};
use crate::utils::{decimal_or_zero, format_units, format_units_fixed, parse_units};

/// Decimals of the scaled USD representation (cents).
pub const USD_DECIMALS: u8 = 2;

// ============================================
// Truncation and USD scaling
// ============================================

/// Cut a decimal string down to `precision` fractional digits.
///
/// Pure truncation: `"100.239"` at 2 is `"100.23"`, never `"100.24"`.
/// A string without a decimal point (or a precision of 0) yields the
/// integer part.
pub fn truncate_to_precision(value: &str, precision: usize) -> String {
    match value.split_once('.') {
        None => value.to_string(),
        Some((whole, _)) if precision == 0 => whole.to_string(),
        Some((whole, fraction)) => {
            let end = fraction
                .char_indices()
                .nth(precision)
                .map_or(fraction.len(), |(i, _)| i);
            format!("{whole}.{}", &fraction[..end])
        }
    }
}

/// Convert a USD string (`"100.239"`) into scaled cents (`10023`).
pub fn to_scaled_usd(usd: &str) -> Result<BigInt> {
    parse_units(&truncate_to_precision(usd, USD_DECIMALS as usize), USD_DECIMALS)
        .with_context(|| format!("invalid USD value {usd:?}"))
}

/// Inverse of [`to_scaled_usd`]: `10023` becomes `"100.23"`.
pub fn to_usd_string(scaled_usd: &BigInt) -> String {
    format_units_fixed(scaled_usd, USD_DECIMALS)
}

// ============================================
// Percentages
// ============================================

/// Round a percentage to 2 decimals, then drop a `.00` or a single trailing zero.
///
/// `"12.5"` stays `"12.5"`, `"10"` stays `"10"`, `"33.333"` becomes `"33.33"`.
/// Unparseable input formats as `"0"`.
pub fn format_percentage_for_display(percentage: &str) -> String {
    let rounded = round_to_scale(&decimal_or_zero(percentage), 2, Rounding::HalfUp);
    let fixed = format_units_fixed(&rounded, 2);

    if let Some(whole) = fixed.strip_suffix(".00") {
        return if whole == "-0" { "0".to_string() } else { whole.to_string() };
    }
    match fixed.strip_suffix('0') {
        Some(trimmed) => trimmed.to_string(),
        None => fixed,
    }
}

// ============================================
// Pretty numbers
// ============================================

/// Options for [`number_with_commas`] and [`pretty_number_with_options`].
#[derive(Debug, Clone, Default)]
pub struct NumberFormatOptions {
    /// Fraction digits to keep. Picked from the magnitude when `None`.
    pub precision: Option<usize>,
    pub locale: Locale,
    pub remove_trailing_zeros: bool,
}

/// Fraction digits worth showing for a value.
///
/// Large values drop decimals entirely, ordinary ones get cents, and tiny
/// ones keep two significant digits past their leading zeros. Zero shows
/// cents.
pub fn display_precision(value: &str) -> usize {
    let amount = value.trim().parse::<f64>().unwrap_or(0.0);
    if amount > 10_000.0 {
        0
    } else if amount >= 0.1 {
        2
    } else {
        minimum_precision(value)
    }
}

fn minimum_precision(value: &str) -> usize {
    let Some((_, fraction)) = value.trim().split_once('.') else {
        return 2;
    };
    match fraction.find(|c: char| c != '0') {
        Some(leading_zeros) => leading_zeros + 2,
        None => 2,
    }
}

/// Fraction digits kept once trailing zeros are removed.
const MAX_TRIMMED_FRACTION_DIGITS: usize = 3;

/// Group a decimal string with thousands separators for display.
///
/// Precision 0 floors, precision 2 rounds half up and any other precision
/// truncates. Removing trailing zeros also caps the fraction at 3 digits.
pub fn number_with_commas(value: &str, options: &NumberFormatOptions) -> String {
    let precision = options.precision.unwrap_or_else(|| display_precision(value));

    let adjusted = match precision {
        0 => round_to_scale(&decimal_or_zero(value), 0, Rounding::Floor).to_string(),
        2 => format_units_fixed(&round_to_scale(&decimal_or_zero(value), 2, Rounding::HalfUp), 2),
        _ => truncate_to_precision(value.trim(), precision),
    };

    if options.remove_trailing_zeros {
        render_decimal(&adjusted, options.locale, 0, precision.min(MAX_TRIMMED_FRACTION_DIGITS))
    } else {
        render_decimal(&adjusted, options.locale, precision, precision)
    }
}

/// Format a scaled amount with automatic precision in the default locale.
///
/// # Example
/// ```ignore
/// assert_eq!(pretty_number(&BigInt::from(123456), 8), "0.0012");
/// ```
pub fn pretty_number(amount: &BigInt, decimals: u8) -> String {
    pretty_number_with_options(amount, decimals, &NumberFormatOptions::default())
}

pub fn pretty_number_with_options(
    amount: &BigInt,
    decimals: u8,
    options: &NumberFormatOptions,
) -> String {
    number_with_commas(&format_units(amount, decimals), options)
}
