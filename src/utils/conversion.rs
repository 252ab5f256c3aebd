//! Fixed-point unit conversion utilities.
//!
//! Functions for moving token quantities between their scaled integer form
//! (BigInt shifted left by `decimals`) and human readable decimal strings.

use std::str::FromStr;

use anyhow::{bail, Context, Result};
use bigdecimal::BigDecimal;
use log::warn;
use num_bigint::{BigInt, Sign};
use num_traits::Zero;
use once_cell::sync::Lazy;

// ============================================
// BigInt -> String
// ============================================

/// Format a scaled integer as a decimal string.
///
/// Trailing zeros of the fractional part are dropped but at least one
/// fractional digit is kept, so `3500000` at 3 decimals is `"3500.0"`.
/// With 0 decimals the whole number is returned without a decimal point.
///
/// # Example
/// ```ignore
/// assert_eq!(format_units(&BigInt::from(123456), 8), "0.00123456");
/// ```
pub fn format_units(value: &BigInt, decimals: u8) -> String {
    let decimal = scaled_decimal(value, decimals);
    if decimals == 0 {
        return decimal.to_plain_string();
    }

    let (_, significant_scale) = decimal.normalized().as_bigint_and_exponent();
    decimal.with_scale(significant_scale.max(1)).to_plain_string()
}

/// Format a scaled integer keeping every fractional digit.
///
/// Used where a fixed number of decimal places is part of the output format,
/// e.g. USD strings which always carry 2 digits (`10020` -> `"100.20"`).
pub fn format_units_fixed(value: &BigInt, decimals: u8) -> String {
    scaled_decimal(value, decimals).to_plain_string()
}

/// Convert a scaled integer to f64 through its decimal string form.
///
/// Parsing the decimal string gives the correctly rounded double, which keeps
/// float formulas reproducible across platforms.
pub fn units_to_f64(value: &BigInt, decimals: u8) -> f64 {
    format_units(value, decimals).parse().unwrap_or(0.0)
}

// ============================================
// String -> BigInt
// ============================================

/// Parse a decimal string into a scaled integer.
///
/// Fails when the string is not a plain decimal number or when its fractional
/// component has more significant digits than `decimals`. Exponent notation
/// (`"1e18"`) is rejected.
///
/// # Example
/// ```ignore
/// assert_eq!(parse_units("100.23", 2)?, BigInt::from(10023));
/// ```
pub fn parse_units(value: &str, decimals: u8) -> Result<BigInt> {
    let trimmed = value.trim();
    if trimmed.contains(['e', 'E']) {
        bail!("exponent notation not accepted in {value:?}");
    }

    let parsed = match trimmed.strip_prefix('-') {
        Some(rest) if rest.starts_with('.') => BigDecimal::from_str(&format!("-0{rest}")),
        _ if trimmed.starts_with('.') => BigDecimal::from_str(&format!("0{trimmed}")),
        _ => BigDecimal::from_str(trimmed),
    }
    .with_context(|| format!("invalid decimal value {value:?}"))?;

    let scaled = parsed * BigDecimal::from(big_pow10(decimals as u32));
    if !scaled.is_integer() {
        bail!("fractional component of {value:?} exceeds {decimals} decimals");
    }

    let (digits, _) = scaled.with_scale(0).as_bigint_and_exponent();
    Ok(digits)
}

/// Like [`parse_units`] but logs and returns `None` on malformed input.
pub fn safe_parse_units(value: &str, decimals: u8) -> Option<BigInt> {
    match parse_units(value, decimals) {
        Ok(parsed) => Some(parsed),
        Err(e) => {
            warn!("could not parse units from {value:?} at {decimals} decimals: {e}");
            None
        }
    }
}

/// Parse a raw integer string as delivered by the subgraph.
///
/// Accepts decimal (`"1000"`) and `0x`-prefixed hex (`"0x3e8"`) forms.
pub fn parse_big_int(value: &str) -> Option<BigInt> {
    let trimmed = value.trim();
    let (negative, unsigned) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed),
    };

    let magnitude = match unsigned
        .strip_prefix("0x")
        .or_else(|| unsigned.strip_prefix("0X"))
    {
        Some(hex) if !hex.is_empty() => BigInt::parse_bytes(hex.as_bytes(), 16)?,
        Some(_) => return None,
        None => BigInt::parse_bytes(unsigned.as_bytes(), 10)?,
    };

    Some(if negative { -magnitude } else { magnitude })
}

/// Render a BigInt in the `0x`-prefixed lowercase hex form used by cached pools.
pub fn to_hex_string(value: &BigInt) -> String {
    let (sign, magnitude) = (value.sign(), value.magnitude());
    let prefix = if sign == Sign::Minus { "-" } else { "" };
    format!("{prefix}0x{}", magnitude.to_str_radix(16))
}

// ============================================
// Internal Helpers
// ============================================

/// View a scaled integer as a decimal with `decimals` fractional digits.
fn scaled_decimal(value: &BigInt, decimals: u8) -> BigDecimal {
    BigDecimal::new(value.clone(), decimals as i64)
}

static POW10_CACHE: Lazy<[BigInt; 25]> =
    Lazy::new(|| std::array::from_fn(|i| BigInt::from(10u32).pow(i as u32)));

/// Compute 10^exp as BigInt.
pub(crate) fn big_pow10(exp: u32) -> BigInt {
    if (exp as usize) < POW10_CACHE.len() {
        POW10_CACHE[exp as usize].clone()
    } else {
        BigInt::from(10u32).pow(exp)
    }
}

/// Parse a plain decimal string into a BigDecimal, treating junk as zero.
pub(crate) fn decimal_or_zero(value: &str) -> BigDecimal {
    value.trim().parse().unwrap_or_else(|_| BigDecimal::zero())
}
