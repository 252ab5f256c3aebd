//! Scaled-integer arithmetic primitives.
//!
//! Token amounts never pass through floats on their own. When a float factor
//! (a USD price, a probability) has to be applied, it is first quantized to a
//! fixed number of decimal digits and the multiplication happens on BigInts.

use num_bigint::BigInt;
use num_traits::{FromPrimitive, ToPrimitive, Zero};

use crate::utils::big_pow10;

/// Quantize `factor * 10^digits` to an integer, rounding half up.
///
/// NaN and infinities quantize to zero.
pub(crate) fn quantize(factor: f64, digits: u32) -> BigInt {
    let scaled = (factor * 10f64.powi(digits as i32) + 0.5).floor();
    BigInt::from_f64(scaled).unwrap_or_default()
}

/// Multiply a scaled amount by a float rate quantized to 2 decimals.
///
/// Computes `amount * round(rate * 100) / 100` with truncating division.
/// The result keeps the decimals of `amount`.
///
/// # Example
/// ```ignore
/// // 1.5 tokens (18 decimals) at $2.005 -> $3.015 worth, still 18 decimals
/// let value = multiply_by_rate(&parse_units("1.5", 18)?, 2.005);
/// ```
pub fn multiply_by_rate(amount: &BigInt, rate: f64) -> BigInt {
    amount * quantize(rate, 2) / 100
}

/// Sum a list of scaled amounts sharing the same decimals.
pub fn sum<'a, I>(amounts: I) -> BigInt
where
    I: IntoIterator<Item = &'a BigInt>,
{
    amounts.into_iter().fold(BigInt::zero(), |total, amount| total + amount)
}

/// Divide two scaled amounts of the same decimals, returning a float.
///
/// Returns 0 when either side is zero instead of dividing by zero.
pub fn divide_to_float(numerator: &BigInt, denominator: &BigInt) -> f64 {
    if numerator.is_zero() || denominator.is_zero() {
        return 0.0;
    }

    let numerator = numerator.to_f64().unwrap_or(0.0);
    let denominator = denominator.to_f64().unwrap_or(0.0);
    if denominator == 0.0 {
        return 0.0;
    }

    numerator / denominator
}

/// Take a fraction of a scaled amount, truncating.
///
/// The fraction is quantized as a percentage carrying `precision` extra
/// decimal places: `amount * round(fraction * 10^(precision + 2)) / 10^(precision + 2)`.
/// With `precision = 0`, `0.333` of 100 is 33.
pub fn percentage_of(amount: &BigInt, fraction: f64, precision: u32) -> BigInt {
    let digits = precision + 2;
    amount * quantize(fraction, digits) / big_pow10(digits)
}
