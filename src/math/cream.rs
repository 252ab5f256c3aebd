//! Borrow and supply APY for jump-rate interest models with two kinks
//! (the Cream Finance variant of Compound's model).
//!
//! All rate inputs are 18-decimal fixed-point values as read from the
//! interest rate model contract. They are converted to doubles first and the
//! compounding happens in f64.

use num_bigint::BigInt;
use num_traits::ToPrimitive;

use crate::utils::units_to_f64;

const MANTISSA_DECIMALS: u8 = 18;

fn mantissa(value: &BigInt) -> f64 {
    units_to_f64(value, MANTISSA_DECIMALS)
}

/// Annual borrow APY.
///
/// ```text
/// rate_per_block = 1 + base + multiplier * min(utilization, kink1)
///                    + max(jump_multiplier * utilization - kink2, 0)
/// apy            = rate_per_block ^ blocks_per_year - 1
/// ```
///
/// # Arguments
/// * `base` - Base rate per block
/// * `multiplier` - Rate slope below the first kink
/// * `utilization` - Current utilization rate
/// * `kink1` - Utilization where the normal slope stops
/// * `kink2` - Utilization offset applied to the jump slope
/// * `jump_multiplier` - Rate slope past the kink
/// * `blocks_per_year` - Plain integer block count
pub fn cream_borrow_apy(
    base: &BigInt,
    multiplier: &BigInt,
    utilization: &BigInt,
    kink1: &BigInt,
    kink2: &BigInt,
    jump_multiplier: &BigInt,
    blocks_per_year: &BigInt,
) -> f64 {
    let base = mantissa(base);
    let multiplier = mantissa(multiplier);
    let utilization = mantissa(utilization);
    let kink1 = mantissa(kink1);
    let kink2 = mantissa(kink2);
    let jump_multiplier = mantissa(jump_multiplier);
    let blocks_per_year = blocks_per_year.to_f64().unwrap_or(0.0);

    let rate_per_block = 1.0
        + base
        + multiplier * utilization.min(kink1)
        + (jump_multiplier * utilization - kink2).max(0.0);

    rate_per_block.powf(blocks_per_year) - 1.0
}

/// Annual supply APY derived from the borrow APY.
///
/// ```text
/// borrow_rate_per_block = (1 + borrow_apy) ^ (1 / blocks_per_year) - 1
/// apy = (1 + borrow_rate_per_block * (1 - reserve_factor) * utilization) ^ blocks_per_year - 1
/// ```
pub fn cream_supply_apy(
    borrow_apy: f64,
    reserve_factor: &BigInt,
    utilization: &BigInt,
    blocks_per_year: &BigInt,
) -> f64 {
    let reserve_factor = mantissa(reserve_factor);
    let utilization = mantissa(utilization);
    let blocks_per_year = blocks_per_year.to_f64().unwrap_or(0.0);

    let borrow_rate_per_block = (1.0 + borrow_apy).powf(1.0 / blocks_per_year) - 1.0;
    let supply_rate_per_block = borrow_rate_per_block * (1.0 - reserve_factor) * utilization;

    (1.0 + supply_rate_per_block).powf(blocks_per_year) - 1.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::parse_big_int;

    fn hex(value: &str) -> BigInt {
        parse_big_int(value).unwrap()
    }

    #[test]
    fn test_borrow_apy() {
        let borrow_apy = cream_borrow_apy(
            &hex("0x00"),
            &hex("0x13ef232c54"),
            &hex("0x0644242098114ac3"),
            &hex("0x0b1a2bc2ec500000"),
            &hex("0x0c7d713b49da0000"),
            &hex("0x0375f61b4063"),
            &hex("0x201480"),
        );
        assert_eq!(borrow_apy, 0.08466870959297257);
    }

    #[test]
    fn test_supply_apy() {
        let supply_apy = cream_supply_apy(
            0.08466870959297257,
            &hex("0x016345785d8a0000"),
            &hex("0x0644242098114ac3"),
            &hex("0x201480"),
        );
        assert_eq!(supply_apy, 0.03357927947589978);
    }
}
