//! Yield, APR and LP pricing formulas.

use anyhow::{Context, Result};
use num_bigint::BigInt;
use num_traits::Zero;

use super::fixed_point::{multiply_by_rate, quantize, sum};
use crate::utils::{big_pow10, format_units_fixed, parse_units, time::SECONDS_PER_YEAR};

/// Decimals of per-block supply rates reported by cToken style markets.
const RATE_DECIMALS: u32 = 18;

/// Estimate the prize at the end of the period: existing prize plus the yield
/// the deposits will accrue over the remaining blocks.
///
/// ```text
/// yield = total_supply * supply_rate_per_block * round(remaining_blocks) * reserve_rate
///         / 10^18 / 10^decimals
/// ```
///
/// The two divisions undo the fixed-point scaling of the per-block rate
/// (always 18 decimals) and of the reserve rate (scaled to `decimals`,
/// rounding half up).
/// A zero (or non-finite) reserve rate contributes no yield.
///
/// # Arguments
/// * `existing_prize` - Prize accrued so far, same decimals as `total_supply`
/// * `total_supply` - Total pool deposits
/// * `supply_rate_per_block` - Per-block supply rate shifted 18 decimals
/// * `decimals` - Decimals of the pool's underlying token
/// * `remaining_blocks` - Blocks left in the prize period, e.g. `23034.23`
/// * `reserve_rate` - Share of the yield counted towards the prize, e.g. `0.5`
pub fn estimated_prize_with_yield(
    existing_prize: &BigInt,
    total_supply: &BigInt,
    supply_rate_per_block: &BigInt,
    decimals: u8,
    remaining_blocks: f64,
    reserve_rate: f64,
) -> BigInt {
    let reserve_rate_scaled = quantize(reserve_rate, decimals as u32);

    if reserve_rate_scaled.is_zero() {
        return existing_prize.clone();
    }

    let blocks = BigInt::from(remaining_blocks.round().max(0.0) as u64);
    let prize_yield = total_supply * supply_rate_per_block * blocks * reserve_rate_scaled
        / big_pow10(RATE_DECIMALS)
        / big_pow10(decimals as u32);

    prize_yield + existing_prize
}

/// Annualized percentage rate of a daily value against a total value.
///
/// Both values must share decimals. Returns `"0"` when either is zero,
/// otherwise `daily * 10000 * 365 / total` rendered with 2 decimals:
/// a daily value of 10 on a total of 100 gives `"3650.00"` (percent).
pub fn apr(total_daily_value: &BigInt, total_value: &BigInt) -> String {
    if total_daily_value.is_zero() || total_value.is_zero() {
        return "0".to_string();
    }

    let scaled = total_daily_value * 10_000 * 365 / total_value;
    format_units_fixed(&scaled, 2)
}

/// USD price of one LP token of a two-asset pool, truncated.
///
/// Amounts and supply are decimal strings parsed at 18 decimals; the result
/// is a whole-number USD price. A zero supply prices the token at 0.
pub fn lp_token_price(
    token1_amount: &str,
    token2_amount: &str,
    token1_value_usd: f64,
    token2_value_usd: f64,
    total_supply: &str,
) -> Result<BigInt> {
    let token1 = parse_units(token1_amount, 18).context("invalid first token amount")?;
    let token2 = parse_units(token2_amount, 18).context("invalid second token amount")?;
    let supply = parse_units(total_supply, 18).context("invalid LP token supply")?;

    if supply.is_zero() {
        return Ok(BigInt::zero());
    }

    let total_value = sum(&[
        multiply_by_rate(&token1, token1_value_usd),
        multiply_by_rate(&token2, token2_value_usd),
    ]);

    Ok(total_value / supply)
}

/// Estimated USD value (scaled by 100) of the COMP a pool accrues before the
/// prize is awarded.
///
/// # Arguments
/// * `comp_apy` - COMP distribution APY as a percent, e.g. `2.39`. `None` yields 0.
/// * `deposits_value_usd_scaled` - Total deposits in scaled USD
/// * `remaining_seconds` - Seconds left in the prize period
pub fn estimated_accrued_comp_value_usd_scaled(
    comp_apy: Option<f64>,
    deposits_value_usd_scaled: &BigInt,
    remaining_seconds: u64,
) -> BigInt {
    let Some(comp_apy) = comp_apy else {
        return BigInt::zero();
    };

    let yearly = multiply_by_rate(deposits_value_usd_scaled, comp_apy) / 100;
    let per_second = yearly * 100 / SECONDS_PER_YEAR;
    per_second * remaining_seconds / 100
}
