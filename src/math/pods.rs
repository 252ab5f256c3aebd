//! Pod share accounting.
//!
//! A pod pools deposits into a prize pool and issues shares against its
//! underlying balance. Conversions truncate like the on-chain math.

use num_bigint::BigInt;
use num_traits::Zero;

/// Shares minted for depositing `underlying_amount`.
///
/// Returns `None` while the pod holds no underlying balance.
pub fn underlying_amount_to_shares_amount(
    underlying_amount: &BigInt,
    shares_total_supply: &BigInt,
    pod_underlying_total_balance: &BigInt,
) -> Option<BigInt> {
    if pod_underlying_total_balance.is_zero() {
        return None;
    }
    Some(underlying_amount * shares_total_supply / pod_underlying_total_balance)
}

/// Underlying tokens redeemable for `shares_amount`.
///
/// Returns `None` while no shares exist.
pub fn shares_amount_to_underlying_amount(
    shares_amount: &BigInt,
    shares_total_supply: &BigInt,
    pod_underlying_total_balance: &BigInt,
) -> Option<BigInt> {
    if shares_total_supply.is_zero() {
        return None;
    }
    Some(shares_amount * pod_underlying_total_balance / shares_total_supply)
}
