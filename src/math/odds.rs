//! Prize odds.

use num_bigint::BigInt;
use num_traits::Zero;

use crate::utils::units_to_f64;

/// Probability of winning at least one of `number_of_prizes` draws.
///
/// Uses `1 - ((total_supply - balance) / total_supply) ^ number_of_prizes`,
/// i.e. one minus the chance of losing every draw, with each draw treated as
/// an independent trial. `balance` and `total_supply` must share `decimals`.
///
/// Returns 0 for a zero balance, zero supply or zero prizes.
pub fn odds_of_winning_at_least_one(
    balance: &BigInt,
    total_supply: &BigInt,
    decimals: u8,
    number_of_prizes: u32,
) -> f64 {
    if balance.is_zero() || total_supply.is_zero() || number_of_prizes == 0 {
        return 0.0;
    }

    let balance = units_to_f64(balance, decimals);
    let total_supply = units_to_f64(total_supply, decimals);

    1.0 - ((total_supply - balance) / total_supply).powi(number_of_prizes as i32)
}

/// Union of independent probabilities: `p(a ∪ b) = p(a) + p(b) - p(a)p(b)`, folded left.
pub fn union_probabilities(probabilities: &[f64]) -> f64 {
    match probabilities.split_first() {
        Some((first, rest)) => rest.iter().fold(*first, |acc, p| acc + p - acc * p),
        None => 0.0,
    }
}
