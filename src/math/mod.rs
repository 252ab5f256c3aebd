//! Financial math on scaled token amounts.
//!
//! - [`fixed_point`] - BigInt arithmetic with quantized float factors
//! - [`odds`] - Prize odds and probability unions
//! - [`yields`] - Prize yield projection, APR, LP token and COMP pricing
//! - [`cream`] - Two-kink jump rate model borrow/supply APY
//! - [`pods`] - Pod share <-> underlying conversions

mod cream;
mod fixed_point;
mod odds;
mod pods;
mod yields;

pub use cream::{cream_borrow_apy, cream_supply_apy};
pub use fixed_point::{divide_to_float, multiply_by_rate, percentage_of, sum};
pub use odds::{odds_of_winning_at_least_one, union_probabilities};
pub use pods::{shares_amount_to_underlying_amount, underlying_amount_to_shares_amount};
pub use yields::{
    apr, estimated_accrued_comp_value_usd_scaled, estimated_prize_with_yield, lp_token_price,
};
