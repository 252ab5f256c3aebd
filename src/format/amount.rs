//! The `{ amount, amountUnformatted, amountPretty, decimals }` bundle UI code
//! passes around for every token quantity.

use log::warn;
use num_bigint::BigInt;
use serde::{Deserialize, Serialize};

use super::display::{format_number_for_display, DisplayOptions};
use crate::utils::{big_number, format_units, parse_units};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AmountVariations {
    /// Decimal string, e.g. `"3500.0"`.
    pub amount: String,
    #[serde(with = "big_number::required")]
    pub amount_unformatted: BigInt,
    /// Display string, e.g. `"3,500"`.
    pub amount_pretty: String,
    pub decimals: u8,
}

/// Build the amount bundle from a decimal string.
///
/// Returns `None` for an empty string or one that does not fit `decimals`.
pub fn get_amount(amount: &str, decimals: u8, options: &DisplayOptions) -> Option<AmountVariations> {
    let amount = amount.trim();
    if amount.is_empty() {
        return None;
    }

    match parse_units(amount, decimals) {
        Ok(amount_unformatted) => Some(AmountVariations {
            amount: amount.to_string(),
            amount_unformatted,
            amount_pretty: format_number_for_display(amount, options),
            decimals,
        }),
        Err(e) => {
            warn!("could not build amount for {amount:?}: {e}");
            None
        }
    }
}

/// Build the amount bundle from a scaled integer.
pub fn get_amount_from_unformatted(
    amount_unformatted: &BigInt,
    decimals: u8,
    options: &DisplayOptions,
) -> AmountVariations {
    let amount = format_units(amount_unformatted, decimals);
    AmountVariations {
        amount_pretty: format_number_for_display(&amount, options),
        amount,
        amount_unformatted: amount_unformatted.clone(),
        decimals,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::display::Currency;

    #[test]
    fn test_get_amount() {
        let amount = get_amount("3500", 6, &DisplayOptions::default()).unwrap();
        assert_eq!(amount.amount, "3500");
        assert_eq!(amount.amount_unformatted, BigInt::from(3_500_000_000u64));
        assert_eq!(amount.amount_pretty, "3,500");
        assert_eq!(amount.decimals, 6);
    }

    #[test]
    fn test_get_amount_small_values() {
        let default = get_amount("0.000042", 6, &DisplayOptions::default()).unwrap();
        assert_eq!(default.amount_unformatted, BigInt::from(42));
        assert_eq!(default.amount_pretty, "0");

        let two_digits = DisplayOptions { minimum_fraction_digits: 2, ..Default::default() };
        assert_eq!(get_amount("0.000042", 6, &two_digits).unwrap().amount_pretty, "0.00");

        let usd = DisplayOptions { currency: Some(Currency::Usd), ..Default::default() };
        assert_eq!(get_amount("0.000042", 6, &usd).unwrap().amount_pretty, "$0.00");
        assert_eq!(get_amount("3500", 6, &usd).unwrap().amount_pretty, "$3,500.00");
    }

    #[test]
    fn test_get_amount_rejects_bad_input() {
        assert!(get_amount("", 6, &DisplayOptions::default()).is_none());
        assert!(get_amount("0.0000001", 6, &DisplayOptions::default()).is_none());
    }

    #[test]
    fn test_get_amount_from_unformatted() {
        let amount = get_amount_from_unformatted(&BigInt::from(3_500_000), 3, &DisplayOptions::default());
        assert_eq!(amount.amount, "3500.0");
        assert_eq!(amount.amount_pretty, "3,500");

        let amount = get_amount_from_unformatted(&BigInt::from(350_000), 2, &DisplayOptions::default());
        assert_eq!(amount.amount, "3500.0");
        assert_eq!(amount.amount_unformatted, BigInt::from(350_000));
    }
}
