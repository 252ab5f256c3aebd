//! Locale-aware rendering of decimal numbers.
//!
//! Only the separators the app ships translations for are supported:
//! `en-GB` (`1,234.56`) and `es-ES` (`1234,56`, `12.345,67`).

use bigdecimal::BigDecimal;
use num_bigint::BigInt;
use num_traits::{Signed, Zero};
use serde::{Deserialize, Serialize};

use crate::utils::{big_pow10, decimal_or_zero, format_units_fixed};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Locale {
    #[default]
    #[serde(rename = "en-GB")]
    EnGb,
    #[serde(rename = "es-ES")]
    EsEs,
}

impl Locale {
    /// Pick a locale from a UI language code such as `"es"` or `"en-US"`.
    pub fn from_lang(lang: &str) -> Self {
        if lang.to_ascii_lowercase().starts_with("es") {
            Locale::EsEs
        } else {
            Locale::EnGb
        }
    }

    fn group_separator(self) -> char {
        match self {
            Locale::EnGb => ',',
            Locale::EsEs => '.',
        }
    }

    fn decimal_separator(self) -> char {
        match self {
            Locale::EnGb => '.',
            Locale::EsEs => ',',
        }
    }

    /// Spanish leaves 4 digit integers ungrouped.
    fn min_grouping_digits(self) -> usize {
        match self {
            Locale::EnGb => 1,
            Locale::EsEs => 2,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Rounding {
    HalfUp,
    Floor,
}

/// Round a decimal to `scale` fractional digits, returning it scaled by `10^scale`.
pub(crate) fn round_to_scale(value: &BigDecimal, scale: u32, rounding: Rounding) -> BigInt {
    let (mantissa, exponent) = value.as_bigint_and_exponent();
    let scale = scale as i64;

    if exponent <= scale {
        return mantissa * big_pow10((scale - exponent) as u32);
    }

    let divisor = big_pow10((exponent - scale) as u32);
    let quotient = &mantissa / &divisor;
    let remainder = &mantissa % &divisor;
    if remainder.is_zero() {
        return quotient;
    }

    match rounding {
        Rounding::HalfUp if remainder.abs() * 2 >= divisor => quotient + mantissa.signum(),
        Rounding::Floor if mantissa.is_negative() => quotient - 1,
        _ => quotient,
    }
}

/// Render a decimal string with locale separators.
///
/// The value is rounded half up to `max_fraction` digits, then trailing
/// zeros are trimmed down to `min_fraction` digits.
pub fn render_decimal(value: &str, locale: Locale, min_fraction: usize, max_fraction: usize) -> String {
    let max_fraction = max_fraction.max(min_fraction);
    let rounded = round_to_scale(&decimal_or_zero(value), max_fraction as u32, Rounding::HalfUp);
    let fixed = format_units_fixed(&rounded, max_fraction as u8);

    let (negative, unsigned) = match fixed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, fixed.as_str()),
    };
    let (whole, fraction) = unsigned.split_once('.').unwrap_or((unsigned, ""));

    let mut fraction = fraction.to_string();
    while fraction.len() > min_fraction && fraction.ends_with('0') {
        fraction.pop();
    }

    let mut rendered = String::new();
    if negative && !(rounded.is_zero()) {
        rendered.push('-');
    }
    rendered.push_str(&group_digits(whole, locale));
    if !fraction.is_empty() {
        rendered.push(locale.decimal_separator());
        rendered.push_str(&fraction);
    }
    rendered
}

fn group_digits(whole: &str, locale: Locale) -> String {
    if whole.len() < 3 + locale.min_grouping_digits() {
        return whole.to_string();
    }

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(locale.group_separator());
        }
        grouped.push(digit);
    }
    grouped
}

// ============================================
// Display formatting
// ============================================

/// Options for [`format_number_for_display`].
#[derive(Debug, Clone, Default)]
pub struct DisplayOptions {
    pub locale: Locale,
    /// Round to the nearest whole number before formatting.
    pub round: bool,
    /// Drop fraction digits for values above 1.
    pub hide_zeroes: bool,
    pub minimum_fraction_digits: usize,
    /// Defaults to `max(minimum_fraction_digits, 3)`, or 2 for currencies.
    pub maximum_fraction_digits: Option<usize>,
    /// Render as money in this currency.
    pub currency: Option<Currency>,
}

/// Make a decimal string legible: `"3500.123123"` becomes `"3,500.123"`.
pub fn format_number_for_display(value: &str, options: &DisplayOptions) -> String {
    let mut amount = decimal_or_zero(value);
    if options.round {
        amount = BigDecimal::new(round_to_scale(&amount, 0, Rounding::HalfUp), 0);
    }

    let (min_fraction, default_max) = match options.currency {
        Some(_) => (options.minimum_fraction_digits.max(2), 2),
        None => (options.minimum_fraction_digits, 3),
    };
    let mut max_fraction = options
        .maximum_fraction_digits
        .unwrap_or(min_fraction.max(default_max));
    if options.hide_zeroes && amount > BigDecimal::from(1) {
        max_fraction = 0;
    }

    let number = render_decimal(
        &amount.to_string(),
        options.locale,
        min_fraction.min(max_fraction),
        max_fraction,
    );
    match options.currency {
        Some(currency) => with_currency_symbol(&number, currency, options.locale),
        None => number,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    Usd,
    Cad,
    Eur,
}

impl Currency {
    fn symbol(self) -> &'static str {
        match self {
            Currency::Usd => "US$",
            Currency::Cad => "CA$",
            Currency::Eur => "€",
        }
    }
}

/// Format an amount as money with 2 fraction digits: `"$3,500.00"`.
///
/// English output prefixes the symbol (USD renders as plain `$`), Spanish
/// output suffixes it after a space.
pub fn format_currency_for_display(value: &str, currency: Currency, locale: Locale) -> String {
    with_currency_symbol(&render_decimal(value, locale, 2, 2), currency, locale)
}

fn with_currency_symbol(number: &str, currency: Currency, locale: Locale) -> String {
    match (locale, currency) {
        (Locale::EnGb, Currency::Usd) => prefix_symbol("$", number),
        (Locale::EnGb, _) => prefix_symbol(currency.symbol(), number),
        (Locale::EsEs, _) => format!("{number} {}", currency.symbol()),
    }
}

fn prefix_symbol(symbol: &str, number: &str) -> String {
    match number.strip_prefix('-') {
        Some(unsigned) => format!("-{symbol}{unsigned}"),
        None => format!("{symbol}{number}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_decimal_grouping() {
        assert_eq!(render_decimal("1234.5", Locale::EnGb, 2, 2), "1,234.50");
        assert_eq!(render_decimal("1234567.1", Locale::EnGb, 2, 2), "1,234,567.10");
        assert_eq!(render_decimal("123", Locale::EnGb, 0, 3), "123");
        assert_eq!(render_decimal("1234.5", Locale::EsEs, 2, 2), "1234,50");
        assert_eq!(render_decimal("12345.678", Locale::EsEs, 2, 3), "12.345,678");
        assert_eq!(render_decimal("1234567.1", Locale::EsEs, 2, 2), "1.234.567,10");
    }

    #[test]
    fn test_render_decimal_rounds_half_up() {
        assert_eq!(render_decimal("3500.899", Locale::EnGb, 2, 2), "3,500.90");
        assert_eq!(render_decimal("0.000123", Locale::EnGb, 0, 3), "0");
        assert_eq!(render_decimal("-1.005", Locale::EnGb, 0, 2), "-1.01");
        assert_eq!(render_decimal("-0.001", Locale::EnGb, 0, 2), "0");
    }

    #[test]
    fn test_format_number_for_display() {
        let default = DisplayOptions::default();
        assert_eq!(format_number_for_display("3500", &default), "3,500");
        assert_eq!(format_number_for_display("3500.123123", &default), "3,500.123");

        let round = DisplayOptions { round: true, ..Default::default() };
        assert_eq!(format_number_for_display("3500.9", &round), "3,501");
        assert_eq!(format_number_for_display("3500.1", &round), "3,500");

        let fixed = DisplayOptions {
            minimum_fraction_digits: 2,
            maximum_fraction_digits: Some(2),
            ..Default::default()
        };
        assert_eq!(format_number_for_display("3500.123123", &fixed), "3,500.12");
        assert_eq!(format_number_for_display("0.000042", &fixed), "0.00");

        let spanish = DisplayOptions { locale: Locale::EsEs, ..Default::default() };
        assert_eq!(format_number_for_display("3500", &spanish), "3500");
    }

    #[test]
    fn test_format_number_as_currency() {
        let usd = DisplayOptions { currency: Some(Currency::Usd), ..Default::default() };
        assert_eq!(format_number_for_display("3500", &usd), "$3,500.00");
        assert_eq!(format_number_for_display("0.000042", &usd), "$0.00");
    }

    #[test]
    fn test_hide_zeroes_only_above_one() {
        let options = DisplayOptions { hide_zeroes: true, ..Default::default() };
        assert_eq!(format_number_for_display("3500.55", &options), "3,501");
        assert_eq!(format_number_for_display("0.55", &options), "0.55");
    }

    #[test]
    fn test_format_currency_for_display() {
        assert_eq!(format_currency_for_display("3500", Currency::Usd, Locale::EnGb), "$3,500.00");
        assert_eq!(format_currency_for_display("3500", Currency::Eur, Locale::EnGb), "€3,500.00");
        assert_eq!(format_currency_for_display("3500", Currency::Cad, Locale::EnGb), "CA$3,500.00");
        assert_eq!(format_currency_for_display("-2.5", Currency::Usd, Locale::EnGb), "-$2.50");
        assert_eq!(format_currency_for_display("3500", Currency::Eur, Locale::EsEs), "3500,00 €");
    }

    #[test]
    fn test_locale_from_lang() {
        assert_eq!(Locale::from_lang("es"), Locale::EsEs);
        assert_eq!(Locale::from_lang("ES-mx"), Locale::EsEs);
        assert_eq!(Locale::from_lang("en"), Locale::EnGb);
        assert_eq!(Locale::from_lang("fr"), Locale::EnGb);
    }
}
