//! Display-side formatting of amounts, prices and percentages.
//!
//! - [`number`] - Truncation, scaled USD, percentages and pretty numbers
//! - [`display`] - Locale-aware rendering, currencies
//! - [`amount`] - The amount variations bundle

pub mod amount;
pub mod display;
pub mod number;

pub use amount::{get_amount, get_amount_from_unformatted, AmountVariations};
pub use display::{
    format_currency_for_display, format_number_for_display, Currency, DisplayOptions, Locale,
};
pub use number::{
    display_precision, format_percentage_for_display, number_with_commas, pretty_number,
    pretty_number_with_options, to_scaled_usd, to_usd_string, truncate_to_precision,
    NumberFormatOptions, USD_DECIMALS,
};
