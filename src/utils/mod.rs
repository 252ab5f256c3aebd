//! Utility functions shared by the math, formatting and pipeline layers.
//!
//! This module is organized into focused submodules:
//!
//! - [`conversion`] - Scaled integer <-> decimal string conversions
//! - [`big_number`] - JSON (de)serialization of big numbers, cache rehydration
//! - [`address`] - Address display helpers
//! - [`time`] - Duration breakdown and prize frequency estimates

pub mod address;
pub mod big_number;
mod conversion;
pub mod time;

// ============================================
// Common Constants
// ============================================

/// The Ethereum zero address (0x0000000000000000000000000000000000000000)
pub const ZERO_ADDRESS: &str = "0x0000000000000000000000000000000000000000";

// ============================================
// Re-exports
// ============================================

// Conversion utilities
pub use conversion::{
    format_units, format_units_fixed, parse_big_int, parse_units, safe_parse_units,
    to_hex_string, units_to_f64,
};
pub(crate) use conversion::{big_pow10, decimal_or_zero};

// Big number cache helpers
pub use big_number::deserialize_big_numbers;

// Address helpers
pub use address::{prize_pool_symbol, same_address, shorten};

// Time helpers
pub use time::{
    estimated_frequency, seconds_remaining_in_prize_period, time_breakdown,
    EstimatedFrequency, TimeBreakdown, TimeUnit,
};
