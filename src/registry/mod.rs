//! Chain id keyed contract tables.
//!
//! - [`contracts`] - Loot box, block list and configured yield source addresses
//! - [`yield_sources`] - Recognized yield source markets

pub mod contracts;
pub mod yield_sources;

pub use contracts::ContractRegistry;
pub use yield_sources::{known_yield_source, KnownYieldSource, YieldSourceName};
