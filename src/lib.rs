pub mod config;
pub mod format;
pub mod math;
pub mod models;
pub mod pipeline;
pub mod registry;
pub mod utils;

pub use crate::config::Settings;
pub use models::{Pool, Token};
pub use pipeline::{combine_token_prices, LootBoxResolver, PoolNormalizer, TokenPrices};
pub use registry::ContractRegistry;
