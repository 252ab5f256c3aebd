//! Subgraph data to view-ready pools.
//!
//! Raw prize pool JSON goes through the [`PoolNormalizer`], optionally
//! through the [`LootBoxResolver`], and finally through the price merge.

pub mod loot_box;
pub mod normalizer;
pub mod prices;
pub mod raw;

pub use loot_box::{format_loot_box, LootBoxResolver};
pub use normalizer::PoolNormalizer;
pub use prices::{
    add_token_total_usd_value, all_erc20_addresses, calculate_token_values,
    combine_pool_token_prices, combine_token_prices, TokenPriceData, TokenPrices, TokenValues,
};
pub use raw::{LootBoxGraphData, RawPrizePool};
