//! Normalized pool records.

pub mod loot_box;
pub mod pool;
pub mod token;

pub use loot_box::{LootBox, LootBoxContents};
pub use pool::{
    ContractRef, CreditRate, Erc721Award, Pool, PoolConfig, PoolTokens, Prize, PrizePoolInfo,
    PrizePoolKind, Reserve, SablierStream,
};
pub use token::Token;
