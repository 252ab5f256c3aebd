use std::sync::Arc;

use log::{debug, warn};

use super::raw::{LootBoxGraphData, RawLootBox};
use crate::models::{LootBoxContents, Pool, Token};
use crate::registry::ContractRegistry;
use crate::utils::{format_units, parse_big_int};

/// Format a loot box as returned by the loot box subgraph.
///
/// ERC-1155 and ERC-721 holdings pass through untouched. ERC-20 balances
/// become tokens with their amount formatted at the token's decimals;
/// block listed ERC-20s and unparseable balances are dropped.
pub fn format_loot_box(raw: &RawLootBox, registry: &ContractRegistry) -> LootBoxContents {
    let erc20_tokens = raw
        .erc20_balances
        .iter()
        .filter(|erc20| {
            !registry.is_blocked_erc20(&erc20.id) && !registry.is_blocked_erc20(&erc20.erc20_entity.id)
        })
        .filter_map(|erc20| {
            let entity = &erc20.erc20_entity;
            let Some(balance) = parse_big_int(&erc20.balance) else {
                warn!("skipping loot box {} balance {:?} of {}", raw.token_id, erc20.balance, entity.id);
                return None;
            };

            Some(Token {
                name: entity.name.clone(),
                symbol: entity.symbol.clone(),
                loot_box_address: Some(entity.id.to_lowercase()),
                amount: Some(format_units(&balance, entity.decimals)),
                amount_unformatted: Some(balance),
                ..Token::new(&entity.id, entity.decimals)
            })
        })
        .collect();

    LootBoxContents {
        erc1155_tokens: raw.erc1155_balances.clone(),
        erc721_tokens: raw.erc721_tokens.clone(),
        erc20_tokens,
    }
}

/// Fills a pool's loot box with its contents from loot box graph data.
#[derive(Debug, Clone)]
pub struct LootBoxResolver {
    registry: Arc<ContractRegistry>,
}

impl LootBoxResolver {
    pub fn new(registry: Arc<ContractRegistry>) -> Self {
        Self { registry }
    }

    /// Attach loot box contents to the pool's prize.
    ///
    /// Returns whether anything was attached. A pool without a loot box, or
    /// whose loot box id is missing from `data`, is left unchanged.
    pub fn attach(&self, pool: &mut Pool, data: &LootBoxGraphData) -> bool {
        let Some(loot_box) = pool.prize.loot_box.as_mut() else {
            return false;
        };

        match data.loot_boxes.iter().find(|raw| raw.token_id == loot_box.id) {
            Some(raw) => {
                loot_box.fill(format_loot_box(raw, &self.registry));
                true
            }
            None => {
                debug!("no graph data for loot box {} of pool {}", loot_box.id, pool.prize_pool.address);
                false
            }
        }
    }

    pub fn attach_all(&self, pools: &mut [Pool], data: &LootBoxGraphData) -> usize {
        pools
            .iter_mut()
            .map(|pool| self.attach(pool, data))
            .filter(|&attached| attached)
            .count()
    }
}
