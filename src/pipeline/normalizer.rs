use std::sync::Arc;

use anyhow::{bail, Context, Result};
use log::{debug, error, warn};
use num_traits::Zero;
use serde::Deserialize;
use serde_json::Value;

use super::raw::{RawControlledToken, RawErc20Award, RawErc721Award, RawPrizePool, RawStrategyDetails};
use crate::models::{
    ContractRef, CreditRate, Erc721Award, LootBox, Pool, PoolConfig, PoolTokens, Prize,
    PrizePoolInfo, PrizePoolKind, Reserve, SablierStream, Token,
};
use crate::registry::ContractRegistry;
use crate::utils::{format_units, parse_big_int};

/// Decimals of Compound cTokens.
const C_TOKEN_DECIMALS: u8 = 8;

/// Registry reported for pools whose subgraph entry carries a zero reserve
/// registry. Only this one address is substituted.
const ZERO_RESERVE_REGISTRY_SUBSTITUTE: &str = "0x3e8b9901dbfe766d3fe44b36c180a1bca2b9a295";

/// Turns raw subgraph prize pool records into canonical [`Pool`]s.
#[derive(Debug, Clone)]
pub struct PoolNormalizer {
    registry: Arc<ContractRegistry>,
}

impl PoolNormalizer {
    pub fn new(registry: Arc<ContractRegistry>) -> Self {
        Self { registry }
    }

    /// Normalize one prize pool record as returned by the subgraph.
    pub fn normalize(&self, raw: &Value, chain_id: u64) -> Result<Pool> {
        let raw = RawPrizePool::deserialize(raw).context("malformed prize pool graph data")?;
        self.normalize_raw(raw, chain_id)
    }

    /// Normalize a list of records, failing on the first malformed one.
    pub fn normalize_all(&self, raw_pools: &[Value], chain_id: u64) -> Result<Vec<Pool>> {
        raw_pools
            .iter()
            .map(|raw| self.normalize(raw, chain_id))
            .collect()
    }

    pub fn normalize_raw(&self, raw: RawPrizePool, chain_id: u64) -> Result<Pool> {
        let pool_address = raw.id.to_lowercase();

        // ============================================
        // Step 1: Active prize strategy
        // ============================================
        let strategy_address = raw.prize_strategy.id.clone();
        let strategy = match (raw.prize_strategy.multiple_winners, raw.prize_strategy.single_random_winner) {
            (Some(multiple), single) => {
                if single.is_some() {
                    warn!("pool {pool_address} has both strategy shapes, using multipleWinners");
                }
                multiple
            }
            (None, Some(single)) => single,
            (None, None) => bail!("prize pool {pool_address} has no prize strategy"),
        };

        // ============================================
        // Step 2: Controlled tokens
        // ============================================
        let ticket = controlled_token(&strategy.ticket).context("invalid ticket")?;
        let sponsorship = controlled_token(&strategy.sponsorship).context("invalid sponsorship")?;

        let mut underlying_token = Token::new(&raw.underlying_collateral_token, raw.underlying_collateral_decimals);
        underlying_token.name = raw.underlying_collateral_name;
        underlying_token.symbol = raw.underlying_collateral_symbol;

        // ============================================
        // Steps 3-4: External awards and loot box
        // ============================================
        let external_erc20_awards = self.external_erc20_awards(&strategy.external_erc20_awards, chain_id);
        let loot_box = self.find_loot_box(&strategy.external_erc721_awards, chain_id, &pool_address);

        // ============================================
        // Step 5: Prize pool kind
        // ============================================
        let mut tokens = PoolTokens { ticket, sponsorship, underlying_token, c_token: None };
        let kind = match (raw.compound_prize_pool, raw.yield_source_prize_pool) {
            (Some(compound), yield_source) => {
                if yield_source.is_some() {
                    warn!("pool {pool_address} has both compound and yield source shapes, using compound");
                }
                tokens.c_token = Some(Token::new(&compound.c_token, C_TOKEN_DECIMALS));
                PrizePoolKind::Compound
            }
            (None, Some(yield_source)) => PrizePoolKind::GenericYield {
                yield_source: ContractRef::new(&yield_source.yield_source),
            },
            (None, None) => {
                if raw.stake_prize_pool.is_none() {
                    debug!("pool {pool_address} has no pool type shape, treating as stake");
                }
                PrizePoolKind::Stake
            }
        };

        // ============================================
        // Step 6: Reserve registry
        // ============================================
        let registry_address = match raw.reserve_registry.as_deref() {
            Some(address) if !is_zero_address(address) => address.to_lowercase(),
            _ => ZERO_RESERVE_REGISTRY_SUBSTITUTE.to_string(),
        };

        Ok(Pool {
            chain_id,
            config: pool_config(raw.liquidity_cap, raw.token_credit_rates, &strategy),
            prize_pool: PrizePoolInfo { address: pool_address, kind },
            prize_strategy: ContractRef::new(&strategy_address),
            tokens,
            prize: Prize {
                loot_box,
                cumulative_prize_net: raw.cumulative_prize_net,
                current_prize_id: raw.current_prize_id,
                current_state: raw.current_state,
                external_erc20_awards,
                external_erc721_awards: strategy
                    .external_erc721_awards
                    .into_iter()
                    .map(erc721_award)
                    .collect(),
                sablier_stream: raw
                    .sablier_stream
                    .and_then(|stream| stream.id)
                    .map(|id| SablierStream { id }),
            },
            reserve: Reserve {
                registry: ContractRef { address: registry_address },
                ..Default::default()
            },
            token_listener: strategy.token_listener.as_deref().map(ContractRef::new),
        })
    }

    /// External ERC-20 awards minus the chain's loot box contract.
    fn external_erc20_awards(&self, awards: &[RawErc20Award], chain_id: u64) -> Vec<Token> {
        awards
            .iter()
            .filter(|award| !self.registry.is_loot_box(chain_id, &award.address))
            .map(|award| {
                let decimals = award.decimals.unwrap_or_default();
                let balance = award.balance.as_deref().and_then(|raw| {
                    let parsed = parse_big_int(raw);
                    if parsed.is_none() {
                        warn!("ignoring invalid balance {raw:?} of award {}", award.address);
                    }
                    parsed
                });

                Token {
                    name: award.name.clone(),
                    symbol: award.symbol.clone(),
                    amount: balance.as_ref().map(|balance| format_units(balance, decimals)),
                    amount_unformatted: balance,
                    extra: award.extra.clone(),
                    ..Token::new(&award.address, decimals)
                }
            })
            .collect()
    }

    /// The loot box attached to the prize, if an ERC-721 award is one.
    fn find_loot_box(&self, awards: &[RawErc721Award], chain_id: u64, pool_address: &str) -> Option<LootBox> {
        let award = awards
            .iter()
            .find(|award| self.registry.is_loot_box(chain_id, &award.address))?;

        if award.token_ids.len() > 1 {
            error!(
                "multiple loot boxes in prize of pool {pool_address}: {:?}, keeping the first",
                award.token_ids
            );
        }

        match award.token_ids.first() {
            Some(id) => Some(LootBox::new(id.clone())),
            None => {
                warn!("loot box award of pool {pool_address} has no token id");
                None
            }
        }
    }
}

fn controlled_token(raw: &RawControlledToken) -> Result<Token> {
    let total_supply = parse_big_int(&raw.total_supply)
        .with_context(|| format!("invalid total supply {:?} for {}", raw.total_supply, raw.id))?;

    Ok(Token {
        name: raw.name.clone(),
        symbol: raw.symbol.clone(),
        total_supply: Some(format_units(&total_supply, raw.decimals)),
        total_supply_unformatted: Some(total_supply),
        number_of_holders: raw.number_of_holders.clone(),
        ..Token::new(&raw.id, raw.decimals)
    })
}

fn pool_config(
    liquidity_cap: Option<String>,
    credit_rates: Vec<super::raw::RawCreditRate>,
    strategy: &RawStrategyDetails,
) -> PoolConfig {
    PoolConfig {
        liquidity_cap,
        number_of_winners: strategy
            .number_of_winners
            .clone()
            .unwrap_or_else(|| "1".to_string()),
        prize_period_seconds: strategy.prize_period_seconds.clone(),
        token_credit_rates: credit_rates
            .into_iter()
            .map(|rate| CreditRate {
                id: rate.id,
                credit_limit_mantissa: rate.credit_limit_mantissa,
                credit_rate_mantissa: rate.credit_rate_mantissa,
            })
            .collect(),
    }
}

fn erc721_award(raw: RawErc721Award) -> Erc721Award {
    Erc721Award {
        address: raw.address.to_lowercase(),
        token_ids: raw.token_ids,
        extra: raw.extra,
    }
}

/// The subgraph reports an unset registry as `0`, `0x0` or the zero address.
fn is_zero_address(address: &str) -> bool {
    parse_big_int(address).is_some_and(|value| value.is_zero())
}
