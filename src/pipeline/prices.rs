//! Merging externally fetched USD prices into normalized pools.

use num_bigint::BigInt;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::format::USD_DECIMALS;
use crate::math::multiply_by_rate;
use crate::models::{Pool, Token};
use crate::utils::{big_pow10, format_units};

/// Price of one token as returned by the price source.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TokenPriceData {
    #[serde(default)]
    pub usd: f64,
    #[serde(default, rename = "derivedETH")]
    pub derived_eth: String,
}

/// Token prices keyed by address. Lookups ignore address case.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(from = "FxHashMap<String, TokenPriceData>")]
pub struct TokenPrices {
    prices: FxHashMap<String, TokenPriceData>,
}

impl TokenPrices {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, address: &str, price: TokenPriceData) {
        self.prices.insert(address.to_lowercase(), price);
    }

    pub fn get(&self, address: &str) -> Option<&TokenPriceData> {
        self.prices.get(&address.to_lowercase())
    }

    pub fn len(&self) -> usize {
        self.prices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }
}

impl From<FxHashMap<String, TokenPriceData>> for TokenPrices {
    fn from(prices: FxHashMap<String, TokenPriceData>) -> Self {
        prices.into_iter().collect()
    }
}

impl FromIterator<(String, TokenPriceData)> for TokenPrices {
    fn from_iter<I: IntoIterator<Item = (String, TokenPriceData)>>(iter: I) -> Self {
        let mut prices = TokenPrices::new();
        for (address, price) in iter {
            prices.insert(&address, price);
        }
        prices
    }
}

// ============================================
// Token values
// ============================================

/// USD valuation of a held amount.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenValues {
    pub amount: String,
    pub amount_unformatted: BigInt,
    /// USD value as a decimal string, at the token's decimals.
    pub total_value_usd: String,
    /// USD value in cents.
    pub total_value_usd_scaled: BigInt,
    /// USD value scaled by the token's decimals.
    pub total_value_usd_unformatted: BigInt,
}

/// Value `amount_unformatted` of a token priced at `usd`.
pub fn calculate_token_values(amount_unformatted: &BigInt, usd: f64, decimals: u8) -> TokenValues {
    let total_value_usd_unformatted = multiply_by_rate(amount_unformatted, usd);

    TokenValues {
        amount: format_units(amount_unformatted, decimals),
        amount_unformatted: amount_unformatted.clone(),
        total_value_usd: format_units(&total_value_usd_unformatted, decimals),
        total_value_usd_scaled: scaled_usd(&total_value_usd_unformatted, decimals),
        total_value_usd_unformatted,
    }
}

/// Cents of a USD value carried at `decimals`, truncating.
///
/// Same result as formatting the value and truncating the string to cents.
fn scaled_usd(value_unformatted: &BigInt, decimals: u8) -> BigInt {
    let cents = big_pow10(USD_DECIMALS as u32);
    value_unformatted * cents / big_pow10(decimals as u32)
}

/// USD value string and its cents for an amount at `usd`.
fn usd_value(amount_unformatted: &BigInt, usd: f64, decimals: u8) -> (String, BigInt) {
    let unformatted = multiply_by_rate(amount_unformatted, usd);
    (format_units(&unformatted, decimals), scaled_usd(&unformatted, decimals))
}

/// Set a token's price from the map and value its held amount.
///
/// Tokens missing from the map get a zero price and no value.
pub fn add_token_total_usd_value(token: &mut Token, prices: &TokenPrices) {
    let Some(price) = prices.get(&token.address) else {
        token.usd = Some(0.0);
        token.derived_eth = Some("0".to_string());
        return;
    };

    token.usd = Some(price.usd);
    token.derived_eth = Some(if price.derived_eth.is_empty() {
        "0".to_string()
    } else {
        price.derived_eth.clone()
    });

    if let Some(amount) = &token.amount_unformatted {
        let (total, scaled) = usd_value(amount, price.usd, token.decimals);
        token.total_value_usd = Some(total);
        token.total_value_usd_scaled = Some(scaled);
    }
}

/// Price a controlled token from its underlying and value its total supply.
fn add_total_value_for_controlled_token(token: &mut Token, underlying: &Token) {
    let Some(supply) = &token.total_supply_unformatted else {
        return;
    };

    let (total, scaled) = usd_value(supply, underlying.usd_or_zero(), token.decimals);
    token.usd = underlying.usd;
    token.derived_eth = underlying.derived_eth.clone();
    token.total_value_usd = Some(total);
    token.total_value_usd_scaled = Some(scaled);
}

fn add_total_value_for_reserve(pool: &mut Pool) {
    let underlying = &pool.tokens.underlying_token;
    let Some(amount) = &pool.reserve.amount_unformatted else {
        return;
    };

    let (total, scaled) = usd_value(amount, underlying.usd_or_zero(), underlying.decimals);
    pool.reserve.total_value_usd = Some(total);
    pool.reserve.total_value_usd_scaled = Some(scaled);
}

// ============================================
// Pool merge
// ============================================

/// Copy of `pool` with every token priced and valued.
///
/// The underlying token is priced before the ticket, sponsorship and
/// reserve reuse its price.
pub fn combine_pool_token_prices(pool: &Pool, prices: &TokenPrices) -> Pool {
    let mut pool = pool.clone();

    // Step 1: every independently priced token
    for token in pool.tokens.iter_mut() {
        add_token_total_usd_value(token, prices);
    }
    for token in pool.prize.external_erc20_awards.iter_mut() {
        add_token_total_usd_value(token, prices);
    }
    if let Some(loot_box) = pool.prize.loot_box.as_mut() {
        for token in loot_box.erc20_tokens.iter_mut() {
            add_token_total_usd_value(token, prices);
        }
    }

    // Step 2: controlled tokens are claims on the underlying
    let underlying = pool.tokens.underlying_token.clone();
    add_total_value_for_controlled_token(&mut pool.tokens.ticket, &underlying);
    add_total_value_for_controlled_token(&mut pool.tokens.sponsorship, &underlying);

    // Step 3: reserve
    add_total_value_for_reserve(&mut pool);

    pool
}

/// [`combine_pool_token_prices`] over a list of pools, preserving order.
pub fn combine_token_prices(pools: &[Pool], prices: &TokenPrices) -> Vec<Pool> {
    pools
        .iter()
        .map(|pool| combine_pool_token_prices(pool, prices))
        .collect()
}

/// Every ERC-20 address the pools need prices for, deduplicated in
/// first-seen order.
pub fn all_erc20_addresses(pools: &[Pool]) -> Vec<String> {
    let mut addresses = Vec::new();
    for pool in pools {
        pool.collect_erc20_addresses(&mut addresses);
    }
    addresses
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::pipeline::normalizer::tests::raw_pool;
    use crate::pipeline::PoolNormalizer;
    use crate::registry::ContractRegistry;
    use crate::utils::parse_units;

    const DAI: &str = "0x6b175474e89094c44da98b954eedeac495271d0f";
    const COMP: &str = "0xc00e94cb662c3520282e6f5717214004a7f26888";

    fn normalized_pool() -> Pool {
        PoolNormalizer::new(Arc::new(ContractRegistry::default()))
            .normalize(&raw_pool(), 1)
            .unwrap()
    }

    fn dai_prices() -> TokenPrices {
        let mut prices = TokenPrices::new();
        prices.insert(
            "0x6B175474E89094C44Da98b954EedeAC495271d0F",
            TokenPriceData { usd: 1.01, derived_eth: "0.00052".to_string() },
        );
        prices
    }

    #[test]
    fn test_controlled_tokens_inherit_underlying_price() {
        let pool = normalized_pool();
        let priced = combine_pool_token_prices(&pool, &dai_prices());

        let underlying = &priced.tokens.underlying_token;
        assert_eq!(underlying.usd, Some(1.01));
        assert_eq!(underlying.derived_eth.as_deref(), Some("0.00052"));

        for token in [&priced.tokens.ticket, &priced.tokens.sponsorship] {
            assert_eq!(token.usd, Some(1.01));
            assert_eq!(token.derived_eth.as_deref(), Some("0.00052"));
        }

        // 2500 tickets at $1.01
        assert_eq!(priced.tokens.ticket.total_value_usd.as_deref(), Some("2525.0"));
        assert_eq!(priced.tokens.ticket.total_value_usd_scaled, Some(BigInt::from(252_500)));
        assert_eq!(priced.tokens.sponsorship.total_value_usd.as_deref(), Some("505.0"));

        let comp = &priced.prize.external_erc20_awards[0];
        assert_eq!(comp.address, COMP);
        assert_eq!(comp.usd, Some(0.0));
        assert_eq!(comp.derived_eth.as_deref(), Some("0"));
        assert!(comp.total_value_usd.is_none());

        let c_token = priced.tokens.c_token.as_ref().unwrap();
        assert_eq!(c_token.usd, Some(0.0));
    }

    #[test]
    fn test_merge_does_not_touch_input() {
        let pool = normalized_pool();
        let priced = combine_token_prices(std::slice::from_ref(&pool), &dai_prices());

        assert_eq!(priced.len(), 1);
        assert!(pool.tokens.ticket.usd.is_none());
        assert!(pool.tokens.ticket.total_value_usd.is_none());
        assert_eq!(pool, normalized_pool());
    }

    #[test]
    fn test_reserve_and_held_amounts_are_valued() {
        let mut pool = normalized_pool();
        pool.reserve.amount_unformatted = Some(parse_units("10", 18).unwrap());

        let mut prices = dai_prices();
        prices.insert(COMP, TokenPriceData { usd: 412.556, derived_eth: String::new() });
        let priced = combine_pool_token_prices(&pool, &prices);

        assert_eq!(priced.reserve.total_value_usd.as_deref(), Some("10.1"));
        assert_eq!(priced.reserve.total_value_usd_scaled, Some(BigInt::from(1_010)));

        // 3 COMP held by the strategy, rate quantized to 412.56
        let comp = &priced.prize.external_erc20_awards[0];
        assert_eq!(comp.derived_eth.as_deref(), Some("0"));
        assert_eq!(comp.total_value_usd.as_deref(), Some("1237.68"));
        assert_eq!(comp.total_value_usd_scaled, Some(BigInt::from(123_768)));
    }

    #[test]
    fn test_calculate_token_values() {
        let values = calculate_token_values(&BigInt::from(1_239_000), 1.0, 6);
        assert_eq!(values.amount, "1.239");
        assert_eq!(values.total_value_usd, "1.239");
        assert_eq!(values.total_value_usd_scaled, BigInt::from(123));
        assert_eq!(values.total_value_usd_unformatted, BigInt::from(1_239_000));

        let zero = calculate_token_values(&BigInt::from(1_000_000), 0.0, 6);
        assert_eq!(zero.total_value_usd, "0.0");
        assert_eq!(zero.total_value_usd_scaled, BigInt::from(0));
    }

    #[test]
    fn test_all_erc20_addresses() {
        let pool = normalized_pool();
        let addresses = all_erc20_addresses(&[pool.clone(), pool]);

        assert_eq!(addresses.len(), 5);
        assert_eq!(addresses[0], COMP);
        assert!(addresses.iter().any(|a| a == DAI));
    }

    #[test]
    fn test_token_prices_deserialize_and_ignore_case() {
        let prices: TokenPrices = serde_json::from_value(serde_json::json!({
            "0x6B175474E89094C44Da98b954EedeAC495271d0F": { "usd": 1.0, "derivedETH": "0.0005" }
        }))
        .unwrap();

        assert_eq!(prices.len(), 1);
        assert_eq!(prices.get(DAI).map(|p| p.usd), Some(1.0));
    }
}
