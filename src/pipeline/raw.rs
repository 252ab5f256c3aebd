//! Subgraph response shapes consumed by the normalizer.
//!
//! Only the fields the normalized pool needs are declared; everything else
//! in the response is ignored. Integer fields arrive as decimal strings or
//! JSON numbers depending on the subgraph version, so both are accepted.

use serde::{de, Deserialize, Deserializer};
use serde_json::Value;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawPrizePool {
    pub id: String,
    #[serde(default, deserialize_with = "opt_string_or_number")]
    pub liquidity_cap: Option<String>,
    #[serde(default)]
    pub token_credit_rates: Vec<RawCreditRate>,

    pub underlying_collateral_token: String,
    #[serde(deserialize_with = "decimals")]
    pub underlying_collateral_decimals: u8,
    #[serde(default)]
    pub underlying_collateral_name: Option<String>,
    #[serde(default)]
    pub underlying_collateral_symbol: Option<String>,

    #[serde(default, deserialize_with = "opt_string_or_number")]
    pub cumulative_prize_net: Option<String>,
    #[serde(default, deserialize_with = "opt_string_or_number")]
    pub current_prize_id: Option<String>,
    #[serde(default, deserialize_with = "opt_string_or_number")]
    pub current_state: Option<String>,
    #[serde(default)]
    pub reserve_registry: Option<String>,
    #[serde(default)]
    pub sablier_stream: Option<RawSablierStream>,

    pub prize_strategy: RawPrizeStrategy,

    // Exactly one of these is expected
    #[serde(default)]
    pub compound_prize_pool: Option<RawCompoundPrizePool>,
    #[serde(default)]
    pub yield_source_prize_pool: Option<RawYieldSourcePrizePool>,
    #[serde(default)]
    pub stake_prize_pool: Option<Value>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawCreditRate {
    pub id: String,
    #[serde(default, deserialize_with = "opt_string_or_number")]
    pub credit_limit_mantissa: Option<String>,
    #[serde(default, deserialize_with = "opt_string_or_number")]
    pub credit_rate_mantissa: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawSablierStream {
    #[serde(default)]
    pub id: Option<String>,
}

/// Wrapper holding whichever strategy variant the pool was deployed with.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawPrizeStrategy {
    pub id: String,
    #[serde(default)]
    pub multiple_winners: Option<RawStrategyDetails>,
    #[serde(default)]
    pub single_random_winner: Option<RawStrategyDetails>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawStrategyDetails {
    pub ticket: RawControlledToken,
    pub sponsorship: RawControlledToken,
    #[serde(default, deserialize_with = "opt_string_or_number")]
    pub number_of_winners: Option<String>,
    #[serde(deserialize_with = "string_or_number")]
    pub prize_period_seconds: String,
    #[serde(default)]
    pub token_listener: Option<String>,
    #[serde(default)]
    pub external_erc20_awards: Vec<RawErc20Award>,
    #[serde(default)]
    pub external_erc721_awards: Vec<RawErc721Award>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawControlledToken {
    pub id: String,
    #[serde(deserialize_with = "decimals")]
    pub decimals: u8,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub symbol: Option<String>,
    #[serde(deserialize_with = "string_or_number")]
    pub total_supply: String,
    #[serde(default, deserialize_with = "opt_string_or_number")]
    pub number_of_holders: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawErc20Award {
    pub address: String,
    #[serde(default, deserialize_with = "opt_decimals")]
    pub decimals: Option<u8>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub symbol: Option<String>,
    /// Amount held by the prize strategy, unscaled.
    #[serde(default, deserialize_with = "opt_string_or_number")]
    pub balance: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawErc721Award {
    pub address: String,
    #[serde(default)]
    pub token_ids: Vec<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawCompoundPrizePool {
    pub c_token: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawYieldSourcePrizePool {
    pub yield_source: String,
}

// ============================================
// Loot box subgraph
// ============================================

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LootBoxGraphData {
    #[serde(default)]
    pub loot_boxes: Vec<RawLootBox>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawLootBox {
    pub token_id: String,
    #[serde(default)]
    pub erc1155_balances: Vec<Value>,
    #[serde(default)]
    pub erc721_tokens: Vec<Value>,
    #[serde(default)]
    pub erc20_balances: Vec<RawLootBoxErc20Balance>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawLootBoxErc20Balance {
    pub id: String,
    #[serde(deserialize_with = "string_or_number")]
    pub balance: String,
    pub erc20_entity: RawErc20Entity,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawErc20Entity {
    pub id: String,
    #[serde(deserialize_with = "decimals")]
    pub decimals: u8,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub symbol: Option<String>,
}

// ============================================
// Lenient scalar helpers
// ============================================

fn scalar_to_string<E: de::Error>(value: Value) -> Result<String, E> {
    match value {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(E::custom(format!("expected string or number, got {other}"))),
    }
}

fn string_or_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    scalar_to_string(Value::deserialize(deserializer)?)
}

fn opt_string_or_number<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<String>, D::Error> {
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(value) => scalar_to_string(value).map(Some),
    }
}

fn decimals<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u8, D::Error> {
    let raw = string_or_number(deserializer)?;
    raw.trim()
        .parse()
        .map_err(|_| de::Error::custom(format!("invalid decimals {raw:?}")))
}

fn opt_decimals<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<u8>, D::Error> {
    match opt_string_or_number(deserializer)? {
        None => Ok(None),
        Some(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| de::Error::custom(format!("invalid decimals {raw:?}"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_controlled_token_accepts_string_and_number_fields() {
        let token: RawControlledToken = serde_json::from_value(json!({
            "id": "0xticket",
            "decimals": "18",
            "totalSupply": 1000,
            "numberOfHolders": "7"
        }))
        .unwrap();
        assert_eq!(token.decimals, 18);
        assert_eq!(token.total_supply, "1000");
        assert_eq!(token.number_of_holders.as_deref(), Some("7"));

        let bad: Result<RawControlledToken, _> = serde_json::from_value(json!({
            "id": "0xticket",
            "decimals": "eighteen",
            "totalSupply": "0"
        }));
        assert!(bad.is_err());
    }

    #[test]
    fn test_strategy_defaults_missing_lists() {
        let strategy: RawPrizeStrategy = serde_json::from_value(json!({
            "id": "0xstrategy",
            "singleRandomWinner": {
                "ticket": { "id": "0x1", "decimals": 18, "totalSupply": "0" },
                "sponsorship": { "id": "0x2", "decimals": 18, "totalSupply": "0" },
                "prizePeriodSeconds": "604800"
            }
        }))
        .unwrap();

        assert!(strategy.multiple_winners.is_none());
        let details = strategy.single_random_winner.unwrap();
        assert!(details.external_erc20_awards.is_empty());
        assert!(details.number_of_winners.is_none());
    }
}
