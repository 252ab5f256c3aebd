use num_bigint::BigInt;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::loot_box::LootBox;
use super::token::Token;
use crate::utils::big_number;

/// Canonical prize pool record produced by the normalizer.
///
/// Serializes to the camelCase shape cached pools are stored in, with every
/// big integer written as `{ "type": "BigNumber", "hex": "0x…" }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pool {
    pub chain_id: u64,
    pub config: PoolConfig,
    pub prize_pool: PrizePoolInfo,
    pub prize_strategy: ContractRef,
    pub tokens: PoolTokens,
    pub prize: Prize,
    pub reserve: Reserve,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token_listener: Option<ContractRef>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractRef {
    pub address: String,
}

impl ContractRef {
    pub fn new(address: &str) -> Self {
        Self { address: address.to_lowercase() }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PoolConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub liquidity_cap: Option<String>,
    pub number_of_winners: String,
    pub prize_period_seconds: String,
    #[serde(default)]
    pub token_credit_rates: Vec<CreditRate>,
}

/// Early exit fee settings for one controlled token.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreditRate {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credit_limit_mantissa: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credit_rate_mantissa: Option<String>,
}

// ============================================
// Prize pool kind
// ============================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrizePoolInfo {
    pub address: String,
    #[serde(flatten)]
    pub kind: PrizePoolKind,
}

/// Where a prize pool sources its yield. Serialized as the `type` field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum PrizePoolKind {
    /// Deposits are supplied to a Compound market; the cToken is in `tokens.c_token`.
    Compound,
    GenericYield {
        #[serde(rename = "yieldSource")]
        yield_source: ContractRef,
    },
    /// Deposits sit in the pool and generate no yield.
    Stake,
}

impl PrizePoolKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            PrizePoolKind::Compound => "compound",
            PrizePoolKind::GenericYield { .. } => "genericYield",
            PrizePoolKind::Stake => "stake",
        }
    }
}

// ============================================
// Tokens
// ============================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PoolTokens {
    pub ticket: Token,
    pub sponsorship: Token,
    pub underlying_token: Token,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub c_token: Option<Token>,
}

impl PoolTokens {
    /// Every known token, wrapper token last when present.
    pub fn iter(&self) -> impl Iterator<Item = &Token> {
        [&self.ticket, &self.sponsorship, &self.underlying_token]
            .into_iter()
            .chain(self.c_token.as_ref())
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Token> {
        [&mut self.ticket, &mut self.sponsorship, &mut self.underlying_token]
            .into_iter()
            .chain(self.c_token.as_mut())
    }
}

// ============================================
// Prize
// ============================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Prize {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub loot_box: Option<LootBox>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cumulative_prize_net: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_prize_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_state: Option<String>,
    #[serde(default)]
    pub external_erc20_awards: Vec<Token>,
    #[serde(default)]
    pub external_erc721_awards: Vec<Erc721Award>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sablier_stream: Option<SablierStream>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Erc721Award {
    pub address: String,
    #[serde(default)]
    pub token_ids: Vec<String>,
    /// Remaining subgraph fields, passed through untouched.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SablierStream {
    pub id: String,
}

// ============================================
// Reserve
// ============================================

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reserve {
    pub registry: ContractRef,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "big_number::optional")]
    pub amount_unformatted: Option<BigInt>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_value_usd: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "big_number::optional")]
    pub total_value_usd_scaled: Option<BigInt>,
}

impl Pool {
    /// Addresses of every ERC-20 whose price the pool needs, deduplicated in
    /// first-seen order: external awards, loot box balances, then known tokens.
    pub fn erc20_addresses(&self) -> Vec<String> {
        let mut addresses = Vec::new();
        self.collect_erc20_addresses(&mut addresses);
        addresses
    }

    pub(crate) fn collect_erc20_addresses(&self, addresses: &mut Vec<String>) {
        let loot_box_tokens = self
            .prize
            .loot_box
            .iter()
            .flat_map(|loot_box| loot_box.erc20_tokens.iter());

        for token in self
            .prize
            .external_erc20_awards
            .iter()
            .chain(loot_box_tokens)
            .chain(self.tokens.iter())
        {
            if !addresses.iter().any(|a| a.eq_ignore_ascii_case(&token.address)) {
                addresses.push(token.address.clone());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_prize_pool_kind_is_tagged() {
        let info = PrizePoolInfo {
            address: "0xpool".to_string(),
            kind: PrizePoolKind::GenericYield { yield_source: ContractRef::new("0xSource") },
        };
        let value = serde_json::to_value(&info).unwrap();
        assert_eq!(
            value,
            json!({ "address": "0xpool", "type": "genericYield", "yieldSource": { "address": "0xsource" } })
        );

        let stake: PrizePoolInfo =
            serde_json::from_value(json!({ "address": "0xpool", "type": "stake" })).unwrap();
        assert_eq!(stake.kind, PrizePoolKind::Stake);
        assert_eq!(stake.kind.as_str(), "stake");
    }

    #[test]
    fn test_pool_tokens_iter_includes_wrapper() {
        let mut tokens = PoolTokens {
            ticket: Token::new("0x1", 18),
            sponsorship: Token::new("0x2", 18),
            underlying_token: Token::new("0x3", 18),
            c_token: None,
        };
        assert_eq!(tokens.iter().count(), 3);

        tokens.c_token = Some(Token::new("0x4", 8));
        let addresses: Vec<_> = tokens.iter().map(|t| t.address.as_str()).collect();
        assert_eq!(addresses, vec!["0x1", "0x2", "0x3", "0x4"]);
    }

    #[test]
    fn test_erc721_award_keeps_extra_fields() {
        let award: Erc721Award = serde_json::from_value(json!({
            "id": "0xaward",
            "address": "0xnft",
            "tokenIds": ["1"]
        }))
        .unwrap();
        assert_eq!(award.token_ids, vec!["1"]);
        assert_eq!(award.extra["id"], json!("0xaward"));
    }
}
