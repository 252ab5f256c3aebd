use num_bigint::BigInt;
use serde::{Deserialize, Serialize};

use crate::utils::big_number;

/// An ERC-20 token as it appears in a normalized pool.
///
/// The same record describes controlled tokens (ticket, sponsorship), the
/// underlying collateral, external prize awards and loot box balances.
/// Price fields stay `None` until the price merge fills them in.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Token {
    // Identity
    pub address: String,
    #[serde(default)]
    pub decimals: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub symbol: Option<String>,

    // Held balance (awards, loot box contents)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "big_number::optional")]
    pub amount_unformatted: Option<BigInt>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub loot_box_address: Option<String>,

    // Supply (controlled tokens)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_supply: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "big_number::optional")]
    pub total_supply_unformatted: Option<BigInt>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number_of_holders: Option<String>,

    // Price data
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usd: Option<f64>,
    #[serde(default, rename = "derivedETH", skip_serializing_if = "Option::is_none")]
    pub derived_eth: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_value_usd: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "big_number::optional")]
    pub total_value_usd_scaled: Option<BigInt>,

    /// Subgraph fields with no typed counterpart, kept as delivered.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Token {
    pub fn new(address: &str, decimals: u8) -> Self {
        Self {
            // Always lowercase addresses for consistent comparisons
            address: address.to_lowercase(),
            decimals,
            ..Default::default()
        }
    }

    /// USD price, 0 when unpriced.
    pub fn usd_or_zero(&self) -> f64 {
        self.usd.unwrap_or(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_token_serializes_camel_case() {
        let mut token = Token::new("0xABC", 18);
        token.total_supply_unformatted = Some(BigInt::from(1000));
        token.derived_eth = Some("0.0005".to_string());

        let value = serde_json::to_value(&token).unwrap();
        assert_eq!(value["address"], json!("0xabc"));
        assert_eq!(value["totalSupplyUnformatted"], json!({ "type": "BigNumber", "hex": "0x3e8" }));
        assert_eq!(value["derivedETH"], json!("0.0005"));
        assert!(value.get("usd").is_none());
    }

    #[test]
    fn test_token_reads_cached_and_raw_big_numbers() {
        let token: Token = serde_json::from_value(json!({
            "address": "0xabc",
            "decimals": 6,
            "amountUnformatted": "42",
            "totalSupplyUnformatted": { "type": "BigNumber", "hex": "0x3e8" }
        }))
        .unwrap();

        assert_eq!(token.amount_unformatted, Some(BigInt::from(42)));
        assert_eq!(token.total_supply_unformatted, Some(BigInt::from(1000)));
        assert!(token.usd.is_none());
        assert!(token.extra.is_empty());
        assert_eq!(token.usd_or_zero(), 0.0);
    }
}
