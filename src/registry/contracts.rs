use std::str::FromStr;

use alloy::primitives::Address;
use anyhow::{Context, Result};
use rustc_hash::FxHashMap;

use super::yield_sources::{builtin_yield_source, KnownYieldSource, YieldSourceTable};
use crate::config::{Settings, DEFAULT_ERC20_BLOCK_LIST, DEFAULT_LOOT_BOX_ADDRESS};
use crate::utils::same_address;

/// Per-chain PoolTogether contract addresses consumed by the normalizer.
///
/// Addresses are validated once at construction and stored lowercase, so
/// lookups compare plain strings. A chain without an entry is a typed
/// `None`, never a silent empty string.
#[derive(Debug, Clone)]
pub struct ContractRegistry {
    loot_boxes: FxHashMap<u64, String>,
    erc20_block_list: Vec<String>,
    yield_sources: YieldSourceTable<String>,
}

impl ContractRegistry {
    /// Build the registry from settings, rejecting malformed addresses.
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let mut loot_boxes = FxHashMap::default();
        for chain in &settings.chains {
            let address = validated_address(&chain.loot_box)
                .with_context(|| format!("invalid loot box address for chain {}", chain.chain_id))?;
            loot_boxes.insert(chain.chain_id, address);
        }

        let erc20_block_list = settings
            .erc20_block_list
            .iter()
            .map(|address| validated_address(address).context("invalid ERC-20 block list entry"))
            .collect::<Result<Vec<_>>>()?;

        let mut yield_sources = YieldSourceTable::<String>::default();
        for source in &settings.yield_sources {
            let address = validated_address(&source.address).with_context(|| {
                format!("invalid {} yield source for chain {}", source.name, source.chain_id)
            })?;
            yield_sources
                .entry(source.chain_id)
                .or_default()
                .insert(address, source.name);
        }

        Ok(Self { loot_boxes, erc20_block_list, yield_sources })
    }

    /// Loot box ERC-721 contract of a chain, lowercase.
    pub fn loot_box_address(&self, chain_id: u64) -> Option<&str> {
        self.loot_boxes.get(&chain_id).map(String::as_str)
    }

    pub fn is_loot_box(&self, chain_id: u64, address: &str) -> bool {
        self.loot_box_address(chain_id)
            .is_some_and(|loot_box| same_address(loot_box, address))
    }

    /// Whether an ERC-20 must never be shown as loot box content.
    pub fn is_blocked_erc20(&self, address: &str) -> bool {
        self.erc20_block_list
            .iter()
            .any(|blocked| same_address(blocked, address))
    }

    /// Look up a yield source, preferring sources registered in settings
    /// over the built-in table. Malformed addresses are an error.
    pub fn known_yield_source(&self, chain_id: u64, address: &str) -> Result<Option<KnownYieldSource>> {
        let address = validated_address(address)?;

        let configured = self
            .yield_sources
            .get(&chain_id)
            .and_then(|sources| sources.get(&address))
            .copied()
            .map(KnownYieldSource::from);

        Ok(configured.or_else(|| builtin_yield_source(chain_id, &address)))
    }
}

impl Default for ContractRegistry {
    fn default() -> Self {
        let loot_boxes = [1, 4]
            .into_iter()
            .map(|chain_id| (chain_id, DEFAULT_LOOT_BOX_ADDRESS.to_string()))
            .collect();

        Self {
            loot_boxes,
            erc20_block_list: DEFAULT_ERC20_BLOCK_LIST.iter().map(|s| s.to_string()).collect(),
            yield_sources: YieldSourceTable::<String>::default(),
        }
    }
}

/// Parse an address and return its lowercase `0x` form.
pub(crate) fn validated_address(address: &str) -> Result<String> {
    let lowercase = address.trim().to_lowercase();
    Address::from_str(&lowercase).with_context(|| format!("malformed address {address:?}"))?;
    Ok(lowercase)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ChainContractSettings, YieldSourceSettings};
    use crate::registry::YieldSourceName;

    #[test]
    fn test_default_registry_matches_default_settings() {
        let from_settings = ContractRegistry::from_settings(&Settings::default()).unwrap();
        let default = ContractRegistry::default();

        for chain_id in [1, 4, 137] {
            assert_eq!(from_settings.loot_box_address(chain_id), default.loot_box_address(chain_id));
        }
        assert_eq!(default.loot_box_address(137), None);
    }

    #[test]
    fn test_lookups_ignore_case() {
        let registry = ContractRegistry::default();
        assert!(registry.is_loot_box(1, "0x4D695C615A7AACF2D7B9C481B66045BB2457DFDE"));
        assert!(!registry.is_loot_box(137, DEFAULT_LOOT_BOX_ADDRESS));
        assert!(registry.is_blocked_erc20("0x6CA105D2AF7095B1BCEEB6A2113D168DDDCD57CF"));
        assert!(!registry.is_blocked_erc20(DEFAULT_LOOT_BOX_ADDRESS));
    }

    #[test]
    fn test_from_settings_rejects_malformed_addresses() {
        let settings = Settings {
            chains: vec![ChainContractSettings { chain_id: 1, loot_box: "0xface".to_string() }],
            ..Settings::default()
        };
        assert!(ContractRegistry::from_settings(&settings).is_err());

        let settings = Settings {
            erc20_block_list: vec!["token".to_string()],
            ..Settings::default()
        };
        assert!(ContractRegistry::from_settings(&settings).is_err());
    }

    #[test]
    fn test_from_settings_stores_lowercase() {
        let settings = Settings {
            chains: vec![ChainContractSettings {
                chain_id: 137,
                loot_box: "0x00000000000000000000000000000000000000AB".to_string(),
            }],
            ..Settings::default()
        };
        let registry = ContractRegistry::from_settings(&settings).unwrap();
        assert_eq!(
            registry.loot_box_address(137),
            Some("0x00000000000000000000000000000000000000ab")
        );
        assert_eq!(registry.loot_box_address(1), None);
    }

    #[test]
    fn test_configured_yield_sources() {
        let aave = "0x0000000000000000000000000000000000000AA1";
        let settings = Settings {
            yield_sources: vec![
                YieldSourceSettings { chain_id: 137, name: YieldSourceName::Aave, address: aave.to_string() },
                YieldSourceSettings {
                    chain_id: 1,
                    name: YieldSourceName::RariFuse,
                    address: "0x39aa39c021dfbae8fac545936693ac917d5e7563".to_string(),
                },
            ],
            ..Settings::default()
        };
        let registry = ContractRegistry::from_settings(&settings).unwrap();

        let source = registry.known_yield_source(137, &aave.to_lowercase()).unwrap().unwrap();
        assert_eq!(source.yield_source_name, YieldSourceName::Aave);
        assert_eq!(source.pool_type, "genericYield");
        assert!(registry.known_yield_source(1, aave).unwrap().is_none());

        // a configured entry shadows the built-in cUSDC market
        let source = registry
            .known_yield_source(1, "0x39AA39c021dfbaE8faC545936693aC917d5E7563")
            .unwrap()
            .unwrap();
        assert_eq!(source.yield_source_name, YieldSourceName::RariFuse);
        assert_eq!(source.pool_type, "compound");

        // built-ins stay reachable
        let cream = registry
            .known_yield_source(56, "0xc17c8c5b8bb9456c624f8534fde6cbda2451488c")
            .unwrap()
            .unwrap();
        assert_eq!(cream.yield_source_name, YieldSourceName::Cream);
        assert!(registry.known_yield_source(1, "0xface").is_err());
    }

    #[test]
    fn test_from_settings_rejects_malformed_yield_source() {
        let settings = Settings {
            yield_sources: vec![YieldSourceSettings {
                chain_id: 1,
                name: YieldSourceName::Aave,
                address: "aave".to_string(),
            }],
            ..Settings::default()
        };
        assert!(ContractRegistry::from_settings(&settings).is_err());
    }
}
