use std::fmt;

use anyhow::Result;
use once_cell::sync::Lazy;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::contracts::validated_address;
use crate::models::PrizePoolKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum YieldSourceName {
    Compound,
    Aave,
    #[serde(rename = "Rari Fuse")]
    RariFuse,
    Cream,
}

impl YieldSourceName {
    /// Prize pool type created for a source of this kind.
    ///
    /// Aave sources are wrapped in a generic yield pool, every other kind is
    /// a cToken market.
    pub fn pool_type(self) -> &'static str {
        match self {
            YieldSourceName::Aave => GENERIC_YIELD_POOL_TYPE,
            YieldSourceName::Compound | YieldSourceName::RariFuse | YieldSourceName::Cream => {
                PrizePoolKind::Compound.as_str()
            }
        }
    }
}

impl fmt::Display for YieldSourceName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            YieldSourceName::Compound => write!(f, "Compound"),
            YieldSourceName::Aave => write!(f, "Aave"),
            YieldSourceName::RariFuse => write!(f, "Rari Fuse"),
            YieldSourceName::Cream => write!(f, "Cream"),
        }
    }
}

const GENERIC_YIELD_POOL_TYPE: &str = "genericYield";

/// A yield source contract the app recognizes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KnownYieldSource {
    pub yield_source_name: YieldSourceName,
    /// Prize pool type to create for this source.
    #[serde(rename = "type")]
    pub pool_type: &'static str,
}

pub(crate) type YieldSourceTable<K> = FxHashMap<u64, FxHashMap<K, YieldSourceName>>;

/// Built-in cToken style markets per chain, lowercase.
static KNOWN_YIELD_SOURCES: Lazy<YieldSourceTable<&'static str>> =
    Lazy::new(|| {
        let compound = [
            // cUSDC
            (1, "0x39aa39c021dfbae8fac545936693ac917d5e7563"),
            // cDAI
            (1, "0x5d3a536e4d6dbd6114cc1ead35777bab948e3643"),
            // cUNI
            (1, "0x35a18000230da775cac24873d00ff85bccded550"),
            // cCOMP
            (1, "0x70e36f6bf80a52b3b46b3af8e106cc0ed743e8e4"),
        ]
        .map(|key| (key, YieldSourceName::Compound));

        let cream = [
            (1, "0xf8445c529d363ce114148662387eba5e62016e20"),
            (56, "0xc17c8c5b8bb9456c624f8534fde6cbda2451488c"),
        ]
        .map(|key| (key, YieldSourceName::Cream));

        let mut sources: YieldSourceTable<&'static str> = FxHashMap::default();
        for ((chain_id, address), name) in compound.into_iter().chain(cream) {
            sources.entry(chain_id).or_default().insert(address, name);
        }
        sources
    });

/// Look up a built-in yield source contract by chain and address, ignoring case.
///
/// Returns `Ok(None)` for a well-formed address that is not a known source
/// and an error for a malformed one. [`ContractRegistry::known_yield_source`]
/// also consults sources registered in settings.
///
/// [`ContractRegistry::known_yield_source`]: super::ContractRegistry::known_yield_source
pub fn known_yield_source(chain_id: u64, address: &str) -> Result<Option<KnownYieldSource>> {
    let address = validated_address(address)?;
    Ok(builtin_yield_source(chain_id, &address))
}

/// Built-in lookup on an already validated, lowercase address.
pub(crate) fn builtin_yield_source(chain_id: u64, address: &str) -> Option<KnownYieldSource> {
    KNOWN_YIELD_SOURCES
        .get(&chain_id)
        .and_then(|sources| sources.get(address))
        .copied()
        .map(KnownYieldSource::from)
}

impl From<YieldSourceName> for KnownYieldSource {
    fn from(yield_source_name: YieldSourceName) -> Self {
        Self { yield_source_name, pool_type: yield_source_name.pool_type() }
    }
}
