use config::{Config, ConfigError, File, FileFormat};
use serde::Deserialize;

use crate::registry::YieldSourceName;

/// PoolTogether contracts deployed on one chain.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct ChainContractSettings {
    pub chain_id: u64,
    /// ERC-721 loot box contract. Awards of this NFT are loot boxes, not prizes.
    pub loot_box: String,
}

/// A yield source market recognized in addition to the built-in ones.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct YieldSourceSettings {
    pub chain_id: u64,
    pub name: YieldSourceName,
    pub address: String,
}

/// Root library configuration.
///
/// Loaded from an optional `config` file (`config.yaml`, `config.toml`, ...).
/// Every field has a default, so an absent file yields the mainnet setup.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct Settings {
    #[serde(default = "default_chains")]
    pub chains: Vec<ChainContractSettings>,
    /// ERC-20s never shown as loot box contents.
    #[serde(default = "default_erc20_block_list")]
    pub erc20_block_list: Vec<String>,
    #[serde(default)]
    pub yield_sources: Vec<YieldSourceSettings>,
}

pub const DEFAULT_LOOT_BOX_ADDRESS: &str = "0x4d695c615a7aacf2d7b9c481b66045bb2457dfde";

pub const DEFAULT_ERC20_BLOCK_LIST: &[&str] = &["0x6ca105d2af7095b1bceeb6a2113d168dddcd57cf"];

fn default_chains() -> Vec<ChainContractSettings> {
    // mainnet and rinkeby share the loot box deployment
    [1, 4]
        .into_iter()
        .map(|chain_id| ChainContractSettings {
            chain_id,
            loot_box: DEFAULT_LOOT_BOX_ADDRESS.to_string(),
        })
        .collect()
}

fn default_erc20_block_list() -> Vec<String> {
    DEFAULT_ERC20_BLOCK_LIST.iter().map(|s| s.to_string()).collect()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            chains: default_chains(),
            erc20_block_list: default_erc20_block_list(),
            yield_sources: Vec::new(),
        }
    }
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let s = Config::builder()
            .add_source(File::with_name("config").required(false))
            .build()?;

        let settings: Settings = s.try_deserialize()?;

        Ok(settings)
    }

    /// Load settings from an in-memory document, e.g. one embedded in a binary.
    pub fn from_source_str(contents: &str, format: FileFormat) -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::from_str(contents, format))
            .build()?
            .try_deserialize()
    }
}
