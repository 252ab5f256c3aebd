mod settings;

pub use settings::{
    ChainContractSettings, Settings, YieldSourceSettings, DEFAULT_ERC20_BLOCK_LIST,
    DEFAULT_LOOT_BOX_ADDRESS,
};
