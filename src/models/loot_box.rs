use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::token::Token;

/// A loot box attached to a pool's prize.
///
/// Only `id` is known after normalization; the token lists are filled in
/// once the loot box graph data has been resolved.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LootBox {
    pub id: String,
    #[serde(default)]
    pub erc1155_tokens: Vec<Value>,
    #[serde(default)]
    pub erc721_tokens: Vec<Value>,
    #[serde(default)]
    pub erc20_tokens: Vec<Token>,
}

impl LootBox {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into(), ..Default::default() }
    }

    /// Replace the token lists with resolved contents, keeping the id.
    pub fn fill(&mut self, contents: LootBoxContents) {
        self.erc1155_tokens = contents.erc1155_tokens;
        self.erc721_tokens = contents.erc721_tokens;
        self.erc20_tokens = contents.erc20_tokens;
    }
}

/// Contents of a loot box as formatted from the loot box subgraph.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LootBoxContents {
    pub erc1155_tokens: Vec<Value>,
    pub erc721_tokens: Vec<Value>,
    pub erc20_tokens: Vec<Token>,
}
