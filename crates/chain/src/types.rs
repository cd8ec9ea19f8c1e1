use alloy::primitives::Address;
use serde::{Deserialize, Serialize};

/// On-chain dataset metadata tuple. `owner` is assigned by the contract,
/// never supplied by the caller.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DatasetMeta {
    #[serde(rename = "sourceUrl")]
    pub source_url: String,
    #[serde(rename = "contentHash")]
    pub content_hash: String,
    #[serde(rename = "contentLink")]
    pub content_link: String,
    #[serde(rename = "embedVectorId")]
    pub embed_vector_id: String,
    #[serde(rename = "createdAt")]
    pub created_at: u64,
    pub tags: Vec<String>,
    #[serde(rename = "tokenURI")]
    pub token_uri: String,
    pub owner: Address,
}

/// The seven caller-supplied fields of a mint.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MintRequest {
    #[serde(rename = "sourceUrl")]
    pub source_url: String,
    #[serde(rename = "contentHash")]
    pub content_hash: String,
    #[serde(rename = "contentLink")]
    pub content_link: String,
    #[serde(rename = "embedVectorId")]
    pub embed_vector_id: String,
    #[serde(rename = "createdAt")]
    pub created_at: u64,
    pub tags: Vec<String>,
    #[serde(rename = "tokenURI")]
    pub token_uri: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MintReceipt {
    pub token_id: u64,
    pub transaction_hash: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BountyReceipt {
    pub bounty_id: u64,
    pub transaction_hash: String,
}
