use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One logged operation. `token_id` and `transaction_hash` are present only
/// when the operation included a mint.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub input_text: String,
    pub data: Vec<serde_json::Value>,
    pub metadata: serde_json::Value,
    pub created_at: DateTime<Utc>,
    pub content_url: String,
    pub metadata_url: String,
    #[serde(rename = "tokenId", default, skip_serializing_if = "Option::is_none")]
    pub token_id: Option<String>,
    #[serde(
        rename = "transactionHash",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub transaction_hash: Option<String>,
}
