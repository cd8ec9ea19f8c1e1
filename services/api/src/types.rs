use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SyntheticOutput {
    pub synthetic_transcription: String,
    pub medical_specialty: String,
    pub explanation: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerificationStatus {
    Verified,
    Failed,
}

/// One generated sample. `signature` is a retained placeholder and is
/// always empty.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DatasetRecord {
    pub original_text: String,
    pub synthetic_output: SyntheticOutput,
    pub verification_status: VerificationStatus,
    pub signature: String,
}

#[derive(Clone, Debug, Deserialize)]
pub struct GenerateRequest {
    pub input_text: String,
    #[serde(default = "default_sample_size")]
    pub sample_size: usize,
}

fn default_sample_size() -> usize {
    1
}

#[derive(Clone, Debug, Serialize)]
pub struct IrysLinks {
    pub content_url: String,
    pub metadata_url: String,
}

#[derive(Clone, Debug, Serialize)]
pub struct GenerateResponse {
    pub message: String,
    pub data: Vec<DatasetRecord>,
    pub irys_links: IrysLinks,
    #[serde(rename = "tokenId", skip_serializing_if = "Option::is_none")]
    pub token_id: Option<u64>,
    #[serde(rename = "transactionHash", skip_serializing_if = "Option::is_none")]
    pub transaction_hash: Option<String>,
}

/// Hex SHA-256 of the canonical content bytes, 0x-prefixed like the
/// on-chain records expect.
pub fn content_hash_hex(bytes: &[u8]) -> String {
    use sha2::{Digest, Sha256};
    let digest = Sha256::digest(bytes);
    format!("0x{}", hex::encode(digest))
}
