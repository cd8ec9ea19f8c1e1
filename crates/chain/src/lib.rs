//! Client for the dataset-NFT contract on a remote EVM ledger.
//!
//! Calls are built dynamically against a contract interface description
//! loaded from a local artifact file. Write operations submit a transaction
//! and wait for its receipt; generated identifiers are decoded off the
//! emitted events. No call is retried.

mod abi;
mod types;

pub use abi::load_abi;
pub use types::{BountyReceipt, DatasetMeta, MintReceipt, MintRequest};

use std::path::PathBuf;

use alloy::consensus::TxReceipt as _;
use alloy::contract::{ContractInstance, Interface};
use alloy::dyn_abi::DynSolValue;
use alloy::json_abi::JsonAbi;
use alloy::network::EthereumWallet;
use alloy::primitives::{Address, U256};
use alloy::providers::{DynProvider, Provider, ProviderBuilder};
use alloy::rpc::types::TransactionReceipt;
use alloy::signers::local::PrivateKeySigner;
use thiserror::Error;
use tracing::info;
use url::Url;

#[derive(Debug, Error)]
pub enum ChainError {
    #[error("chain configuration error: {0}")]
    Config(String),

    #[error("ledger node unavailable: {0}")]
    Unavailable(String),

    #[error("ledger rejected operation: {0}")]
    Rejected(String),

    #[error("malformed ledger response: {0}")]
    Malformed(String),
}

pub type Result<T> = std::result::Result<T, ChainError>;

#[derive(Clone, Debug)]
pub struct ChainConfig {
    pub rpc_url: Url,
    pub contract_address: Address,
    pub abi_path: PathBuf,
    /// Hex-encoded signing key for the transaction sender.
    pub private_key: String,
}

pub struct ChainClient {
    provider: DynProvider,
    contract: ContractInstance<DynProvider>,
    abi: JsonAbi,
    signer_address: Address,
}

impl ChainClient {
    /// Builds the wallet, provider and contract handle. Fails only on
    /// configuration problems; no network traffic happens here.
    pub fn connect(cfg: &ChainConfig) -> Result<Self> {
        let signer: PrivateKeySigner = cfg
            .private_key
            .trim()
            .parse()
            .map_err(|e| ChainError::Config(format!("invalid signing key: {e}")))?;
        let signer_address = signer.address();
        let wallet = EthereumWallet::from(signer);

        let abi = abi::load_abi(&cfg.abi_path)?;

        let provider = ProviderBuilder::new()
            .wallet(wallet)
            .connect_http(cfg.rpc_url.clone())
            .erased();
        let contract = ContractInstance::new(
            cfg.contract_address,
            provider.clone(),
            Interface::new(abi.clone()),
        );

        Ok(Self {
            provider,
            contract,
            abi,
            signer_address,
        })
    }

    pub fn signer_address(&self) -> Address {
        self.signer_address
    }

    pub async fn chain_id(&self) -> Result<u64> {
        self.provider.get_chain_id().await.map_err(rpc_err)
    }

    /// Native balance of an address, in wei.
    pub async fn balance_of(&self, address: Address) -> Result<U256> {
        self.provider.get_balance(address).await.map_err(rpc_err)
    }

    /// Submits a funded bounty and returns the identifier emitted by the
    /// `BountyCreated` event.
    pub async fn create_bounty(&self, description: &str, value: U256) -> Result<BountyReceipt> {
        let args = [DynSolValue::String(description.to_string())];
        let pending = self
            .contract
            .function("createBounty", &args)
            .map_err(contract_err)?
            .value(value)
            .send()
            .await
            .map_err(contract_err)?;
        let receipt = pending.get_receipt().await.map_err(receipt_err)?;

        let id = self.receipt_event_id(&receipt, "BountyCreated")?;
        info!(bounty_id = %id, tx = %receipt.transaction_hash, "bounty created");
        Ok(BountyReceipt {
            bounty_id: to_u64(id)?,
            transaction_hash: receipt.transaction_hash.to_string(),
        })
    }

    /// Mints a dataset metadata record and returns the identifier emitted by
    /// the `DatasetMinted` event.
    pub async fn mint_dataset(&self, req: &MintRequest) -> Result<MintReceipt> {
        let args = [
            DynSolValue::String(req.source_url.clone()),
            DynSolValue::String(req.content_hash.clone()),
            DynSolValue::String(req.content_link.clone()),
            DynSolValue::String(req.embed_vector_id.clone()),
            DynSolValue::Uint(U256::from(req.created_at), 256),
            DynSolValue::Array(req.tags.iter().cloned().map(DynSolValue::String).collect()),
            DynSolValue::String(req.token_uri.clone()),
        ];
        let pending = self
            .contract
            .function("mintDataset", &args)
            .map_err(contract_err)?
            .send()
            .await
            .map_err(contract_err)?;
        let receipt = pending.get_receipt().await.map_err(receipt_err)?;

        let id = self.receipt_event_id(&receipt, "DatasetMinted")?;
        info!(token_id = %id, tx = %receipt.transaction_hash, "dataset minted");
        Ok(MintReceipt {
            token_id: to_u64(id)?,
            transaction_hash: receipt.transaction_hash.to_string(),
        })
    }

    /// Transfers `value` to the registered owner of `token_id`.
    pub async fn donate(&self, token_id: u64, value: U256) -> Result<String> {
        let args = [DynSolValue::Uint(U256::from(token_id), 256)];
        let pending = self
            .contract
            .function("donate", &args)
            .map_err(contract_err)?
            .value(value)
            .send()
            .await
            .map_err(contract_err)?;
        let receipt = pending.get_receipt().await.map_err(receipt_err)?;

        info!(token_id, tx = %receipt.transaction_hash, "donation sent");
        Ok(receipt.transaction_hash.to_string())
    }

    pub async fn dataset_metadata(&self, token_id: u64) -> Result<DatasetMeta> {
        let args = [DynSolValue::Uint(U256::from(token_id), 256)];
        let values = self
            .contract
            .function("getDatasetMetadata", &args)
            .map_err(contract_err)?
            .call()
            .await
            .map_err(contract_err)?;
        decode_meta(values)
    }

    pub async fn tokens_of_creator(&self, creator: Address) -> Result<Vec<u64>> {
        let args = [DynSolValue::Address(creator)];
        let mut values = self
            .contract
            .function("getTokensByCreator", &args)
            .map_err(contract_err)?
            .call()
            .await
            .map_err(contract_err)?;

        let items = match values.pop() {
            Some(DynSolValue::Array(items)) if values.is_empty() => items,
            _ => {
                return Err(ChainError::Malformed(
                    "creator index: expected a uint array".to_string(),
                ))
            }
        };
        items
            .into_iter()
            .map(|v| match v {
                DynSolValue::Uint(id, _) => to_u64(id),
                other => Err(ChainError::Malformed(format!(
                    "creator index: unexpected element {other:?}"
                ))),
            })
            .collect()
    }

    pub async fn total_supply(&self) -> Result<u64> {
        let values = self
            .contract
            .function("totalSupply", &[])
            .map_err(contract_err)?
            .call()
            .await
            .map_err(contract_err)?;
        let mut fields = flatten_tuple(values).into_iter();
        take_u64(&mut fields, "totalSupply")
    }

    fn receipt_event_id(&self, receipt: &TransactionReceipt, event: &str) -> Result<U256> {
        let topics = receipt
            .inner
            .logs()
            .iter()
            .map(|log| log.inner.data.topics());
        abi::find_event_id(&self.abi, event, topics)
    }
}

fn rpc_err(e: alloy::transports::TransportError) -> ChainError {
    match e {
        alloy::transports::RpcError::ErrorResp(payload) => ChainError::Rejected(payload.to_string()),
        other => ChainError::Unavailable(other.to_string()),
    }
}

fn contract_err(e: alloy::contract::Error) -> ChainError {
    match e {
        alloy::contract::Error::TransportError(t) => rpc_err(t),
        other => ChainError::Rejected(other.to_string()),
    }
}

fn receipt_err(e: alloy::providers::PendingTransactionError) -> ChainError {
    ChainError::Unavailable(e.to_string())
}

fn to_u64(value: U256) -> Result<u64> {
    u64::try_from(value).map_err(|_| ChainError::Malformed(format!("identifier out of range: {value}")))
}

/// A single struct return decodes as one tuple; unwrap it to its fields.
fn flatten_tuple(mut values: Vec<DynSolValue>) -> Vec<DynSolValue> {
    if values.len() == 1 && matches!(values[0], DynSolValue::Tuple(_)) {
        if let DynSolValue::Tuple(inner) = values.remove(0) {
            return inner;
        }
    }
    values
}

fn decode_meta(values: Vec<DynSolValue>) -> Result<DatasetMeta> {
    let fields = flatten_tuple(values);
    if fields.len() != 8 {
        return Err(ChainError::Malformed(format!(
            "metadata tuple has {} fields, expected 8",
            fields.len()
        )));
    }

    // Field order mirrors the contract struct.
    let mut it = fields.into_iter();
    Ok(DatasetMeta {
        source_url: take_string(&mut it, "sourceUrl")?,
        content_hash: take_string(&mut it, "contentHash")?,
        content_link: take_string(&mut it, "contentLink")?,
        embed_vector_id: take_string(&mut it, "embedVectorId")?,
        created_at: take_u64(&mut it, "createdAt")?,
        tags: take_string_array(&mut it, "tags")?,
        token_uri: take_string(&mut it, "tokenURI")?,
        owner: take_address(&mut it, "owner")?,
    })
}

fn take_string(it: &mut impl Iterator<Item = DynSolValue>, field: &str) -> Result<String> {
    match it.next() {
        Some(DynSolValue::String(s)) => Ok(s),
        other => Err(ChainError::Malformed(format!(
            "{field}: expected string, got {other:?}"
        ))),
    }
}

fn take_u64(it: &mut impl Iterator<Item = DynSolValue>, field: &str) -> Result<u64> {
    match it.next() {
        Some(DynSolValue::Uint(v, _)) => to_u64(v),
        other => Err(ChainError::Malformed(format!(
            "{field}: expected uint, got {other:?}"
        ))),
    }
}

fn take_address(it: &mut impl Iterator<Item = DynSolValue>, field: &str) -> Result<Address> {
    match it.next() {
        Some(DynSolValue::Address(a)) => Ok(a),
        other => Err(ChainError::Malformed(format!(
            "{field}: expected address, got {other:?}"
        ))),
    }
}

fn take_string_array(
    it: &mut impl Iterator<Item = DynSolValue>,
    field: &str,
) -> Result<Vec<String>> {
    match it.next() {
        Some(DynSolValue::Array(items)) => items
            .into_iter()
            .map(|v| match v {
                DynSolValue::String(s) => Ok(s),
                other => Err(ChainError::Malformed(format!(
                    "{field}: expected string element, got {other:?}"
                ))),
            })
            .collect(),
        other => Err(ChainError::Malformed(format!(
            "{field}: expected array, got {other:?}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn meta_tuple() -> Vec<DynSolValue> {
        vec![DynSolValue::Tuple(vec![
            DynSolValue::String("https://gateway.example/content".to_string()),
            DynSolValue::String("0xdeadbeef".to_string()),
            DynSolValue::String("https://gateway.example/content".to_string()),
            DynSolValue::String("vec-1".to_string()),
            DynSolValue::Uint(U256::from(1_700_000_000u64), 256),
            DynSolValue::Array(vec![
                DynSolValue::String("synthetic".to_string()),
                DynSolValue::String("medical".to_string()),
            ]),
            DynSolValue::String("https://gateway.example/meta".to_string()),
            DynSolValue::Address(Address::repeat_byte(0x42)),
        ])]
    }

    #[test]
    fn test_decode_meta_unwraps_struct_tuple() {
        let meta = decode_meta(meta_tuple()).unwrap();
        assert_eq!(meta.source_url, "https://gateway.example/content");
        assert_eq!(meta.created_at, 1_700_000_000);
        assert_eq!(meta.tags, vec!["synthetic", "medical"]);
        assert_eq!(meta.owner, Address::repeat_byte(0x42));
    }

    #[test]
    fn test_decode_meta_rejects_short_tuple() {
        let err = decode_meta(vec![DynSolValue::Tuple(vec![DynSolValue::String(
            "only one field".to_string(),
        )])])
        .unwrap_err();
        assert!(matches!(err, ChainError::Malformed(_)));
    }

    #[test]
    fn test_decode_meta_rejects_wrong_field_type() {
        let mut fields = match meta_tuple().remove(0) {
            DynSolValue::Tuple(inner) => inner,
            _ => unreachable!(),
        };
        fields[0] = DynSolValue::Uint(U256::from(1u64), 256);
        let err = decode_meta(vec![DynSolValue::Tuple(fields)]).unwrap_err();
        assert!(matches!(err, ChainError::Malformed(_)));
    }

    #[test]
    fn test_identifier_out_of_range() {
        let err = to_u64(U256::MAX).unwrap_err();
        assert!(matches!(err, ChainError::Malformed(_)));
    }
}
