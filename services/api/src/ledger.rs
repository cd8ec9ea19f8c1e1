use alloy::primitives::{Address, U256};
use async_trait::async_trait;
use chain::{ChainClient, ChainError, DatasetMeta, MintReceipt, MintRequest};

/// The ledger operations the HTTP surface needs.
#[async_trait]
pub trait Ledger: Send + Sync {
    async fn mint_dataset(&self, req: &MintRequest) -> Result<MintReceipt, ChainError>;
    async fn donate(&self, token_id: u64, value: U256) -> Result<String, ChainError>;
    async fn dataset_metadata(&self, token_id: u64) -> Result<DatasetMeta, ChainError>;
    async fn tokens_of_creator(&self, creator: Address) -> Result<Vec<u64>, ChainError>;
    async fn total_supply(&self) -> Result<u64, ChainError>;
}

#[async_trait]
impl Ledger for ChainClient {
    async fn mint_dataset(&self, req: &MintRequest) -> Result<MintReceipt, ChainError> {
        ChainClient::mint_dataset(self, req).await
    }

    async fn donate(&self, token_id: u64, value: U256) -> Result<String, ChainError> {
        ChainClient::donate(self, token_id, value).await
    }

    async fn dataset_metadata(&self, token_id: u64) -> Result<DatasetMeta, ChainError> {
        ChainClient::dataset_metadata(self, token_id).await
    }

    async fn tokens_of_creator(&self, creator: Address) -> Result<Vec<u64>, ChainError> {
        ChainClient::tokens_of_creator(self, creator).await
    }

    async fn total_supply(&self) -> Result<u64, ChainError> {
        ChainClient::total_supply(self).await
    }
}
