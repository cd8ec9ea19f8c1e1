//! Stub seams for exercising handlers without remote services.

use std::sync::{Arc, Mutex};

use alloy::primitives::{Address, U256};
use async_trait::async_trait;
use chain::{ChainError, DatasetMeta, MintReceipt, MintRequest};
use history::InMemoryHistory;
use irys::{IrysError, Tag, UploadReceipt};

use crate::config::AppConfig;
use crate::ledger::Ledger;
use crate::provider::{GenParams, ProviderInfo, TextProvider};
use crate::state::{AppState, SharedState};
use crate::uploader::Uploader;

pub struct StubProvider {
    body: Option<String>,
}

impl StubProvider {
    pub fn new(body: &str) -> Self {
        Self {
            body: Some(body.to_string()),
        }
    }

    pub fn failing() -> Self {
        Self { body: None }
    }
}

#[async_trait]
impl TextProvider for StubProvider {
    async fn generate(&self, _prompt: &str, _params: &GenParams) -> anyhow::Result<String> {
        match &self.body {
            Some(body) => Ok(body.clone()),
            None => anyhow::bail!("stub provider failure"),
        }
    }

    async fn ping(&self) -> anyhow::Result<()> {
        Ok(())
    }

    fn info(&self) -> ProviderInfo {
        ProviderInfo {
            name: "stub".to_string(),
            base_url: "http://stub".to_string(),
            model: "stub".to_string(),
        }
    }
}

#[derive(Default)]
pub struct StubUploader {
    pub uploads: Mutex<u32>,
}

#[async_trait]
impl Uploader for StubUploader {
    async fn upload_json(
        &self,
        _payload: &serde_json::Value,
        _tags: &[Tag],
    ) -> Result<UploadReceipt, IrysError> {
        let mut count = self.uploads.lock().unwrap();
        *count += 1;
        let id = format!("stub-tx-{count}");
        Ok(UploadReceipt {
            url: format!("https://gateway.example/{id}"),
            id,
        })
    }
}

/// Counts every remote call so tests can assert none happened.
#[derive(Default)]
pub struct StubLedger {
    pub calls: Mutex<u32>,
}

#[async_trait]
impl Ledger for StubLedger {
    async fn mint_dataset(&self, _req: &MintRequest) -> Result<MintReceipt, ChainError> {
        *self.calls.lock().unwrap() += 1;
        Ok(MintReceipt {
            token_id: 1,
            transaction_hash: "0xfeed".to_string(),
        })
    }

    async fn donate(&self, _token_id: u64, _value: U256) -> Result<String, ChainError> {
        *self.calls.lock().unwrap() += 1;
        Ok("0xdead".to_string())
    }

    async fn dataset_metadata(&self, token_id: u64) -> Result<DatasetMeta, ChainError> {
        *self.calls.lock().unwrap() += 1;
        Err(ChainError::Rejected(format!(
            "token {token_id} does not exist"
        )))
    }

    async fn tokens_of_creator(&self, _creator: Address) -> Result<Vec<u64>, ChainError> {
        *self.calls.lock().unwrap() += 1;
        Ok(Vec::new())
    }

    async fn total_supply(&self) -> Result<u64, ChainError> {
        *self.calls.lock().unwrap() += 1;
        Ok(0)
    }
}

pub fn test_config() -> AppConfig {
    AppConfig {
        bind_addr: "127.0.0.1:0".to_string(),
        history_path: "unused.ndjson".into(),
        chain: chain::ChainConfig {
            rpc_url: url::Url::parse("http://127.0.0.1:8545").unwrap(),
            contract_address: Address::ZERO,
            abi_path: "unused.json".into(),
            private_key: String::new(),
        },
        irys: irys::IrysConfig {
            node_url: url::Url::parse("http://127.0.0.1:1984").unwrap(),
            gateway_url: url::Url::parse("http://127.0.0.1:1985").unwrap(),
            token: "matic".to_string(),
        },
        gemini_base_url: "http://127.0.0.1:9999".to_string(),
        gemini_api_key: "test".to_string(),
        gemini_model: "test-model".to_string(),
        sample_limit: 20,
        generate_concurrency: 4,
    }
}

pub struct TestHarness {
    pub state: SharedState,
    pub ledger: Arc<StubLedger>,
    pub history: Arc<InMemoryHistory>,
}

pub fn test_state(provider: StubProvider) -> TestHarness {
    let ledger = Arc::new(StubLedger::default());
    let history = Arc::new(InMemoryHistory::new());
    let state = Arc::new(AppState {
        ledger: ledger.clone(),
        provider: Arc::new(provider),
        uploader: Arc::new(StubUploader::default()),
        history: history.clone(),
        fetcher: reqwest::Client::new(),
        config: test_config(),
    });
    TestHarness {
        state,
        ledger,
        history,
    }
}
