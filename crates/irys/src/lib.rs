//! Client for an Irys-style bundler node and gateway.
//!
//! Upload flow: quote the payload size, top up the node-side reserved
//! balance when it is short, upload, return the permanent gateway locator.
//! Failures propagate to the caller unrecovered.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

#[derive(Debug, Error)]
pub enum IrysError {
    #[error("bundler configuration error: {0}")]
    Config(String),

    #[error("bundler unavailable: {0}")]
    Unavailable(String),

    #[error("bundler rejected request: {0}")]
    Rejected(String),

    #[error("malformed bundler response: {0}")]
    Malformed(String),
}

pub type Result<T> = std::result::Result<T, IrysError>;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Tag {
    pub name: String,
    pub value: String,
}

impl Tag {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct UploadReceipt {
    pub id: String,
    pub url: String,
}

#[derive(Clone, Debug, Deserialize)]
pub struct NodeInfo {
    pub version: Option<String>,
    #[serde(default)]
    pub addresses: Option<serde_json::Value>,
}

#[derive(Clone, Debug)]
pub struct IrysConfig {
    pub node_url: Url,
    pub gateway_url: Url,
    /// Payment token symbol, e.g. "matic".
    pub token: String,
}

pub struct IrysClient {
    cfg: IrysConfig,
    client: reqwest::Client,
}

impl IrysClient {
    pub fn new(cfg: IrysConfig) -> Self {
        Self {
            cfg,
            client: reqwest::Client::new(),
        }
    }

    fn node_endpoint(&self, path: &str) -> String {
        format!("{}/{path}", self.cfg.node_url.as_str().trim_end_matches('/'))
    }

    /// Permanent retrieval locator for an uploaded transaction id.
    pub fn gateway_url_for(&self, id: &str) -> String {
        format!("{}/{id}", self.cfg.gateway_url.as_str().trim_end_matches('/'))
    }

    pub async fn info(&self) -> Result<NodeInfo> {
        let url = self.node_endpoint("info");
        let resp = self
            .client
            .get(url)
            .send()
            .await
            .map_err(transport)?
            .error_for_status()
            .map_err(rejected)?;
        resp.json().await.map_err(malformed)
    }

    /// Price quote in atomic units for a payload of `byte_len` bytes.
    pub async fn price(&self, byte_len: usize) -> Result<u128> {
        let url = self.node_endpoint(&format!("price/{}/{byte_len}", self.cfg.token));
        let resp = self
            .client
            .get(url)
            .send()
            .await
            .map_err(transport)?
            .error_for_status()
            .map_err(rejected)?;
        let value: serde_json::Value = resp.json().await.map_err(malformed)?;
        parse_atomic(&value)
    }

    /// Reserved balance on the node for the configured token.
    pub async fn balance(&self) -> Result<u128> {
        let url = self.node_endpoint(&format!("account/balance/{}", self.cfg.token));
        let resp = self
            .client
            .get(url)
            .send()
            .await
            .map_err(transport)?
            .error_for_status()
            .map_err(rejected)?;
        let value: serde_json::Value = resp.json().await.map_err(malformed)?;
        match value.get("balance") {
            Some(balance) => parse_atomic(balance),
            None => parse_atomic(&value),
        }
    }

    /// Tops up the node-side reserved balance.
    pub async fn fund(&self, amount: u128) -> Result<()> {
        let url = self.node_endpoint(&format!("account/fund/{}", self.cfg.token));
        let body = serde_json::json!({ "amount": amount.to_string() });
        self.client
            .post(url)
            .json(&body)
            .send()
            .await
            .map_err(transport)?
            .error_for_status()
            .map_err(rejected)?;
        Ok(())
    }

    /// Uploads a JSON payload with its tags, funding the reserved balance
    /// first when the quote exceeds it.
    pub async fn upload(&self, payload: &serde_json::Value, tags: &[Tag]) -> Result<UploadReceipt> {
        let body = serde_json::to_vec(payload)
            .map_err(|e| IrysError::Config(format!("unserializable payload: {e}")))?;

        let quote = self.price(body.len()).await?;
        let balance = self.balance().await?;
        if balance < quote {
            tracing::info!(quote, balance, "funding bundler balance");
            self.fund(quote - balance).await?;
        }

        let url = self.node_endpoint(&format!("tx/{}", self.cfg.token));
        let envelope = serde_json::json!({ "data": payload, "tags": tags });
        let resp = self
            .client
            .post(url)
            .json(&envelope)
            .send()
            .await
            .map_err(transport)?
            .error_for_status()
            .map_err(rejected)?;

        let value: serde_json::Value = resp.json().await.map_err(malformed)?;
        let id = value
            .get("id")
            .and_then(|v| v.as_str())
            .ok_or_else(|| IrysError::Malformed("upload response missing id".to_string()))?
            .to_string();
        let url = self.gateway_url_for(&id);
        Ok(UploadReceipt { id, url })
    }
}

fn transport(e: reqwest::Error) -> IrysError {
    IrysError::Unavailable(e.to_string())
}

fn rejected(e: reqwest::Error) -> IrysError {
    IrysError::Rejected(e.to_string())
}

fn malformed(e: reqwest::Error) -> IrysError {
    IrysError::Malformed(e.to_string())
}

/// Nodes report atomic amounts as either a bare number or a decimal string.
fn parse_atomic(value: &serde_json::Value) -> Result<u128> {
    match value {
        serde_json::Value::Number(n) => n
            .as_u64()
            .map(u128::from)
            .ok_or_else(|| IrysError::Malformed(format!("non-integer amount: {n}"))),
        serde_json::Value::String(s) => s
            .parse()
            .map_err(|_| IrysError::Malformed(format!("unparseable amount: {s}"))),
        other => Err(IrysError::Malformed(format!(
            "unexpected amount shape: {other}"
        ))),
    }
}
