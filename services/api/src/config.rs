use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use url::Url;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub bind_addr: String,
    pub history_path: PathBuf,

    pub chain: chain::ChainConfig,
    pub irys: irys::IrysConfig,

    pub gemini_base_url: String,
    pub gemini_api_key: String,
    pub gemini_model: String,

    /// Upper bound on `sample_size` per generate request.
    pub sample_limit: usize,
    /// Fan-out width for independent generation calls.
    pub generate_concurrency: usize,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        let rpc_url = get("RPC_URL")?;
        let contract_address = get("CONTRACT_ADDRESS")?;
        let abi_path = std::env::var("CONTRACT_ABI_PATH")
            .unwrap_or_else(|_| "artifacts/DatasetNFT.json".to_string());
        let private_key = get("PRIVATE_KEY")?;

        let irys_node_url = get("IRYS_NODE_URL")?;
        let irys_gateway_url = std::env::var("IRYS_GATEWAY_URL")
            .unwrap_or_else(|_| "https://gateway.irys.xyz".to_string());
        let irys_token = std::env::var("IRYS_TOKEN").unwrap_or_else(|_| "matic".to_string());

        let gemini_api_key = get("GEMINI_API_KEY")?;
        let gemini_model =
            std::env::var("GEMINI_MODEL").unwrap_or_else(|_| "gemini-2.0-flash".to_string());
        let gemini_base_url = std::env::var("GEMINI_BASE_URL")
            .unwrap_or_else(|_| "https://generativelanguage.googleapis.com".to_string());

        let bind_addr =
            std::env::var("API_BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3001".to_string());
        let history_path =
            std::env::var("HISTORY_PATH").unwrap_or_else(|_| "data/history.ndjson".to_string());

        // Tiny sanity checks (fail fast, fail loud)
        if !gemini_base_url.starts_with("http://") && !gemini_base_url.starts_with("https://") {
            bail!("GEMINI_BASE_URL must start with http:// or https://");
        }

        let chain = chain::ChainConfig {
            rpc_url: Url::parse(&rpc_url).context("RPC_URL is not a valid URL")?,
            contract_address: contract_address
                .parse()
                .context("CONTRACT_ADDRESS is not a valid address")?,
            abi_path: PathBuf::from(abi_path),
            private_key,
        };
        let irys = irys::IrysConfig {
            node_url: Url::parse(&irys_node_url).context("IRYS_NODE_URL is not a valid URL")?,
            gateway_url: Url::parse(&irys_gateway_url)
                .context("IRYS_GATEWAY_URL is not a valid URL")?,
            token: irys_token,
        };

        Ok(Self {
            bind_addr,
            history_path: PathBuf::from(history_path),
            chain,
            irys,
            gemini_base_url,
            gemini_api_key,
            gemini_model,
            sample_limit: 20,
            generate_concurrency: 4,
        })
    }
}

fn get(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Missing required env var: {key}"))
}
