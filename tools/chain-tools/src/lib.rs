//! Shared flags for the chain CLI binaries.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

#[derive(Args, Debug)]
pub struct ChainArgs {
    /// JSON-RPC endpoint of the ledger node
    #[arg(long, env = "RPC_URL")]
    pub rpc_url: String,

    /// Deployed contract address
    #[arg(long, env = "CONTRACT_ADDRESS")]
    pub contract: String,

    /// Path to the contract ABI artifact
    #[arg(long, env = "CONTRACT_ABI_PATH", default_value = "artifacts/DatasetNFT.json")]
    pub abi: PathBuf,

    /// Signing key (hex)
    #[arg(long, env = "PRIVATE_KEY", hide_env_values = true)]
    pub key: String,
}

impl ChainArgs {
    pub fn connect(&self) -> Result<chain::ChainClient> {
        let cfg = chain::ChainConfig {
            rpc_url: self.rpc_url.parse().context("invalid --rpc-url")?,
            contract_address: self.contract.parse().context("invalid --contract address")?,
            abi_path: self.abi.clone(),
            private_key: self.key.clone(),
        };
        Ok(chain::ChainClient::connect(&cfg)?)
    }
}
