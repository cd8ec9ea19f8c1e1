use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::Result;
use chain_tools::ChainArgs;
use clap::Parser;

/// Mint a dataset metadata record and print its token id.
#[derive(Parser, Debug)]
struct Args {
    #[command(flatten)]
    chain: ChainArgs,

    /// Provenance URL of the source data
    #[arg(long)]
    source_url: String,

    /// Hex content hash of the dataset payload
    #[arg(long)]
    content_hash: String,

    /// Permanent content locator
    #[arg(long)]
    content_link: String,

    /// Embedding vector id; generated when omitted
    #[arg(long)]
    embed_vector_id: Option<String>,

    /// Repeatable descriptive tag
    #[arg(long = "tag")]
    tags: Vec<String>,

    /// Metadata document locator
    #[arg(long)]
    token_uri: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let args = Args::parse();

    let client = args.chain.connect()?;
    let req = chain::MintRequest {
        source_url: args.source_url,
        content_hash: args.content_hash,
        content_link: args.content_link,
        embed_vector_id: args
            .embed_vector_id
            .unwrap_or_else(|| uuid::Uuid::new_v4().to_string()),
        created_at: SystemTime::now().duration_since(UNIX_EPOCH)?.as_secs(),
        tags: args.tags,
        token_uri: args.token_uri,
    };

    println!("Minting dataset record for {}", req.source_url);
    let minted = client.mint_dataset(&req).await?;
    println!("Token id: {}", minted.token_id);
    println!("Transaction: {}", minted.transaction_hash);

    Ok(())
}
