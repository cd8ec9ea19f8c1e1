use anyhow::Result;
use chain_tools::ChainArgs;
use clap::Parser;

/// Print the on-chain metadata record of a dataset token.
#[derive(Parser, Debug)]
struct Args {
    #[command(flatten)]
    chain: ChainArgs,

    /// Token to look up
    #[arg(long)]
    token_id: u64,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let args = Args::parse();

    let client = args.chain.connect()?;
    let meta = client.dataset_metadata(args.token_id).await?;

    println!("Token {}:", args.token_id);
    println!("{}", serde_json::to_string_pretty(&meta)?);

    Ok(())
}
