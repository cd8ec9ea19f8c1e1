use anyhow::Result;
use chain_tools::ChainArgs;
use clap::Parser;

/// Donate to the registered owner of a dataset token.
#[derive(Parser, Debug)]
struct Args {
    #[command(flatten)]
    chain: ChainArgs,

    /// Token to donate to
    #[arg(long)]
    token_id: u64,

    /// Donation amount in ether units
    #[arg(long)]
    amount: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let args = Args::parse();

    let client = args.chain.connect()?;
    let value = alloy::primitives::utils::parse_ether(&args.amount)?;

    let meta = client.dataset_metadata(args.token_id).await?;
    println!(
        "Donating {} ETH to {} (token {})",
        args.amount, meta.owner, args.token_id
    );
    let tx = client.donate(args.token_id, value).await?;
    println!("Transaction: {tx}");

    Ok(())
}
