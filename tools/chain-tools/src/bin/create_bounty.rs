use anyhow::Result;
use chain_tools::ChainArgs;
use clap::Parser;

/// Create a funded bounty and print its event-derived id.
#[derive(Parser, Debug)]
struct Args {
    #[command(flatten)]
    chain: ChainArgs,

    /// Bounty description
    #[arg(long)]
    description: String,

    /// Funding amount in ether units
    #[arg(long, default_value = "0.01")]
    amount: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let args = Args::parse();

    let client = args.chain.connect()?;
    let value = alloy::primitives::utils::parse_ether(&args.amount)?;

    println!("Creating bounty ({} ETH): {}", args.amount, args.description);
    let receipt = client.create_bounty(&args.description, value).await?;
    println!("Bounty id: {}", receipt.bounty_id);
    println!("Transaction: {}", receipt.transaction_hash);

    Ok(())
}
