use anyhow::Result;
use chain_tools::ChainArgs;
use clap::Parser;

/// Print the native balance of an address (defaults to the signer).
#[derive(Parser, Debug)]
struct Args {
    #[command(flatten)]
    chain: ChainArgs,

    /// Address to query; the signing key's address when omitted
    #[arg(long)]
    address: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let args = Args::parse();

    let client = args.chain.connect()?;
    let who = match &args.address {
        Some(raw) => raw.parse()?,
        None => client.signer_address(),
    };

    let wei = client.balance_of(who).await?;
    println!(
        "Balance of {who}: {} ETH",
        alloy::primitives::utils::format_ether(wei)
    );

    Ok(())
}
