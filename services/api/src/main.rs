mod config;
mod state;
pub mod provider;
mod provider_gemini;
mod uploader;
mod ledger;
mod synthesis;
mod types;
mod reject;
mod routes_generate;
mod routes_dataset;
mod routes_nft;
mod routes_marketplace;
#[cfg(test)]
mod testutil;

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::config::AppConfig;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cfg = AppConfig::from_env()?;

    // Client construction fails only on bad configuration, before any
    // network activity.
    let chain_client =
        chain::ChainClient::connect(&cfg.chain).context("chain client init failed")?;
    let irys_client = irys::IrysClient::new(cfg.irys.clone());
    let gemini = provider_gemini::GeminiProvider::new(
        cfg.gemini_base_url.clone(),
        cfg.gemini_api_key.clone(),
        cfg.gemini_model.clone(),
    );
    let history_log = history::FileHistory::new(cfg.history_path.clone());

    // Short-timeout client for reading externally hosted metadata.
    let fetcher = reqwest::Client::builder()
        .timeout(Duration::from_secs(5))
        .build()
        .context("fetch client init failed")?;

    // --- Startup health checks (fail fast) ---
    startup_checks(&chain_client, &irys_client, &gemini).await?;

    let app_state = Arc::new(AppState {
        ledger: Arc::new(chain_client),
        provider: Arc::new(gemini),
        uploader: Arc::new(irys_client),
        history: Arc::new(history_log),
        fetcher,
        config: cfg.clone(),
    });

    let app = Router::new()
        .route("/api/generate", post(routes_generate::generate))
        .route("/api/generate/test", post(routes_generate::generate_test))
        .route("/api/generate/history", get(routes_generate::get_history))
        .route(
            "/api/generate-and-mint",
            post(routes_generate::generate_and_mint),
        )
        .route("/api/dataset/upload", post(routes_dataset::upload_dataset))
        .route("/api/dataset/preview", get(routes_dataset::preview_dataset))
        .route("/api/nft/mint", post(routes_nft::mint))
        .route("/api/nft/:token_id", get(routes_nft::get_nft))
        .route("/api/nft/creator/:address", get(routes_nft::by_creator))
        .route("/api/nft/:token_id/donate", post(routes_nft::donate))
        .route("/api/marketplace/nfts", get(routes_marketplace::list_nfts))
        .layer(CorsLayer::permissive())
        .with_state(app_state);

    let addr = &cfg.bind_addr;
    println!("api listening on http://{addr}");
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("cannot bind {addr}"))?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn startup_checks(
    chain_client: &chain::ChainClient,
    irys_client: &irys::IrysClient,
    gemini: &provider_gemini::GeminiProvider,
) -> Result<()> {
    use crate::provider::TextProvider;

    let chain_id = chain_client
        .chain_id()
        .await
        .context("ledger node health check failed")?;
    info!(chain_id, "ledger: ok");

    irys_client
        .info()
        .await
        .context("bundler health check failed")?;
    info!("bundler: ok");

    gemini
        .ping()
        .await
        .context("generation API health check failed")?;
    info!("generation api: ok");

    Ok(())
}
