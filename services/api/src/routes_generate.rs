use axum::extract::State;
use axum::Json;
use chrono::Utc;
use irys::Tag;
use serde_json::json;
use tracing::info;

use crate::reject::{bad_request, chain_reject, history_reject, irys_reject, Reject};
use crate::state::SharedState;
use crate::synthesis::generate_samples;
use crate::types::{content_hash_hex, GenerateRequest, GenerateResponse, IrysLinks};

const APP_NAME: &str = "synthset";

pub async fn generate(
    State(state): State<SharedState>,
    Json(req): Json<GenerateRequest>,
) -> Result<Json<GenerateResponse>, Reject> {
    let outcome = run_pipeline(&state, &req).await?;

    let entry = history::HistoryEntry {
        input_text: req.input_text.clone(),
        data: outcome.records.iter().map(|r| json!(r)).collect(),
        metadata: outcome.metadata.clone(),
        created_at: Utc::now(),
        content_url: outcome.links.content_url.clone(),
        metadata_url: outcome.links.metadata_url.clone(),
        token_id: None,
        transaction_hash: None,
    };
    state.history.append(entry).await.map_err(history_reject)?;

    info!(samples = outcome.records.len(), "generate: uploaded and recorded");
    Ok(Json(GenerateResponse {
        message: "Dataset generated and uploaded".to_string(),
        data: outcome.records,
        irys_links: outcome.links,
        token_id: None,
        transaction_hash: None,
    }))
}

/// Generation only: no uploads, no history entry.
pub async fn generate_test(
    State(state): State<SharedState>,
    Json(req): Json<GenerateRequest>,
) -> Result<Json<serde_json::Value>, Reject> {
    validate(&state, &req)?;
    let records = generate_samples(
        state.provider.clone(),
        &req.input_text,
        req.sample_size,
        state.config.generate_concurrency,
    )
    .await;

    Ok(Json(json!({
        "message": "Generation test complete",
        "data": records,
    })))
}

pub async fn get_history(
    State(state): State<SharedState>,
) -> Result<Json<serde_json::Value>, Reject> {
    let entries = state.history.list().await.map_err(history_reject)?;
    Ok(Json(json!({ "count": entries.len(), "history": entries })))
}

pub async fn generate_and_mint(
    State(state): State<SharedState>,
    Json(req): Json<GenerateRequest>,
) -> Result<Json<GenerateResponse>, Reject> {
    let outcome = run_pipeline(&state, &req).await?;

    let content_bytes = serde_json::to_vec(&outcome.records).unwrap_or_default();
    let mint = chain::MintRequest {
        source_url: outcome.links.content_url.clone(),
        content_hash: content_hash_hex(&content_bytes),
        content_link: outcome.links.content_url.clone(),
        embed_vector_id: uuid::Uuid::new_v4().to_string(),
        created_at: Utc::now().timestamp() as u64,
        tags: vec!["synthetic".to_string(), "medical-transcription".to_string()],
        token_uri: outcome.links.metadata_url.clone(),
    };
    let minted = state.ledger.mint_dataset(&mint).await.map_err(chain_reject)?;

    let entry = history::HistoryEntry {
        input_text: req.input_text.clone(),
        data: outcome.records.iter().map(|r| json!(r)).collect(),
        metadata: outcome.metadata.clone(),
        created_at: Utc::now(),
        content_url: outcome.links.content_url.clone(),
        metadata_url: outcome.links.metadata_url.clone(),
        token_id: Some(minted.token_id.to_string()),
        transaction_hash: Some(minted.transaction_hash.clone()),
    };
    state.history.append(entry).await.map_err(history_reject)?;

    info!(
        samples = outcome.records.len(),
        token_id = minted.token_id,
        "generate-and-mint: recorded"
    );
    Ok(Json(GenerateResponse {
        message: "Dataset generated, uploaded and minted".to_string(),
        data: outcome.records,
        irys_links: outcome.links,
        token_id: Some(minted.token_id),
        transaction_hash: Some(minted.transaction_hash),
    }))
}

struct PipelineOutcome {
    records: Vec<crate::types::DatasetRecord>,
    links: IrysLinks,
    metadata: serde_json::Value,
}

/// Shared generate pipeline: synthesize, upload the sample array, upload
/// the derived metadata document.
async fn run_pipeline(state: &SharedState, req: &GenerateRequest) -> Result<PipelineOutcome, Reject> {
    validate(state, req)?;

    let records = generate_samples(
        state.provider.clone(),
        &req.input_text,
        req.sample_size,
        state.config.generate_concurrency,
    )
    .await;

    let content_tags = [
        Tag::new("App-Name", APP_NAME),
        Tag::new("Content-Type", "application/json"),
        Tag::new("Type", "synthetic-dataset"),
    ];
    let content = state
        .uploader
        .upload_json(&json!(records), &content_tags)
        .await
        .map_err(irys_reject)?;

    let metadata = json!({
        "name": format!("Synthetic dataset ({} samples)", records.len()),
        "description": "Synthetic medical transcription samples",
        "input_text": req.input_text,
        "sample_count": records.len(),
        "content_url": content.url,
        "created_at": Utc::now().to_rfc3339(),
        "model": state.provider.info(),
    });
    let metadata_tags = [
        Tag::new("App-Name", APP_NAME),
        Tag::new("Content-Type", "application/json"),
        Tag::new("Type", "dataset-metadata"),
    ];
    let meta_receipt = state
        .uploader
        .upload_json(&metadata, &metadata_tags)
        .await
        .map_err(irys_reject)?;

    Ok(PipelineOutcome {
        records,
        links: IrysLinks {
            content_url: content.url,
            metadata_url: meta_receipt.url,
        },
        metadata,
    })
}

fn validate(state: &SharedState, req: &GenerateRequest) -> Result<(), Reject> {
    if req.input_text.trim().is_empty() {
        return Err(bad_request("input_text is required"));
    }
    if req.sample_size == 0 {
        return Err(bad_request("sample_size must be at least 1"));
    }
    if req.sample_size > state.config.sample_limit {
        return Err(bad_request(format!(
            "sample_size may not exceed {}",
            state.config.sample_limit
        )));
    }
    Ok(())
}
