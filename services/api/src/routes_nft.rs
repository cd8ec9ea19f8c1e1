use alloy::primitives::utils::parse_ether;
use alloy::primitives::{Address, U256};
use axum::extract::{Path, State};
use axum::Json;
use serde::Deserialize;
use serde_json::json;
use tracing::warn;

use crate::reject::{bad_request, chain_reject, not_found, Reject};
use crate::state::SharedState;

pub async fn mint(
    State(state): State<SharedState>,
    Json(req): Json<chain::MintRequest>,
) -> Result<Json<serde_json::Value>, Reject> {
    if req.source_url.trim().is_empty() || req.token_uri.trim().is_empty() {
        return Err(bad_request("sourceUrl and tokenURI are required"));
    }

    let minted = state.ledger.mint_dataset(&req).await.map_err(chain_reject)?;
    Ok(Json(json!({
        "message": "Dataset minted",
        "tokenId": minted.token_id,
        "transactionHash": minted.transaction_hash,
    })))
}

pub async fn get_nft(
    State(state): State<SharedState>,
    Path(token_id): Path<u64>,
) -> Result<Json<serde_json::Value>, Reject> {
    let meta = state
        .ledger
        .dataset_metadata(token_id)
        .await
        .map_err(|e| match e {
            chain::ChainError::Rejected(_) => not_found(format!("token {token_id} not found")),
            other => chain_reject(other),
        })?;

    Ok(Json(json!({ "tokenId": token_id, "metadata": meta })))
}

pub async fn by_creator(
    State(state): State<SharedState>,
    Path(address): Path<String>,
) -> Result<Json<serde_json::Value>, Reject> {
    let creator: Address = address
        .parse()
        .map_err(|_| bad_request(format!("invalid address: {address}")))?;

    let ids = state
        .ledger
        .tokens_of_creator(creator)
        .await
        .map_err(chain_reject)?;

    let mut items = Vec::with_capacity(ids.len());
    for id in ids {
        // A single bad item must not abort the listing.
        match state.ledger.dataset_metadata(id).await {
            Ok(meta) => items.push(json!({ "tokenId": id, "metadata": meta })),
            Err(e) => {
                warn!(token_id = id, error = %e, "creator listing: metadata read failed");
                items.push(json!({ "tokenId": id, "metadata": serde_json::Value::Null }));
            }
        }
    }

    Ok(Json(json!({
        "creator": address,
        "count": items.len(),
        "nfts": items,
    })))
}

#[derive(Debug, Deserialize)]
pub struct DonateRequest {
    #[serde(default)]
    pub amount: Option<serde_json::Value>,
}

pub async fn donate(
    State(state): State<SharedState>,
    Path(token_id): Path<u64>,
    Json(req): Json<DonateRequest>,
) -> Result<Json<serde_json::Value>, Reject> {
    // Validated before any remote call.
    let amount = parse_amount(req.amount.as_ref()).map_err(bad_request)?;

    let tx = state
        .ledger
        .donate(token_id, amount)
        .await
        .map_err(chain_reject)?;
    Ok(Json(json!({
        "message": "Donation sent",
        "tokenId": token_id,
        "transactionHash": tx,
    })))
}

/// Accepts `"0.5"` or `0.5` in ether denomination. Absent, non-numeric or
/// zero amounts are errors.
fn parse_amount(raw: Option<&serde_json::Value>) -> Result<U256, String> {
    let raw = raw.ok_or_else(|| "amount is required".to_string())?;
    let text = match raw {
        serde_json::Value::String(s) => s.trim().to_string(),
        serde_json::Value::Number(n) => n.to_string(),
        _ => return Err("amount must be a number or numeric string".to_string()),
    };
    if text.is_empty() {
        return Err("amount is required".to_string());
    }

    let value = parse_ether(&text).map_err(|e| format!("invalid amount {text}: {e}"))?;
    if value.is_zero() {
        return Err("amount must be positive".to_string());
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    use crate::testutil::{test_state, StubProvider};

    #[tokio::test]
    async fn test_donate_without_amount_rejects_before_any_remote_call() {
        let harness = test_state(StubProvider::new("{}"));

        let err = donate(
            State(harness.state),
            Path(3),
            Json(DonateRequest { amount: None }),
        )
        .await
        .unwrap_err();

        assert_eq!(err.0, StatusCode::BAD_REQUEST);
        assert_eq!(*harness.ledger.calls.lock().unwrap(), 0);
    }

    #[tokio::test]
    async fn test_donate_with_amount_reaches_ledger() {
        let harness = test_state(StubProvider::new("{}"));

        let Json(resp) = donate(
            State(harness.state),
            Path(3),
            Json(DonateRequest {
                amount: Some(json!("0.5")),
            }),
        )
        .await
        .expect("donate should succeed");

        assert_eq!(resp["transactionHash"], "0xdead");
        assert_eq!(*harness.ledger.calls.lock().unwrap(), 1);
    }

    #[tokio::test]
    async fn test_unknown_token_is_not_found() {
        let harness = test_state(StubProvider::new("{}"));

        let err = get_nft(State(harness.state), Path(99)).await.unwrap_err();
        assert_eq!(err.0, StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_parse_amount_shapes() {
        assert_eq!(
            parse_amount(Some(&json!("0.5"))).unwrap(),
            U256::from(500_000_000_000_000_000u64)
        );
        assert_eq!(
            parse_amount(Some(&json!(1))).unwrap(),
            U256::from(1_000_000_000_000_000_000u64)
        );
        assert!(parse_amount(None).is_err());
        assert!(parse_amount(Some(&json!(""))).is_err());
        assert!(parse_amount(Some(&json!("0"))).is_err());
        assert!(parse_amount(Some(&json!({ "x": 1 }))).is_err());
        assert!(parse_amount(Some(&json!("not a number"))).is_err());
    }
}
