use axum::extract::State;
use axum::Json;
use serde::Serialize;
use serde_json::json;
use tracing::warn;

use crate::reject::{chain_reject, Reject};
use crate::state::SharedState;

#[derive(Clone, Debug, Serialize)]
pub struct MarketItem {
    #[serde(rename = "tokenId")]
    pub token_id: u64,
    pub owner: String,
    #[serde(rename = "createdAt")]
    pub created_at: u64,
    #[serde(rename = "contentLink")]
    pub content_link: String,
    #[serde(rename = "tokenURI")]
    pub token_uri: String,
    /// Externally hosted metadata document; null when the fetch failed.
    pub metadata: Option<serde_json::Value>,
}

pub async fn list_nfts(
    State(state): State<SharedState>,
) -> Result<Json<serde_json::Value>, Reject> {
    let total = state.ledger.total_supply().await.map_err(chain_reject)?;

    // Token ids are sequential from 1.
    let mut items = Vec::new();
    for token_id in 1..=total {
        let meta = match state.ledger.dataset_metadata(token_id).await {
            Ok(m) => m,
            Err(e) => {
                warn!(token_id, error = %e, "marketplace: metadata read failed, skipping item");
                continue;
            }
        };

        let external = fetch_external_metadata(&state.fetcher, &meta.token_uri).await;
        items.push(MarketItem {
            token_id,
            owner: meta.owner.to_string(),
            created_at: meta.created_at,
            content_link: meta.content_link,
            token_uri: meta.token_uri,
            metadata: external,
        });
    }

    let items = sort_listing(items);
    Ok(Json(json!({ "count": items.len(), "nfts": items })))
}

/// A failed fetch degrades to null metadata for that item only.
async fn fetch_external_metadata(
    client: &reqwest::Client,
    url: &str,
) -> Option<serde_json::Value> {
    if url.trim().is_empty() {
        return None;
    }
    let resp = match client.get(url).send().await.and_then(|r| r.error_for_status()) {
        Ok(r) => r,
        Err(e) => {
            warn!(url, error = %e, "external metadata fetch failed");
            return None;
        }
    };
    match resp.json().await {
        Ok(v) => Some(v),
        Err(e) => {
            warn!(url, error = %e, "external metadata parse failed");
            None
        }
    }
}

/// Newest first.
fn sort_listing(mut items: Vec<MarketItem>) -> Vec<MarketItem> {
    items.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    items
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(token_id: u64, created_at: u64, metadata: Option<serde_json::Value>) -> MarketItem {
        MarketItem {
            token_id,
            owner: "0x4242424242424242424242424242424242424242".to_string(),
            created_at,
            content_link: format!("https://gateway.example/content-{token_id}"),
            token_uri: format!("https://gateway.example/meta-{token_id}"),
            metadata,
        }
    }

    #[test]
    fn test_listing_sorts_by_descending_created_at() {
        let items = vec![
            item(1, 100, Some(json!({ "name": "a" }))),
            item(2, 300, Some(json!({ "name": "b" }))),
            item(3, 200, None),
        ];

        let sorted = sort_listing(items);
        let order: Vec<u64> = sorted.iter().map(|i| i.token_id).collect();
        assert_eq!(order, vec![2, 3, 1]);
    }

    #[test]
    fn test_failed_metadata_item_serializes_as_null() {
        let value = json!(item(5, 50, None));
        assert!(value["metadata"].is_null());
        assert_eq!(value["tokenId"], 5);
    }
}
