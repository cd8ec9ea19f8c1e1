use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use irys::Tag;
use serde::Deserialize;
use serde_json::json;

use crate::reject::{bad_request, irys_reject, reject, Reject};
use crate::state::SharedState;
use crate::types::content_hash_hex;

const PREVIEW_ROWS: usize = 5;

#[derive(Clone, Debug, Deserialize)]
pub struct UploadDatasetRequest {
    pub data: serde_json::Value,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Uploads arbitrary dataset JSON and returns an object shaped for the
/// mint endpoint, plus the upload locators.
pub async fn upload_dataset(
    State(state): State<SharedState>,
    Json(req): Json<UploadDatasetRequest>,
) -> Result<Json<serde_json::Value>, Reject> {
    if req.data.is_null() {
        return Err(bad_request("data is required"));
    }

    let bytes = serde_json::to_vec(&req.data).map_err(bad_request)?;
    let content_hash = content_hash_hex(&bytes);

    let content_tags = [
        Tag::new("App-Name", "synthset"),
        Tag::new("Content-Type", "application/json"),
        Tag::new("Type", "dataset"),
    ];
    let content = state
        .uploader
        .upload_json(&req.data, &content_tags)
        .await
        .map_err(irys_reject)?;

    let created_at = Utc::now();
    let name = req.name.clone().unwrap_or_else(|| "dataset".to_string());
    let metadata = json!({
        "name": name,
        "contentHash": content_hash,
        "contentLink": content.url,
        "tags": req.tags,
        "created_at": created_at.to_rfc3339(),
    });
    let metadata_tags = [
        Tag::new("App-Name", "synthset"),
        Tag::new("Content-Type", "application/json"),
        Tag::new("Type", "dataset-metadata"),
    ];
    let meta = state
        .uploader
        .upload_json(&metadata, &metadata_tags)
        .await
        .map_err(irys_reject)?;

    let prepared = chain::MintRequest {
        source_url: content.url.clone(),
        content_hash,
        content_link: content.url.clone(),
        embed_vector_id: uuid::Uuid::new_v4().to_string(),
        created_at: created_at.timestamp() as u64,
        tags: req.tags.clone(),
        token_uri: meta.url.clone(),
    };

    Ok(Json(json!({
        "message": "Dataset uploaded",
        "prepared": prepared,
        "irys_links": { "content_url": content.url, "metadata_url": meta.url },
    })))
}

#[derive(Debug, Deserialize)]
pub struct PreviewQuery {
    pub url: String,
}

/// Fetches externally hosted dataset JSON and returns a bounded preview.
pub async fn preview_dataset(
    State(state): State<SharedState>,
    Query(q): Query<PreviewQuery>,
) -> Result<Json<serde_json::Value>, Reject> {
    if q.url.trim().is_empty() {
        return Err(bad_request("url is required"));
    }

    let resp = state
        .fetcher
        .get(&q.url)
        .send()
        .await
        .map_err(|e| reject(StatusCode::BAD_GATEWAY, "remote-unavailable", e))?
        .error_for_status()
        .map_err(|e| reject(StatusCode::BAD_GATEWAY, "remote-rejected", e))?;
    let value: serde_json::Value = resp
        .json()
        .await
        .map_err(|e| reject(StatusCode::BAD_GATEWAY, "malformed-response", e))?;

    let (preview, total_rows) = build_preview(value);
    Ok(Json(json!({ "preview": preview, "totalRows": total_rows })))
}

/// At most `PREVIEW_ROWS` rows; `totalRows` reflects the full length.
fn build_preview(value: serde_json::Value) -> (Vec<serde_json::Value>, usize) {
    match value {
        serde_json::Value::Array(rows) => {
            let total = rows.len();
            (rows.into_iter().take(PREVIEW_ROWS).collect(), total)
        }
        other => (vec![other], 1),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preview_caps_rows_and_keeps_total() {
        let rows: Vec<serde_json::Value> = (0..7).map(|i| json!({ "row": i })).collect();
        let (preview, total) = build_preview(json!(rows));

        assert_eq!(preview.len(), 5);
        assert_eq!(total, 7);
        assert_eq!(preview[0], json!({ "row": 0 }));
        assert_eq!(preview[4], json!({ "row": 4 }));
    }

    #[test]
    fn test_preview_short_array_is_untouched() {
        let rows: Vec<serde_json::Value> = (0..3).map(|i| json!(i)).collect();
        let (preview, total) = build_preview(json!(rows));

        assert_eq!(preview.len(), 3);
        assert_eq!(total, 3);
    }

    #[test]
    fn test_preview_wraps_non_array_document() {
        let (preview, total) = build_preview(json!({ "rows": [1, 2, 3] }));

        assert_eq!(preview.len(), 1);
        assert_eq!(total, 1);
    }
}
