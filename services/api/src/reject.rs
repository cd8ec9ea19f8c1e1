use axum::http::StatusCode;
use axum::Json;
use serde_json::json;

use chain::ChainError;
use history::HistoryError;
use irys::IrysError;

pub type Reject = (StatusCode, Json<serde_json::Value>);

/// Unified error body: `{ "error": <kind>, "detail": <message> }`.
pub fn reject(status: StatusCode, kind: &str, detail: impl std::fmt::Display) -> Reject {
    (status, Json(json!({ "error": kind, "detail": detail.to_string() })))
}

pub fn bad_request(detail: impl std::fmt::Display) -> Reject {
    reject(StatusCode::BAD_REQUEST, "bad-request", detail)
}

pub fn not_found(detail: impl std::fmt::Display) -> Reject {
    reject(StatusCode::NOT_FOUND, "not-found", detail)
}

pub fn chain_reject(e: ChainError) -> Reject {
    let (status, kind) = match &e {
        ChainError::Config(_) => (StatusCode::INTERNAL_SERVER_ERROR, "configuration"),
        ChainError::Unavailable(_) => (StatusCode::BAD_GATEWAY, "remote-unavailable"),
        ChainError::Rejected(_) => (StatusCode::INTERNAL_SERVER_ERROR, "remote-rejected"),
        ChainError::Malformed(_) => (StatusCode::BAD_GATEWAY, "malformed-response"),
    };
    reject(status, kind, e)
}

pub fn irys_reject(e: IrysError) -> Reject {
    let (status, kind) = match &e {
        IrysError::Config(_) => (StatusCode::INTERNAL_SERVER_ERROR, "configuration"),
        IrysError::Unavailable(_) => (StatusCode::BAD_GATEWAY, "remote-unavailable"),
        IrysError::Rejected(_) => (StatusCode::INTERNAL_SERVER_ERROR, "remote-rejected"),
        IrysError::Malformed(_) => (StatusCode::BAD_GATEWAY, "malformed-response"),
    };
    reject(status, kind, e)
}

pub fn history_reject(e: HistoryError) -> Reject {
    reject(StatusCode::INTERNAL_SERVER_ERROR, "storage", e)
}
