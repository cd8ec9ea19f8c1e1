//! Append-only history log
//!
//! One record per generation/upload/mint operation. The file-backed store
//! appends newline-delimited JSON under a single writer lock, so concurrent
//! requests cannot interleave or lose entries.

mod entry;
mod store;

pub use entry::HistoryEntry;
pub use store::{FileHistory, HistoryStore, InMemoryHistory};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum HistoryError {
    #[error("history io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("history serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, HistoryError>;
