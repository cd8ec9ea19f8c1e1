use std::sync::Arc;

use history::HistoryStore;

use crate::config::AppConfig;
use crate::ledger::Ledger;
use crate::provider::TextProvider;
use crate::uploader::Uploader;

pub type SharedState = Arc<AppState>;

#[derive(Clone)]
pub struct AppState {
    pub ledger: Arc<dyn Ledger>,
    pub provider: Arc<dyn TextProvider>,
    pub uploader: Arc<dyn Uploader>,
    pub history: Arc<dyn HistoryStore>,
    /// Short-timeout client for externally hosted metadata reads.
    pub fetcher: reqwest::Client,
    pub config: AppConfig,
}
