//! Application state

use std::sync::Arc;

use chrono::Utc;
use common::models::ActivitySnapshot;
use common::Config;
use github::GitHubClient;
use processor::SnapshotCache;

/// Shared application state
pub struct AppState {
    pub config: Config,
    pub client: Arc<GitHubClient>,
    pub cache: Arc<SnapshotCache>,
}

impl AppState {
    pub fn new(config: Config, client: Arc<GitHubClient>, cache: Arc<SnapshotCache>) -> Self {
        Self {
            config,
            client,
            cache,
        }
    }

    /// Cached snapshot, fetching one on first use
    pub async fn snapshot(&self) -> common::Result<Arc<ActivitySnapshot>> {
        if let Some(snapshot) = self.cache.latest().await {
            return Ok(snapshot);
        }
        self.refresh_snapshot().await
    }

    /// Force-fetch a fresh snapshot. On failure the caller may fall back to
    /// `cache.latest()`.
    pub async fn refresh_snapshot(&self) -> common::Result<Arc<ActivitySnapshot>> {
        let snapshot = processor::fetch_snapshot(&self.client, &self.config, Utc::now()).await?;
        Ok(self.cache.store(snapshot).await)
    }
}
