//! Snapshot assembly, caching and background refresh

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use common::models::ActivitySnapshot;
use common::{Config, Error};
use github::GitHubClient;
use tokio::sync::RwLock;
use tokio::time::interval;
use tracing::{info, warn};

use crate::window::DateWindows;

/// Fetch a fresh activity snapshot.
///
/// All queries run concurrently and are awaited jointly, so the calculators
/// never see a torn snapshot. The `reviews` count is windowed here to the
/// current week; the calculators treat it as an opaque tally.
pub async fn fetch_snapshot(
    client: &GitHubClient,
    config: &Config,
    now: DateTime<Utc>,
) -> common::Result<ActivitySnapshot> {
    let from = now - chrono::Duration::days(config.lookback_days as i64);
    let limit = config.fetch_page_size;

    let (calendar, pull_requests, reviewed_prs, commented_prs, issues) = tokio::try_join!(
        client.contribution_calendar(from, now),
        client.created_pull_requests(limit),
        client.reviewed_pull_requests(limit),
        client.commented_pull_requests(limit),
        client.involved_issues(limit),
    )?;

    let windows = DateWindows::compute(now);
    let reviews = reviewed_prs
        .iter()
        .filter(|pr| pr.updated_at >= windows.current_week.start)
        .count() as u32;

    info!(
        "Snapshot assembled: {} contributions, {} PRs, {} reviewed, {} commented, {} issues",
        calendar.total_contributions,
        pull_requests.len(),
        reviewed_prs.len(),
        commented_prs.len(),
        issues.len()
    );

    Ok(ActivitySnapshot {
        calendar,
        pull_requests,
        reviewed_prs,
        commented_prs,
        issues,
        reviews,
        fetched_at: now,
    })
}

/// Last good snapshot. A failed refresh keeps the previous value so the
/// dashboard can fall back to cached data on network failure.
#[derive(Default)]
pub struct SnapshotCache {
    inner: RwLock<Option<Arc<ActivitySnapshot>>>,
}

impl SnapshotCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn latest(&self) -> Option<Arc<ActivitySnapshot>> {
        self.inner.read().await.clone()
    }

    pub async fn store(&self, snapshot: ActivitySnapshot) -> Arc<ActivitySnapshot> {
        let snapshot = Arc::new(snapshot);
        *self.inner.write().await = Some(snapshot.clone());
        snapshot
    }
}

/// Background refresh loop that keeps the snapshot cache warm
pub struct RefreshService {
    client: Arc<GitHubClient>,
    cache: Arc<SnapshotCache>,
    config: Config,
}

impl RefreshService {
    pub fn new(client: Arc<GitHubClient>, cache: Arc<SnapshotCache>, config: Config) -> Self {
        Self {
            client,
            cache,
            config,
        }
    }

    /// Start the refresh loop. The first tick fires immediately to warm the
    /// cache at startup. A zero interval means refresh is disabled and the
    /// loop never starts.
    pub async fn run(self) {
        let period = Duration::from_secs(self.config.refresh_interval_mins as u64 * 60);
        if period.is_zero() {
            info!("Refresh service disabled (zero interval)");
            return;
        }
        info!("Starting refresh service (interval: {:?})", period);

        let mut ticker = interval(period);

        loop {
            ticker.tick().await;

            match fetch_snapshot(&self.client, &self.config, Utc::now()).await {
                Ok(snapshot) => {
                    let snapshot = self.cache.store(snapshot).await;
                    info!("Snapshot refreshed at {}", snapshot.fetched_at);
                }
                Err(Error::RateLimited { retry_after }) => {
                    warn!(
                        "Rate limited while refreshing. Pausing for {} seconds",
                        retry_after
                    );
                    tokio::time::sleep(Duration::from_secs(retry_after)).await;
                }
                Err(e) => {
                    warn!("Refresh failed, keeping cached snapshot: {}", e);
                }
            }
        }
    }
}
