//! Dashboard route
//!
//! The aggregated payload a dashboard front-end renders in one request.

use axum::{
    extract::{Query, State},
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::warn;

use crate::error::ApiResult;
use crate::state::AppState;
use common::models::{AchievementBadge, Issue, PullRequest, StatsData, StreakResult};

#[derive(Deserialize)]
pub struct DashboardQuery {
    /// Force a fetch before evaluating
    #[serde(default)]
    pub refresh: bool,
}

#[derive(Serialize)]
pub struct DashboardResponse {
    pub streak: StreakResult,
    pub stats: StatsData,
    pub achievements: Vec<AchievementBadge>,
    pub pull_requests: Vec<PullRequest>,
    pub issues: Vec<Issue>,
    pub fetched_at: DateTime<Utc>,
    /// True when a forced refresh failed and this is the cached snapshot
    pub stale: bool,
}

pub async fn get(
    State(state): State<Arc<AppState>>,
    Query(query): Query<DashboardQuery>,
) -> ApiResult<Json<DashboardResponse>> {
    let (snapshot, stale) = if query.refresh {
        match state.refresh_snapshot().await {
            Ok(snapshot) => (snapshot, false),
            Err(e) => match state.cache.latest().await {
                Some(snapshot) => {
                    warn!("Refresh failed, serving cached snapshot: {}", e);
                    (snapshot, true)
                }
                None => return Err(e.into()),
            },
        }
    } else {
        (state.snapshot().await?, false)
    };

    let now = Utc::now();
    Ok(Json(DashboardResponse {
        streak: processor::streak::calculate(&snapshot.calendar, now.date_naive()),
        stats: processor::stats::aggregate(&snapshot, now),
        achievements: processor::achievements::evaluate(&snapshot, now),
        pull_requests: snapshot.pull_requests.clone(),
        issues: snapshot.issues.clone(),
        fetched_at: snapshot.fetched_at,
        stale,
    }))
}
