//! Achievement routes

use axum::{extract::State, Json};
use chrono::Utc;
use std::sync::Arc;

use crate::error::ApiResult;
use crate::state::AppState;
use common::models::AchievementBadge;

/// Evaluate the badge catalog against the current snapshot
pub async fn get(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<AchievementBadge>>> {
    let snapshot = state.snapshot().await?;
    Ok(Json(processor::achievements::evaluate(
        &snapshot,
        Utc::now(),
    )))
}
