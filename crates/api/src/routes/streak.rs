//! Streak route

use axum::{extract::State, Json};
use chrono::Utc;
use std::sync::Arc;

use crate::error::ApiResult;
use crate::state::AppState;
use common::models::StreakResult;

pub async fn get(State(state): State<Arc<AppState>>) -> ApiResult<Json<StreakResult>> {
    let snapshot = state.snapshot().await?;
    let today = Utc::now().date_naive();
    Ok(Json(processor::streak::calculate(&snapshot.calendar, today)))
}
