//! Stats route

use axum::{extract::State, Json};
use chrono::Utc;
use std::sync::Arc;

use crate::error::ApiResult;
use crate::state::AppState;
use common::models::StatsData;

pub async fn get(State(state): State<Arc<AppState>>) -> ApiResult<Json<StatsData>> {
    let snapshot = state.snapshot().await?;
    Ok(Json(processor::stats::aggregate(&snapshot, Utc::now())))
}
