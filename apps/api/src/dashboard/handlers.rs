use axum::{
    extract::{Query, State},
    Json,
};
use chrono::NaiveDate;
use serde::Deserialize;

use crate::dashboard::stats::{compute_dashboard, DashboardStats};
use crate::errors::AppError;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardQuery {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

/// GET /api/dashboard
pub async fn handle_get_dashboard(
    State(state): State<AppState>,
    Query(window): Query<DashboardQuery>,
) -> Result<Json<DashboardStats>, AppError> {
    let rows = state.store.fetch_all().await?;
    Ok(Json(compute_dashboard(
        &rows,
        window.start_date,
        window.end_date,
    )))
}
