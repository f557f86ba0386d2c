// src/handlers/dashboard.rs

use axum::{extract::State, Json};

use crate::{
    common::error::AppError, config::AppState, models::dashboard::DashboardSummary,
};

#[utoipa::path(
    get,
    path = "/api/dashboard/summary",
    responses((status = 200, description = "Resumo geral", body = DashboardSummary)),
    security(("bearer_auth" = [])),
    tag = "Dashboard"
)]
pub async fn get_summary(
    State(app_state): State<AppState>,
) -> Result<Json<DashboardSummary>, AppError> {
    let summary = app_state.dashboard_repo.get_summary(&app_state.db_pool).await?;
    Ok(Json(summary))
}
