// src/models/dashboard.rs

use serde::Serialize;
use sqlx::FromRow;
use utoipa::ToSchema;

use crate::models::contract::ContractStatus;

#[derive(Debug, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StatusCount {
    pub status: ContractStatus,
    pub count: i64,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub total_clients: i64,
    pub total_partners: i64,
    pub total_contracts: i64,
    pub contracts_by_status: Vec<StatusCount>,
    /// Contratos vivos vencendo nos próximos 30 dias.
    pub expiring_soon: i64,
}
