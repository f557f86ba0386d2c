// src/models/contract.rs

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// Número usado pelos contratos gerados por renovação, até receberem
/// numeração definitiva.
pub const UNIDENTIFIED_CONTRACT_NUMBER: &str = "Não identificado";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "contract_status", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ContractStatus {
    Scheduled,
    InContact,
    Renewed,
    Unidentified,
    NotRenewing,
    Cancelled,
    Active,
}

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Contract {
    pub id: Uuid,
    pub client_id: Uuid,
    pub certificate_id: Option<Uuid>,
    pub user_id: Uuid,
    pub contract_number: String,
    pub expiration_date: Option<NaiveDate>,
    pub renewal_date: Option<NaiveDate>,
    pub status: ContractStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateContractPayload {
    pub client_id: Uuid,
    pub certificate_id: Option<Uuid>,
    #[validate(length(min = 1, message = "O número do contrato é obrigatório"))]
    pub contract_number: String,
    pub expiration_date: Option<NaiveDate>,
    pub renewal_date: Option<NaiveDate>,
    pub status: Option<ContractStatus>,
}

/// Atualização parcial: campos ausentes permanecem como estão.
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateContractPayload {
    pub certificate_id: Option<Uuid>,
    #[validate(length(min = 1, message = "O número do contrato é obrigatório"))]
    pub contract_number: Option<String>,
    pub expiration_date: Option<NaiveDate>,
    pub renewal_date: Option<NaiveDate>,
    pub status: Option<ContractStatus>,
}
