// src/models/message.rs

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// Registro de auditoria: uma notificação de WhatsApp enviada a um cliente.
/// O envio em si acontece fora do sistema; aqui fica só o rastro.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SentMessage {
    pub id: Uuid,
    pub client_id: Uuid,
    pub user_id: Uuid,
    pub sent_date: NaiveDate,
    pub note: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateMessagePayload {
    pub client_id: Uuid,
    /// Quando ausente, assume a data de hoje.
    pub sent_date: Option<NaiveDate>,
    pub note: Option<String>,
}
