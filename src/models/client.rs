// src/models/client.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "person_type", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PersonType {
    Fisica,
    Juridica,
}

/// Cliente titular de contratos de certificado digital.
/// `deleted_at` marca exclusão lógica; o import restaura pelo CPF/CNPJ.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Client {
    pub id: Uuid,
    pub name: String,
    pub tax_id: String,
    pub person_type: PersonType,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub legal_representative: Option<String>,
    pub partner_id: Option<Uuid>,
    pub user_id: Uuid,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateClientPayload {
    #[validate(length(min = 2, message = "O nome precisa ter pelo menos 2 caracteres"))]
    pub name: String,
    #[validate(length(min = 11, max = 18, message = "CPF/CNPJ inválido"))]
    pub tax_id: String,
    pub phone: Option<String>,
    #[validate(email(message = "E-mail inválido"))]
    pub email: Option<String>,
    pub legal_representative: Option<String>,
    pub partner_id: Option<Uuid>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateClientPayload {
    #[validate(length(min = 2, message = "O nome precisa ter pelo menos 2 caracteres"))]
    pub name: Option<String>,
    pub phone: Option<String>,
    #[validate(email(message = "E-mail inválido"))]
    pub email: Option<String>,
    pub legal_representative: Option<String>,
    pub partner_id: Option<Uuid>,
}
