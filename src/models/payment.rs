// src/models/payment.rs

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// Pagamento de comissão a uma parceria, referente a um mês.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PartnerPayment {
    pub id: Uuid,
    pub partner_id: Uuid,
    pub reference_month: NaiveDate,
    pub total: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Item do pagamento: quantidade vendida de um certificado e a comissão
/// aplicada. `total` é calculado no servidor, nunca aceito do cliente.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaymentLineItem {
    pub id: Uuid,
    pub payment_id: Uuid,
    pub certificate_id: Uuid,
    pub quantity: i32,
    pub unit_value: Decimal,
    pub commission_percent: Decimal,
    pub total: Decimal,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaymentDetail {
    #[serde(flatten)]
    pub payment: PartnerPayment,
    pub items: Vec<PaymentLineItem>,
}

#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreatePaymentItemPayload {
    pub certificate_id: Uuid,
    #[validate(range(min = 1, message = "A quantidade precisa ser pelo menos 1"))]
    pub quantity: i32,
    pub unit_value: Decimal,
    pub commission_percent: Decimal,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreatePaymentPayload {
    pub partner_id: Uuid,
    /// Qualquer dia do mês de referência (normalmente o dia 1).
    pub reference_month: NaiveDate,
    #[validate(length(min = 1, message = "O pagamento precisa ter pelo menos um item"), nested)]
    pub items: Vec<CreatePaymentItemPayload>,
}
