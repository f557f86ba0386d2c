// src/handlers/payments.rs

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::auth::AdminUser,
    models::payment::{CreatePaymentPayload, PartnerPayment, PaymentDetail},
};

#[utoipa::path(
    get,
    path = "/api/payments",
    responses((status = 200, description = "Pagamentos de comissão", body = [PartnerPayment])),
    security(("bearer_auth" = [])),
    tag = "Pagamentos"
)]
pub async fn list_payments(
    State(app_state): State<AppState>,
) -> Result<Json<Vec<PartnerPayment>>, AppError> {
    let payments = app_state.payment_repo.list(&app_state.db_pool).await?;
    Ok(Json(payments))
}

#[utoipa::path(
    get,
    path = "/api/payments/{id}",
    responses(
        (status = 200, description = "Pagamento com itens", body = PaymentDetail),
        (status = 404, description = "Pagamento não encontrado")
    ),
    security(("bearer_auth" = [])),
    tag = "Pagamentos"
)]
pub async fn get_payment(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<PaymentDetail>, AppError> {
    let detail = app_state.payment_service.get_payment(&app_state.db_pool, id).await?;
    Ok(Json(detail))
}

#[utoipa::path(
    post,
    path = "/api/payments",
    request_body = CreatePaymentPayload,
    responses(
        (status = 201, description = "Pagamento criado com totais calculados", body = PaymentDetail),
        (status = 404, description = "Parceria não encontrada")
    ),
    security(("bearer_auth" = [])),
    tag = "Pagamentos"
)]
pub async fn create_payment(
    State(app_state): State<AppState>,
    _admin: AdminUser,
    Json(payload): Json<CreatePaymentPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;
    let detail = app_state
        .payment_service
        .create_payment(&app_state.db_pool, payload)
        .await?;
    Ok((StatusCode::CREATED, Json(detail)))
}
