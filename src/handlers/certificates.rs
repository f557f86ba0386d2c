// src/handlers/certificates.rs

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
    models::certificate::{Certificate, CreateCertificatePayload},
};

#[utoipa::path(
    get,
    path = "/api/certificates",
    responses((status = 200, description = "Lista de certificados", body = [Certificate])),
    security(("bearer_auth" = [])),
    tag = "Certificados"
)]
pub async fn list_certificates(
    State(app_state): State<AppState>,
) -> Result<Json<Vec<Certificate>>, AppError> {
    let certificates = app_state.certificate_repo.list(&app_state.db_pool).await?;
    Ok(Json(certificates))
}

#[utoipa::path(
    post,
    path = "/api/certificates",
    request_body = CreateCertificatePayload,
    responses(
        (status = 201, description = "Certificado criado", body = Certificate),
        (status = 409, description = "Nome já cadastrado")
    ),
    security(("bearer_auth" = [])),
    tag = "Certificados"
)]
pub async fn create_certificate(
    State(app_state): State<AppState>,
    Json(payload): Json<CreateCertificatePayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;
    let certificate = app_state
        .certificate_repo
        .create(&app_state.db_pool, payload.name.trim())
        .await?;
    Ok((StatusCode::CREATED, Json(certificate)))
}

#[utoipa::path(
    delete,
    path = "/api/certificates/{id}",
    responses(
        (status = 204, description = "Certificado excluído"),
        (status = 409, description = "Certificado possui contratos vinculados")
    ),
    security(("bearer_auth" = [])),
    tag = "Certificados"
)]
pub async fn delete_certificate(
    State(app_state): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    let deleted = app_state.certificate_repo.delete(&app_state.db_pool, id).await?;
    if !deleted {
        return Err(AppError::NotFound("Certificado"));
    }
    Ok(StatusCode::NO_CONTENT)
}
