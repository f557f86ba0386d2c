// src/handlers/partners.rs

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
    models::partner::{CreatePartnerPayload, Partner, UpdatePartnerPayload},
};

#[utoipa::path(
    get,
    path = "/api/partners",
    responses((status = 200, description = "Lista de parcerias", body = [Partner])),
    security(("bearer_auth" = [])),
    tag = "Parcerias"
)]
pub async fn list_partners(
    State(app_state): State<AppState>,
) -> Result<Json<Vec<Partner>>, AppError> {
    let partners = app_state.partner_repo.list(&app_state.db_pool).await?;
    Ok(Json(partners))
}

#[utoipa::path(
    post,
    path = "/api/partners",
    request_body = CreatePartnerPayload,
    responses(
        (status = 201, description = "Parceria criada", body = Partner),
        (status = 409, description = "Nome já cadastrado")
    ),
    security(("bearer_auth" = [])),
    tag = "Parcerias"
)]
pub async fn create_partner(
    State(app_state): State<AppState>,
    Json(payload): Json<CreatePartnerPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;
    let partner = app_state
        .partner_repo
        .create(&app_state.db_pool, payload.name.trim())
        .await?;
    Ok((StatusCode::CREATED, Json(partner)))
}

#[utoipa::path(
    put,
    path = "/api/partners/{id}",
    request_body = UpdatePartnerPayload,
    responses(
        (status = 200, description = "Parceria atualizada", body = Partner),
        (status = 404, description = "Parceria não encontrada")
    ),
    security(("bearer_auth" = [])),
    tag = "Parcerias"
)]
pub async fn update_partner(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdatePartnerPayload>,
) -> Result<Json<Partner>, AppError> {
    payload.validate()?;
    let partner = app_state
        .partner_repo
        .update(&app_state.db_pool, id, payload.name.trim())
        .await?
        .ok_or(AppError::NotFound("Parceria"))?;
    Ok(Json(partner))
}

#[utoipa::path(
    delete,
    path = "/api/partners/{id}",
    responses(
        (status = 204, description = "Parceria excluída"),
        (status = 409, description = "Parceria possui registros vinculados")
    ),
    security(("bearer_auth" = [])),
    tag = "Parcerias"
)]
pub async fn delete_partner(
    State(app_state): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    let deleted = app_state.partner_repo.delete(&app_state.db_pool, id).await?;
    if !deleted {
        return Err(AppError::NotFound("Parceria"));
    }
    Ok(StatusCode::NO_CONTENT)
}
