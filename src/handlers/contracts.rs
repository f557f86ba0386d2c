// src/handlers/contracts.rs

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::auth::{AdminUser, AuthenticatedUser},
    models::contract::{Contract, CreateContractPayload, UpdateContractPayload},
};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListContractsQuery {
    pub client_id: Option<Uuid>,
}

#[utoipa::path(
    get,
    path = "/api/contracts",
    params(("clientId" = Option<Uuid>, Query, description = "Filtra por cliente")),
    responses((status = 200, description = "Lista de contratos vivos", body = [Contract])),
    security(("bearer_auth" = [])),
    tag = "Contratos"
)]
pub async fn list_contracts(
    State(app_state): State<AppState>,
    Query(query): Query<ListContractsQuery>,
) -> Result<Json<Vec<Contract>>, AppError> {
    let contracts = app_state
        .contract_repo
        .list(&app_state.db_pool, query.client_id)
        .await?;
    Ok(Json(contracts))
}

#[utoipa::path(
    post,
    path = "/api/contracts",
    request_body = CreateContractPayload,
    responses(
        (status = 201, description = "Contrato criado", body = Contract),
        (status = 409, description = "Número duplicado ou período sobreposto")
    ),
    security(("bearer_auth" = [])),
    tag = "Contratos"
)]
pub async fn create_contract(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Json(payload): Json<CreateContractPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;
    let contract = app_state
        .contract_service
        .create_contract(&app_state.db_pool, user.id, payload)
        .await?;
    Ok((StatusCode::CREATED, Json(contract)))
}

#[utoipa::path(
    put,
    path = "/api/contracts/{id}",
    request_body = UpdateContractPayload,
    responses(
        (status = 200, description = "Contrato atualizado; se marcado como Renovado, o sucessor foi criado", body = Contract),
        (status = 400, description = "Renovado sem data de renovação"),
        (status = 404, description = "Contrato não encontrado")
    ),
    security(("bearer_auth" = [])),
    tag = "Contratos"
)]
pub async fn update_contract(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateContractPayload>,
) -> Result<Json<Contract>, AppError> {
    payload.validate()?;
    let contract = app_state
        .contract_service
        .update_contract(&app_state.db_pool, id, payload)
        .await?;
    Ok(Json(contract))
}

#[utoipa::path(
    delete,
    path = "/api/contracts/{id}",
    responses(
        (status = 204, description = "Contrato excluído logicamente"),
        (status = 404, description = "Contrato não encontrado")
    ),
    security(("bearer_auth" = [])),
    tag = "Contratos"
)]
pub async fn delete_contract(
    State(app_state): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    app_state
        .contract_service
        .delete_contract(&app_state.db_pool, id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
