// src/handlers/clients.rs

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
    middleware::auth::{AdminUser, AuthenticatedUser},
    models::client::{Client, CreateClientPayload, UpdateClientPayload},
};

#[utoipa::path(
    get,
    path = "/api/clients",
    responses((status = 200, description = "Lista de clientes ativos", body = [Client])),
    security(("bearer_auth" = [])),
    tag = "Clientes"
)]
pub async fn list_clients(State(app_state): State<AppState>) -> Result<Json<Vec<Client>>, AppError> {
    let clients = app_state.client_repo.list(&app_state.db_pool).await?;
    Ok(Json(clients))
}

#[utoipa::path(
    get,
    path = "/api/clients/{id}",
    responses(
        (status = 200, description = "Cliente", body = Client),
        (status = 404, description = "Cliente não encontrado")
    ),
    security(("bearer_auth" = [])),
    tag = "Clientes"
)]
pub async fn get_client(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Client>, AppError> {
    let client = app_state
        .client_repo
        .find_by_id(&app_state.db_pool, id)
        .await?
        .ok_or(AppError::NotFound("Cliente"))?;
    Ok(Json(client))
}

#[utoipa::path(
    post,
    path = "/api/clients",
    request_body = CreateClientPayload,
    responses(
        (status = 201, description = "Cliente criado", body = Client),
        (status = 400, description = "Telefone ou CPF/CNPJ inválido"),
        (status = 409, description = "CPF/CNPJ já cadastrado")
    ),
    security(("bearer_auth" = [])),
    tag = "Clientes"
)]
pub async fn create_client(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Json(payload): Json<CreateClientPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;
    let client = app_state
        .client_service
        .create_client(&app_state.db_pool, user.id, payload)
        .await?;
    Ok((StatusCode::CREATED, Json(client)))
}

#[utoipa::path(
    put,
    path = "/api/clients/{id}",
    request_body = UpdateClientPayload,
    responses(
        (status = 200, description = "Cliente atualizado", body = Client),
        (status = 404, description = "Cliente não encontrado")
    ),
    security(("bearer_auth" = [])),
    tag = "Clientes"
)]
pub async fn update_client(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateClientPayload>,
) -> Result<Json<Client>, AppError> {
    payload.validate()?;
    let client = app_state
        .client_service
        .update_client(&app_state.db_pool, id, payload)
        .await?;
    Ok(Json(client))
}

#[utoipa::path(
    delete,
    path = "/api/clients/{id}",
    responses(
        (status = 204, description = "Cliente e contratos excluídos logicamente"),
        (status = 404, description = "Cliente não encontrado")
    ),
    security(("bearer_auth" = [])),
    tag = "Clientes"
)]
pub async fn delete_client(
    State(app_state): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    app_state.client_service.delete_client(&app_state.db_pool, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
