// src/handlers/messages.rs

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::Utc;
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::auth::AuthenticatedUser,
    models::message::{CreateMessagePayload, SentMessage},
};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListMessagesQuery {
    pub client_id: Option<Uuid>,
}

#[utoipa::path(
    get,
    path = "/api/messages",
    params(("clientId" = Option<Uuid>, Query, description = "Filtra por cliente")),
    responses((status = 200, description = "Mensagens registradas", body = [SentMessage])),
    security(("bearer_auth" = [])),
    tag = "Mensagens"
)]
pub async fn list_messages(
    State(app_state): State<AppState>,
    Query(query): Query<ListMessagesQuery>,
) -> Result<Json<Vec<SentMessage>>, AppError> {
    let messages = app_state
        .message_repo
        .list(&app_state.db_pool, query.client_id)
        .await?;
    Ok(Json(messages))
}

#[utoipa::path(
    post,
    path = "/api/messages",
    request_body = CreateMessagePayload,
    responses(
        (status = 201, description = "Envio registrado", body = SentMessage),
        (status = 404, description = "Cliente não encontrado")
    ),
    security(("bearer_auth" = [])),
    tag = "Mensagens"
)]
pub async fn create_message(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Json(payload): Json<CreateMessagePayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    app_state
        .client_repo
        .find_by_id(&app_state.db_pool, payload.client_id)
        .await?
        .ok_or(AppError::NotFound("Cliente"))?;

    let sent_date = payload.sent_date.unwrap_or_else(|| Utc::now().date_naive());
    let message = app_state
        .message_repo
        .create(
            &app_state.db_pool,
            payload.client_id,
            user.id,
            sent_date,
            payload.note.as_deref(),
        )
        .await?;

    Ok((StatusCode::CREATED, Json(message)))
}
