// src/handlers/import.rs

use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::auth::AuthenticatedUser,
    models::import::ImportReport,
};

#[utoipa::path(
    post,
    path = "/api/contracts/import",
    request_body(content = Vec<u8>, content_type = "multipart/form-data", description = "Planilha legada (SpreadsheetML)"),
    responses(
        (status = 200, description = "Import aplicado", body = ImportReport),
        (status = 400, description = "Arquivo ausente, malformado ou de layout desconhecido"),
        (status = 422, description = "Linhas com erro: nada foi persistido", body = ImportReport)
    ),
    security(("bearer_auth" = [])),
    tag = "Contratos"
)]
pub async fn import_contracts(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, AppError> {
    // Primeiro campo de arquivo do formulário; o nome do campo não importa.
    let mut content: Option<Vec<u8>> = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|_| AppError::ImportStructural("Upload multipart inválido.".to_string()))?
    {
        let bytes = field
            .bytes()
            .await
            .map_err(|_| AppError::ImportStructural("Falha ao ler o arquivo enviado.".to_string()))?;
        if !bytes.is_empty() {
            content = Some(bytes.to_vec());
            break;
        }
    }

    let content = content.ok_or_else(|| {
        AppError::ImportStructural("Nenhum arquivo foi enviado no formulário.".to_string())
    })?;

    let report = app_state
        .import_service
        .import_spreadsheet(&app_state.db_pool, user.id, &content)
        .await?;

    let status = if report.error_count > 0 {
        StatusCode::UNPROCESSABLE_ENTITY
    } else {
        StatusCode::OK
    };

    Ok((status, Json(report)))
}
