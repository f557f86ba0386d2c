// src/common/error.rs

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// Nosso tipo de erro central, com `thiserror` para melhor ergonomia.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erro de validação")]
    ValidationError(#[from] validator::ValidationErrors),

    #[error("E-mail já existe")]
    EmailAlreadyExists,

    #[error("Credenciais inválidas")]
    InvalidCredentials,

    #[error("Token inválido")]
    InvalidToken,

    #[error("Usuário não encontrado")]
    UserNotFound,

    #[error("Acesso restrito a administradores")]
    AdminOnly,

    #[error("{0} não encontrado(a)")]
    NotFound(&'static str),

    // Violação de chave única (CPF/CNPJ, número de contrato...). Distinto de
    // erro de validação: o dado era plausível, mas colidiu com um existente.
    #[error("{0}")]
    Conflict(String),

    // Exclusão bloqueada por registros dependentes (FK RESTRICT).
    #[error("{0}")]
    HasDependents(String),

    // Entrada sintaticamente válida mas sem sentido para a operação
    // (telefone fora do padrão, número de contrato vazio...).
    #[error("{0}")]
    InvalidInput(String),

    // Falha estrutural do import: layout desconhecido, XML vazio ou malformado.
    // Acontece antes de qualquer linha ser processada.
    #[error("{0}")]
    ImportStructural(String),

    #[error("Para marcar como Renovado é necessário informar a data de renovação")]
    RenewalWithoutDate,

    #[error("Erro de banco de dados")]
    DatabaseError(#[from] sqlx::Error),

    #[error("Erro interno do servidor")]
    InternalServerError(#[from] anyhow::Error),

    #[error("Erro de Bcrypt: {0}")]
    BcryptError(#[from] bcrypt::BcryptError),

    #[error("Erro de JWT: {0}")]
    JwtError(#[from] jsonwebtoken::errors::Error),
}

impl AppError {
    /// Mapeia violação de chave única do Postgres para `Conflict`.
    pub fn conflict_on_unique(e: sqlx::Error, message: impl Into<String>) -> Self {
        if let Some(db_err) = e.as_database_error() {
            if db_err.is_unique_violation() {
                return AppError::Conflict(message.into());
            }
        }
        AppError::DatabaseError(e)
    }

    /// Mapeia violação de chave estrangeira para `HasDependents`.
    pub fn dependents_on_fk(e: sqlx::Error, message: impl Into<String>) -> Self {
        if let Some(db_err) = e.as_database_error() {
            if db_err.is_foreign_key_violation() {
                return AppError::HasDependents(message.into());
            }
        }
        AppError::DatabaseError(e)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            // Retorna os detalhes da validação, campo a campo.
            AppError::ValidationError(errors) => {
                let mut details = std::collections::HashMap::new();
                for (field, field_errors) in errors.field_errors() {
                    let messages: Vec<String> = field_errors
                        .iter()
                        .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
                        .collect();
                    details.insert(field.to_string(), messages);
                }
                let body = Json(json!({
                    "error": "Um ou mais campos são inválidos.",
                    "details": details,
                }));
                return (StatusCode::BAD_REQUEST, body).into_response();
            }
            AppError::EmailAlreadyExists => {
                (StatusCode::CONFLICT, "Este e-mail já está em uso.".to_string())
            }
            AppError::InvalidCredentials => {
                (StatusCode::UNAUTHORIZED, "E-mail ou senha inválidos.".to_string())
            }
            AppError::InvalidToken => (
                StatusCode::UNAUTHORIZED,
                "Token de autenticação inválido ou ausente.".to_string(),
            ),
            AppError::UserNotFound => {
                (StatusCode::NOT_FOUND, "Usuário não encontrado.".to_string())
            }
            AppError::AdminOnly => (
                StatusCode::FORBIDDEN,
                "Acesso restrito a administradores.".to_string(),
            ),
            AppError::NotFound(entity) => {
                (StatusCode::NOT_FOUND, format!("{} não encontrado(a).", entity))
            }
            AppError::Conflict(msg) | AppError::HasDependents(msg) => {
                (StatusCode::CONFLICT, msg)
            }
            AppError::InvalidInput(msg) | AppError::ImportStructural(msg) => {
                (StatusCode::BAD_REQUEST, msg)
            }
            AppError::RenewalWithoutDate => (
                StatusCode::BAD_REQUEST,
                "Para marcar como Renovado é necessário informar a data de renovação.".to_string(),
            ),

            // Todo o resto (DatabaseError, InternalServerError...) vira 500.
            // O detalhe fica no log; o cliente recebe uma mensagem genérica.
            ref e => {
                tracing::error!("Erro Interno do Servidor: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Ocorreu um erro inesperado.".to_string(),
                )
            }
        };

        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}
