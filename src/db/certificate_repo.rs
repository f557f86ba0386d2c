// src/db/certificate_repo.rs

use sqlx::{Executor, Postgres};
use uuid::Uuid;

use crate::{common::error::AppError, models::certificate::Certificate};

#[derive(Clone)]
pub struct CertificateRepository;

impl CertificateRepository {
    pub fn new() -> Self {
        Self
    }

    pub async fn list<'e, E>(&self, executor: E) -> Result<Vec<Certificate>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let certificates = sqlx::query_as::<_, Certificate>(
            "SELECT id, name, created_at, updated_at FROM certificates ORDER BY name",
        )
        .fetch_all(executor)
        .await?;

        Ok(certificates)
    }

    pub async fn find_by_name<'e, E>(
        &self,
        executor: E,
        name: &str,
    ) -> Result<Option<Certificate>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let certificate = sqlx::query_as::<_, Certificate>(
            "SELECT id, name, created_at, updated_at FROM certificates WHERE name = $1",
        )
        .bind(name)
        .fetch_optional(executor)
        .await?;

        Ok(certificate)
    }

    pub async fn create<'e, E>(&self, executor: E, name: &str) -> Result<Certificate, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, Certificate>(
            "INSERT INTO certificates (name) VALUES ($1)
             RETURNING id, name, created_at, updated_at",
        )
        .bind(name)
        .fetch_one(executor)
        .await
        .map_err(|e| AppError::conflict_on_unique(e, "Já existe um certificado com este nome."))
    }

    pub async fn delete<'e, E>(&self, executor: E, id: Uuid) -> Result<bool, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query("DELETE FROM certificates WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await
            .map_err(|e| {
                AppError::dependents_on_fk(
                    e,
                    "O certificado possui contratos vinculados e não pode ser excluído.",
                )
            })?;

        Ok(result.rows_affected() > 0)
    }
}
