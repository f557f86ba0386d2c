// src/db/partner_repo.rs

use sqlx::{Executor, Postgres};
use uuid::Uuid;

use crate::{common::error::AppError, models::partner::Partner};

#[derive(Clone)]
pub struct PartnerRepository;

impl PartnerRepository {
    pub fn new() -> Self {
        Self
    }

    pub async fn list<'e, E>(&self, executor: E) -> Result<Vec<Partner>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let partners = sqlx::query_as::<_, Partner>(
            "SELECT id, name, created_at, updated_at FROM partners ORDER BY name",
        )
        .fetch_all(executor)
        .await?;

        Ok(partners)
    }

    pub async fn find_by_id<'e, E>(
        &self,
        executor: E,
        id: Uuid,
    ) -> Result<Option<Partner>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let partner = sqlx::query_as::<_, Partner>(
            "SELECT id, name, created_at, updated_at FROM partners WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(executor)
        .await?;

        Ok(partner)
    }

    /// Busca exata, sensível a maiúsculas: o import cria uma parceria nova
    /// para qualquer grafia ainda não vista.
    pub async fn find_by_name<'e, E>(
        &self,
        executor: E,
        name: &str,
    ) -> Result<Option<Partner>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let partner = sqlx::query_as::<_, Partner>(
            "SELECT id, name, created_at, updated_at FROM partners WHERE name = $1",
        )
        .bind(name)
        .fetch_optional(executor)
        .await?;

        Ok(partner)
    }

    pub async fn create<'e, E>(&self, executor: E, name: &str) -> Result<Partner, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, Partner>(
            "INSERT INTO partners (name) VALUES ($1)
             RETURNING id, name, created_at, updated_at",
        )
        .bind(name)
        .fetch_one(executor)
        .await
        .map_err(|e| AppError::conflict_on_unique(e, "Já existe uma parceria com este nome."))
    }

    pub async fn update<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        name: &str,
    ) -> Result<Option<Partner>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, Partner>(
            "UPDATE partners SET name = $2, updated_at = NOW() WHERE id = $1
             RETURNING id, name, created_at, updated_at",
        )
        .bind(id)
        .bind(name)
        .fetch_optional(executor)
        .await
        .map_err(|e| AppError::conflict_on_unique(e, "Já existe uma parceria com este nome."))
    }

    pub async fn delete<'e, E>(&self, executor: E, id: Uuid) -> Result<bool, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query("DELETE FROM partners WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await
            .map_err(|e| {
                AppError::dependents_on_fk(
                    e,
                    "A parceria possui clientes ou pagamentos vinculados e não pode ser excluída.",
                )
            })?;

        Ok(result.rows_affected() > 0)
    }
}
