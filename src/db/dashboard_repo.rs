// src/db/dashboard_repo.rs

use sqlx::{Acquire, Executor, Postgres};

use crate::{
    common::error::AppError,
    models::dashboard::{DashboardSummary, StatusCount},
};

#[derive(Clone)]
pub struct DashboardRepository;

impl DashboardRepository {
    pub fn new() -> Self {
        Self
    }

    /// Resumo geral. Abre uma transação para um snapshot consistente
    /// entre as contagens.
    pub async fn get_summary<'e, E>(&self, executor: E) -> Result<DashboardSummary, AppError>
    where
        E: Executor<'e, Database = Postgres> + Acquire<'e, Database = Postgres>,
    {
        let mut tx = executor.begin().await?;

        let total_clients = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM clients WHERE deleted_at IS NULL",
        )
        .fetch_one(&mut *tx)
        .await?;

        let total_partners =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM partners")
                .fetch_one(&mut *tx)
                .await?;

        let total_contracts = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM contracts WHERE deleted_at IS NULL",
        )
        .fetch_one(&mut *tx)
        .await?;

        let contracts_by_status = sqlx::query_as::<_, StatusCount>(
            r#"
            SELECT status, COUNT(*) AS count
            FROM contracts
            WHERE deleted_at IS NULL
            GROUP BY status
            ORDER BY count DESC
            "#,
        )
        .fetch_all(&mut *tx)
        .await?;

        let expiring_soon = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*) FROM contracts
            WHERE deleted_at IS NULL
              AND expiration_date IS NOT NULL
              AND expiration_date BETWEEN CURRENT_DATE AND CURRENT_DATE + INTERVAL '30 days'
            "#,
        )
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(DashboardSummary {
            total_clients,
            total_partners,
            total_contracts,
            contracts_by_status,
            expiring_soon,
        })
    }
}
