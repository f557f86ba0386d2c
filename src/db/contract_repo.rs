// src/db/contract_repo.rs

use chrono::NaiveDate;
use sqlx::{Executor, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::contract::{Contract, ContractStatus},
};

const CONTRACT_COLUMNS: &str = "id, client_id, certificate_id, user_id, contract_number, \
     expiration_date, renewal_date, status, deleted_at, created_at, updated_at";

pub struct NewContract<'a> {
    pub client_id: Uuid,
    pub certificate_id: Option<Uuid>,
    pub user_id: Uuid,
    pub contract_number: &'a str,
    pub expiration_date: Option<NaiveDate>,
    pub renewal_date: Option<NaiveDate>,
    pub status: ContractStatus,
}

#[derive(Clone)]
pub struct ContractRepository;

impl ContractRepository {
    pub fn new() -> Self {
        Self
    }

    pub async fn list<'e, E>(
        &self,
        executor: E,
        client_id: Option<Uuid>,
    ) -> Result<Vec<Contract>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let contracts = sqlx::query_as::<_, Contract>(&format!(
            r#"
            SELECT {CONTRACT_COLUMNS} FROM contracts
            WHERE deleted_at IS NULL AND ($1::uuid IS NULL OR client_id = $1)
            ORDER BY expiration_date ASC NULLS LAST
            "#
        ))
        .bind(client_id)
        .fetch_all(executor)
        .await?;

        Ok(contracts)
    }

    pub async fn find_by_id<'e, E>(
        &self,
        executor: E,
        id: Uuid,
    ) -> Result<Option<Contract>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let contract = sqlx::query_as::<_, Contract>(&format!(
            "SELECT {CONTRACT_COLUMNS} FROM contracts WHERE id = $1 AND deleted_at IS NULL"
        ))
        .bind(id)
        .fetch_optional(executor)
        .await?;

        Ok(contract)
    }

    /// Busca pelo número normalizado, incluindo excluídos logicamente:
    /// um número já usado nunca volta a ficar disponível.
    pub async fn find_by_number_any<'e, E>(
        &self,
        executor: E,
        contract_number: &str,
    ) -> Result<Option<Contract>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let contract = sqlx::query_as::<_, Contract>(&format!(
            "SELECT {CONTRACT_COLUMNS} FROM contracts WHERE contract_number = $1"
        ))
        .bind(contract_number)
        .fetch_optional(executor)
        .await?;

        Ok(contract)
    }

    pub async fn create<'e, E>(
        &self,
        executor: E,
        new: &NewContract<'_>,
    ) -> Result<Contract, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, Contract>(&format!(
            r#"
            INSERT INTO contracts
                (client_id, certificate_id, user_id, contract_number,
                 expiration_date, renewal_date, status)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {CONTRACT_COLUMNS}
            "#
        ))
        .bind(new.client_id)
        .bind(new.certificate_id)
        .bind(new.user_id)
        .bind(new.contract_number)
        .bind(new.expiration_date)
        .bind(new.renewal_date)
        .bind(new.status)
        .fetch_one(executor)
        .await
        .map_err(|e| {
            AppError::conflict_on_unique(
                e,
                "Já existe um contrato com este número ou com o mesmo vencimento para o cliente.",
            )
        })
    }

    pub async fn update_partial<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        certificate_id: Option<Uuid>,
        contract_number: Option<&str>,
        expiration_date: Option<NaiveDate>,
        renewal_date: Option<NaiveDate>,
        status: Option<ContractStatus>,
    ) -> Result<Option<Contract>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let contract = sqlx::query_as::<_, Contract>(&format!(
            r#"
            UPDATE contracts SET
                certificate_id = COALESCE($2, certificate_id),
                contract_number = COALESCE($3, contract_number),
                expiration_date = COALESCE($4, expiration_date),
                renewal_date = COALESCE($5, renewal_date),
                status = COALESCE($6, status),
                updated_at = NOW()
            WHERE id = $1 AND deleted_at IS NULL
            RETURNING {CONTRACT_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(certificate_id)
        .bind(contract_number)
        .bind(expiration_date)
        .bind(renewal_date)
        .bind(status)
        .fetch_optional(executor)
        .await
        .map_err(|e| {
            AppError::conflict_on_unique(
                e,
                "Já existe um contrato com este número ou com o mesmo vencimento para o cliente.",
            )
        })?;

        Ok(contract)
    }

    pub async fn soft_delete<'e, E>(&self, executor: E, id: Uuid) -> Result<bool, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query(
            "UPDATE contracts SET deleted_at = NOW(), updated_at = NOW()
             WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .execute(executor)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Exclusão lógica em cascata quando o cliente é excluído.
    pub async fn soft_delete_by_client<'e, E>(
        &self,
        executor: E,
        client_id: Uuid,
    ) -> Result<u64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query(
            "UPDATE contracts SET deleted_at = NOW(), updated_at = NOW()
             WHERE client_id = $1 AND deleted_at IS NULL",
        )
        .bind(client_id)
        .execute(executor)
        .await?;

        Ok(result.rows_affected())
    }

    /// Existe contrato vivo do cliente cuja janela [renovação, vencimento)
    /// cruza a janela informada?
    pub async fn has_overlapping_window<'e, E>(
        &self,
        executor: E,
        client_id: Uuid,
        renewal_date: NaiveDate,
        expiration_date: NaiveDate,
        exclude_id: Option<Uuid>,
    ) -> Result<bool, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let exists = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM contracts
                WHERE client_id = $1
                  AND deleted_at IS NULL
                  AND ($4::uuid IS NULL OR id <> $4)
                  AND renewal_date IS NOT NULL
                  AND expiration_date IS NOT NULL
                  AND renewal_date < $3
                  AND $2 < expiration_date
            )
            "#,
        )
        .bind(client_id)
        .bind(renewal_date)
        .bind(expiration_date)
        .bind(exclude_id)
        .fetch_one(executor)
        .await?;

        Ok(exists)
    }
}
