// src/db/client_repo.rs

use sqlx::{Executor, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::client::{Client, PersonType},
};

const CLIENT_COLUMNS: &str = "id, name, tax_id, person_type, phone, email, \
     legal_representative, partner_id, user_id, deleted_at, created_at, updated_at";

/// Campos mutáveis de um cliente, na forma que o sanitizador entrega.
pub struct ClientFields<'a> {
    pub name: &'a str,
    pub tax_id: &'a str,
    pub person_type: PersonType,
    pub phone: Option<&'a str>,
    pub email: Option<&'a str>,
    pub legal_representative: Option<&'a str>,
    pub partner_id: Option<Uuid>,
}

#[derive(Clone)]
pub struct ClientRepository;

impl ClientRepository {
    pub fn new() -> Self {
        Self
    }

    pub async fn list<'e, E>(&self, executor: E) -> Result<Vec<Client>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let clients = sqlx::query_as::<_, Client>(&format!(
            "SELECT {CLIENT_COLUMNS} FROM clients WHERE deleted_at IS NULL ORDER BY name"
        ))
        .fetch_all(executor)
        .await?;

        Ok(clients)
    }

    pub async fn find_by_id<'e, E>(&self, executor: E, id: Uuid) -> Result<Option<Client>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let client = sqlx::query_as::<_, Client>(&format!(
            "SELECT {CLIENT_COLUMNS} FROM clients WHERE id = $1 AND deleted_at IS NULL"
        ))
        .bind(id)
        .fetch_optional(executor)
        .await?;

        Ok(client)
    }

    /// Inclui excluídos logicamente: o import restaura clientes pelo CPF/CNPJ.
    pub async fn find_by_tax_id_any<'e, E>(
        &self,
        executor: E,
        tax_id: &str,
    ) -> Result<Option<Client>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let client = sqlx::query_as::<_, Client>(&format!(
            "SELECT {CLIENT_COLUMNS} FROM clients WHERE tax_id = $1"
        ))
        .bind(tax_id)
        .fetch_optional(executor)
        .await?;

        Ok(client)
    }

    pub async fn create<'e, E>(
        &self,
        executor: E,
        fields: &ClientFields<'_>,
        user_id: Uuid,
    ) -> Result<Client, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, Client>(&format!(
            r#"
            INSERT INTO clients
                (name, tax_id, person_type, phone, email, legal_representative, partner_id, user_id)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING {CLIENT_COLUMNS}
            "#
        ))
        .bind(fields.name)
        .bind(fields.tax_id)
        .bind(fields.person_type)
        .bind(fields.phone)
        .bind(fields.email)
        .bind(fields.legal_representative)
        .bind(fields.partner_id)
        .bind(user_id)
        .fetch_one(executor)
        .await
        .map_err(|e| AppError::conflict_on_unique(e, "Já existe um cliente com este CPF/CNPJ."))
    }

    /// Sobrescreve os campos mutáveis e reativa o cliente se estava excluído.
    /// Última escrita vence: o import não faz merge campo a campo.
    pub async fn overwrite<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        fields: &ClientFields<'_>,
    ) -> Result<Client, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let client = sqlx::query_as::<_, Client>(&format!(
            r#"
            UPDATE clients SET
                name = $2,
                person_type = $3,
                phone = $4,
                email = $5,
                legal_representative = $6,
                partner_id = $7,
                deleted_at = NULL,
                updated_at = NOW()
            WHERE id = $1
            RETURNING {CLIENT_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(fields.name)
        .bind(fields.person_type)
        .bind(fields.phone)
        .bind(fields.email)
        .bind(fields.legal_representative)
        .bind(fields.partner_id)
        .fetch_one(executor)
        .await?;

        Ok(client)
    }

    /// Atualização parcial do cadastro manual (campos ausentes ficam como estão).
    pub async fn update_partial<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        name: Option<&str>,
        phone: Option<&str>,
        email: Option<&str>,
        legal_representative: Option<&str>,
        partner_id: Option<Uuid>,
    ) -> Result<Option<Client>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let client = sqlx::query_as::<_, Client>(&format!(
            r#"
            UPDATE clients SET
                name = COALESCE($2, name),
                phone = COALESCE($3, phone),
                email = COALESCE($4, email),
                legal_representative = COALESCE($5, legal_representative),
                partner_id = COALESCE($6, partner_id),
                updated_at = NOW()
            WHERE id = $1 AND deleted_at IS NULL
            RETURNING {CLIENT_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(name)
        .bind(phone)
        .bind(email)
        .bind(legal_representative)
        .bind(partner_id)
        .fetch_optional(executor)
        .await?;

        Ok(client)
    }

    pub async fn soft_delete<'e, E>(&self, executor: E, id: Uuid) -> Result<bool, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query(
            "UPDATE clients SET deleted_at = NOW(), updated_at = NOW()
             WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .execute(executor)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
