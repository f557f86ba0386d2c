// src/services/client_service.rs

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{
        client_repo::{ClientFields, ClientRepository},
        contract_repo::ContractRepository,
    },
    models::client::{Client, CreateClientPayload, UpdateClientPayload},
};

use super::import::sanitize::{classify_tax_id, digits_only, normalize_phone};

/// Cadastro manual: o telefone é obrigatório (caminho estrito), diferente do
/// import, que tolera linha sem telefone.
fn required_phone(raw: &str) -> Result<String, AppError> {
    match normalize_phone(raw) {
        Ok(Some(phone)) => Ok(phone),
        Ok(None) => Err(AppError::InvalidInput("Telefone é obrigatório.".to_string())),
        Err(e) => Err(AppError::InvalidInput(e)),
    }
}

#[derive(Clone)]
pub struct ClientService {
    client_repo: ClientRepository,
    contract_repo: ContractRepository,
}

impl ClientService {
    pub fn new(client_repo: ClientRepository, contract_repo: ContractRepository) -> Self {
        Self { client_repo, contract_repo }
    }

    pub async fn create_client(
        &self,
        pool: &PgPool,
        user_id: Uuid,
        payload: CreateClientPayload,
    ) -> Result<Client, AppError> {
        let tax_id = digits_only(&payload.tax_id);
        let person_type = classify_tax_id(&tax_id).map_err(AppError::InvalidInput)?;
        let phone = required_phone(payload.phone.as_deref().unwrap_or_default())?;

        let client = self
            .client_repo
            .create(
                pool,
                &ClientFields {
                    name: payload.name.trim(),
                    tax_id: &tax_id,
                    person_type,
                    phone: Some(&phone),
                    email: payload.email.as_deref(),
                    legal_representative: payload.legal_representative.as_deref(),
                    partner_id: payload.partner_id,
                },
                user_id,
            )
            .await?;

        Ok(client)
    }

    pub async fn update_client(
        &self,
        pool: &PgPool,
        id: Uuid,
        payload: UpdateClientPayload,
    ) -> Result<Client, AppError> {
        let phone = match payload.phone.as_deref() {
            Some(raw) => Some(required_phone(raw)?),
            None => None,
        };

        self.client_repo
            .update_partial(
                pool,
                id,
                payload.name.as_deref(),
                phone.as_deref(),
                payload.email.as_deref(),
                payload.legal_representative.as_deref(),
                payload.partner_id,
            )
            .await?
            .ok_or(AppError::NotFound("Cliente"))
    }

    /// Exclusão lógica do cliente e, em cascata, dos contratos vivos dele.
    pub async fn delete_client(&self, pool: &PgPool, id: Uuid) -> Result<(), AppError> {
        let mut tx = pool.begin().await?;

        if !self.client_repo.soft_delete(&mut *tx, id).await? {
            return Err(AppError::NotFound("Cliente"));
        }
        let contracts = self.contract_repo.soft_delete_by_client(&mut *tx, id).await?;

        tx.commit().await?;
        tracing::info!("🗑️ Cliente {} excluído ({} contrato(s) em cascata)", id, contracts);
        Ok(())
    }
}
