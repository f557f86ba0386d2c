// src/services/contract_service.rs

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{
        client_repo::ClientRepository,
        contract_repo::{ContractRepository, NewContract},
    },
    models::contract::{
        Contract, ContractStatus, CreateContractPayload, UpdateContractPayload,
        UNIDENTIFIED_CONTRACT_NUMBER,
    },
};

use super::import::sanitize::normalize_contract_number;

/// A transição para Renovado dispara a criação do contrato sucessor;
/// todas as outras são livres.
fn becoming_renewed(current: ContractStatus, incoming: Option<ContractStatus>) -> bool {
    incoming == Some(ContractStatus::Renewed) && current != ContractStatus::Renewed
}

#[derive(Clone)]
pub struct ContractService {
    contract_repo: ContractRepository,
    client_repo: ClientRepository,
}

impl ContractService {
    pub fn new(contract_repo: ContractRepository, client_repo: ClientRepository) -> Self {
        Self { contract_repo, client_repo }
    }

    pub async fn create_contract(
        &self,
        pool: &PgPool,
        user_id: Uuid,
        payload: CreateContractPayload,
    ) -> Result<Contract, AppError> {
        let number = normalize_contract_number(&payload.contract_number);
        if number.is_empty() {
            return Err(AppError::InvalidInput(
                "Número de contrato sem caracteres alfanuméricos.".to_string(),
            ));
        }

        let mut tx = pool.begin().await?;

        self.client_repo
            .find_by_id(&mut *tx, payload.client_id)
            .await?
            .ok_or(AppError::NotFound("Cliente"))?;

        if self.contract_repo.find_by_number_any(&mut *tx, &number).await?.is_some() {
            return Err(AppError::Conflict(format!(
                "O contrato \"{number}\" já está cadastrado."
            )));
        }

        if let (Some(renewal), Some(expiration)) = (payload.renewal_date, payload.expiration_date) {
            if self
                .contract_repo
                .has_overlapping_window(&mut *tx, payload.client_id, renewal, expiration, None)
                .await?
            {
                return Err(AppError::Conflict(
                    "O cliente já possui um contrato com período sobreposto.".to_string(),
                ));
            }
        }

        let contract = self
            .contract_repo
            .create(
                &mut *tx,
                &NewContract {
                    client_id: payload.client_id,
                    certificate_id: payload.certificate_id,
                    user_id,
                    contract_number: &number,
                    expiration_date: payload.expiration_date,
                    renewal_date: payload.renewal_date,
                    status: payload.status.unwrap_or(ContractStatus::Unidentified),
                },
            )
            .await?;

        tx.commit().await?;
        Ok(contract)
    }

    /// Atualização parcial. Marcar como Renovado exige data de renovação
    /// presente (no payload ou já gravada) e cria, na mesma transação, o
    /// contrato sucessor: mesmo cliente e certificado, status Ativo,
    /// vencimento na antiga data de renovação e número aguardando cadastro.
    pub async fn update_contract(
        &self,
        pool: &PgPool,
        id: Uuid,
        payload: UpdateContractPayload,
    ) -> Result<Contract, AppError> {
        let number = match &payload.contract_number {
            Some(raw) => {
                let number = normalize_contract_number(raw);
                if number.is_empty() {
                    return Err(AppError::InvalidInput(
                        "Número de contrato sem caracteres alfanuméricos.".to_string(),
                    ));
                }
                Some(number)
            }
            None => None,
        };

        let mut tx = pool.begin().await?;

        let current = self
            .contract_repo
            .find_by_id(&mut *tx, id)
            .await?
            .ok_or(AppError::NotFound("Contrato"))?;

        if let Some(number) = &number {
            if *number != current.contract_number {
                if let Some(other) =
                    self.contract_repo.find_by_number_any(&mut *tx, number).await?
                {
                    if other.id != id {
                        return Err(AppError::Conflict(format!(
                            "O contrato \"{number}\" já está cadastrado."
                        )));
                    }
                }
            }
        }

        let effective_renewal = payload.renewal_date.or(current.renewal_date);
        let effective_expiration = payload.expiration_date.or(current.expiration_date);
        let spawn_successor = becoming_renewed(current.status, payload.status);

        if spawn_successor && effective_renewal.is_none() {
            return Err(AppError::RenewalWithoutDate);
        }

        if let (Some(renewal), Some(expiration)) = (effective_renewal, effective_expiration) {
            if self
                .contract_repo
                .has_overlapping_window(&mut *tx, current.client_id, renewal, expiration, Some(id))
                .await?
            {
                return Err(AppError::Conflict(
                    "O cliente já possui um contrato com período sobreposto.".to_string(),
                ));
            }
        }

        let updated = self
            .contract_repo
            .update_partial(
                &mut *tx,
                id,
                payload.certificate_id,
                number.as_deref(),
                payload.expiration_date,
                payload.renewal_date,
                payload.status,
            )
            .await?
            .ok_or(AppError::NotFound("Contrato"))?;

        if spawn_successor {
            let renewal = effective_renewal.ok_or(AppError::RenewalWithoutDate)?;
            self.contract_repo
                .create(
                    &mut *tx,
                    &NewContract {
                        client_id: updated.client_id,
                        certificate_id: updated.certificate_id,
                        user_id: updated.user_id,
                        contract_number: UNIDENTIFIED_CONTRACT_NUMBER,
                        expiration_date: Some(renewal),
                        renewal_date: None,
                        status: ContractStatus::Active,
                    },
                )
                .await?;
            tracing::info!(
                "🔁 Contrato {} renovado; sucessor criado com vencimento {}",
                updated.contract_number,
                renewal
            );
        }

        tx.commit().await?;
        Ok(updated)
    }

    pub async fn delete_contract(&self, pool: &PgPool, id: Uuid) -> Result<(), AppError> {
        let deleted = self.contract_repo.soft_delete(pool, id).await?;
        if !deleted {
            return Err(AppError::NotFound("Contrato"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renovado_dispara_sucessor_so_na_transicao() {
        assert!(becoming_renewed(
            ContractStatus::Active,
            Some(ContractStatus::Renewed)
        ));
        assert!(becoming_renewed(
            ContractStatus::Scheduled,
            Some(ContractStatus::Renewed)
        ));
        // Já renovado: atualizar de novo não cria outro sucessor.
        assert!(!becoming_renewed(
            ContractStatus::Renewed,
            Some(ContractStatus::Renewed)
        ));
        // Outras transições não disparam nada.
        assert!(!becoming_renewed(
            ContractStatus::Active,
            Some(ContractStatus::Cancelled)
        ));
        assert!(!becoming_renewed(ContractStatus::Active, None));
    }
}
