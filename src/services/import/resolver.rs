// src/services/import/resolver.rs
//
// Resolvedor de entidades: transforma uma linha sanitizada em escritas de
// parceria, certificado, cliente e contrato, sempre sobre a transação aberta
// pelo orquestrador. Reimportar o mesmo arquivo deve convergir para o mesmo
// estado (linhas sem erro são idempotentes).

use sqlx::PgConnection;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{
        certificate_repo::CertificateRepository,
        client_repo::{ClientFields, ClientRepository},
        contract_repo::{ContractRepository, NewContract},
        partner_repo::PartnerRepository,
    },
    models::client::Client,
};

use super::sanitize::{normalize_contract_number, SanitizedRow};

/// O relatório distingue clientes novos de atualizados.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowOutcome {
    CreatedClient,
    UpdatedClient,
}

#[derive(Clone)]
pub struct EntityResolver {
    partner_repo: PartnerRepository,
    certificate_repo: CertificateRepository,
    client_repo: ClientRepository,
    contract_repo: ContractRepository,
}

impl EntityResolver {
    pub fn new(
        partner_repo: PartnerRepository,
        certificate_repo: CertificateRepository,
        client_repo: ClientRepository,
        contract_repo: ContractRepository,
    ) -> Self {
        Self {
            partner_repo,
            certificate_repo,
            client_repo,
            contract_repo,
        }
    }

    pub async fn resolve_row(
        &self,
        conn: &mut PgConnection,
        user_id: Uuid,
        row: &SanitizedRow,
    ) -> Result<RowOutcome, AppError> {
        // 1. Parceria: busca exata pelo nome, cria se não existe.
        let partner = match self.partner_repo.find_by_name(&mut *conn, &row.partner_name).await? {
            Some(partner) => partner,
            None => self.partner_repo.create(&mut *conn, &row.partner_name).await?,
        };

        // 2. Certificado, quando a linha informa um.
        let certificate_id = match &row.certificate_name {
            Some(name) => {
                let certificate =
                    match self.certificate_repo.find_by_name(&mut *conn, name).await? {
                        Some(certificate) => certificate,
                        None => self.certificate_repo.create(&mut *conn, name).await?,
                    };
                Some(certificate.id)
            }
            None => None,
        };

        // 3. Cliente pelo CPF/CNPJ, incluindo excluídos logicamente.
        let fields = ClientFields {
            name: &row.client_name,
            tax_id: &row.tax_id,
            person_type: row.person_type,
            phone: row.phone.as_deref(),
            email: row.email.as_deref(),
            legal_representative: row.legal_representative.as_deref(),
            partner_id: Some(partner.id),
        };

        let (client, outcome) =
            match self.client_repo.find_by_tax_id_any(&mut *conn, &row.tax_id).await? {
                Some(existing) => {
                    // Última escrita vence; não há merge nem controle de versão.
                    // Dois arquivos divergentes importados em sequência deixam
                    // valer o segundo.
                    let client = self.client_repo.overwrite(&mut *conn, existing.id, &fields).await?;
                    (client, RowOutcome::UpdatedClient)
                }
                None => {
                    let client = self.client_repo.create(&mut *conn, &fields, user_id).await?;
                    (client, RowOutcome::CreatedClient)
                }
            };

        // 4/5. Contrato, quando a linha traz um número utilizável.
        self.resolve_contract(conn, user_id, certificate_id, &client, row).await?;

        Ok(outcome)
    }

    async fn resolve_contract(
        &self,
        conn: &mut PgConnection,
        user_id: Uuid,
        certificate_id: Option<Uuid>,
        client: &Client,
        row: &SanitizedRow,
    ) -> Result<(), AppError> {
        let number = match &row.contract_number {
            Some(raw) => normalize_contract_number(raw),
            None => return Ok(()),
        };
        if number.is_empty() {
            // Só pontuação/símbolos: linha apenas de cliente.
            return Ok(());
        }

        match self.contract_repo.find_by_number_any(&mut *conn, &number).await? {
            Some(existing) if existing.client_id != client.id => {
                Err(AppError::Conflict(format!(
                    "O contrato \"{number}\" já pertence a outro cliente."
                )))
            }
            // Mesmo cliente: linha repetida ou reimport, nada a fazer.
            Some(_) => Ok(()),
            None => {
                self.contract_repo
                    .create(
                        &mut *conn,
                        &NewContract {
                            client_id: client.id,
                            certificate_id,
                            user_id,
                            contract_number: &number,
                            expiration_date: row.expiration_date,
                            renewal_date: row.renewal_date,
                            status: row.status,
                        },
                    )
                    .await?;
                Ok(())
            }
        }
    }
}
