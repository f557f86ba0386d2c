// src/services/import/mod.rs
//
// Orquestrador do import de contratos. Política tudo-ou-nada: o arquivo
// inteiro roda numa única transação; qualquer linha com erro desfaz tudo e o
// operador recebe o relatório completo para corrigir e reenviar. Cada linha
// roda sob um SAVEPOINT para que uma falha de banco não contamine as
// seguintes (o diagnóstico das demais linhas continua valendo).

pub mod layout;
pub mod resolver;
pub mod sanitize;
pub mod spreadsheet;

use sqlx::{Acquire, PgPool};
use uuid::Uuid;

use crate::{common::error::AppError, models::import::ImportReport};

use layout::Layout;
use resolver::{EntityResolver, RowOutcome};
use sanitize::SanitizeMode;

#[derive(Clone)]
pub struct ImportService {
    resolver: EntityResolver,
}

impl ImportService {
    pub fn new(resolver: EntityResolver) -> Self {
        Self { resolver }
    }

    pub async fn import_spreadsheet(
        &self,
        pool: &PgPool,
        user_id: Uuid,
        content: &[u8],
    ) -> Result<ImportReport, AppError> {
        let rows = spreadsheet::parse_rows(content)?;
        let Some((header, data_rows)) = rows.split_first() else {
            return Err(AppError::ImportStructural(
                "A planilha está vazia: nenhuma linha encontrada.".to_string(),
            ));
        };

        let layout = Layout::detect(header)?;
        let mode = match layout {
            Layout::A => SanitizeMode::LayoutA,
            Layout::B => SanitizeMode::LayoutB,
        };

        tracing::info!(
            "📄 Import iniciado: layout {:?}, {} linha(s) de dados",
            layout,
            data_rows.len()
        );

        let mut report = ImportReport::default();
        let mut tx = pool.begin().await?;

        for (idx, cells) in data_rows.iter().enumerate() {
            // Linha 1 é o cabeçalho; os dados começam na 2.
            let line = idx + 2;
            let raw = layout.map_row(cells);
            if raw.is_blank() {
                continue;
            }
            let nome = raw.client_label().to_string();

            let row = match sanitize::sanitize_row(&raw, mode) {
                Ok(row) => row,
                Err(details) => {
                    report.push_error(line, nome, details);
                    continue;
                }
            };

            let mut savepoint = tx.begin().await?;
            match self.resolver.resolve_row(&mut *savepoint, user_id, &row).await {
                Ok(RowOutcome::CreatedClient) => {
                    savepoint.commit().await?;
                    report.success_count += 1;
                }
                Ok(RowOutcome::UpdatedClient) => {
                    savepoint.commit().await?;
                    report.update_count += 1;
                }
                Err(e) => {
                    savepoint.rollback().await?;
                    report.push_error(line, nome, vec![e.to_string()]);
                }
            }
        }

        if report.error_count > 0 {
            tx.rollback().await?;
            tracing::warn!(
                "↩️ Import desfeito: {} linha(s) com erro",
                report.error_count
            );
        } else {
            tx.commit().await?;
            tracing::info!(
                "✅ Import concluído: {} cliente(s) novo(s), {} atualizado(s)",
                report.success_count,
                report.update_count
            );
        }

        Ok(report)
    }
}
