// src/models/import.rs

use serde::Serialize;
use utoipa::ToSchema;

/// Uma linha da planilha que falhou, com todos os problemas encontrados.
/// `nome` é a célula de cliente crua, para o operador localizar a linha.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ImportRowError {
    pub line: usize,
    pub nome: String,
    pub details: Vec<String>,
}

/// Relatório final do import. Com `error_count > 0` nada foi persistido:
/// a transação inteira é desfeita e o arquivo deve ser corrigido e reenviado.
#[derive(Debug, Default, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ImportReport {
    pub success_count: usize,
    pub update_count: usize,
    pub error_count: usize,
    pub errors: Vec<ImportRowError>,
}

impl ImportReport {
    pub fn push_error(&mut self, line: usize, nome: String, details: Vec<String>) {
        self.error_count += 1;
        self.errors.push(ImportRowError { line, nome, details });
    }
}
