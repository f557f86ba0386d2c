// src/services/import/layout.rs
//
// Detecção de layout da planilha legada. O conjunto é fechado e a detecção é
// intencionalmente rígida: igualdade exata (célula aparada e em maiúsculas)
// em posições fixas. Um export com cabeçalho rearranjado deve falhar na hora,
// nunca importar dados na coluna errada.

use crate::common::error::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    /// Export antigo: cliente e CPF/CNPJ juntos na primeira coluna.
    A,
    /// Export do sistema intermediário: campos já separados.
    B,
}

fn header_cell(header: &[String], index: usize) -> String {
    header
        .get(index)
        .map(|c| c.trim().to_uppercase())
        .unwrap_or_default()
}

impl Layout {
    pub fn detect(header: &[String]) -> Result<Layout, AppError> {
        let first = header_cell(header, 0);
        let second = header_cell(header, 1);

        if first == "CLIENTE" && second == "REPRESENTANTE" {
            return Ok(Layout::A);
        }
        if first == "ID_CLIENTE" && second == "NOME" {
            return Ok(Layout::B);
        }

        Err(AppError::ImportStructural(
            "Layout da planilha não reconhecido. Use um dos modelos de exportação suportados."
                .to_string(),
        ))
    }

    /// Resolve o mapa posicional uma única vez por linha.
    pub fn map_row(&self, cells: &[String]) -> RawRow {
        let cell = |i: usize| cells.get(i).map(|c| c.trim().to_string()).unwrap_or_default();

        match self {
            // 0 CLIENTE | 1 REPRESENTANTE | 2 TELEFONE | 3 E-MAIL | 4 PARCERIA
            // 5 CERTIFICADO | 6 CONTRATO | 7 VENCIMENTO | 8 RENOVACAO | 9 STATUS
            Layout::A => RawRow {
                client_cell: cell(0),
                separate_tax_id: None,
                legal_representative: cell(1),
                phone: cell(2),
                email: cell(3),
                partner: cell(4),
                certificate: cell(5),
                contract_number: cell(6),
                expiration_date: cell(7),
                renewal_date: cell(8),
                status: cell(9),
            },
            // 0 ID_Cliente (ignorado) | 1 Nome | 2 CPF_CNPJ | 3 Telefone
            // 4 Email | 5 Representante | 6 Parceiro | 7 Certificado
            // 8 Numero_Contrato | 9 Data_Vencimento | 10 Data_Renovacao | 11 Status
            Layout::B => RawRow {
                client_cell: cell(1),
                separate_tax_id: Some(cell(2)),
                legal_representative: cell(5),
                phone: cell(3),
                email: cell(4),
                partner: cell(6),
                certificate: cell(7),
                contract_number: cell(8),
                expiration_date: cell(9),
                renewal_date: cell(10),
                status: cell(11),
            },
        }
    }
}

/// Linha crua já posicionada: os campos nas colunas certas, ainda sem
/// nenhuma normalização. No layout A o CPF/CNPJ vem embutido em
/// `client_cell`; no B vem separado em `separate_tax_id`.
#[derive(Debug, Clone)]
pub struct RawRow {
    pub client_cell: String,
    pub separate_tax_id: Option<String>,
    pub legal_representative: String,
    pub phone: String,
    pub email: String,
    pub partner: String,
    pub certificate: String,
    pub contract_number: String,
    pub expiration_date: String,
    pub renewal_date: String,
    pub status: String,
}

impl RawRow {
    /// Identificação da linha no relatório de erros: a célula de cliente crua.
    pub fn client_label(&self) -> &str {
        &self.client_cell
    }

    /// Linhas totalmente em branco (comuns no fim dos exports) são puladas.
    pub fn is_blank(&self) -> bool {
        self.client_cell.is_empty()
            && self.separate_tax_id.as_deref().unwrap_or_default().is_empty()
            && self.contract_number.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cells(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn detecta_layout_a() {
        let header = cells(&["CLIENTE", "REPRESENTANTE", "TELEFONE"]);
        assert_eq!(Layout::detect(&header).unwrap(), Layout::A);
    }

    #[test]
    fn detecta_layout_b_sem_diferenciar_caixa() {
        let header = cells(&["ID_Cliente", "Nome", "CPF_CNPJ"]);
        assert_eq!(Layout::detect(&header).unwrap(), Layout::B);
    }

    #[test]
    fn cabecalho_com_espacos_ainda_casa() {
        let header = cells(&["  CLIENTE  ", " Representante "]);
        assert_eq!(Layout::detect(&header).unwrap(), Layout::A);
    }

    #[test]
    fn cabecalho_desconhecido_e_erro_estrutural() {
        let header = cells(&["NOME", "CPF"]);
        assert!(matches!(
            Layout::detect(&header),
            Err(AppError::ImportStructural(_))
        ));
    }

    #[test]
    fn colunas_rearranjadas_nao_casam() {
        // Mesmas colunas do layout A, em outra ordem: deve falhar.
        let header = cells(&["REPRESENTANTE", "CLIENTE"]);
        assert!(Layout::detect(&header).is_err());
    }

    #[test]
    fn mapeia_linha_do_layout_a() {
        let row = Layout::A.map_row(&cells(&[
            "ACME LTDA (12345678000199)",
            "João Silva",
            "14997243855",
            "acme@example.com",
            "Contabilidade Farias",
            "e-CNPJ A1",
            "CT-1042",
            "2025-10-01",
            "2025-09-01",
            "Agendado",
        ]));
        assert_eq!(row.client_cell, "ACME LTDA (12345678000199)");
        assert_eq!(row.separate_tax_id, None);
        assert_eq!(row.partner, "Contabilidade Farias");
        assert_eq!(row.status, "Agendado");
    }

    #[test]
    fn mapeia_linha_do_layout_b_ignorando_id() {
        let row = Layout::B.map_row(&cells(&[
            "789",
            "Maria Souza",
            "52998224725",
            "14997243855",
            "maria@example.com",
            "",
            "Contabilidade Farias",
            "e-CPF A3",
            "CT-2001",
            "2026-01-15",
            "",
            "Em contato",
        ]));
        assert_eq!(row.client_cell, "Maria Souza");
        assert_eq!(row.separate_tax_id.as_deref(), Some("52998224725"));
        assert_eq!(row.certificate, "e-CPF A3");
        assert_eq!(row.renewal_date, "");
    }

    #[test]
    fn linha_curta_preenche_com_vazio() {
        let row = Layout::A.map_row(&cells(&["ACME LTDA (12345678000199)"]));
        assert_eq!(row.phone, "");
        assert_eq!(row.status, "");
        assert!(!row.is_blank());
    }

    #[test]
    fn linha_em_branco_e_detectada() {
        let row = Layout::A.map_row(&cells(&["", "", ""]));
        assert!(row.is_blank());
    }
}
