// src/services/import/sanitize.rs
//
// Sanitizador de linha parametrizado por modo. Os três caminhos de entrada
// (layout A, layout B e cadastro manual) compartilham as mesmas regras de
// normalização; as divergências históricas ficam explícitas no `SanitizeMode`
// em vez de espalhadas em cópias da lógica. Os erros acumulam: a linha só é
// rejeitada depois de todos os campos serem examinados.

use chrono::{Datelike, NaiveDate};

use crate::models::{client::PersonType, contract::ContractStatus};

use super::layout::RawRow;

pub const UNIDENTIFIED_PARTNER: &str = "Não identificado";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SanitizeMode {
    /// Import, layout antigo: telefone e datas inválidos viram nulo.
    LayoutA,
    /// Import, layout intermediário: mesmas tolerâncias do A.
    LayoutB,
    /// Cadastro manual: telefone obrigatório, status e data desconhecidos
    /// são erro em vez de serem silenciosamente descartados.
    Strict,
}

impl SanitizeMode {
    fn is_strict(&self) -> bool {
        matches!(self, SanitizeMode::Strict)
    }
}

/// Linha normalizada, pronta para o resolvedor de entidades.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SanitizedRow {
    pub client_name: String,
    pub tax_id: String,
    pub person_type: PersonType,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub legal_representative: Option<String>,
    pub partner_name: String,
    pub certificate_name: Option<String>,
    pub contract_number: Option<String>,
    pub expiration_date: Option<NaiveDate>,
    pub renewal_date: Option<NaiveDate>,
    pub status: ContractStatus,
}

fn blank_to_none(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

pub fn digits_only(value: &str) -> String {
    value.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Layout A embute o CPF/CNPJ no fim da célula de cliente:
/// `"ACME LTDA (12345678000199)"` → nome + documento.
pub fn split_name_and_tax_id(cell: &str) -> Result<(String, String), String> {
    let cell = cell.trim();
    let open = cell
        .rfind('(')
        .ok_or_else(|| format!("Campo de cliente sem CPF/CNPJ entre parênteses: \"{cell}\""))?;
    let close = cell[open..]
        .find(')')
        .map(|i| open + i)
        .ok_or_else(|| format!("Campo de cliente sem CPF/CNPJ entre parênteses: \"{cell}\""))?;

    let name = cell[..open].trim().to_string();
    let tax_id = digits_only(&cell[open + 1..close]);

    if name.is_empty() || tax_id.is_empty() {
        return Err(format!("Campo de cliente sem CPF/CNPJ entre parênteses: \"{cell}\""));
    }

    Ok((name, tax_id))
}

/// 11 dígitos = pessoa física, 14 = jurídica. Qualquer outro tamanho é erro.
pub fn classify_tax_id(digits: &str) -> Result<PersonType, String> {
    match digits.len() {
        0 => Err("CPF/CNPJ ausente.".to_string()),
        11 => Ok(PersonType::Fisica),
        14 => Ok(PersonType::Juridica),
        n => Err(format!("CPF/CNPJ com tamanho inválido ({n} dígitos): esperado 11 ou 14.")),
    }
}

/// Normaliza para o formato de WhatsApp: 55 + DDD + número, só dígitos.
/// Números nacionais (10-11 dígitos) ganham o prefixo do país; números já
/// prefixados (12-13 dígitos começando em 55) passam direto.
pub fn normalize_phone(raw: &str) -> Result<Option<String>, String> {
    let digits = digits_only(raw);
    match digits.len() {
        0 => Ok(None),
        10 | 11 => Ok(Some(format!("55{digits}"))),
        12 | 13 if digits.starts_with("55") => Ok(Some(digits)),
        _ => Err(format!("Telefone inválido: \"{}\".", raw.trim())),
    }
}

/// Tabela de sinônimos dos exports legados, sem diferenciar caixa.
/// Desconhecido → `None`; quem chama decide o padrão e se registra erro.
pub fn parse_status(raw: &str) -> Option<ContractStatus> {
    match raw.trim().to_lowercase().as_str() {
        "agendado" | "esc agendado" => Some(ContractStatus::Scheduled),
        "em contato" => Some(ContractStatus::InContact),
        "renovado" => Some(ContractStatus::Renewed),
        "não identificado" | "nao identificado" | "tickets" => Some(ContractStatus::Unidentified),
        "não vai renovar" | "nao vai renovar" => Some(ContractStatus::NotRenewing),
        "cancelado" => Some(ContractStatus::Cancelled),
        "ativo" => Some(ContractStatus::Active),
        _ => None,
    }
}

/// `YYYY-MM-DD`, com sufixo de hora opcional descartado. Datas impossíveis
/// ou fora de 1900-2100 → `None`.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    let date_part = trimmed
        .split(|c: char| c == 'T' || c.is_whitespace())
        .next()
        .unwrap_or_default();

    let date = NaiveDate::parse_from_str(date_part, "%Y-%m-%d").ok()?;
    if !(1900..=2100).contains(&date.year()) {
        return None;
    }
    Some(date)
}

/// Só os alfanuméricos, em maiúsculas: `" ct-10.42 "` → `"CT1042"`.
pub fn normalize_contract_number(raw: &str) -> String {
    raw.chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .collect::<String>()
        .to_uppercase()
}

pub fn sanitize_row(raw: &RawRow, mode: SanitizeMode) -> Result<SanitizedRow, Vec<String>> {
    let mut errors: Vec<String> = Vec::new();

    // Nome + CPF/CNPJ, conforme o layout. Quando a célula combinada do
    // layout A não separa, o documento já foi reportado: não reclassifica.
    let (client_name, tax_digits) = match &raw.separate_tax_id {
        Some(tax_cell) => (
            raw.client_cell.trim().to_string(),
            Some(digits_only(tax_cell)),
        ),
        None => match split_name_and_tax_id(&raw.client_cell) {
            Ok((name, tax)) => (name, Some(tax)),
            Err(e) => {
                errors.push(e);
                (raw.client_cell.trim().to_string(), None)
            }
        },
    };

    if client_name.is_empty() {
        errors.push("Nome do cliente ausente.".to_string());
    }

    let (tax_digits, person_type) = match tax_digits {
        Some(digits) => match classify_tax_id(&digits) {
            Ok(t) => (digits, t),
            Err(e) => {
                errors.push(e);
                (digits, PersonType::Juridica)
            }
        },
        None => (String::new(), PersonType::Juridica),
    };

    let phone = match normalize_phone(&raw.phone) {
        Ok(Some(phone)) => Some(phone),
        Ok(None) => {
            if mode.is_strict() {
                errors.push("Telefone é obrigatório.".to_string());
            }
            None
        }
        Err(e) => {
            errors.push(e);
            None
        }
    };

    let status = match parse_status(&raw.status) {
        Some(status) => status,
        None => {
            if mode.is_strict() {
                errors.push(format!("Status desconhecido: \"{}\".", raw.status.trim()));
            }
            ContractStatus::Unidentified
        }
    };

    let expiration_date = parse_date(&raw.expiration_date);
    if expiration_date.is_none() && mode.is_strict() && !raw.expiration_date.trim().is_empty() {
        errors.push(format!("Data de vencimento inválida: \"{}\".", raw.expiration_date.trim()));
    }

    let renewal_date = parse_date(&raw.renewal_date);
    if renewal_date.is_none() && mode.is_strict() && !raw.renewal_date.trim().is_empty() {
        errors.push(format!("Data de renovação inválida: \"{}\".", raw.renewal_date.trim()));
    }

    let partner_name =
        blank_to_none(&raw.partner).unwrap_or_else(|| UNIDENTIFIED_PARTNER.to_string());

    if !errors.is_empty() {
        return Err(errors);
    }

    Ok(SanitizedRow {
        client_name,
        tax_id: tax_digits,
        person_type,
        phone,
        email: blank_to_none(&raw.email),
        legal_representative: blank_to_none(&raw.legal_representative),
        partner_name,
        certificate_name: blank_to_none(&raw.certificate),
        contract_number: blank_to_none(&raw.contract_number),
        expiration_date,
        renewal_date,
        status,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw_a(client: &str, phone: &str, status: &str) -> RawRow {
        RawRow {
            client_cell: client.to_string(),
            separate_tax_id: None,
            legal_representative: String::new(),
            phone: phone.to_string(),
            email: String::new(),
            partner: String::new(),
            certificate: String::new(),
            contract_number: String::new(),
            expiration_date: String::new(),
            renewal_date: String::new(),
            status: status.to_string(),
        }
    }

    // ===== TELEFONE =====

    #[test]
    fn telefone_nacional_ganha_prefixo_55() {
        assert_eq!(
            normalize_phone("14997243855").unwrap(),
            Some("5514997243855".to_string())
        );
    }

    #[test]
    fn telefone_fixo_de_10_digitos_tambem_ganha_prefixo() {
        assert_eq!(
            normalize_phone("(14) 3222-1100").unwrap(),
            Some("551432221100".to_string())
        );
    }

    #[test]
    fn telefone_ja_prefixado_passa_direto() {
        assert_eq!(
            normalize_phone("551499724385").unwrap(),
            Some("551499724385".to_string())
        );
    }

    #[test]
    fn telefone_curto_e_erro() {
        assert!(normalize_phone("123").is_err());
    }

    #[test]
    fn telefone_de_12_digitos_sem_55_e_erro() {
        assert!(normalize_phone("119997243855").is_err());
    }

    #[test]
    fn telefone_vazio_e_nulo() {
        assert_eq!(normalize_phone("  ").unwrap(), None);
    }

    // ===== CPF/CNPJ E NOME =====

    #[test]
    fn extrai_nome_e_cnpj_da_celula_combinada() {
        let (name, tax) = split_name_and_tax_id("ACME LTDA (12.345.678/0001-99)").unwrap();
        assert_eq!(name, "ACME LTDA");
        assert_eq!(tax, "12345678000199");
    }

    #[test]
    fn parenteses_no_nome_usam_o_ultimo_grupo() {
        let (name, tax) = split_name_and_tax_id("JOSÉ (FILIAL) ME (12345678000199)").unwrap();
        assert_eq!(name, "JOSÉ (FILIAL) ME");
        assert_eq!(tax, "12345678000199");
    }

    #[test]
    fn celula_sem_parenteses_e_erro() {
        assert!(split_name_and_tax_id("ACME LTDA").is_err());
    }

    #[test]
    fn onze_digitos_e_pessoa_fisica() {
        assert_eq!(classify_tax_id("52998224725").unwrap(), PersonType::Fisica);
    }

    #[test]
    fn quatorze_digitos_e_pessoa_juridica() {
        assert_eq!(classify_tax_id("12345678000199").unwrap(), PersonType::Juridica);
    }

    #[test]
    fn tamanho_errado_e_erro() {
        assert!(classify_tax_id("123456").is_err());
        assert!(classify_tax_id("").is_err());
    }

    // ===== STATUS =====

    #[test]
    fn sinonimos_de_status_sao_reconhecidos() {
        assert_eq!(parse_status("Agendado"), Some(ContractStatus::Scheduled));
        assert_eq!(parse_status("ESC AGENDADO"), Some(ContractStatus::Scheduled));
        assert_eq!(parse_status("tickets"), Some(ContractStatus::Unidentified));
        assert_eq!(parse_status("nao vai renovar"), Some(ContractStatus::NotRenewing));
        assert_eq!(parse_status("Em Contato"), Some(ContractStatus::InContact));
    }

    #[test]
    fn status_desconhecido_e_none() {
        assert_eq!(parse_status("pendente"), None);
        assert_eq!(parse_status(""), None);
    }

    // ===== DATAS =====

    #[test]
    fn data_iso_com_hora_descartada() {
        assert_eq!(
            parse_date("2025-06-01 00:00:00"),
            NaiveDate::from_ymd_opt(2025, 6, 1)
        );
        assert_eq!(
            parse_date("2025-06-01T12:30:00"),
            NaiveDate::from_ymd_opt(2025, 6, 1)
        );
    }

    #[test]
    fn data_impossivel_vira_nulo() {
        assert_eq!(parse_date("2025-02-30"), None);
        assert_eq!(parse_date("01/06/2025"), None);
    }

    #[test]
    fn ano_fora_da_faixa_vira_nulo() {
        assert_eq!(parse_date("1899-12-31"), None);
        assert_eq!(parse_date("2101-01-01"), None);
    }

    // ===== NÚMERO DE CONTRATO =====

    #[test]
    fn numero_de_contrato_normalizado() {
        assert_eq!(normalize_contract_number(" ct-10.42 "), "CT1042");
        assert_eq!(normalize_contract_number("***"), "");
    }

    // ===== LINHA COMPLETA =====

    #[test]
    fn linha_valida_do_layout_a() {
        let mut raw = raw_a("ACME LTDA (12345678000199)", "14997243855", "Agendado");
        raw.partner = "Contabilidade Farias".to_string();
        raw.contract_number = "CT-1042".to_string();
        raw.expiration_date = "2025-10-01".to_string();

        let row = sanitize_row(&raw, SanitizeMode::LayoutA).unwrap();
        assert_eq!(row.client_name, "ACME LTDA");
        assert_eq!(row.tax_id, "12345678000199");
        assert_eq!(row.person_type, PersonType::Juridica);
        assert_eq!(row.phone.as_deref(), Some("5514997243855"));
        assert_eq!(row.status, ContractStatus::Scheduled);
        assert_eq!(row.expiration_date, NaiveDate::from_ymd_opt(2025, 10, 1));
    }

    #[test]
    fn erros_acumulam_em_vez_de_abortar_no_primeiro() {
        let raw = raw_a("ACME LTDA", "123", "Agendado");
        let errors = sanitize_row(&raw, SanitizeMode::LayoutA).unwrap_err();
        // Célula de cliente sem documento + telefone inválido.
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn telefone_vazio_e_nulo_no_import_mas_erro_no_estrito() {
        let raw = raw_a("ACME LTDA (12345678000199)", "", "Agendado");

        let row = sanitize_row(&raw, SanitizeMode::LayoutA).unwrap();
        assert_eq!(row.phone, None);

        let errors = sanitize_row(&raw, SanitizeMode::Strict).unwrap_err();
        assert!(errors.iter().any(|e| e.contains("Telefone")));
    }

    #[test]
    fn status_desconhecido_vira_nao_identificado_no_import() {
        let raw = raw_a("ACME LTDA (12345678000199)", "14997243855", "qualquer coisa");

        let row = sanitize_row(&raw, SanitizeMode::LayoutA).unwrap();
        assert_eq!(row.status, ContractStatus::Unidentified);

        let errors = sanitize_row(&raw, SanitizeMode::Strict).unwrap_err();
        assert!(errors.iter().any(|e| e.contains("Status")));
    }

    #[test]
    fn parceria_em_branco_vira_nao_identificado() {
        let raw = raw_a("ACME LTDA (12345678000199)", "14997243855", "Ativo");
        let row = sanitize_row(&raw, SanitizeMode::LayoutA).unwrap();
        assert_eq!(row.partner_name, UNIDENTIFIED_PARTNER);
    }

    #[test]
    fn layout_b_usa_documento_separado() {
        let raw = RawRow {
            client_cell: "Maria Souza".to_string(),
            separate_tax_id: Some("529.982.247-25".to_string()),
            legal_representative: String::new(),
            phone: "14997243855".to_string(),
            email: "maria@example.com".to_string(),
            partner: String::new(),
            certificate: "e-CPF A3".to_string(),
            contract_number: "CT-2001".to_string(),
            expiration_date: "2026-01-15".to_string(),
            renewal_date: String::new(),
            status: "Em contato".to_string(),
        };

        let row = sanitize_row(&raw, SanitizeMode::LayoutB).unwrap();
        assert_eq!(row.client_name, "Maria Souza");
        assert_eq!(row.tax_id, "52998224725");
        assert_eq!(row.person_type, PersonType::Fisica);
        assert_eq!(row.certificate_name.as_deref(), Some("e-CPF A3"));
        assert_eq!(row.status, ContractStatus::InContact);
    }
}
