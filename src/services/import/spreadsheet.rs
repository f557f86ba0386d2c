// src/services/import/spreadsheet.rs
//
// Leitor do formato legado SpreadsheetML (Excel 2003 XML): as planilhas de
// contratos vêm de sistemas antigos que exportam `<Workbook>` / `<Worksheet>`
// / `<Table>` / `<Row>` / `<Cell>` / `<Data>`. Só o que o import precisa:
// linhas como vetores de texto, respeitando `ss:Index` (células puladas).

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::common::error::AppError;

fn malformed() -> AppError {
    AppError::ImportStructural("Arquivo XML malformado ou em formato não suportado.".to_string())
}

/// Índice 1-based declarado em `ss:Index`, quando presente.
fn cell_index(e: &BytesStart<'_>) -> Result<Option<usize>, AppError> {
    for attr in e.attributes() {
        let attr = attr.map_err(|_| malformed())?;
        let key = attr.key.as_ref();
        if key == b"ss:Index" || key == b"Index" {
            let raw = String::from_utf8_lossy(&attr.value);
            let idx = raw.trim().parse::<usize>().map_err(|_| malformed())?;
            return Ok(Some(idx));
        }
    }
    Ok(None)
}

/// Extrai todas as linhas da primeira (e única esperada) tabela do documento.
pub fn parse_rows(content: &[u8]) -> Result<Vec<Vec<String>>, AppError> {
    let mut reader = Reader::from_reader(content);
    reader.config_mut().trim_text(true);

    let mut rows: Vec<Vec<String>> = Vec::new();
    let mut current_row: Vec<String> = Vec::new();
    let mut pending_cell: Option<String> = None;
    let mut in_row = false;
    let mut in_data = false;
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => match e.local_name().as_ref() {
                b"Row" => {
                    in_row = true;
                    current_row = Vec::new();
                }
                b"Cell" if in_row => {
                    // `ss:Index` pula células vazias; preenche o buraco.
                    if let Some(idx) = cell_index(&e)? {
                        while current_row.len() + 1 < idx {
                            current_row.push(String::new());
                        }
                    }
                    pending_cell = Some(String::new());
                }
                b"Data" => in_data = true,
                _ => {}
            },
            Ok(Event::Empty(e)) => match e.local_name().as_ref() {
                b"Cell" if in_row => {
                    if let Some(idx) = cell_index(&e)? {
                        while current_row.len() + 1 < idx {
                            current_row.push(String::new());
                        }
                    }
                    current_row.push(String::new());
                }
                _ => {}
            },
            Ok(Event::Text(t)) => {
                if in_data {
                    if let Some(cell) = pending_cell.as_mut() {
                        let raw = reader
                            .decoder()
                            .decode(t.as_ref())
                            .map_err(|_| malformed())?;
                        match quick_xml::escape::unescape(&raw) {
                            Ok(unescaped) => cell.push_str(&unescaped),
                            Err(_) => cell.push_str(&raw),
                        }
                    }
                }
            }
            Ok(Event::End(e)) => match e.local_name().as_ref() {
                b"Data" => in_data = false,
                b"Cell" => {
                    if let Some(cell) = pending_cell.take() {
                        current_row.push(cell);
                    }
                }
                b"Row" => {
                    in_row = false;
                    rows.push(std::mem::take(&mut current_row));
                }
                _ => {}
            },
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(_) => return Err(malformed()),
        }
        buf.clear();
    }

    if rows.is_empty() {
        return Err(AppError::ImportStructural(
            "A planilha está vazia: nenhuma linha encontrada.".to_string(),
        ));
    }

    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"<?xml version="1.0"?>
<Workbook xmlns="urn:schemas-microsoft-com:office:spreadsheet"
          xmlns:ss="urn:schemas-microsoft-com:office:spreadsheet">
 <Worksheet ss:Name="Contratos">
  <Table>
   <Row>
    <Cell><Data ss:Type="String">CLIENTE</Data></Cell>
    <Cell><Data ss:Type="String">REPRESENTANTE</Data></Cell>
   </Row>
   <Row>
    <Cell><Data ss:Type="String">ACME LTDA (12345678000199)</Data></Cell>
    <Cell ss:Index="4"><Data ss:Type="String">acme@example.com</Data></Cell>
   </Row>
   <Row/>
  </Table>
 </Worksheet>
</Workbook>"#;

    #[test]
    fn extrai_linhas_e_celulas() {
        let rows = parse_rows(SAMPLE.as_bytes()).unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0], vec!["CLIENTE", "REPRESENTANTE"]);
    }

    #[test]
    fn ss_index_preenche_celulas_puladas() {
        let rows = parse_rows(SAMPLE.as_bytes()).unwrap();
        // A segunda linha pula da coluna 1 para a 4.
        assert_eq!(rows[1].len(), 4);
        assert_eq!(rows[1][0], "ACME LTDA (12345678000199)");
        assert_eq!(rows[1][1], "");
        assert_eq!(rows[1][2], "");
        assert_eq!(rows[1][3], "acme@example.com");
    }

    #[test]
    fn linha_vazia_vira_vetor_vazio() {
        let rows = parse_rows(SAMPLE.as_bytes()).unwrap();
        assert!(rows[2].is_empty());
    }

    #[test]
    fn xml_malformado_e_erro_estrutural() {
        let result = parse_rows(b"<Workbook><Row>");
        assert!(matches!(result, Err(AppError::ImportStructural(_))));
    }

    #[test]
    fn documento_sem_linhas_e_erro_estrutural() {
        let result = parse_rows(b"<?xml version=\"1.0\"?><Workbook></Workbook>");
        assert!(matches!(result, Err(AppError::ImportStructural(_))));
    }

    #[test]
    fn entidades_xml_sao_decodificadas() {
        let xml = r#"<Workbook><Table><Row>
            <Cell><Data>Farias &amp; Filhos</Data></Cell>
        </Row></Table></Workbook>"#;
        let rows = parse_rows(xml.as_bytes()).unwrap();
        assert_eq!(rows[0][0], "Farias & Filhos");
    }
}
