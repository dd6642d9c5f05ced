// Primitives for reading CSV files.

use log::{debug, warn};
use std::fs;

use snafu::prelude::*;

use survey_sections::{dedup_headers, Table};

use crate::convert::*;

const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];

pub fn read_csv_table(path: &str) -> ConvertResult<Table> {
    let bytes = fs::read(path).context(OpeningInputSnafu { path })?;
    let text = decode_input(&bytes, path);
    parse_csv_table(&text)
}

/// Decodes the content of an export.
///
/// Survey123 writes UTF-8 with a byte order mark. Files that went through a
/// spreadsheet tool may have been saved as Windows-1252 instead, which is used
/// if the content is not valid UTF-8. Windows-1252 maps every byte to a
/// character, so decoding never fails.
pub fn decode_input(bytes: &[u8], path: &str) -> String {
    let content = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
    match std::str::from_utf8(content) {
        Ok(s) => s.to_string(),
        Err(e) => {
            warn!(
                "File {:?} is not valid UTF-8 ({}), decoding it as Windows-1252",
                path, e
            );
            let (decoded, _) = encoding_rs::WINDOWS_1252.decode_without_bom_handling(content);
            decoded.into_owned()
        }
    }
}

/// Reads the header and the rows of a CSV document.
///
/// Duplicated header labels get a `.1`, `.2`, ... suffix. Short rows are padded
/// with absent values.
pub fn parse_csv_table(text: &str) -> ConvertResult<Table> {
    let rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(text.as_bytes());
    let mut records = rdr.into_records();

    let header = records
        .next()
        .context(EmptyInputSnafu {})?
        .context(CsvParseSnafu {})?;
    let raw: Vec<String> = header.iter().map(|s| s.to_string()).collect();
    let columns = dedup_headers(&raw);
    debug!("parse_csv_table: columns: {:?}", columns);
    let num_columns = columns.len();

    let mut table = Table::new(columns);
    for (idx, line_r) in records.enumerate() {
        let line = line_r.context(CsvParseSnafu {})?;
        if line.len() > num_columns {
            warn!(
                "Row {} has {} cells but the header has {} columns, ignoring the extra cells",
                idx,
                line.len(),
                num_columns
            );
        }
        let cells: Vec<Option<String>> = line
            .iter()
            .take(num_columns)
            .map(|s| Some(s.to_string()))
            .collect();
        table.push_row(cells);
    }
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicated_headers() {
        let table = parse_csv_table(
            "Title,Question,Question,Answer,Answer\nDoc A,Q1,Q1b,A1,\nDoc B,\"Multi\nline\",,,\n",
        )
        .unwrap();
        assert_eq!(
            table.columns(),
            &["Title", "Question", "Question.1", "Answer", "Answer.1"]
        );
        assert_eq!(table.len(), 2);
        let r0 = table.row(0).unwrap();
        assert_eq!(r0.get("Question.1"), Some("Q1b"));
        assert_eq!(r0.get("Answer.1"), Some(""));
        let r1 = table.row(1).unwrap();
        assert_eq!(r1.get("Question"), Some("Multi\nline"));
    }

    #[test]
    fn ragged_rows() {
        let table = parse_csv_table("A,B,C\n1\n1,2,3,4\n").unwrap();
        let r0 = table.row(0).unwrap();
        assert_eq!(r0.get("A"), Some("1"));
        assert_eq!(r0.get("C"), None);
        let r1 = table.row(1).unwrap();
        assert_eq!(r1.get("C"), Some("3"));
    }

    #[test]
    fn empty_input() {
        assert!(matches!(
            parse_csv_table(""),
            Err(ConvertError::EmptyInput {})
        ));
    }

    #[test]
    fn byte_order_mark_is_removed() {
        let mut bytes = UTF8_BOM.to_vec();
        bytes.extend_from_slice("Titre,Été\nx,y\n".as_bytes());
        let text = decode_input(&bytes, "test.csv");
        let table = parse_csv_table(&text).unwrap();
        assert_eq!(table.columns(), &["Titre", "Été"]);
    }

    #[test]
    fn windows_1252_fallback() {
        // "Café" in Windows-1252.
        let bytes = [b'C', b'a', b'f', 0xE9];
        assert_eq!(decode_input(&bytes, "test.csv"), "Café");
    }

    #[test]
    fn any_bytes_decode() {
        let bytes: Vec<u8> = (0..=255u8).collect();
        let text = decode_input(&bytes, "test.csv");
        assert_eq!(text.chars().count(), 256);
        assert!(text.contains('€'));
    }

    #[test]
    fn missing_file() {
        assert!(matches!(
            read_csv_table("/nonexistent/survey2pdf/input.csv"),
            Err(ConvertError::OpeningInput { .. })
        ));
    }
}
