// Reading Excel exports.

use calamine::{open_workbook, DataType, Range, Reader, Xlsx};
use log::debug;
use std::fs::File;
use std::io::BufReader;

use snafu::prelude::*;

use survey_sections::{dedup_headers, Table};

use crate::convert::*;

pub fn read_xlsx_table(path: &str, worksheet: Option<&str>) -> ConvertResult<Table> {
    let mut workbook: Xlsx<_> = open_workbook(path).context(OpeningExcelSnafu { path })?;
    let wrange = get_range(&mut workbook, path, worksheet)?;
    table_from_range(&wrange)
}

fn get_range(
    workbook: &mut Xlsx<BufReader<File>>,
    path: &str,
    worksheet: Option<&str>,
) -> ConvertResult<Range<DataType>> {
    debug!("get_range: path: {:?} worksheet: {:?}", path, worksheet);
    match worksheet {
        // A worksheet name was provided, use it.
        Some(name) => workbook
            .worksheet_range(name)
            .context(MissingWorksheetSnafu { name })?
            .context(OpeningExcelSnafu { path }),
        None => workbook
            .worksheet_range_at(0)
            .context(EmptyInputSnafu {})?
            .context(OpeningExcelSnafu { path }),
    }
}

/// The text of a cell, or None for an empty cell.
pub fn cell_value(cell: &DataType) -> Option<String> {
    match cell {
        DataType::Empty => None,
        DataType::String(s) => Some(s.clone()),
        DataType::Int(i) => Some(i.to_string()),
        // Whole numbers are stored as floats.
        DataType::Float(f) if f.fract() == 0.0 && f.abs() < 1e15 => Some(format!("{}", *f as i64)),
        DataType::Float(f) => Some(f.to_string()),
        DataType::Bool(b) => Some(b.to_string()),
        // Excel serial date, kept as a number.
        DataType::DateTime(f) => Some(f.to_string()),
        other => Some(format!("{:?}", other)),
    }
}

/// The first row of the range is the header, the following rows are the responses.
pub fn table_from_range(wrange: &Range<DataType>) -> ConvertResult<Table> {
    let mut iter = wrange.rows();
    let header = iter.next().context(EmptyInputSnafu {})?;
    let raw: Vec<String> = header
        .iter()
        .map(|c| cell_value(c).unwrap_or_default())
        .collect();
    let columns = dedup_headers(&raw);
    debug!("table_from_range: columns: {:?}", columns);

    let mut table = Table::new(columns);
    for row in iter {
        table.push_row(row.iter().map(cell_value).collect());
    }
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cells() {
        assert_eq!(cell_value(&DataType::Empty), None);
        assert_eq!(
            cell_value(&DataType::String("x".to_string())),
            Some("x".to_string())
        );
        assert_eq!(cell_value(&DataType::Float(3.0)), Some("3".to_string()));
        assert_eq!(cell_value(&DataType::Float(2.5)), Some("2.5".to_string()));
        assert_eq!(cell_value(&DataType::Int(-4)), Some("-4".to_string()));
        assert_eq!(cell_value(&DataType::Bool(true)), Some("true".to_string()));
    }

    #[test]
    fn range_with_duplicated_headers() {
        let mut wrange: Range<DataType> = Range::new((0, 0), (2, 2));
        wrange.set_value((0, 0), DataType::String("Title".to_string()));
        wrange.set_value((0, 1), DataType::String("Q".to_string()));
        wrange.set_value((0, 2), DataType::String("Q".to_string()));
        wrange.set_value((1, 0), DataType::String("Doc".to_string()));
        wrange.set_value((1, 2), DataType::Float(12.0));
        wrange.set_value((2, 1), DataType::String("only".to_string()));

        let table = table_from_range(&wrange).unwrap();
        assert_eq!(table.columns(), &["Title", "Q", "Q.1"]);
        assert_eq!(table.len(), 2);
        let r0 = table.row(0).unwrap();
        assert_eq!(r0.get("Title"), Some("Doc"));
        assert_eq!(r0.get("Q"), None);
        assert_eq!(r0.get("Q.1"), Some("12"));
        assert_eq!(table.row(1).unwrap().get("Q"), Some("only"));
    }

    #[test]
    fn missing_file() {
        assert!(matches!(
            read_xlsx_table("/nonexistent/survey2pdf/input.xlsx", None),
            Err(ConvertError::OpeningExcel { .. })
        ));
    }
}
