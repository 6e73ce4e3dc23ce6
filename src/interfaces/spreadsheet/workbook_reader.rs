use super::columns::ColumnMap;
use crate::domain::record::{Cell, RawRow};
use crate::error::{NotifierError, Result};
use calamine::{Data, Reader, open_workbook_auto};
use std::path::Path;

/// Reads payment rows from the first worksheet of an Excel or OpenDocument
/// workbook. The first non-empty row of the sheet is the header.
pub fn read_rows(path: &Path) -> Result<Vec<RawRow>> {
    let mut workbook = open_workbook_auto(path)?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| NotifierError::Schema("the workbook has no worksheets".to_string()))??;

    let header_line = range.start().map(|(row, _)| row as usize + 1).unwrap_or(1);
    let mut rows = range.rows();
    let headers = rows
        .next()
        .ok_or_else(|| NotifierError::Schema("the first worksheet is empty".to_string()))?;
    let columns = ColumnMap::from_headers(headers.iter().map(|data| data.to_string()))?;

    Ok(rows
        .enumerate()
        .map(|(offset, cells)| {
            let cells: Vec<Cell> = cells.iter().map(to_cell).collect();
            columns.select(header_line + offset + 1, &cells)
        })
        .filter(|row| !row.is_blank())
        .collect())
}

pub(crate) fn to_cell(data: &Data) -> Cell {
    match data {
        Data::Empty | Data::Error(_) => Cell::Empty,
        Data::String(text) | Data::DateTimeIso(text) | Data::DurationIso(text) => {
            Cell::text(text.as_str())
        }
        Data::Float(value) => Cell::Number(*value),
        Data::Int(value) => Cell::Number(*value as f64),
        Data::Bool(value) => Cell::Text(value.to_string()),
        Data::DateTime(value) => value
            .as_datetime()
            .map(Cell::DateTime)
            .unwrap_or(Cell::Number(value.as_f64())),
    }
}
