use super::columns::ColumnMap;
use crate::domain::record::{Cell, RawRow};
use crate::error::{NotifierError, Result};
use std::io::Read;

/// Reads payment rows from a CSV export of the bank statement.
///
/// This reader wraps `csv::Reader`, trims whitespace and tolerates rows of
/// uneven length. Only the four source columns are kept.
pub struct CsvRowReader<R: Read> {
    reader: csv::Reader<R>,
}

impl<R: Read> CsvRowReader<R> {
    /// Creates a new `CsvRowReader` from any `Read` source (e.g., File, Stdin).
    pub fn new(source: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(source);
        Self { reader }
    }

    /// Reads the header, then every non-blank row in file order.
    pub fn rows(mut self) -> Result<Vec<RawRow>> {
        let headers = self.reader.headers()?.clone();
        if headers.is_empty() {
            return Err(NotifierError::Schema("the file has no header row".to_string()));
        }
        let columns = ColumnMap::from_headers(headers.iter())?;

        let mut rows = Vec::new();
        for record in self.reader.records() {
            let record = record?;
            let line = record
                .position()
                .map(|position| position.line() as usize)
                .unwrap_or(rows.len() + 2);
            let cells: Vec<Cell> = record.iter().map(Cell::text).collect();
            let row = columns.select(line, &cells);
            if !row.is_blank() {
                rows.push(row);
            }
        }
        Ok(rows)
    }
}
