//! Tabular loading: picks the four source columns out of an uploaded
//! spreadsheet and turns each line into a `RawRow`.

pub mod columns;
pub mod csv_reader;
pub mod workbook_reader;

use crate::domain::record::RawRow;
use crate::error::{NotifierError, Result};
use csv_reader::CsvRowReader;
use std::fs::File;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpreadsheetFormat {
    Workbook,
    Csv,
}

impl SpreadsheetFormat {
    /// Chooses the reader from the file extension.
    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|extension| extension.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();

        match extension.as_str() {
            "xlsx" | "xlsm" | "xlsb" | "xls" | "ods" => Ok(Self::Workbook),
            "csv" => Ok(Self::Csv),
            _ => Err(NotifierError::UnsupportedFormat(format!(
                "'{}' (expected xlsx, xlsm, xlsb, xls, ods or csv)",
                path.display()
            ))),
        }
    }
}

/// Loads every non-blank row of the spreadsheet at `path`, in sheet order.
pub fn load_rows(path: &Path) -> Result<Vec<RawRow>> {
    match SpreadsheetFormat::from_path(path)? {
        SpreadsheetFormat::Workbook => workbook_reader::read_rows(path),
        SpreadsheetFormat::Csv => CsvRowReader::new(File::open(path)?).rows(),
    }
}
