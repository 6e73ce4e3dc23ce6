use crate::domain::record::{Cell, RawRow};
use crate::error::{NotifierError, Result};

pub const DESCRIPTION: &str = "Descripción";
pub const CREDIT_AMOUNT: &str = "Importe de crédito";
pub const ENTRY_DATE: &str = "Fecha del apunte";
pub const CUSTOMER_REFERENCE: &str = "Referencia de cliente";

pub const SOURCE_COLUMNS: [&str; 4] = [DESCRIPTION, CREDIT_AMOUNT, ENTRY_DATE, CUSTOMER_REFERENCE];

/// Positions of the four source columns within a header row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnMap {
    description: usize,
    credit_amount: usize,
    entry_date: usize,
    customer_reference: usize,
}

impl ColumnMap {
    /// Locates the source columns by trimmed header text. Every missing column
    /// is reported, not only the first.
    pub fn from_headers<I, S>(headers: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let headers: Vec<String> = headers
            .into_iter()
            .map(|header| header.as_ref().trim().to_string())
            .collect();
        let positions: Vec<Option<usize>> = SOURCE_COLUMNS
            .iter()
            .map(|name| headers.iter().position(|header| header == name))
            .collect();

        match positions.as_slice() {
            [
                Some(description),
                Some(credit_amount),
                Some(entry_date),
                Some(customer_reference),
            ] => Ok(Self {
                description: *description,
                credit_amount: *credit_amount,
                entry_date: *entry_date,
                customer_reference: *customer_reference,
            }),
            _ => Err(NotifierError::MissingColumns(
                SOURCE_COLUMNS
                    .iter()
                    .zip(&positions)
                    .filter(|(_, position)| position.is_none())
                    .map(|(name, _)| name.to_string())
                    .collect(),
            )),
        }
    }

    /// Picks the source cells out of a full row. Cells past the end of a short
    /// row are empty.
    pub fn select(&self, line: usize, cells: &[Cell]) -> RawRow {
        let cell = |index: usize| cells.get(index).cloned().unwrap_or_default();
        RawRow {
            line,
            description: cell(self.description),
            credit_amount: cell(self.credit_amount),
            entry_date: cell(self.entry_date),
            customer_reference: cell(self.customer_reference),
        }
    }
}
