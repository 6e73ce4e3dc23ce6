use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::Serialize;

/// A single spreadsheet cell, reduced to the shapes the normalizer cares about.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Cell {
    #[default]
    Empty,
    Text(String),
    Number(f64),
    DateTime(NaiveDateTime),
}

impl Cell {
    /// Builds a cell from raw text, treating blank text as empty.
    pub fn text(value: impl Into<String>) -> Self {
        let value = value.into();
        if value.trim().is_empty() {
            Cell::Empty
        } else {
            Cell::Text(value)
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }

    /// Renders the cell as text. Integral numbers drop the fractional part so
    /// references like `12345` survive a round trip through a numeric cell.
    pub fn to_text(&self) -> String {
        match self {
            Cell::Empty => String::new(),
            Cell::Text(text) => text.clone(),
            Cell::Number(n) if n.fract() == 0.0 && n.abs() < 1e15 => format!("{}", *n as i64),
            Cell::Number(n) => n.to_string(),
            Cell::DateTime(dt) => dt.format("%Y-%m-%d %H:%M:%S").to_string(),
        }
    }
}

/// One spreadsheet row restricted to the four source columns.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RawRow {
    /// 1-based line in the source sheet, the header being line 1.
    pub line: usize,
    pub description: Cell,
    pub credit_amount: Cell,
    pub entry_date: Cell,
    pub customer_reference: Cell,
}

impl RawRow {
    pub fn is_blank(&self) -> bool {
        self.description.is_empty()
            && self.credit_amount.is_empty()
            && self.entry_date.is_empty()
            && self.customer_reference.is_empty()
    }
}

/// A normalized payment notification, ready to be turned into a submission.
///
/// Serializes with the field names the remote API and the preview use.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PaymentRecord {
    #[serde(skip)]
    pub line: usize,
    #[serde(rename = "idcliente")]
    pub customer_id: String,
    #[serde(rename = "telefono")]
    pub phone: String,
    #[serde(rename = "transaccion")]
    pub transaction_ref: String,
    /// `None` when the credit cell was empty.
    #[serde(rename = "monto", with = "rust_decimal::serde::float_option")]
    pub amount: Option<Decimal>,
    #[serde(rename = "fecha_pago")]
    pub payment_date: NaiveDate,
}
