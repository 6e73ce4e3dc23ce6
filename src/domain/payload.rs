use super::record::PaymentRecord;
use crate::config::mask_key;
use crate::error::{NotifierError, Result};
use chrono::{Datelike, NaiveDate};
use rust_decimal::prelude::ToPrimitive;
use serde::Serialize;

/// The JSON body posted to the payment registration endpoint for one record.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubmissionPayload {
    pub api_key: String,
    #[serde(rename = "idcliente")]
    pub customer_id: String,
    #[serde(rename = "telefono")]
    pub phone: String,
    #[serde(rename = "transaccion")]
    pub transaction_ref: String,
    #[serde(rename = "monto")]
    pub amount: f64,
    #[serde(rename = "fecha_pago")]
    pub payment_date: String,
}

impl SubmissionPayload {
    /// Builds the payload for `record`, failing with a format error when the
    /// date or amount has no wire representation.
    pub fn build(api_key: &str, record: &PaymentRecord) -> Result<Self> {
        let payment_date = format_iso_date(record.payment_date)?;
        let amount = record.amount.ok_or_else(|| {
            NotifierError::Format("missing amount, 'Importe de crédito' is empty".to_string())
        })?;
        let amount = amount
            .to_f64()
            .filter(|value| value.is_finite())
            .ok_or_else(|| {
                NotifierError::Format(format!("amount {amount} cannot be sent as a float"))
            })?;

        Ok(Self {
            api_key: api_key.to_string(),
            customer_id: record.customer_id.clone(),
            phone: record.phone.clone(),
            transaction_ref: record.transaction_ref.clone(),
            amount,
            payment_date,
        })
    }

    /// A copy safe for logs.
    pub fn redacted(&self) -> Self {
        Self {
            api_key: mask_key(&self.api_key),
            ..self.clone()
        }
    }
}

/// Formats a date as `YYYY-MM-DD`; years without a four-digit form are rejected.
pub fn format_iso_date(date: NaiveDate) -> Result<String> {
    if !(1..=9999).contains(&date.year()) {
        return Err(NotifierError::Format(format!(
            "invalid payment date: year {} has no YYYY-MM-DD form",
            date.year()
        )));
    }
    Ok(date.format("%Y-%m-%d").to_string())
}
