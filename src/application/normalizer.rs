use crate::domain::record::{Cell, PaymentRecord, RawRow};
use crate::error::{NotifierError, Result};
use chrono::{NaiveDate, NaiveTime};
use rust_decimal::Decimal;
use std::str::FromStr;

/// Day-first date shapes. Two-digit-year forms come first: on a four-digit
/// year they fail with trailing input, so the `%Y` forms still get a chance.
const DATE_FORMATS: &[&str] = &[
    "%d/%m/%y", "%d/%m/%Y", "%d-%m-%y", "%d-%m-%Y", "%d.%m.%y", "%d.%m.%Y", "%Y-%m-%d",
    "%Y/%m/%d",
];

const TIME_FORMATS: &[&str] = &["%H:%M:%S", "%H:%M:%S%.f", "%H:%M"];

/// Records that survived normalization, plus the lines dropped for an
/// unreadable date.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct NormalizedBatch {
    pub records: Vec<PaymentRecord>,
    pub dropped_lines: Vec<usize>,
}

/// Normalizes a whole batch.
///
/// Every description must split into a customer id and a phone number, or the
/// batch is rejected as a whole. Rows whose date does not parse are left out
/// without error; only their line numbers are kept. Amount text that is not a
/// number rejects the batch, while an empty credit cell leaves `amount` unset.
pub fn normalize(rows: Vec<RawRow>) -> Result<NormalizedBatch> {
    let mut parts = Vec::with_capacity(rows.len());
    for row in &rows {
        let description = row.description.to_text();
        match split_description(&description) {
            Some(split) => parts.push(split),
            None => {
                return Err(NotifierError::Validation {
                    line: row.line,
                    reason: format!(
                        "'Descripción' must hold a customer id and a phone number, got '{}'",
                        description.trim()
                    ),
                });
            }
        }
    }

    let mut batch = NormalizedBatch::default();
    for (row, (customer_id, phone)) in rows.into_iter().zip(parts) {
        let Some(payment_date) = parse_day_first(&row.entry_date) else {
            batch.dropped_lines.push(row.line);
            continue;
        };

        // Empty credit cells (debit lines) fail later, per row, at dispatch
        let amount = match &row.credit_amount {
            Cell::Empty => None,
            Cell::Number(n) if !n.is_finite() => None,
            cell => Some(parse_amount(cell).ok_or_else(|| NotifierError::Validation {
                line: row.line,
                reason: format!("'Importe de crédito' is not a number: '{}'", cell.to_text()),
            })?),
        };

        batch.records.push(PaymentRecord {
            line: row.line,
            customer_id,
            phone,
            transaction_ref: row.customer_reference.to_text().trim().to_string(),
            amount,
            payment_date,
        });
    }

    Ok(batch)
}

/// Splits the trimmed description once, at its first whitespace character.
///
/// The phone keeps everything after that character, so `"C100  555"` gives
/// `("C100", " 555")` and rejoining with one space restores the description.
pub fn split_description(description: &str) -> Option<(String, String)> {
    let trimmed = description.trim();
    let (at, separator) = trimmed.char_indices().find(|(_, c)| c.is_whitespace())?;
    let customer_id = &trimmed[..at];
    let phone = &trimmed[at + separator.len_utf8()..];
    if customer_id.is_empty() || phone.trim().is_empty() {
        return None;
    }
    Some((customer_id.to_string(), phone.to_string()))
}

pub fn parse_day_first(cell: &Cell) -> Option<NaiveDate> {
    match cell {
        Cell::DateTime(dt) => Some(dt.date()),
        Cell::Text(text) => parse_date_text(text),
        Cell::Number(_) | Cell::Empty => None,
    }
}

fn parse_date_text(text: &str) -> Option<NaiveDate> {
    let text = text.trim();
    let (date_part, time_part) = match text.find([' ', 'T']) {
        Some(at) => (&text[..at], Some(text[at + 1..].trim())),
        None => (text, None),
    };

    if let Some(time) = time_part
        && !TIME_FORMATS
            .iter()
            .any(|format| NaiveTime::parse_from_str(time, format).is_ok())
    {
        return None;
    }

    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(date_part, format).ok())
}

/// Reads an amount from a numeric cell, or from text using either `.` or a
/// single `,` as the decimal separator.
pub fn parse_amount(cell: &Cell) -> Option<Decimal> {
    match cell {
        Cell::Number(n) => Decimal::try_from(*n).ok(),
        Cell::Text(text) => {
            let text = text.trim();
            Decimal::from_str(text).ok().or_else(|| {
                if text.contains('.') || text.matches(',').count() != 1 {
                    return None;
                }
                Decimal::from_str(&text.replace(',', ".")).ok()
            })
        }
        Cell::DateTime(_) | Cell::Empty => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn row(line: usize, description: &str, amount: Cell, date: &str) -> RawRow {
        RawRow {
            line,
            description: Cell::text(description),
            credit_amount: amount,
            entry_date: Cell::text(date),
            customer_reference: Cell::text(format!("REF-{line}")),
        }
    }

    #[test]
    fn test_normalize_well_formed_row() {
        let rows = vec![row(2, "C100 555-1234", Cell::Number(250.00), "05/03/2024")];
        let batch = normalize(rows).unwrap();

        assert_eq!(batch.records.len(), 1);
        let record = &batch.records[0];
        assert_eq!(record.customer_id, "C100");
        assert_eq!(record.phone, "555-1234");
        assert_eq!(record.transaction_ref, "REF-2");
        assert_eq!(record.amount, Some(dec!(250)));
        assert_eq!(
            record.payment_date,
            NaiveDate::from_ymd_opt(2024, 3, 5).unwrap()
        );
        assert!(batch.dropped_lines.is_empty());
    }

    #[test]
    fn test_single_token_description_rejects_batch() {
        let rows = vec![
            row(2, "C100 555-1234", Cell::Number(10.0), "01/02/2024"),
            row(3, "onlyonetoken", Cell::Number(20.0), "01/02/2024"),
        ];
        let err = normalize(rows).unwrap_err();
        assert!(matches!(err, NotifierError::Validation { line: 3, .. }));
    }

    #[test]
    fn test_bad_description_rejects_even_when_date_is_bad() {
        let rows = vec![row(2, "   ", Cell::Number(10.0), "not-a-date")];
        assert!(normalize(rows).is_err());
    }

    #[test]
    fn test_unparseable_date_is_dropped_silently() {
        let rows = vec![
            row(2, "C1 600111222", Cell::Number(1.0), "01/02/2024"),
            row(3, "C2 600111223", Cell::Number(2.0), "not-a-date"),
            row(4, "C3 600111224", Cell::Number(3.0), "31/12/2023"),
        ];
        let batch = normalize(rows).unwrap();

        let ids: Vec<&str> = batch.records.iter().map(|r| r.customer_id.as_str()).collect();
        assert_eq!(ids, vec!["C1", "C3"]);
        assert_eq!(batch.dropped_lines, vec![3]);
    }

    #[test]
    fn test_bad_amount_on_dropped_row_is_ignored() {
        let rows = vec![row(2, "C1 600", Cell::text("n/a"), "garbage")];
        let batch = normalize(rows).unwrap();
        assert!(batch.records.is_empty());
        assert_eq!(batch.dropped_lines, vec![2]);
    }

    #[test]
    fn test_bad_amount_rejects_batch() {
        let rows = vec![row(2, "C1 600", Cell::text("n/a"), "01/01/2024")];
        let err = normalize(rows).unwrap_err();
        assert!(matches!(err, NotifierError::Validation { line: 2, .. }));
    }

    #[test]
    fn test_empty_amount_is_kept_without_amount() {
        let rows = vec![
            row(2, "C1 600", Cell::Number(10.0), "01/02/2024"),
            row(3, "C2 601", Cell::Empty, "01/02/2024"),
            row(4, "C3 602", Cell::Number(f64::NAN), "01/02/2024"),
        ];
        let batch = normalize(rows).unwrap();

        let amounts: Vec<Option<Decimal>> = batch.records.iter().map(|r| r.amount).collect();
        assert_eq!(amounts, vec![Some(dec!(10)), None, None]);
    }

    #[test]
    fn test_split_at_first_whitespace() {
        assert_eq!(
            split_description("  C100 555 1234  "),
            Some(("C100".to_string(), "555 1234".to_string()))
        );
        assert_eq!(
            split_description("C100  555-1234"),
            Some(("C100".to_string(), " 555-1234".to_string()))
        );
        assert_eq!(
            split_description("C100\t555"),
            Some(("C100".to_string(), "555".to_string()))
        );
        assert_eq!(split_description("onlyonetoken"), None);
        assert_eq!(split_description(""), None);
    }

    #[test]
    fn test_day_first_dates() {
        let date = |y, m, d| NaiveDate::from_ymd_opt(y, m, d);

        assert_eq!(parse_day_first(&Cell::text("03/04/2024")), date(2024, 4, 3));
        assert_eq!(parse_day_first(&Cell::text("3/4/2024")), date(2024, 4, 3));
        assert_eq!(parse_day_first(&Cell::text("03-04-24")), date(2024, 4, 3));
        assert_eq!(parse_day_first(&Cell::text("03.04.2024")), date(2024, 4, 3));
        assert_eq!(parse_day_first(&Cell::text("2024-04-03")), date(2024, 4, 3));
        assert_eq!(
            parse_day_first(&Cell::text("03/04/2024 10:15")),
            date(2024, 4, 3)
        );
        assert_eq!(
            parse_day_first(&Cell::text("2024-04-03T10:15:00")),
            date(2024, 4, 3)
        );
        assert_eq!(parse_day_first(&Cell::text("13/25/2024")), None);
        assert_eq!(parse_day_first(&Cell::text("03/04/2024 later")), None);
        assert_eq!(parse_day_first(&Cell::text("not-a-date")), None);
        assert_eq!(parse_day_first(&Cell::Number(45356.0)), None);
        assert_eq!(parse_day_first(&Cell::Empty), None);
    }

    #[test]
    fn test_native_date_cells() {
        let dt = NaiveDate::from_ymd_opt(2024, 3, 5)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        assert_eq!(
            parse_day_first(&Cell::DateTime(dt)),
            NaiveDate::from_ymd_opt(2024, 3, 5)
        );
    }

    #[test]
    fn test_amount_parsing() {
        assert_eq!(parse_amount(&Cell::Number(250.0)), Some(dec!(250)));
        assert_eq!(parse_amount(&Cell::text(" 250.50 ")), Some(dec!(250.50)));
        assert_eq!(parse_amount(&Cell::text("250,50")), Some(dec!(250.50)));
        assert_eq!(parse_amount(&Cell::text("1.250,50")), None);
        assert_eq!(parse_amount(&Cell::text("abc")), None);
        assert_eq!(parse_amount(&Cell::Empty), None);
    }
}
