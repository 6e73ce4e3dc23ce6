use crate::application::report::UploadReport;
use crate::error::Result;
use clap::ValueEnum;
use serde::Serialize;
use std::io::Write;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ReportFormat {
    /// `{"preview": [...], "outcomes": [...]}`
    #[default]
    Json,
    /// One line per record: preview columns followed by status and message.
    Csv,
}

#[derive(Serialize)]
struct CsvReportRow<'a> {
    idcliente: &'a str,
    telefono: &'a str,
    transaccion: &'a str,
    monto: String,
    fecha_pago: String,
    status: String,
    mensaje: String,
}

/// Renders an `UploadReport` to any `Write` sink (e.g., stdout).
pub struct ReportWriter<W: Write> {
    writer: W,
}

impl<W: Write> ReportWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn write_report(&mut self, report: &UploadReport, format: ReportFormat) -> Result<()> {
        match format {
            ReportFormat::Json => self.write_json(report),
            ReportFormat::Csv => self.write_csv(report),
        }
    }

    fn write_json(&mut self, report: &UploadReport) -> Result<()> {
        serde_json::to_writer_pretty(&mut self.writer, report)?;
        writeln!(self.writer)?;
        self.writer.flush()?;
        Ok(())
    }

    fn write_csv(&mut self, report: &UploadReport) -> Result<()> {
        let mut wtr = csv::Writer::from_writer(&mut self.writer);
        for (index, record) in report.preview.iter().enumerate() {
            let outcome = report.outcomes.get(index);
            wtr.serialize(CsvReportRow {
                idcliente: &record.customer_id,
                telefono: &record.phone,
                transaccion: &record.transaction_ref,
                monto: record
                    .amount
                    .map(|amount| amount.normalize().to_string())
                    .unwrap_or_default(),
                fecha_pago: record.payment_date.format("%Y-%m-%d").to_string(),
                status: outcome.map(|o| o.status.to_string()).unwrap_or_default(),
                mensaje: outcome.map(|o| o.message.to_string()).unwrap_or_default(),
            })?;
        }
        wtr.flush()?;
        Ok(())
    }
}
