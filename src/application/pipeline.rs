use super::dispatcher::Dispatcher;
use super::normalizer::normalize;
use super::report::UploadReport;
use crate::domain::record::RawRow;
use crate::error::Result;
use crate::interfaces::spreadsheet::load_rows;
use log::{info, warn};
use std::path::Path;

/// Runs one upload end to end: load, normalize, dispatch, aggregate.
///
/// Batch-level problems (missing columns, malformed descriptions) abort
/// before anything is sent. Once dispatch starts every record gets an outcome.
pub struct UploadPipeline {
    dispatcher: Dispatcher,
}

impl UploadPipeline {
    pub fn new(dispatcher: Dispatcher) -> Self {
        Self { dispatcher }
    }

    /// Processes a spreadsheet already stored on disk.
    pub async fn process_file(&self, path: &Path) -> Result<UploadReport> {
        let rows = load_rows(path)?;
        info!("Loaded {} row(s) from {}", rows.len(), path.display());
        self.process_rows(rows).await
    }

    pub async fn process_rows(&self, rows: Vec<RawRow>) -> Result<UploadReport> {
        let batch = normalize(rows)?;
        if !batch.dropped_lines.is_empty() {
            warn!(
                "Skipped {} row(s) with an unreadable 'Fecha del apunte' (lines {:?})",
                batch.dropped_lines.len(),
                batch.dropped_lines
            );
        }

        info!(
            "Submitting {} record(s) to {} ({} at a time)",
            batch.records.len(),
            self.dispatcher.config().endpoint(),
            self.dispatcher.config().max_in_flight()
        );
        let outcomes = self.dispatcher.dispatch(&batch.records).await;

        let report = UploadReport::aggregate(batch, outcomes);
        info!("{}", report.summary());
        Ok(report)
    }
}
