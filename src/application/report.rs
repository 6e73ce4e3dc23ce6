use super::normalizer::NormalizedBatch;
use crate::domain::outcome::OutcomeEntry;
use crate::domain::record::PaymentRecord;
use serde::Serialize;
use std::fmt;

/// Everything the caller gets back for one upload: the normalized preview and
/// one outcome per previewed record, both in sheet order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UploadReport {
    pub preview: Vec<PaymentRecord>,
    pub outcomes: Vec<OutcomeEntry>,
    #[serde(skip)]
    pub dropped_lines: Vec<usize>,
}

impl UploadReport {
    /// Joins a normalized batch with the outcomes dispatched for it.
    pub fn aggregate(batch: NormalizedBatch, outcomes: Vec<OutcomeEntry>) -> Self {
        Self {
            preview: batch.records,
            outcomes,
            dropped_lines: batch.dropped_lines,
        }
    }

    pub fn summary(&self) -> ReportSummary {
        ReportSummary {
            records: self.preview.len(),
            accepted: self.outcomes.iter().filter(|o| o.is_accepted()).count(),
            rejected: self
                .outcomes
                .iter()
                .filter(|o| !o.is_accepted() && !o.is_error())
                .count(),
            errored: self.outcomes.iter().filter(|o| o.is_error()).count(),
            dropped: self.dropped_lines.len(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct ReportSummary {
    pub records: usize,
    pub accepted: usize,
    pub rejected: usize,
    pub errored: usize,
    pub dropped: usize,
}

impl fmt::Display for ReportSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} record(s): {} accepted, {} rejected, {} failed; {} row(s) with bad dates dropped",
            self.records, self.accepted, self.rejected, self.errored, self.dropped
        )
    }
}
