use crate::config::DispatchConfig;
use crate::domain::outcome::{OutcomeEntry, OutcomeMessage};
use crate::domain::payload::SubmissionPayload;
use crate::domain::ports::{GatewayResponse, PaymentGateway, PaymentGatewayRef};
use crate::domain::record::PaymentRecord;
use log::{debug, info, warn};
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

/// Submits normalized records to the payment gateway, one call per record.
///
/// At most `max_in_flight` submissions run at once and they are started in row
/// order; with a limit of one the dispatch is strictly sequential. The result
/// always holds exactly one outcome per record, in the order of the input.
pub struct Dispatcher {
    gateway: PaymentGatewayRef,
    config: Arc<DispatchConfig>,
}

impl Dispatcher {
    pub fn new(gateway: PaymentGatewayRef, config: Arc<DispatchConfig>) -> Self {
        Self { gateway, config }
    }

    pub fn config(&self) -> &DispatchConfig {
        &self.config
    }

    pub async fn dispatch(&self, records: &[PaymentRecord]) -> Vec<OutcomeEntry> {
        let permits = Arc::new(Semaphore::new(self.config.max_in_flight()));
        let mut tasks = JoinSet::new();

        for (index, record) in records.iter().cloned().enumerate() {
            // The semaphore is never closed, so acquiring only fails if that changes.
            let permit = Arc::clone(&permits).acquire_owned().await.ok();
            let gateway = Arc::clone(&self.gateway);
            let config = Arc::clone(&self.config);
            tasks.spawn(async move {
                let outcome = submit_record(gateway.as_ref(), config.api_key(), &record).await;
                drop(permit);
                (index, outcome)
            });
        }

        let mut slots: Vec<Option<OutcomeEntry>> = vec![None; records.len()];
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((index, outcome)) => slots[index] = Some(outcome),
                Err(e) => warn!("Submission task failed: {}", e),
            }
        }

        slots
            .into_iter()
            .zip(records)
            .map(|(slot, record)| {
                slot.unwrap_or_else(|| {
                    OutcomeEntry::error(&record.customer_id, "submission task aborted")
                })
            })
            .collect()
    }
}

async fn submit_record(
    gateway: &dyn PaymentGateway,
    api_key: &str,
    record: &PaymentRecord,
) -> OutcomeEntry {
    let payload = match SubmissionPayload::build(api_key, record) {
        Ok(payload) => payload,
        Err(e) => {
            warn!("Line {}: {}", record.line, e);
            return OutcomeEntry::error(&record.customer_id, e);
        }
    };

    if log::log_enabled!(log::Level::Debug) {
        match serde_json::to_string(&payload.redacted()) {
            Ok(json) => debug!("Payload sent: {json}"),
            Err(e) => debug!("Payload for line {} not printable: {}", record.line, e),
        }
    }

    match gateway.submit(&payload).await {
        Ok(response) => {
            let outcome = classify(&record.customer_id, response);
            info!(
                "Line {}: status {} -- {}",
                record.line, outcome.status, outcome.message
            );
            outcome
        }
        Err(e) => {
            warn!("Line {}: submission failed: {}", record.line, e);
            OutcomeEntry::error(&record.customer_id, e)
        }
    }
}

/// JSON content types are decoded; anything else is kept as text. A JSON
/// content type with a body that does not decode counts as a failed call.
pub fn classify(customer_id: &str, response: GatewayResponse) -> OutcomeEntry {
    let is_json = response
        .content_type
        .as_deref()
        .map(|ct| ct.trim_start().to_ascii_lowercase().starts_with("application/json"))
        .unwrap_or(false);

    if !is_json {
        return OutcomeEntry::response(
            customer_id,
            response.status,
            OutcomeMessage::Text(response.body),
        );
    }

    match serde_json::from_str(&response.body) {
        Ok(value) => {
            OutcomeEntry::response(customer_id, response.status, OutcomeMessage::Json(value))
        }
        Err(e) => OutcomeEntry::error(
            customer_id,
            format!("invalid JSON in response with status {}: {e}", response.status),
        ),
    }
}
