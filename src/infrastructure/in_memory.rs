use crate::domain::payload::SubmissionPayload;
use crate::domain::ports::{GatewayResponse, PaymentGateway};
use crate::error::{NotifierError, Result};
use async_trait::async_trait;
use std::collections::HashMap;
use std::io;
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Debug, Clone)]
enum Scripted {
    Respond(GatewayResponse),
    Fail(String),
}

/// A gateway that never leaves the process.
///
/// Every submission is recorded. Customers without a scripted answer get a
/// `200` JSON acknowledgement, which makes this the backend for dry runs.
/// Uses `Arc<RwLock<Vec<_>>>` so clones observe the same submissions.
#[derive(Debug, Clone)]
pub struct InMemoryGateway {
    submissions: Arc<RwLock<Vec<SubmissionPayload>>>,
    scripted: HashMap<String, Scripted>,
}

impl Default for InMemoryGateway {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryGateway {
    pub fn new() -> Self {
        Self {
            submissions: Arc::new(RwLock::new(Vec::new())),
            scripted: HashMap::new(),
        }
    }

    /// Answers submissions for `customer_id` with `response`.
    pub fn with_response(mut self, customer_id: &str, response: GatewayResponse) -> Self {
        self.scripted
            .insert(customer_id.to_string(), Scripted::Respond(response));
        self
    }

    /// Fails submissions for `customer_id` as if the connection was refused.
    pub fn with_failure(mut self, customer_id: &str, reason: &str) -> Self {
        self.scripted
            .insert(customer_id.to_string(), Scripted::Fail(reason.to_string()));
        self
    }

    /// Everything submitted so far, in arrival order.
    pub async fn submissions(&self) -> Vec<SubmissionPayload> {
        self.submissions.read().await.clone()
    }
}

#[async_trait]
impl PaymentGateway for InMemoryGateway {
    async fn submit(&self, payload: &SubmissionPayload) -> Result<GatewayResponse> {
        self.submissions.write().await.push(payload.clone());

        match self.scripted.get(&payload.customer_id) {
            Some(Scripted::Respond(response)) => Ok(response.clone()),
            Some(Scripted::Fail(reason)) => Err(NotifierError::IoError(io::Error::new(
                io::ErrorKind::ConnectionRefused,
                reason.clone(),
            ))),
            None => Ok(GatewayResponse::json(
                200,
                serde_json::json!({
                    "dry_run": true,
                    "idcliente": payload.customer_id,
                })
                .to_string(),
            )),
        }
    }
}
