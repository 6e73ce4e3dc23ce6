use super::payload::SubmissionPayload;
use crate::error::Result;
use async_trait::async_trait;
use std::sync::Arc;

/// What the remote API answered, before any interpretation of the body.
#[derive(Debug, Clone, PartialEq)]
pub struct GatewayResponse {
    pub status: u16,
    pub content_type: Option<String>,
    pub body: String,
}

impl GatewayResponse {
    pub fn json(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            content_type: Some("application/json".to_string()),
            body: body.into(),
        }
    }

    pub fn text(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            content_type: Some("text/plain; charset=utf-8".to_string()),
            body: body.into(),
        }
    }
}

#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Performs exactly one submission. Transport failures are returned as errors.
    async fn submit(&self, payload: &SubmissionPayload) -> Result<GatewayResponse>;
}

pub type PaymentGatewayRef = Arc<dyn PaymentGateway>;
