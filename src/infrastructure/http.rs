use crate::config::DispatchConfig;
use crate::domain::payload::SubmissionPayload;
use crate::domain::ports::{GatewayResponse, PaymentGateway};
use crate::error::Result;
use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;

/// Posts submissions as JSON to the configured payment registration endpoint.
#[derive(Debug, Clone)]
pub struct HttpPaymentGateway {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpPaymentGateway {
    /// Builds the client. Without a configured timeout the client defaults apply.
    pub fn new(config: &DispatchConfig) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            endpoint: config.endpoint().to_string(),
        })
    }
}

#[async_trait]
impl PaymentGateway for HttpPaymentGateway {
    async fn submit(&self, payload: &SubmissionPayload) -> Result<GatewayResponse> {
        let response = self
            .client
            .post(&self.endpoint)
            .header(CONTENT_TYPE, "application/json")
            .json(payload)
            .send()
            .await?;

        let status = response.status().as_u16();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);
        let body = response.text().await?;

        Ok(GatewayResponse {
            status,
            content_type,
            body,
        })
    }
}
