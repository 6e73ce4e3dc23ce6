use serde::{Serialize, Serializer};
use std::fmt;

/// Either the HTTP status returned by the remote API or `Error` when no
/// response could be obtained for the row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutcomeStatus {
    Http(u16),
    Error,
}

impl Serialize for OutcomeStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            OutcomeStatus::Http(code) => serializer.serialize_u16(*code),
            OutcomeStatus::Error => serializer.serialize_str("Error"),
        }
    }
}

impl fmt::Display for OutcomeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutcomeStatus::Http(code) => write!(f, "{code}"),
            OutcomeStatus::Error => f.write_str("Error"),
        }
    }
}

/// Decoded JSON body, raw response text, or an error description.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum OutcomeMessage {
    Json(serde_json::Value),
    Text(String),
}

impl fmt::Display for OutcomeMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutcomeMessage::Json(value) => write!(f, "{value}"),
            OutcomeMessage::Text(text) => f.write_str(text),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OutcomeEntry {
    #[serde(rename = "idcliente")]
    pub customer_id: String,
    pub status: OutcomeStatus,
    #[serde(rename = "mensaje")]
    pub message: OutcomeMessage,
}

impl OutcomeEntry {
    pub fn response(customer_id: &str, status: u16, message: OutcomeMessage) -> Self {
        Self {
            customer_id: customer_id.to_string(),
            status: OutcomeStatus::Http(status),
            message,
        }
    }

    pub fn error(customer_id: &str, cause: impl fmt::Display) -> Self {
        Self {
            customer_id: customer_id.to_string(),
            status: OutcomeStatus::Error,
            message: OutcomeMessage::Text(cause.to_string()),
        }
    }

    /// A 2xx answer from the remote API.
    pub fn is_accepted(&self) -> bool {
        matches!(self.status, OutcomeStatus::Http(code) if (200..300).contains(&code))
    }

    pub fn is_error(&self) -> bool {
        self.status == OutcomeStatus::Error
    }
}
