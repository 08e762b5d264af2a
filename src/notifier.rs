//! Notifier
//!
//! Posts the packaged notification document to the configured endpoint.
//! The payload is static: it carries no detail from the upload stage
//! and the same bytes are sent on every invocation.

use bytes::Bytes;
use tracing::{debug, info};

use crate::pipeline::Notifier;
use crate::types::{Error, Result};

const NOTIFICATION_DOC: &str = include_str!("../notification.json");

/// The static document, parsed once at startup and serialized to a
/// fixed byte sequence. Its structure is opaque to the pipeline.
#[derive(Debug, Clone)]
pub struct NotificationPayload {
    bytes: Bytes,
}

impl NotificationPayload {
    /// Load the document packaged with the binary.
    pub fn packaged() -> Result<Self> {
        let value: serde_json::Value = serde_json::from_str(NOTIFICATION_DOC)
            .map_err(|e| Error::Config(format!("invalid notification document: {}", e)))?;
        Self::from_value(&value)
    }

    pub fn from_value(value: &serde_json::Value) -> Result<Self> {
        let bytes = serde_json::to_vec(value)
            .map_err(|e| Error::Config(format!("notification document not serializable: {}", e)))?;
        Ok(Self {
            bytes: Bytes::from(bytes),
        })
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }
}

pub struct HttpNotifier {
    client: reqwest::Client,
    api_url: String,
    payload: NotificationPayload,
}

impl HttpNotifier {
    pub fn new(api_url: String, payload: NotificationPayload) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_url,
            payload,
        }
    }
}

#[async_trait::async_trait]
impl Notifier for HttpNotifier {
    async fn notify(&self) -> Result<String> {
        debug!(url = %self.api_url, "sending notification");
        let response = self
            .client
            .post(&self.api_url)
            .header("Content-Type", "application/json")
            .body(self.payload.bytes.clone())
            .send()
            .await
            .map_err(|e| Error::Network(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| Error::Network(e.to_string()))?;

        if !status.is_success() {
            return Err(Error::Http {
                status: status.as_u16(),
                body,
            });
        }

        info!(%status, body = %body, "notification delivered");
        Ok(body)
    }
}
