//! Best-effort webhook delivery.

use crate::detect::ChangeEvent;
use crate::error::{Result, WatchError};
use crate::notify::{DISPLAY_FORMAT, display_zone};
use futures::future::join_all;
use reqwest::Client;
use tracing::{debug, warn};

/// Delivers change notifications to every configured webhook endpoint.
///
/// Delivery is fire-and-forget per endpoint: each POST is attempted exactly
/// once, failures are logged, and one endpoint's failure never blocks or
/// fails delivery to the others.
pub struct WebhookNotifier {
    client: Client,
    endpoints: Vec<String>,
}

impl WebhookNotifier {
    /// Create a notifier over the given client and endpoint list.
    pub fn new(client: Client, endpoints: Vec<String>) -> Self {
        Self { client, endpoints }
    }

    /// The configured endpoints.
    pub fn endpoints(&self) -> &[String] {
        &self.endpoints
    }

    /// Build the notification text for an event.
    ///
    /// A fixed header, the detection time in UTC+9, and the watched URL:
    /// `Modify detected!\n2021/06/01 12:00\nhttps://…`.
    pub fn format_message(event: &ChangeEvent) -> String {
        format!(
            "Modify detected!\n{}\n{}",
            event
                .detected_at
                .with_timezone(&display_zone())
                .format(DISPLAY_FORMAT),
            event.target
        )
    }

    /// Fan a change event out to every endpoint concurrently.
    ///
    /// Completes once every delivery has succeeded or failed; per-endpoint
    /// failures terminate in a log line and are never propagated.
    pub async fn notify(&self, event: &ChangeEvent) {
        let message = Self::format_message(event);
        let deliveries = self
            .endpoints
            .iter()
            .map(|endpoint| self.deliver(endpoint, &message));

        for (endpoint, result) in self.endpoints.iter().zip(join_all(deliveries).await) {
            match result {
                Ok(()) => debug!("Delivered notification to {endpoint}"),
                Err(e) => warn!("Failed to POST {endpoint}: {e}"),
            }
        }
    }

    /// POST the message to one endpoint as `{"content": "<message>"}`.
    async fn deliver(&self, endpoint: &str, message: &str) -> Result<()> {
        let response = self
            .client
            .post(endpoint)
            .json(&serde_json::json!({ "content": message }))
            .send()
            .await
            .map_err(|e| WatchError::DeliveryError(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(WatchError::DeliveryError(format!(
                "status {status} from {endpoint}"
            )));
        }
        Ok(())
    }
}
