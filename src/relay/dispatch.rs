//! Alert delivery to the configured webhook.
//!
//! # Responsibilities
//! - Post matched-alert payloads as JSON to the alert webhook, if one is set
//! - Keep delivery failures out of the ingest path (log and move on)

use std::time::Duration;

use crate::config::AlertConfig;
use crate::matching::AlertPayload;
use crate::observability::metrics;

/// Fire-and-forget alert sink.
pub struct AlertDispatcher {
    client: reqwest::Client,
    webhook_url: Option<String>,
}

impl AlertDispatcher {
    pub fn new(config: &AlertConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.dispatch_timeout_secs))
            .build()
            .unwrap_or_default();
        Self {
            client,
            webhook_url: config.webhook_url.clone(),
        }
    }

    /// Deliver one alert. Does nothing when no webhook is configured.
    pub async fn dispatch(&self, alert: &AlertPayload) {
        let Some(url) = &self.webhook_url else {
            return;
        };

        match self.client.post(url).json(alert).send().await {
            Ok(response) if response.status().is_success() => {
                metrics::record_alert_delivery("ok");
                tracing::debug!(
                    keyword = %alert.keyword,
                    destination = %alert.destination,
                    "Alert delivered"
                );
            }
            Ok(response) => {
                metrics::record_alert_delivery("rejected");
                tracing::warn!(
                    status = %response.status(),
                    destination = %alert.destination,
                    "Alert webhook returned non-success status"
                );
            }
            Err(e) => {
                metrics::record_alert_delivery("failed");
                tracing::warn!(error = %e, "Alert delivery failed");
            }
        }
    }
}
