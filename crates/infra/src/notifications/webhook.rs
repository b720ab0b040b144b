//! JSON webhook posted on every booking change.
//!
//! Body shape: `{"event": "booking.confirmed", "booking": {..event..}}`.

use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;
use slotwise_core::NotificationHook;
use slotwise_domain::constants::{EVENT_BOOKING_CANCELLED, EVENT_BOOKING_CONFIRMED};
use slotwise_domain::{Event, NotificationConfig, Result};
use tracing::{debug, instrument};

use crate::http::HttpClient;

#[derive(Debug, Serialize)]
struct WebhookPayload<'a> {
    event: &'a str,
    booking: &'a Event,
}

#[derive(Debug, Clone)]
pub struct WebhookNotifier {
    client: HttpClient,
    url: String,
}

impl WebhookNotifier {
    pub fn new(client: HttpClient, url: impl Into<String>) -> Self {
        Self { client, url: url.into() }
    }

    pub fn from_config(url: &str, config: &NotificationConfig) -> Result<Self> {
        let client = HttpClient::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .max_attempts(config.max_attempts)
            .build()?;
        Ok(Self::new(client, url))
    }

    #[instrument(skip(self, booking), fields(event_id = %booking.id))]
    async fn deliver(&self, event: &str, booking: &Event) -> Result<()> {
        let payload = WebhookPayload { event, booking };
        let response = self.client.post_json(&self.url, &payload).await?;
        debug!(status = %response.status(), "webhook delivered");
        Ok(())
    }
}

#[async_trait]
impl NotificationHook for WebhookNotifier {
    async fn on_booking_confirmed(&self, event: &Event) -> Result<()> {
        self.deliver(EVENT_BOOKING_CONFIRMED, event).await
    }

    async fn on_booking_cancelled(&self, event: &Event) -> Result<()> {
        self.deliver(EVENT_BOOKING_CANCELLED, event).await
    }
}
