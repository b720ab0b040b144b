//! Notification hook implementations
//!
//! Hooks run after a booking change has been committed. The dispatcher in
//! `slotwise-core` spawns them, so nothing here is on the booking path.

pub mod fanout;
pub mod tracing_notifier;
pub mod webhook;

use std::sync::Arc;

pub use fanout::FanoutNotifier;
use slotwise_core::NotificationHook;
use slotwise_domain::{NotificationConfig, Result};
pub use tracing_notifier::TracingNotifier;
pub use webhook::WebhookNotifier;

/// Builds the hook chain for a configuration: always a tracing hook, plus a
/// webhook when one is configured.
pub fn notifier_from_config(config: &NotificationConfig) -> Result<Arc<dyn NotificationHook>> {
    let mut fanout = FanoutNotifier::new().with_hook(Arc::new(TracingNotifier));

    if let Some(url) = config.webhook_url.as_deref() {
        fanout = fanout.with_hook(Arc::new(WebhookNotifier::from_config(url, config)?));
    }

    Ok(Arc::new(fanout))
}
