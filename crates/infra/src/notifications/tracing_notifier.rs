use async_trait::async_trait;
use slotwise_core::NotificationHook;
use slotwise_domain::constants::{EVENT_BOOKING_CANCELLED, EVENT_BOOKING_CONFIRMED};
use slotwise_domain::{Event, Result};
use tracing::info;

/// Writes one structured log line per booking change.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

fn log_event(kind: &str, event: &Event) {
    info!(
        notification = kind,
        event_id = %event.id,
        owner_id = %event.owner_id,
        slot_start = %event.start_utc,
        slot_end = %event.end_utc,
        event_type_id = event.event_type_id.as_deref().unwrap_or("-"),
        "booking notification"
    );
}

#[async_trait]
impl NotificationHook for TracingNotifier {
    async fn on_booking_confirmed(&self, event: &Event) -> Result<()> {
        log_event(EVENT_BOOKING_CONFIRMED, event);
        Ok(())
    }

    async fn on_booking_cancelled(&self, event: &Event) -> Result<()> {
        log_event(EVENT_BOOKING_CANCELLED, event);
        Ok(())
    }
}
