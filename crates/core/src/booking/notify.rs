//! Fire-and-forget delivery of booking notifications

use std::sync::Arc;

use slotwise_domain::Event;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use super::ports::NotificationHook;

#[derive(Clone, Copy, Debug)]
enum Change {
    Confirmed,
    Cancelled,
}

/// Runs the configured hook on a background task so the booking call path
/// never waits on it.
#[derive(Clone, Default)]
pub struct NotificationDispatcher {
    hook: Option<Arc<dyn NotificationHook>>,
}

impl NotificationDispatcher {
    pub fn new(hook: Arc<dyn NotificationHook>) -> Self {
        Self { hook: Some(hook) }
    }

    pub fn disabled() -> Self {
        Self::default()
    }

    /// Returns the spawned task handle, or `None` when nothing was spawned.
    pub fn booking_confirmed(&self, event: Event) -> Option<JoinHandle<()>> {
        self.dispatch(Change::Confirmed, event)
    }

    pub fn booking_cancelled(&self, event: Event) -> Option<JoinHandle<()>> {
        self.dispatch(Change::Cancelled, event)
    }

    fn dispatch(&self, change: Change, event: Event) -> Option<JoinHandle<()>> {
        let hook = Arc::clone(self.hook.as_ref()?);
        let Ok(runtime) = Handle::try_current() else {
            warn!(event_id = %event.id, ?change, "no async runtime; notification dropped");
            return None;
        };

        Some(runtime.spawn(async move {
            let result = match change {
                Change::Confirmed => hook.on_booking_confirmed(&event).await,
                Change::Cancelled => hook.on_booking_cancelled(&event).await,
            };
            match result {
                Ok(()) => debug!(event_id = %event.id, ?change, "notification delivered"),
                Err(err) => warn!(
                    event_id = %event.id,
                    owner_id = %event.owner_id,
                    ?change,
                    error = %err,
                    "notification hook failed"
                ),
            }
        }))
    }
}
