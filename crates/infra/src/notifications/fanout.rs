use std::sync::Arc;

use async_trait::async_trait;
use futures::future::join_all;
use slotwise_core::NotificationHook;
use slotwise_domain::{Event, Result, SlotwiseError};
use tracing::warn;

/// Runs every registered hook concurrently.
///
/// A failing hook is logged and does not stop the others. The combined call
/// fails only when at least one hook failed, reporting how many.
#[derive(Default, Clone)]
pub struct FanoutNotifier {
    hooks: Vec<Arc<dyn NotificationHook>>,
}

impl FanoutNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_hook(mut self, hook: Arc<dyn NotificationHook>) -> Self {
        self.hooks.push(hook);
        self
    }

    pub fn len(&self) -> usize {
        self.hooks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hooks.is_empty()
    }
}

fn summarize(kind: &str, results: Vec<Result<()>>) -> Result<()> {
    let failures = results
        .into_iter()
        .filter_map(|result| result.err())
        .inspect(|err| warn!(notification = kind, error = %err, "notification hook failed"))
        .count();

    if failures == 0 {
        Ok(())
    } else {
        Err(SlotwiseError::Internal(format!("{failures} notification hook(s) failed")))
    }
}

#[async_trait]
impl NotificationHook for FanoutNotifier {
    async fn on_booking_confirmed(&self, event: &Event) -> Result<()> {
        let results = join_all(self.hooks.iter().map(|hook| hook.on_booking_confirmed(event))).await;
        summarize("confirmed", results)
    }

    async fn on_booking_cancelled(&self, event: &Event) -> Result<()> {
        let results = join_all(self.hooks.iter().map(|hook| hook.on_booking_cancelled(event))).await;
        summarize("cancelled", results)
    }
}
