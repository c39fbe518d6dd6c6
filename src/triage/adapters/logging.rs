//! Notifier that emits deadline notices as structured log events.

use crate::triage::ports::{DeadlineNotice, DeadlineNotifier, NotifyResult};
use async_trait::async_trait;
use tracing::info;

/// Writes each notice to the `tracing` pipeline with its JSON payload.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingNotifier;

impl LoggingNotifier {
    /// Creates a logging notifier.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

#[async_trait]
impl DeadlineNotifier for LoggingNotifier {
    async fn notify(&self, notice: &DeadlineNotice) -> NotifyResult<()> {
        let payload = serde_json::to_string(notice)?;
        info!(
            room = %notice.room,
            critical = notice.critical.len(),
            %payload,
            "{}",
            notice.message()
        );
        Ok(())
    }
}
