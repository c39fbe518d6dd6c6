//! Notifier that records notices in memory for inspection.

use crate::triage::ports::{DeadlineNotice, DeadlineNotifier, NotifyError, NotifyResult};
use async_trait::async_trait;
use std::sync::{Arc, Mutex};

/// Thread-safe notifier that keeps every delivered notice.
#[derive(Debug, Clone, Default)]
pub struct RecordingNotifier {
    notices: Arc<Mutex<Vec<DeadlineNotice>>>,
}

impl RecordingNotifier {
    /// Creates a notifier with no recorded notices.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of the notices delivered so far.
    ///
    /// A poisoned lock yields an empty list.
    #[must_use]
    pub fn notices(&self) -> Vec<DeadlineNotice> {
        self.notices
            .lock()
            .map(|notices| notices.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl DeadlineNotifier for RecordingNotifier {
    async fn notify(&self, notice: &DeadlineNotice) -> NotifyResult<()> {
        let mut notices = self
            .notices
            .lock()
            .map_err(|err| NotifyError::Delivery(err.to_string()))?;
        notices.push(notice.clone());
        Ok(())
    }
}
