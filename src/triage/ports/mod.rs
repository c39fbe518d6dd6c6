//! Port contracts for triage collaborators.

pub mod notifier;

pub use notifier::{DeadlineNotice, DeadlineNotifier, NoticeEntry, NotifyError, NotifyResult};
