//! Service layer composing intake, reconciliation and scheduling.

use crate::config::{ConfigError, TriageConfig};
use crate::intake::{ExternalRecord, IntakeError, normalize_structured, normalize_text, seed_simulated};
use crate::task::{
    domain::{RoomName, Task, TaskId},
    ports::{RoomSubscription, TaskStore, TaskStoreError},
};
use crate::triage::{
    Rejection, ScheduledTask, UrgencyClass,
    ports::{DeadlineNotice, DeadlineNotifier},
    reconcile, schedule, split_foreign,
};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::Serialize;
use std::collections::BTreeSet;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info, instrument, warn};

/// Service-level errors for triage operations.
#[derive(Debug, Error)]
pub enum TriageError {
    /// The task store failed; [`TaskStoreError::Unavailable`] is the
    /// "no data" state presentation layers should render.
    #[error(transparent)]
    Store(#[from] TaskStoreError),
    /// The supplied configuration is inconsistent.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Result type for triage service operations.
pub type TriageResult<T> = Result<T, TriageError>;

/// Diagnostics for one intake run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IngestReport {
    /// Identifiers merged into the room, in incoming order.
    pub accepted: Vec<TaskId>,
    /// Records the normaliser could not convert.
    pub malformed: Vec<IntakeError>,
    /// Tasks dropped by the room or structural checks.
    pub rejected: Vec<Rejection>,
    /// Identifiers dropped because they were already known.
    pub duplicates: Vec<TaskId>,
}

/// Ranked, classified view of one room at one instant.
///
/// Each view fully replaces any previous one.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TriageView {
    /// Room the view was computed for.
    pub room: RoomName,
    /// Reference instant used for scheduling.
    pub computed_at: DateTime<Utc>,
    /// Scheduled tasks, most urgent first.
    pub tasks: Vec<ScheduledTask>,
}

impl TriageView {
    /// Counts the tasks in an urgency band.
    #[must_use]
    pub fn count(&self, urgency: UrgencyClass) -> usize {
        self.tasks
            .iter()
            .filter(|entry| entry.urgency() == urgency)
            .count()
    }

    /// Returns `true` when the room has no tasks.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}

/// Handle to a running triage feed.
///
/// The feed republishes a fresh [`TriageView`] every time the room's task set
/// changes. It stops once the handle and every receiver obtained from
/// [`TriageFeed::subscribe`] have been dropped.
#[derive(Debug)]
pub struct TriageFeed {
    views: watch::Receiver<Option<TriageView>>,
    handle: JoinHandle<()>,
}

impl TriageFeed {
    /// Returns the most recent view, if one has been published.
    #[must_use]
    pub fn latest(&self) -> Option<TriageView> {
        self.views.borrow().clone()
    }

    /// Waits for the next published view.
    ///
    /// Returns `None` once the feed has stopped.
    pub async fn next_view(&mut self) -> Option<TriageView> {
        self.views.changed().await.ok()?;
        self.views.borrow_and_update().clone()
    }

    /// Returns a receiver for consumers that prefer the raw channel.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Option<TriageView>> {
        self.views.clone()
    }

    /// Stops the feed immediately.
    pub fn abort(&self) {
        self.handle.abort();
    }
}

/// Triage orchestration service for a room-keyed task store.
pub struct TriageService<S, C>
where
    S: TaskStore,
    C: Clock + Send + Sync,
{
    store: Arc<S>,
    clock: Arc<C>,
    notifier: Option<Arc<dyn DeadlineNotifier>>,
    config: TriageConfig,
}

impl<S, C> Clone for TriageService<S, C>
where
    S: TaskStore,
    C: Clock + Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            clock: Arc::clone(&self.clock),
            notifier: self.notifier.clone(),
            config: self.config.clone(),
        }
    }
}

impl<S, C> TriageService<S, C>
where
    S: TaskStore,
    C: Clock + Send + Sync,
{
    /// Creates a service with the default configuration and no notifier.
    #[must_use]
    pub fn new(store: Arc<S>, clock: Arc<C>) -> Self {
        Self {
            store,
            clock,
            notifier: None,
            config: TriageConfig::default(),
        }
    }

    /// Replaces the configuration after validating it.
    ///
    /// # Errors
    ///
    /// Returns [`TriageError::Config`] when the configuration is
    /// inconsistent.
    pub fn with_config(mut self, config: TriageConfig) -> TriageResult<Self> {
        config.validate()?;
        self.config = config;
        Ok(self)
    }

    /// Attaches a notifier for critical-deadline notices.
    #[must_use]
    pub fn with_notifier(mut self, notifier: Arc<dyn DeadlineNotifier>) -> Self {
        self.notifier = Some(notifier);
        self
    }

    /// Returns the active configuration.
    #[must_use]
    pub const fn config(&self) -> &TriageConfig {
        &self.config
    }

    /// Normalises structured records and merges the new ones into `room`.
    ///
    /// # Errors
    ///
    /// Returns [`TriageError::Store`] when the known set cannot be fetched or
    /// the merge fails. Malformed records are reported, not raised.
    #[instrument(skip_all, fields(room = %room, records = records.len()))]
    pub async fn ingest_records(
        &self,
        room: &RoomName,
        records: &[ExternalRecord],
    ) -> TriageResult<IngestReport> {
        let normalized = normalize_structured(records, &self.config.intake, &*self.clock);
        self.admit(room, normalized.tasks, normalized.rejected).await
    }

    /// Scans free-form text for task mentions and merges the new ones.
    ///
    /// # Errors
    ///
    /// Returns [`TriageError::Store`] when the known set cannot be fetched or
    /// the merge fails.
    #[instrument(skip_all, fields(room = %room, course = course_label))]
    pub async fn ingest_text(
        &self,
        room: &RoomName,
        raw_text: &str,
        course_label: &str,
    ) -> TriageResult<IngestReport> {
        let tasks = normalize_text(raw_text, course_label, &self.config.intake, &*self.clock);
        self.admit(room, tasks, Vec::new()).await
    }

    /// Seeds `room` with the simulation task set anchored at the current time.
    ///
    /// Seeding twice is harmless: the second run finds every identifier
    /// already known.
    ///
    /// # Errors
    ///
    /// Returns [`TriageError::Store`] when the store rejects the operation.
    #[instrument(skip_all, fields(room = %room))]
    pub async fn seed_simulation(&self, room: &RoomName) -> TriageResult<IngestReport> {
        let tasks = seed_simulated(room, self.clock.utc());
        self.admit(room, tasks, Vec::new()).await
    }

    /// Computes the current triage view for `room`.
    ///
    /// A notice is dispatched when the view contains critical tasks.
    ///
    /// # Errors
    ///
    /// Returns [`TriageError::Store`] when the room cannot be fetched.
    #[instrument(skip_all, fields(room = %room))]
    pub async fn triage(&self, room: &RoomName) -> TriageResult<TriageView> {
        let tasks = self.store.fetch_room(room).await?;
        let view = self.build_view(room, tasks);
        self.dispatch(&view).await;
        Ok(view)
    }

    async fn admit(
        &self,
        room: &RoomName,
        tasks: Vec<Task>,
        malformed: Vec<IntakeError>,
    ) -> TriageResult<IngestReport> {
        let known = self.store.fetch_room(room).await?;
        let (local, mut rejected) = split_foreign(tasks, room);
        let (accepted, invalid, duplicates) = reconcile(local, &known).into_parts();
        rejected.extend(invalid);
        let accepted_ids: Vec<TaskId> = accepted.iter().map(|task| task.id().clone()).collect();

        if !accepted.is_empty() {
            self.store.merge(room, accepted).await?;
        }

        info!(
            accepted = accepted_ids.len(),
            malformed = malformed.len(),
            rejected = rejected.len(),
            duplicates = duplicates.len(),
            "intake complete"
        );
        Ok(IngestReport {
            accepted: accepted_ids,
            malformed,
            rejected,
            duplicates,
        })
    }

    fn build_view(&self, room: &RoomName, tasks: Vec<Task>) -> TriageView {
        let computed_at = self.clock.utc();
        let view = TriageView {
            room: room.clone(),
            computed_at,
            tasks: schedule(tasks, computed_at, &self.config.scheduler),
        };
        debug!(
            tasks = view.tasks.len(),
            critical = view.count(UrgencyClass::Critical),
            "computed triage view"
        );
        view
    }

    async fn dispatch(&self, view: &TriageView) {
        let Some(notifier) = self.notifier.as_ref() else {
            return;
        };
        let Some(notice) = DeadlineNotice::from_scheduled(&view.room, view.computed_at, &view.tasks)
        else {
            return;
        };
        if let Err(err) = notifier.notify(&notice).await {
            warn!(room = %view.room, error = %err, "failed to dispatch deadline notice");
        }
    }
}

impl<S, C> TriageService<S, C>
where
    S: TaskStore + 'static,
    C: Clock + Send + Sync + 'static,
{
    /// Starts a feed that recomputes the view on every change to `room`.
    ///
    /// The current task set is published immediately. A notice goes out
    /// whenever the set of critical tasks changes to a non-empty one. The
    /// feed stops when the store closes the room or every view receiver is
    /// dropped.
    ///
    /// # Errors
    ///
    /// Returns [`TriageError::Store`] when the subscription cannot be opened.
    pub async fn spawn_feed(&self, room: RoomName) -> TriageResult<TriageFeed> {
        let subscription = self.store.subscribe(&room).await?;
        let (publisher, views) = watch::channel(None);
        let service = self.clone();
        let handle = tokio::spawn(async move {
            service.publish_views(room, subscription, publisher).await;
        });
        Ok(TriageFeed { views, handle })
    }

    async fn publish_views(
        &self,
        room: RoomName,
        mut subscription: RoomSubscription,
        publisher: watch::Sender<Option<TriageView>>,
    ) {
        let mut notified: BTreeSet<TaskId> = BTreeSet::new();
        loop {
            let snapshot = subscription.borrow_and_update().clone();
            let view = self.build_view(&room, snapshot);
            let critical = critical_ids(&view);
            if critical != notified {
                if !critical.is_empty() {
                    self.dispatch(&view).await;
                }
                notified = critical;
            }
            if publisher.send(Some(view)).is_err() {
                debug!(%room, "all triage receivers dropped, stopping feed");
                break;
            }
            tokio::select! {
                changed = subscription.changed() => {
                    if changed.is_err() {
                        info!(%room, "room subscription closed, stopping feed");
                        break;
                    }
                }
                () = publisher.closed() => {
                    debug!(%room, "all triage receivers dropped, stopping feed");
                    break;
                }
            }
        }
    }
}

fn critical_ids(view: &TriageView) -> BTreeSet<TaskId> {
    view.tasks
        .iter()
        .filter(|entry| entry.urgency() == UrgencyClass::Critical)
        .map(|entry| entry.task().id().clone())
        .collect()
}
