//! Shared world state for room deadline triage BDD scenarios.

use std::sync::{Arc, RwLock};

use chrono::{DateTime, Local, Utc};
use mockable::Clock;
use rstest::fixture;
use taskmate::task::{adapters::memory::InMemoryTaskStore, domain::RoomName};
use taskmate::triage::services::{IngestReport, TriageError, TriageService, TriageView};

/// Clock whose instant can be set by a step.
#[derive(Debug, Clone, Default)]
pub struct ScenarioClock(Arc<RwLock<DateTime<Utc>>>);

impl ScenarioClock {
    /// Moves the clock to `instant`.
    pub fn set(&self, instant: DateTime<Utc>) {
        if let Ok(mut current) = self.0.write() {
            *current = instant;
        }
    }
}

impl Clock for ScenarioClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.0.read().map(|current| *current).unwrap_or_default()
    }
}

/// Service type used by the BDD world.
pub type TestTriageService = TriageService<InMemoryTaskStore, ScenarioClock>;

/// Scenario world for triage behaviour tests.
pub struct TriageWorld {
    pub store: Arc<InMemoryTaskStore>,
    pub clock: ScenarioClock,
    pub service: TestTriageService,
    pub room: Option<RoomName>,
    pub last_report: Option<IngestReport>,
    pub last_triage: Option<Result<TriageView, TriageError>>,
}

impl TriageWorld {
    /// Creates a world backed by an empty in-memory store.
    #[must_use]
    pub fn new() -> Self {
        let store = Arc::new(InMemoryTaskStore::new());
        let clock = ScenarioClock::default();
        let service = TriageService::new(Arc::clone(&store), Arc::new(clock.clone()));

        Self {
            store,
            clock,
            service,
            room: None,
            last_report: None,
            last_triage: None,
        }
    }

    /// Returns the scenario room.
    pub fn room(&self) -> Result<&RoomName, eyre::Report> {
        self.room
            .as_ref()
            .ok_or_else(|| eyre::eyre!("missing room in scenario world"))
    }

    /// Returns the most recent triage view.
    pub fn view(&self) -> Result<&TriageView, eyre::Report> {
        match self.last_triage.as_ref() {
            Some(Ok(view)) => Ok(view),
            Some(Err(err)) => Err(eyre::eyre!("triage failed: {err}")),
            None => Err(eyre::eyre!("room has not been triaged")),
        }
    }
}

impl Default for TriageWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> TriageWorld {
    TriageWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
