//! Seeds a room, scans a sample announcement and logs the resulting triage.
//!
//! Usage:
//!
//! ```text
//! taskmate-triage [room] [config-path]
//! ```
//!
//! `room` defaults to `demo-room`. When `config-path` is given, it must point
//! at a TOML document overriding the defaults in
//! [`taskmate::config::TriageConfig`]. Log verbosity follows `RUST_LOG` and
//! defaults to `info`.

use std::env;
use std::fs;
use std::sync::Arc;

use mockable::DefaultClock;
use taskmate::config::TriageConfig;
use taskmate::task::{adapters::memory::InMemoryTaskStore, domain::RoomName};
use taskmate::triage::{adapters::LoggingNotifier, services::TriageService};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Boxed error type for the main result.
type BoxError = Box<dyn std::error::Error + Send + Sync>;

const DEFAULT_ROOM: &str = "demo-room";

const SAMPLE_ANNOUNCEMENT: &str = "\
Reminder for this week:
- Quiz 3 on chapters 4-5 due by 2026-02-09 10:00
- Project proposal due 2026-02-20
Office hours move to Thursday.";

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let mut args = env::args().skip(1);
    let room = RoomName::new(args.next().unwrap_or_else(|| DEFAULT_ROOM.to_owned()))?;
    let config = match args.next() {
        Some(path) => TriageConfig::from_toml_str(&fs::read_to_string(path)?)?,
        None => TriageConfig::default(),
    };

    let service = TriageService::new(Arc::new(InMemoryTaskStore::new()), Arc::new(DefaultClock))
        .with_config(config)?
        .with_notifier(Arc::new(LoggingNotifier::new()));

    let seeded = service.seed_simulation(&room).await?;
    let scanned = service
        .ingest_text(&room, SAMPLE_ANNOUNCEMENT, "Software Engineering")
        .await?;
    info!(
        seeded = seeded.accepted.len(),
        scanned = scanned.accepted.len(),
        "room populated"
    );

    let view = service.triage(&room).await?;
    for entry in &view.tasks {
        let task = entry.task();
        info!(
            id = %task.id(),
            course = task.course_label(),
            urgency = %entry.urgency(),
            remaining = %entry.remaining(),
            countdown = entry.exam_countdown().unwrap_or(""),
            "{}",
            task.title()
        );
    }
    info!(room = %view.room, tasks = view.tasks.len(), "triage complete");
    Ok(())
}
