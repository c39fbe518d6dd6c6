//! Application services for deadline triage.

mod pipeline;

pub use pipeline::{
    IngestReport, TriageError, TriageFeed, TriageResult, TriageService, TriageView,
};
