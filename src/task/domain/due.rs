//! Due-time representation that survives unparsable external input.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Point in time a task is due.
///
/// Records read back from the external store may carry due text that never
/// resolved to an instant. Such values are kept verbatim so that validation
/// can reject them and scheduling can mark them instead of miscomparing.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DueInstant {
    /// A valid, timezone-normalised instant.
    Resolved(DateTime<Utc>),
    /// Raw due text that could not be parsed.
    Unresolved(String),
}

impl DueInstant {
    /// Parses an RFC 3339 timestamp, normalising any offset to UTC.
    ///
    /// Unparsable text yields [`DueInstant::Unresolved`] rather than an
    /// error.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        DateTime::parse_from_rfc3339(raw.trim()).map_or_else(
            |_| Self::Unresolved(raw.to_owned()),
            |parsed| Self::Resolved(parsed.with_timezone(&Utc)),
        )
    }

    /// Returns the resolved instant, if any.
    #[must_use]
    pub const fn instant(&self) -> Option<DateTime<Utc>> {
        match self {
            Self::Resolved(instant) => Some(*instant),
            Self::Unresolved(_) => None,
        }
    }

    /// Returns `true` when the due time resolved to an instant.
    #[must_use]
    pub const fn is_resolved(&self) -> bool {
        matches!(self, Self::Resolved(_))
    }
}

impl From<DateTime<Utc>> for DueInstant {
    fn from(instant: DateTime<Utc>) -> Self {
        Self::Resolved(instant)
    }
}

impl fmt::Display for DueInstant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Resolved(instant) => {
                write!(f, "{}", instant.to_rfc3339_opts(SecondsFormat::Millis, true))
            }
            Self::Unresolved(raw) => write!(f, "{raw}"),
        }
    }
}

impl Serialize for DueInstant {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for DueInstant {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(Self::parse(&raw))
    }
}
