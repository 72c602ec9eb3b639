//! Warning sink for anomalies recovered while rendering
//!
//! Nothing on the render path fails. Missing or unusable status codes and
//! colliding extension keys are repaired in place and reported here instead.

use std::fmt;

use parking_lot::Mutex;

/// Log target used by [`TracingLog`].
pub const LOG_TARGET: &str = "problem_details";

/// Anomalies recovered locally while normalizing or encoding.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum Anomaly {
    /// The document carries no `status`; 500 is applied.
    MissingStatus,
    /// An extension key shadows a standard field; the standard field wins.
    ExtensionFieldCollision { key: String },
    /// The document's `status` is not a usable HTTP status; 500 is applied.
    InvalidStatus { status: String },
}

impl fmt::Display for Anomaly {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingStatus => f.write_str("response status not defined; applying 500"),
            Self::ExtensionFieldCollision { key } => {
                write!(f, "extensions should not contain key '{key}'")
            }
            Self::InvalidStatus { status } => {
                write!(
                    f,
                    "response status {status} is not a valid HTTP status; applying 500"
                )
            }
        }
    }
}

/// Destination for warning-level anomaly reports.
pub trait ProblemLog: Send + Sync {
    fn warn(&self, anomaly: &Anomaly);
}

/// Default sink: forwards every anomaly to `tracing` at WARN level.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLog;

impl ProblemLog for TracingLog {
    fn warn(&self, anomaly: &Anomaly) {
        match anomaly {
            Anomaly::MissingStatus => tracing::warn!(target: LOG_TARGET, "{anomaly}"),
            Anomaly::ExtensionFieldCollision { key } => {
                tracing::warn!(target: LOG_TARGET, key = %key, "{anomaly}");
            }
            Anomaly::InvalidStatus { status } => {
                tracing::warn!(target: LOG_TARGET, status = %status, "{anomaly}");
            }
        }
    }
}

/// In-memory sink that records anomalies for later inspection.
#[derive(Debug, Default)]
pub struct MemoryLog {
    entries: Mutex<Vec<Anomaly>>,
}

impl MemoryLog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn entries(&self) -> Vec<Anomaly> {
        self.entries.lock().clone()
    }

    /// Rendered messages, in emission order.
    #[must_use]
    pub fn messages(&self) -> Vec<String> {
        self.entries.lock().iter().map(ToString::to_string).collect()
    }

    pub fn clear(&self) {
        self.entries.lock().clear();
    }
}

impl ProblemLog for MemoryLog {
    fn warn(&self, anomaly: &Anomaly) {
        self.entries.lock().push(anomaly.clone());
    }
}
