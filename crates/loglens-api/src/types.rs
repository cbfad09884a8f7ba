//! Row types shared across endpoints.

use serde::{Deserialize, Serialize};

/// Filter sentinel meaning "no database filter".
///
/// The dashboard's database selector offers this as its first option; the
/// fetch layer drops the query parameter entirely when it is selected.
pub const ALL_DATABASES: &str = "All";

/// Execution time (milliseconds) above which a query is anomaly-flagged.
pub const ANOMALY_EXEC_TIME_MS: f64 = 500.0;

/// Execution count above which a query is anomaly-flagged.
pub const ANOMALY_EXE_COUNT: u64 = 100;

/// Role codes an administrator may assign on the user screen.
///
/// The admin role itself is deliberately absent: it cannot be granted
/// through the update form.
pub const ROLE_OPTIONS: [&str; 4] = ["R_LOGS_MANAGE", "R_MONITOR", "R_TEAMLEAD", "R_OPTI"];

/// Account statuses an administrator may assign.
pub const STATUS_OPTIONS: [&str; 3] = ["ACTIVE", "PENDING", "INACTIVE"];

/// One captured SQL statement with its aggregated execution stats.
///
/// Every field defaults when absent: the backend omits columns
/// inconsistently across the log, anomaly and hint listings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    /// Database the statement ran against.
    #[serde(default)]
    pub database_name: String,
    /// The SQL text.
    #[serde(default)]
    pub sql: String,
    /// Average execution time in milliseconds.
    #[serde(default)]
    pub exec_time: f64,
    /// Number of recorded executions.
    #[serde(default)]
    pub exe_count: u64,
}

impl LogEntry {
    /// Returns `true` when the entry crosses both anomaly thresholds:
    /// slower than [`ANOMALY_EXEC_TIME_MS`] *and* executed more than
    /// [`ANOMALY_EXE_COUNT`] times.
    #[must_use]
    pub fn is_anomalous(&self) -> bool {
        self.exec_time > ANOMALY_EXEC_TIME_MS && self.exe_count > ANOMALY_EXE_COUNT
    }

    /// Warning labels for each threshold the entry crosses, independent of
    /// the combined anomaly flag.
    #[must_use]
    pub fn warning_labels(&self) -> Vec<&'static str> {
        let mut labels = Vec::new();
        if self.exec_time > ANOMALY_EXEC_TIME_MS {
            labels.push("slow execution");
        }
        if self.exe_count > ANOMALY_EXE_COUNT {
            labels.push("high execution count");
        }
        labels
    }
}

/// A database known to the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatabaseInfo {
    /// Name used as the log filter value.
    #[serde(default)]
    pub database_name: String,
    /// Human-readable description.
    #[serde(default)]
    pub database_desc: String,
}

/// An optimization suggestion produced by the backend analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Suggestion {
    /// Backend identifier, echoed back when marking the suggestion done.
    #[serde(default)]
    pub id: u64,
    /// Database the suggestion applies to.
    #[serde(default)]
    pub database_name: String,
    /// The SQL statement the suggestion targets.
    #[serde(default)]
    pub sql: String,
    /// Suggestion text.
    #[serde(default)]
    pub suggestion: String,
}

/// A user record as seen on the administration screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminUser {
    /// Login name.
    #[serde(default)]
    pub username: String,
    /// Phone number.
    #[serde(default)]
    pub phone: String,
    /// Email address.
    #[serde(default)]
    pub email: String,
    /// Assigned role.
    #[serde(default)]
    pub role: String,
    /// Account status.
    #[serde(default)]
    pub status: String,
}
