//! Log, anomaly and hint listing endpoints.
//!
//! All three share the paginated envelope shape and therefore the same
//! fetch path, fallback included. The list payload key varies by endpoint
//! generation, so each lookup tries the known spellings in order.

use loglens_core::{ClientResult, PageResult};

use crate::client::ApiClient;
use crate::types::{ALL_DATABASES, LogEntry};

const LIST_FIELDS: &[&str] = &["listLog", "data"];

impl ApiClient {
    /// Fetch one page of activity logs, optionally filtered by database.
    ///
    /// Passing `None`, an empty string, or the [`ALL_DATABASES`] sentinel
    /// fetches across all databases.
    ///
    /// # Errors
    ///
    /// Propagates the fetch protocol's errors; see
    /// [`ClientError`](loglens_core::ClientError).
    pub async fn logs(
        &self,
        database: Option<&str>,
        page: u32,
        size: u32,
    ) -> ClientResult<PageResult<LogEntry>> {
        self.fetch_page("/log", database_filter(database), page, size, LIST_FIELDS)
            .await
    }

    /// Fetch one page of anomaly-flagged queries.
    ///
    /// # Errors
    ///
    /// Propagates the fetch protocol's errors.
    pub async fn anomalies(&self, page: u32, size: u32) -> ClientResult<PageResult<LogEntry>> {
        self.fetch_page("/query-unexpected", None, page, size, LIST_FIELDS)
            .await
    }

    /// Fetch one page of optimization hints.
    ///
    /// # Errors
    ///
    /// Propagates the fetch protocol's errors.
    pub async fn hints(&self, page: u32, size: u32) -> ClientResult<PageResult<LogEntry>> {
        self.fetch_page("/log-hint", None, page, size, LIST_FIELDS)
            .await
    }
}

/// Map the UI's database selection to the query parameter, dropping the
/// "no filter" spellings entirely.
fn database_filter(database: Option<&str>) -> Option<(&str, &str)> {
    match database {
        Some(db) if !db.is_empty() && !db.eq_ignore_ascii_case(ALL_DATABASES) => {
            Some(("database", db))
        },
        _ => None,
    }
}
