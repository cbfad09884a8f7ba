//! Report summary and export endpoints.

use serde_json::json;

use loglens_core::{ClientError, ClientResult, Envelope};

use crate::client::ApiClient;

/// Export formats the backend can render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    /// Comma-separated values.
    Csv,
    /// Portable Document Format.
    Pdf,
}

impl ReportFormat {
    /// The wire spelling of the format.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Csv => "CSV",
            Self::Pdf => "PDF",
        }
    }
}

/// Aggregate counters shown on the report screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportSummary {
    /// Total number of captured log entries.
    pub total: u64,
    /// Number of anomaly-flagged queries.
    pub total_unexpected: u64,
    /// Number of optimization hints.
    pub total_hint: u64,
}

impl ApiClient {
    /// Fetch the aggregate report counters.
    ///
    /// # Errors
    ///
    /// Propagates transport and envelope errors.
    pub async fn report_summary(&self) -> ClientResult<ReportSummary> {
        let envelope = self.get_envelope("/create-report", &[]).await?;
        let envelope = self.check(envelope).await?;
        Ok(ReportSummary {
            total: envelope.u64_field("total").unwrap_or(0),
            total_unexpected: envelope.u64_field("totalUnexpected").unwrap_or(0),
            total_hint: envelope.u64_field("totalHint").unwrap_or(0),
        })
    }

    /// Export the report as a binary document in the given format.
    ///
    /// # Errors
    ///
    /// Propagates transport errors; a non-2xx response with a parseable
    /// envelope surfaces that envelope's error (including a canonical 401
    /// invalidating the session).
    pub async fn export_report(&self, format: ReportFormat) -> ClientResult<Vec<u8>> {
        let response = self
            .post_raw("/report", &json!({ "type": format.as_str() }))
            .await?;
        if response.is_http_success() {
            return Ok(response.body);
        }

        let status = response.status;
        let envelope = Envelope::from_value(response.json()?);
        self.check(envelope).await?;
        Err(ClientError::api(
            None,
            Some(format!("report export failed (HTTP {status})")),
        ))
    }
}
