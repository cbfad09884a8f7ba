//! Canonical response envelope.
//!
//! The backend family behind the dashboard emits two incompatible spellings
//! of its status/error fields — `errorCode`/`errorDesc` on some endpoints,
//! `errorcode`/`errordes` on others. [`Envelope::from_value`] normalizes
//! both into one canonical shape at the fetch boundary so no downstream
//! code ever branches on field naming.

use serde_json::Value;
use tracing::debug;

/// Canonical backend status code meaning success.
pub const STATUS_OK: u16 = 200;

/// Canonical error code for an invalidated session.
pub const CODE_SESSION_INVALID: &str = "401";

/// Canonical error code for an empty result (not a failure).
pub const CODE_NOT_FOUND: &str = "404";

/// The unified `{status, error_code, error_desc}` shape, plus the raw body
/// for payload extraction.
#[derive(Debug, Clone)]
pub struct Envelope {
    /// Application-level status. `None` when the body carried no
    /// recognizable `status` field.
    pub status: Option<u16>,
    /// Canonical error code (from `errorCode` or `errorcode`).
    pub error_code: Option<String>,
    /// Canonical error description (from `errorDesc` or `errordes`).
    pub error_desc: Option<String>,
    body: Value,
}

impl Envelope {
    /// Normalize a parsed response body into the canonical envelope.
    #[must_use]
    pub fn from_value(body: Value) -> Self {
        let status = body
            .get("status")
            .and_then(Value::as_u64)
            .and_then(|s| u16::try_from(s).ok());
        let error_code = string_field(&body, &["errorCode", "errorcode"]);
        let error_desc = string_field(&body, &["errorDesc", "errordes", "errordesc"]);

        if status != Some(STATUS_OK) {
            debug!(?status, ?error_code, "normalized non-success envelope");
        }

        Self {
            status,
            error_code,
            error_desc,
            body,
        }
    }

    /// Returns `true` if the canonical status is 200.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status == Some(STATUS_OK)
    }

    /// Returns `true` if the canonical error code signals an invalid session.
    #[must_use]
    pub fn is_session_invalid(&self) -> bool {
        self.error_code.as_deref() == Some(CODE_SESSION_INVALID)
    }

    /// Returns `true` if the canonical error code signals an empty result.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        self.error_code.as_deref() == Some(CODE_NOT_FOUND)
    }

    /// Extract the list payload defensively.
    ///
    /// Tries each candidate field name in order and returns the first that
    /// is actually an array. An absent field, or a field that is not a
    /// sequence, yields an empty list rather than an error — the backend is
    /// not consistent about which key carries the payload (`data`,
    /// `listLog`, `listUser`) or whether it is present at all on empty
    /// results.
    #[must_use]
    pub fn list(&self, fields: &[&str]) -> Vec<Value> {
        for field in fields {
            if let Some(Value::Array(items)) = self.body.get(field) {
                return items.clone();
            }
        }
        Vec::new()
    }

    /// Extract and decode the list payload into typed rows.
    ///
    /// Rows that fail to decode are skipped with a debug trace instead of
    /// failing the whole page.
    #[must_use]
    pub fn decode_list<T: serde::de::DeserializeOwned>(&self, fields: &[&str]) -> Vec<T> {
        self.list(fields)
            .into_iter()
            .filter_map(|item| match serde_json::from_value(item) {
                Ok(row) => Some(row),
                Err(err) => {
                    debug!(%err, "skipping undecodable row");
                    None
                },
            })
            .collect()
    }

    /// Total page count reported by a paginated endpoint, defaulting to 0.
    #[must_use]
    pub fn total_pages(&self) -> u32 {
        self.u64_field("totalPages")
            .and_then(|n| u32::try_from(n).ok())
            .unwrap_or(0)
    }

    /// Total element count reported by a paginated endpoint, defaulting to 0.
    #[must_use]
    pub fn total_elements(&self) -> u64 {
        self.u64_field("totalElements").unwrap_or(0)
    }

    /// Optional informational message attached to the response.
    #[must_use]
    pub fn message(&self) -> Option<String> {
        string_field(&self.body, &["message"])
    }

    /// A named field of the body, when it is a non-negative integer.
    #[must_use]
    pub fn u64_field(&self, field: &str) -> Option<u64> {
        self.body.get(field).and_then(Value::as_u64)
    }

    /// The raw body, for callers that need a shape this type doesn't model.
    #[must_use]
    pub fn body(&self) -> &Value {
        &self.body
    }
}

fn string_field(body: &Value, names: &[&str]) -> Option<String> {
    names
        .iter()
        .find_map(|name| body.get(*name))
        .and_then(Value::as_str)
        .map(ToOwned::to_owned)
}
