#![deny(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]
//! Typed client for the SQL log-analysis backend.
//!
//! [`ApiClient`] wraps a [`Transport`](loglens_core::Transport) and the
//! session manager, speaks the backend's envelope conventions, and exposes
//! one method per endpoint. List endpoints go through the resilient
//! paginated fetch: a transport-level failure triggers exactly one retry
//! against the non-paginated variant of the same resource, and the
//! inconsistent error-field spellings are normalized before any caller
//! logic runs.
//!
//! A canonical 401 anywhere forces the session back to anonymous through
//! the shared [`SessionManager`](loglens_session::SessionManager); a
//! canonical 404 is an empty result with a notice, never an error.

/// Administrative user management endpoints.
pub mod admin;
/// Database catalog and optimization suggestion endpoints.
pub mod catalog;
/// The API client and the paginated fetch protocol.
pub mod client;
/// Log, anomaly and hint listing endpoints.
pub mod logs;
/// Client-side page state and the request-sequence discard rule.
pub mod pager;
/// Account registration.
pub mod register;
/// Report summary and export endpoints.
pub mod report;
/// Row types shared across endpoints.
pub mod types;

pub use client::ApiClient;
pub use pager::{FetchTicket, Pager};
pub use register::RegisterRequest;
pub use report::{ReportFormat, ReportSummary};
pub use types::{
    ALL_DATABASES, ANOMALY_EXEC_TIME_MS, ANOMALY_EXE_COUNT, AdminUser, DatabaseInfo, LogEntry,
    ROLE_OPTIONS, STATUS_OPTIONS, Suggestion,
};
