#![deny(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]
//! Core types and traits for the loglens client.
//!
//! This crate defines the vocabulary shared by every other loglens crate:
//!
//! - [`Identity`] — the authenticated principal, owned by the session layer
//! - [`Envelope`] — the canonical response envelope after normalizing the
//!   backend's two field-name conventions (`errorCode`/`errorDesc` vs
//!   `errorcode`/`errordes`)
//! - [`PageResult`] — one page of list data with authoritative totals
//! - [`Transport`] — the seam between protocol logic and the HTTP client;
//!   the `reqwest`-backed [`HttpTransport`] lives behind the `reqwest`
//!   feature so test code can supply a scripted transport instead
//! - [`ClientError`] — the error taxonomy every operation reports through

/// Canonical response envelope and normalization.
pub mod envelope;
/// Client error taxonomy.
pub mod error;
/// The authenticated principal.
pub mod identity;
/// Page request/result types and allowed page sizes.
pub mod page;
/// Transport seam between protocol logic and HTTP.
pub mod transport;

#[cfg(feature = "reqwest")]
/// `reqwest`-backed transport implementation.
pub mod http;

pub use envelope::Envelope;
pub use error::{ClientError, ClientResult};
pub use identity::Identity;
pub use page::{PAGE_SIZES, PageResult, is_allowed_page_size};
pub use transport::{RawResponse, Transport, TransportError};

#[cfg(feature = "reqwest")]
pub use http::HttpTransport;
