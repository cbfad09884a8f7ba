#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]
//! Durable key-value storage for loglens session state.
//!
//! The dashboard persists its session across page reloads through a plain
//! key-value surface: a serialized identity blob under one key and a
//! duplicated bare token under another. This crate provides that surface as
//! the [`KvStore`] trait with two implementations:
//!
//! - [`MemoryKvStore`] — process-local, for tests and ephemeral sessions
//! - [`FileKvStore`] — a single JSON file on disk, read-after-write
//!   consistent within the process
//!
//! Writes are whole-value; there is no partial update. Callers that need a
//! multi-key invariant (write the blob and the token together, clear them
//! together) enforce it above this layer.

/// Storage error types.
pub mod error;
/// The key-value trait and its implementations.
pub mod kv;

pub use error::{StorageError, StorageResult};
pub use kv::{FileKvStore, KvStore, MemoryKvStore};
