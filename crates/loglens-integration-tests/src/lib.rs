//! Integration test crate for loglens.
//!
//! This crate exists solely for integration testing. It is `publish = false`
//! and has no library code — all tests live in `tests/`.
