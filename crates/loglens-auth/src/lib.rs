#![deny(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]
//! Unified permission resolution.
//!
//! Historically each dashboard view carried its own copy of the permission
//! check, and the copies disagreed: one treated `role == "admin"` as the
//! admin sentinel, another `role == "R_ADMIN"`, a third consulted only the
//! explicit permissions array, a fourth fell back to a role→capability
//! table. This crate replaces all of them with one deterministic
//! precedence (see [`has_permission`]) so authorization cannot silently
//! diverge between views.

/// Capability codes gating the dashboard feature areas.
pub mod capability;
/// The permission resolution algorithm.
pub mod resolver;

pub use capability::{ADMIN, LOGS_MANAGE, MONITOR, OPTIMIZE, TEAM_LEAD};
pub use resolver::{has_permission, role_capabilities};
