//! Capability codes.
//!
//! Capabilities are opaque strings, namespaced by feature area. The codes
//! here match what the backend stores in the admin user records; unknown
//! codes are legal inputs to the resolver (an admin passes every check,
//! known or not).

/// Log management: browse and filter database activity logs.
pub const LOGS_MANAGE: &str = "R_LOGS_MANAGE";

/// Monitoring: anomaly listings and warning indicators.
pub const MONITOR: &str = "R_MONITOR";

/// Team reporting: hint listings, report summaries and exports.
pub const TEAM_LEAD: &str = "R_TEAMLEAD";

/// Optimization: suggestion listings and completion marking.
pub const OPTIMIZE: &str = "R_OPTI";

/// Administration: user listing and role/status updates.
pub const ADMIN: &str = "R_ADMIN";

/// All capability codes the dashboard knows about.
pub const ALL: [&str; 5] = [LOGS_MANAGE, MONITOR, TEAM_LEAD, OPTIMIZE, ADMIN];

/// Role spellings that grant every capability, compared case-insensitively.
pub(crate) const ADMIN_SENTINELS: [&str; 2] = ["admin", "r_admin"];
