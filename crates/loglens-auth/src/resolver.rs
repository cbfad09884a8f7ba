//! The permission resolution algorithm.

use loglens_core::Identity;
use tracing::trace;

use crate::capability::{self, ADMIN_SENTINELS};

/// Decide whether `identity` may exercise `capability`.
///
/// Precedence, short-circuiting at the first match:
///
/// 1. No identity → deny.
/// 2. Role equals an admin sentinel (`"admin"`, `"ADMIN"`, `"R_ADMIN"`,
///    case-insensitive) → allow, for every capability string including
///    unknown ones.
/// 3. Role equals the capability exactly → allow.
/// 4. The explicit permission list contains the capability → allow.
/// 5. The static role→capability table grants it → allow; a role without a
///    table entry denies.
pub fn has_permission(identity: Option<&Identity>, capability: &str) -> bool {
    let Some(identity) = identity else {
        return false;
    };

    let allowed = is_admin_role(&identity.role)
        || identity.role == capability
        || identity.permissions.iter().any(|p| p == capability)
        || role_capabilities(&identity.role).contains(&capability);

    trace!(
        user = %identity.username,
        role = %identity.role,
        capability,
        allowed,
        "permission check"
    );
    allowed
}

/// The capability bundle implied by a documented role name.
///
/// Roles outside the table imply no capabilities; callers still get the
/// exact-role and explicit-list checks of [`has_permission`].
#[must_use]
pub fn role_capabilities(role: &str) -> &'static [&'static str] {
    match role {
        "admin" => &capability::ALL,
        "user" => &[capability::LOGS_MANAGE, capability::TEAM_LEAD],
        "manager" => &[
            capability::LOGS_MANAGE,
            capability::MONITOR,
            capability::TEAM_LEAD,
        ],
        "dba" => &[capability::MONITOR, capability::OPTIMIZE],
        _ => &[],
    }
}

fn is_admin_role(role: &str) -> bool {
    ADMIN_SENTINELS
        .iter()
        .any(|sentinel| role.eq_ignore_ascii_case(sentinel))
}

#[cfg(test)]
mod tests {
    use super::*;
    use loglens_core::Identity;

    fn identity(role: &str, permissions: &[&str]) -> Identity {
        Identity {
            token: "tok".into(),
            username: "alice".into(),
            display_name: "Alice A".into(),
            join_date: "2024-01-01".into(),
            phone: "000".into(),
            email: "a@x.com".into(),
            role: role.into(),
            permissions: permissions.iter().map(ToString::to_string).collect(),
        }
    }

    #[test]
    fn no_identity_is_denied() {
        assert!(!has_permission(None, capability::MONITOR));
    }

    #[test]
    fn admin_sentinels_grant_everything() {
        for role in ["admin", "ADMIN", "R_ADMIN", "r_admin", "Admin"] {
            let id = identity(role, &[]);
            for cap in capability::ALL {
                assert!(has_permission(Some(&id), cap), "{role} should grant {cap}");
            }
            // Including capabilities nobody has heard of.
            assert!(has_permission(Some(&id), "R_TOTALLY_UNKNOWN"));
        }
    }

    #[test]
    fn exact_role_match_grants_independent_of_table() {
        let id = identity("R_MONITOR", &[]);
        assert!(has_permission(Some(&id), capability::MONITOR));
        assert!(!has_permission(Some(&id), capability::OPTIMIZE));
    }

    #[test]
    fn explicit_permission_list_grants() {
        let id = identity("user", &["R_OPTI"]);
        assert!(has_permission(Some(&id), capability::OPTIMIZE));
    }

    #[test]
    fn role_table_grants_documented_bundles() {
        let manager = identity("manager", &[]);
        assert!(has_permission(Some(&manager), capability::LOGS_MANAGE));
        assert!(has_permission(Some(&manager), capability::MONITOR));
        assert!(has_permission(Some(&manager), capability::TEAM_LEAD));
        assert!(!has_permission(Some(&manager), capability::OPTIMIZE));

        let dba = identity("dba", &[]);
        assert!(has_permission(Some(&dba), capability::MONITOR));
        assert!(has_permission(Some(&dba), capability::OPTIMIZE));
        assert!(!has_permission(Some(&dba), capability::ADMIN));
    }

    #[test]
    fn unknown_role_without_grants_is_denied() {
        let id = identity("intern", &[]);
        assert!(!has_permission(Some(&id), capability::LOGS_MANAGE));
    }

    #[test]
    fn user_bundle_grants_logs_and_teamlead_only() {
        let id = identity("user", &[]);
        assert!(has_permission(Some(&id), capability::LOGS_MANAGE));
        assert!(has_permission(Some(&id), capability::TEAM_LEAD));
        assert!(!has_permission(Some(&id), capability::MONITOR));
    }
}
