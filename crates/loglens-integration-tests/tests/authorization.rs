//! Permission resolution against real identities produced by the session
//! layer.

mod common;

use common::{Reply, TestEnv, identity};
use serde_json::json;

use loglens_auth::{ADMIN, LOGS_MANAGE, MONITOR, OPTIMIZE, TEAM_LEAD, has_permission};
use loglens_session::{CredentialStrategy, LoginRequest};

#[test]
fn admin_sentinels_allow_every_capability() {
    for role in ["admin", "ADMIN", "R_ADMIN", "r_admin"] {
        let id = identity("tok", role);
        for capability in [LOGS_MANAGE, MONITOR, OPTIMIZE, TEAM_LEAD, ADMIN, "R_MADE_UP"] {
            assert!(
                has_permission(Some(&id), capability),
                "{role} must hold {capability}"
            );
        }
    }
}

#[test]
fn exact_role_match_wins_independent_of_the_table() {
    let id = identity("tok", "R_CUSTOM_THING");
    assert!(has_permission(Some(&id), "R_CUSTOM_THING"));
    assert!(!has_permission(Some(&id), LOGS_MANAGE));
}

#[test]
fn explicit_grants_extend_the_role_bundle() {
    let id = identity("tok", "user").with_permissions(vec![OPTIMIZE.to_string()]);
    assert!(has_permission(Some(&id), OPTIMIZE));
    assert!(has_permission(Some(&id), LOGS_MANAGE));
    assert!(!has_permission(Some(&id), MONITOR));
}

#[test]
fn role_bundles_match_the_documented_table() {
    let user = identity("tok", "user");
    assert!(has_permission(Some(&user), LOGS_MANAGE));
    assert!(has_permission(Some(&user), TEAM_LEAD));
    assert!(!has_permission(Some(&user), MONITOR));

    let manager = identity("tok", "manager");
    assert!(has_permission(Some(&manager), LOGS_MANAGE));
    assert!(has_permission(Some(&manager), MONITOR));
    assert!(has_permission(Some(&manager), TEAM_LEAD));
    assert!(!has_permission(Some(&manager), OPTIMIZE));

    let dba = identity("tok", "dba");
    assert!(has_permission(Some(&dba), MONITOR));
    assert!(has_permission(Some(&dba), OPTIMIZE));
    assert!(!has_permission(Some(&dba), LOGS_MANAGE));
}

#[test]
fn missing_identity_or_unknown_role_denies() {
    assert!(!has_permission(None, LOGS_MANAGE));
    let id = identity("tok", "intern");
    assert!(!has_permission(Some(&id), LOGS_MANAGE));
}

#[tokio::test]
async fn logged_in_admin_passes_permission_checks_end_to_end() {
    let env = TestEnv::new();
    env.backend.on(
        "/login",
        Reply::Json(json!({
            "status": 200,
            "data": {
                "token": "abc",
                "username": "alice",
                "name": "Alice A",
                "joinDate": "2024-01-01",
                "phoneNumber": "000",
                "email": "a@x.com",
                "role": "ADMIN"
            }
        })),
    );

    let strategy = CredentialStrategy::new(env.backend.clone(), common::BASE_URL);
    env.session
        .login(
            &strategy,
            &LoginRequest {
                username: "alice".to_string(),
                password: "secret".to_string(),
            },
        )
        .await
        .unwrap();

    let current = env.session.current_identity().await;
    assert!(has_permission(current.as_ref(), MONITOR));
    assert!(has_permission(current.as_ref(), "R_ANYTHING"));
}
