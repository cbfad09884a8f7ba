//! The remaining endpoint surface: registration, catalogs, suggestions,
//! administration and reports.

mod common;

use common::{Reply, TestEnv, identity};
use serde_json::json;

use loglens_api::{RegisterRequest, ReportFormat};
use loglens_core::ClientError;

async fn authenticated_env() -> TestEnv {
    let env = TestEnv::new();
    env.session
        .install_identity(identity("tok", "admin"))
        .await
        .unwrap();
    env
}

#[tokio::test]
async fn registration_validates_before_dispatch_then_posts() {
    let env = TestEnv::new();

    let invalid = RegisterRequest {
        username: "carol".to_string(),
        password: "secret".to_string(),
        email: "not-an-email".to_string(),
    };
    let err = env.api.register(&invalid).await.unwrap_err();
    assert!(matches!(err, ClientError::Validation { field, .. } if field == "email"));
    assert_eq!(env.backend.hits("/register"), 0);

    env.backend.on("/register", Reply::Json(json!({"status": 200})));
    let valid = RegisterRequest {
        email: "carol@example.com".to_string(),
        ..invalid
    };
    env.api.register(&valid).await.unwrap();
    assert_eq!(env.backend.hits("/register"), 1);
}

#[tokio::test]
async fn database_options_prepend_the_all_sentinel() {
    let env = authenticated_env().await;
    env.backend.on(
        "/database",
        Reply::Json(json!({
            "status": 200,
            "data": [
                {"database_name": "orders", "database_desc": "order store"},
                {"database_name": "billing", "database_desc": "invoices"}
            ]
        })),
    );

    let options = env.api.database_options().await.unwrap();
    assert_eq!(options, vec!["All", "orders", "billing"]);
}

#[tokio::test]
async fn suggestions_can_be_listed_and_completed() {
    let env = authenticated_env().await;
    env.backend.on(
        "/suggestion",
        Reply::Json(json!({
            "status": 200,
            "data": [
                {"id": 7, "database_name": "orders", "sql": "SELECT *", "suggestion": "add index"}
            ]
        })),
    );
    env.backend
        .on("/suggestion/done", Reply::Json(json!({"status": 200})));

    let suggestions = env.api.suggestions(Some("orders")).await.unwrap();
    assert_eq!(suggestions.len(), 1);

    env.api
        .complete_suggestion(suggestions[0].id)
        .await
        .unwrap();
    assert_eq!(env.backend.hits("/suggestion/done"), 1);
}

#[tokio::test]
async fn admin_flow_lists_then_updates_a_user() {
    let env = authenticated_env().await;
    env.backend.on(
        "/admin/list-user",
        Reply::Json(json!({
            "status": 200,
            "listUser": [
                {"username": "bob", "phone": "111", "email": "b@x.com", "role": "R_LOGS_MANAGE", "status": "ACTIVE"}
            ]
        })),
    );
    env.backend
        .on("/admin/update", Reply::Json(json!({"status": 200})));

    let users = env.api.list_users().await.unwrap();
    assert_eq!(users[0].username, "bob");

    env.api
        .update_user(&users[0].username, "R_MONITOR", "ACTIVE")
        .await
        .unwrap();
    assert_eq!(env.backend.hits("/admin/update"), 1);
}

#[tokio::test]
async fn protected_requests_carry_the_bearer_token() {
    let env = authenticated_env().await;
    env.backend.on(
        "/database",
        Reply::Json(json!({"status": 200, "data": []})),
    );

    env.api.databases().await.unwrap();
    let requests = env.backend.requests.lock().unwrap();
    assert_eq!(requests[0].bearer.as_deref(), Some("tok"));
}

#[tokio::test]
async fn report_summary_and_export_round_trip() {
    let env = authenticated_env().await;
    env.backend.on(
        "/create-report",
        Reply::Json(json!({
            "status": 200,
            "total": 1200,
            "totalUnexpected": 17,
            "totalHint": 45
        })),
    );
    env.backend
        .on("/report", Reply::Raw(200, b"%PDF-1.7 report".to_vec()));

    let summary = env.api.report_summary().await.unwrap();
    assert_eq!(summary.total, 1200);
    assert_eq!(summary.total_unexpected, 17);
    assert_eq!(summary.total_hint, 45);

    let bytes = env.api.export_report(ReportFormat::Pdf).await.unwrap();
    assert_eq!(bytes, b"%PDF-1.7 report");
}
