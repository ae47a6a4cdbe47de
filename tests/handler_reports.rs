mod common;

use serde_json::{Value, json};

// ─── REPORT ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_report_success() {
    let server = common::make_server(common::create_test_state(false));
    let slug = common::shorten(&server, "https://example.com/page", None).await;

    let response = server
        .post("/api/reports")
        .json(&json!({ "slug": slug, "reason": "spam" }))
        .await;

    response.assert_status_ok();

    let json = response.json::<Value>();
    assert_eq!(
        json["message"],
        format!("Report for /{slug} submitted successfully. It will be reviewed.")
    );
    assert_eq!(json["newStatus"], "pending");
}

#[tokio::test]
async fn test_report_twice_keeps_pending() {
    let state = common::create_test_state(false);
    let token = common::admin_token(&state);
    let server = common::make_server(state);
    let slug = common::shorten(&server, "https://example.com/page", None).await;

    for reason in ["spam", "phishing"] {
        server
            .post("/api/reports")
            .json(&json!({ "slug": slug, "reason": reason }))
            .await
            .assert_status_ok();
    }

    let response = server.get("/api/reports").authorization_bearer(&token).await;
    let json = response.json::<Value>();
    let reports = json[0]["reports"].as_array().unwrap();

    assert_eq!(reports.len(), 2);
    assert_eq!(json[0]["status"], "pending");
}

#[tokio::test]
async fn test_report_approved_link_returns_to_pending() {
    let state = common::create_test_state(false);
    let token = common::admin_token(&state);
    let server = common::make_server(state);
    let slug = common::shorten(&server, "https://example.com/page", None).await;
    common::set_status(&server, &token, &slug, "approved").await;

    let response = server
        .post("/api/reports")
        .json(&json!({ "slug": slug }))
        .await;

    response.assert_status_ok();
    let json = response.json::<Value>();
    assert_eq!(json["newStatus"], "pending");
    assert!(json["message"].as_str().unwrap().contains("previously approved"));
}

#[tokio::test]
async fn test_report_blocked_link_adds_nothing() {
    let state = common::create_test_state(false);
    let token = common::admin_token(&state);
    let server = common::make_server(state);
    let slug = common::shorten(&server, "https://example.com/page", None).await;
    common::set_status(&server, &token, &slug, "blocked").await;

    let response = server
        .post("/api/reports")
        .json(&json!({ "slug": slug, "reason": "spam" }))
        .await;

    response.assert_status_ok();
    let json = response.json::<Value>();
    assert_eq!(json["newStatus"], "blocked");
    assert_eq!(
        json["message"],
        format!("URL /{slug} is already blocked. No new report added.")
    );

    let list = server.get("/api/reports").authorization_bearer(&token).await;
    assert!(list.json::<Value>()[0]["reports"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_report_unknown_slug() {
    let server = common::make_server(common::create_test_state(false));

    server
        .post("/api/reports")
        .json(&json!({ "slug": "Nope1" }))
        .await
        .assert_status_not_found();
}

#[tokio::test]
async fn test_report_missing_slug() {
    let server = common::make_server(common::create_test_state(false));

    let response = server
        .post("/api/reports")
        .json(&json!({ "reason": "spam" }))
        .await;

    response.assert_status_bad_request();
}

#[tokio::test]
async fn test_report_reason_too_long() {
    let server = common::make_server(common::create_test_state(false));
    let slug = common::shorten(&server, "https://example.com/page", None).await;

    server
        .post("/api/reports")
        .json(&json!({ "slug": slug, "reason": "x".repeat(501) }))
        .await
        .assert_status_bad_request();
}

// ─── LIST ────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_list_reports_empty() {
    let server = common::make_server(common::create_test_state(false));
    common::shorten(&server, "https://example.com/unreported", None).await;

    let response = server.get("/api/reports").await;

    response.assert_status_ok();
    assert!(response.json::<Value>().as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_list_reports_most_recent_first() {
    let server = common::make_server(common::create_test_state(false));
    let first = common::shorten(&server, "https://example.com/a", None).await;
    let second = common::shorten(&server, "https://example.com/b", None).await;

    for slug in [&first, &second] {
        server
            .post("/api/reports")
            .json(&json!({ "slug": slug }))
            .await
            .assert_status_ok();
    }

    let response = server.get("/api/reports").await;
    let json = response.json::<Value>();
    let slugs: Vec<&str> = json
        .as_array()
        .unwrap()
        .iter()
        .map(|item| item["slug"].as_str().unwrap())
        .collect();

    assert_eq!(slugs, vec![second.as_str(), first.as_str()]);
}

#[tokio::test]
async fn test_list_reports_limit() {
    let server = common::make_server(common::create_test_state(false));

    for i in 0..3 {
        let slug = common::shorten(&server, &format!("https://example.com/{i}"), None).await;
        server
            .post("/api/reports")
            .json(&json!({ "slug": slug }))
            .await
            .assert_status_ok();
    }

    let response = server.get("/api/reports").add_query_param("limit", 2).await;
    response.assert_status_ok();
    assert_eq!(response.json::<Value>().as_array().unwrap().len(), 2);

    let response = server.get("/api/reports").add_query_param("limit", 0).await;
    response.assert_status_ok();
    assert_eq!(response.json::<Value>().as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_list_reports_invalid_limit() {
    let server = common::make_server(common::create_test_state(false));

    server
        .get("/api/reports")
        .add_query_param("limit", "many")
        .await
        .assert_status_bad_request();
}

#[tokio::test]
async fn test_list_reports_hides_blocked_url_from_public() {
    let state = common::create_test_state(false);
    let token = common::admin_token(&state);
    let server = common::make_server(state);
    let slug = common::shorten(&server, "https://malware.example.com", None).await;
    common::set_status(&server, &token, &slug, "blocked").await;

    let public = server.get("/api/reports").await;
    assert!(public.json::<Value>()[0].get("originalUrl").is_none());

    let admin = server.get("/api/reports").authorization_bearer(&token).await;
    assert_eq!(
        admin.json::<Value>()[0]["originalUrl"],
        "https://malware.example.com"
    );
}

// ─── STATUS ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_set_status_requires_admin() {
    let server = common::make_server(common::create_test_state(false));
    let slug = common::shorten(&server, "https://example.com/page", None).await;

    let response = server
        .put(&format!("/api/reports/{slug}/status"))
        .json(&json!({ "status": "blocked" }))
        .await;

    response.assert_status_forbidden();
    assert_eq!(response.json::<Value>()["error"]["code"], "forbidden");

    server
        .get(&format!("/{slug}"))
        .await
        .assert_status(axum::http::StatusCode::TEMPORARY_REDIRECT);
}

#[tokio::test]
async fn test_set_status_forged_token() {
    let server = common::make_server(common::create_test_state(false));
    let slug = common::shorten(&server, "https://example.com/page", None).await;

    server
        .put(&format!("/api/reports/{slug}/status"))
        .authorization_bearer("not-the-token")
        .json(&json!({ "status": "blocked" }))
        .await
        .assert_status_forbidden();
}

#[tokio::test]
async fn test_set_status_forbidden_checked_before_status() {
    let server = common::make_server(common::create_test_state(false));

    server
        .put("/api/reports/Nope1/status")
        .json(&json!({ "status": "deleted" }))
        .await
        .assert_status_forbidden();
}

#[tokio::test]
async fn test_set_status_non_admin_without_json_body_is_forbidden() {
    let server = common::make_server(common::create_test_state(false));
    let slug = common::shorten(&server, "https://example.com/page", None).await;

    server
        .put(&format!("/api/reports/{slug}/status"))
        .await
        .assert_status_forbidden();

    let response = server
        .put(&format!("/api/reports/{slug}/status"))
        .text("status=blocked")
        .await;

    response.assert_status_forbidden();
    assert_eq!(response.json::<Value>()["error"]["code"], "forbidden");
}

#[tokio::test]
async fn test_set_status_admin_malformed_body() {
    let state = common::create_test_state(false);
    let token = common::admin_token(&state);
    let server = common::make_server(state);
    let slug = common::shorten(&server, "https://example.com/page", None).await;

    let response = server
        .put(&format!("/api/reports/{slug}/status"))
        .authorization_bearer(&token)
        .text("status=blocked")
        .await;

    response.assert_status_bad_request();
    assert_eq!(
        response.json::<Value>()["error"]["message"],
        "Invalid request body"
    );
}

#[tokio::test]
async fn test_set_status_invalid_status() {
    let state = common::create_test_state(false);
    let token = common::admin_token(&state);
    let server = common::make_server(state);
    let slug = common::shorten(&server, "https://example.com/page", None).await;

    let response = server
        .put(&format!("/api/reports/{slug}/status"))
        .authorization_bearer(&token)
        .json(&json!({ "status": "deleted" }))
        .await;

    response.assert_status_bad_request();
}

#[tokio::test]
async fn test_set_status_unknown_slug() {
    let state = common::create_test_state(false);
    let token = common::admin_token(&state);
    let server = common::make_server(state);

    server
        .put("/api/reports/Nope1/status")
        .authorization_bearer(&token)
        .json(&json!({ "status": "approved" }))
        .await
        .assert_status_not_found();
}

#[tokio::test]
async fn test_set_status_same_value_is_noop() {
    let state = common::create_test_state(false);
    let token = common::admin_token(&state);
    let server = common::make_server(state);
    let slug = common::shorten(&server, "https://example.com/page", None).await;

    let first = server
        .put(&format!("/api/reports/{slug}/status"))
        .authorization_bearer(&token)
        .json(&json!({ "status": "approved" }))
        .await;
    first.assert_status_ok();
    let json = first.json::<Value>();
    assert_eq!(json["changed"], true);
    assert_eq!(
        json["message"],
        format!("Status for /{slug} successfully updated to approved.")
    );

    let second = server
        .put(&format!("/api/reports/{slug}/status"))
        .authorization_bearer(&token)
        .json(&json!({ "status": "approved" }))
        .await;
    second.assert_status_ok();
    let json = second.json::<Value>();
    assert_eq!(json["changed"], false);
    assert_eq!(
        json["message"],
        format!("Status for /{slug} is already approved. No change made.")
    );
}

#[tokio::test]
async fn test_unblock_restores_redirect() {
    let state = common::create_test_state(false);
    let token = common::admin_token(&state);
    let server = common::make_server(state);
    let slug = common::shorten(&server, "https://example.com/page", None).await;

    common::set_status(&server, &token, &slug, "blocked").await;
    server.get(&format!("/{slug}")).await.assert_status_forbidden();

    common::set_status(&server, &token, &slug, "approved").await;
    server
        .get(&format!("/{slug}"))
        .await
        .assert_status(axum::http::StatusCode::TEMPORARY_REDIRECT);
}

// ─── ADMIN LOGIN ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_admin_login_sets_session_cookie() {
    let state = common::create_test_state(false);
    let token = common::admin_token(&state);
    let server = common::make_server(state);

    let response = server
        .post("/api/admin/login")
        .json(&json!({ "user": common::ADMIN_USER, "password": common::ADMIN_PASSWORD }))
        .await;

    response.assert_status_ok();
    assert_eq!(response.json::<Value>()["success"], true);

    let cookie = response.header("set-cookie");
    let cookie = cookie.to_str().unwrap();
    assert!(cookie.starts_with(&format!("admin_session={token}")));
    assert!(cookie.contains("HttpOnly"));
    assert!(cookie.contains("SameSite=Strict"));
    assert!(!cookie.contains("Secure"));
}

#[tokio::test]
async fn test_admin_session_cookie_authorizes_moderation() {
    let server = common::make_server(common::create_test_state(false));
    let slug = common::shorten(&server, "https://example.com/page", None).await;

    let login = server
        .post("/api/admin/login")
        .json(&json!({ "user": common::ADMIN_USER, "password": common::ADMIN_PASSWORD }))
        .await;
    let session = login.cookie("admin_session");

    server
        .put(&format!("/api/reports/{slug}/status"))
        .add_cookie(session)
        .json(&json!({ "status": "blocked" }))
        .await
        .assert_status_ok();

    server.get(&format!("/{slug}")).await.assert_status_forbidden();
}

#[tokio::test]
async fn test_admin_login_wrong_password() {
    let server = common::make_server(common::create_test_state(false));

    let response = server
        .post("/api/admin/login")
        .json(&json!({ "user": common::ADMIN_USER, "password": "wrong" }))
        .await;

    response.assert_status_unauthorized();
    assert_eq!(response.json::<Value>()["error"]["code"], "unauthorized");
}

#[tokio::test]
async fn test_admin_login_not_configured() {
    let mut settings = common::test_settings(false);
    settings.admin_credentials = None;
    let state = stellar_link::state::AppState::new(
        std::sync::Arc::new(stellar_link::infrastructure::persistence::InMemoryLinkRepository::new()),
        settings,
    );
    let server = common::make_server(state);

    server
        .post("/api/admin/login")
        .json(&json!({ "user": "admin", "password": "anything" }))
        .await
        .assert_status_internal_server_error();
}
