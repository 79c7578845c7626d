// Integration tests for `ConsoleClient` using wiremock.

use secrecy::SecretString;
use serde_json::json;
use uuid::Uuid;
use wiremock::matchers::{body_partial_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use rentdesk_api::models::{KycActionBody, OverrideWriteBody, RentalActionBody};
use rentdesk_api::{ConsoleClient, Error};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, ConsoleClient) {
    let server = MockServer::start().await;
    let url = server.uri().parse().expect("mock server URI");
    let client = ConsoleClient::with_client(reqwest::Client::new(), url);
    (server, client)
}

// ── Rental requests ─────────────────────────────────────────────────

#[tokio::test]
async fn test_list_rental_requests() {
    let (server, client) = setup().await;

    let pending_id = Uuid::new_v4().to_string();
    let body = json!([
        {
            "id": pending_id,
            "user_id": 5512,
            "user_name": "Dana Voss",
            "console_id": "c-17",
            "console_name": "PS5 #3",
            "status": "pending",
            "created_at": "2026-02-10T09:15:00",
            "selected_hours": 24
        },
        {
            "id": Uuid::new_v4().to_string(),
            "user_name": "Ilya Renn",
            "console_name": "PS4 Pro #1",
            "status": "approved",
            "created_at": "2026-02-09T18:00:00",
            "processed_by": "op-1"
        }
    ]);

    Mock::given(method("GET"))
        .and(path("/api/requests"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let records = client.list_rental_requests().await.expect("list");

    assert_eq!(records.len(), 2);
    assert_eq!(records[0].id, pending_id);
    assert_eq!(records[0].status, "pending");
    assert_eq!(records[0].console_name.as_deref(), Some("PS5 #3"));
    assert_eq!(records[0].selected_hours, Some(24));
    assert_eq!(records[1].processed_by.as_deref(), Some("op-1"));
}

#[tokio::test]
async fn test_rental_review_success() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/requests/action"))
        .and(body_partial_json(json!({
            "id": "req-1",
            "action": "approve",
            "admin_id": "op-9"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "success": true })))
        .mount(&server)
        .await;

    let body = RentalActionBody {
        id: "req-1".into(),
        action: "approve".into(),
        admin_id: "op-9".into(),
        note: None,
    };

    client.submit_rental_review(&body).await.expect("review");
}

#[tokio::test]
async fn test_rental_review_conflict_when_not_pending() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/requests/action"))
        .respond_with(
            ResponseTemplate::new(409)
                .set_body_json(json!({ "error": "Request is no longer pending" })),
        )
        .mount(&server)
        .await;

    let body = RentalActionBody {
        id: "req-1".into(),
        action: "reject".into(),
        admin_id: "op-9".into(),
        note: Some("double click".into()),
    };

    let err = client
        .submit_rental_review(&body)
        .await
        .expect_err("expected conflict");

    assert!(err.is_conflict(), "expected Conflict, got: {err}");
    assert!(!err.is_transient());
}

#[tokio::test]
async fn test_rental_review_not_found() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/requests/action"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({ "error": "Request not found" })))
        .mount(&server)
        .await;

    let body = RentalActionBody {
        id: "nope".into(),
        action: "approve".into(),
        admin_id: "op-9".into(),
        note: None,
    };

    let err = client
        .submit_rental_review(&body)
        .await
        .expect_err("expected not found");
    assert!(err.is_not_found());
}

// ── KYC requests ────────────────────────────────────────────────────

#[tokio::test]
async fn test_list_kyc_requests() {
    let (server, client) = setup().await;

    let body = json!([
        {
            "id": "kyc-1",
            "user_id": 900,
            "user_name": "Mara Ilie",
            "username": "mara_i",
            "photo_url": "/static/kyc/900.jpg",
            "status": "pending",
            "timestamp": "2026-02-10T12:00:00"
        }
    ]);

    Mock::given(method("GET"))
        .and(path("/api/kyc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let records = client.list_kyc_requests().await.expect("list");

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].id, "kyc-1");
    assert_eq!(records[0].username.as_deref(), Some("mara_i"));
    assert_eq!(records[0].timestamp.as_deref(), Some("2026-02-10T12:00:00"));
}

#[tokio::test]
async fn test_kyc_review_uses_request_id_field() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/kyc/action"))
        .and(body_partial_json(json!({
            "request_id": "kyc-1",
            "action": "reject",
            "note": "photo unreadable"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "success": true })))
        .mount(&server)
        .await;

    let body = KycActionBody {
        request_id: "kyc-1".into(),
        action: "reject".into(),
        admin_id: "op-2".into(),
        note: Some("photo unreadable".into()),
    };

    client.submit_kyc_review(&body).await.expect("review");
}

// ── Calendar overrides ──────────────────────────────────────────────

#[tokio::test]
async fn test_list_overrides_keyed_by_date() {
    let (server, client) = setup().await;

    let body = json!({
        "2025-12-25": { "type": "discount", "value": 30, "description": "Holiday" },
        "2025-12-31": { "type": "blackout" }
    });

    Mock::given(method("GET"))
        .and(path("/api/discounts"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let overrides = client.list_overrides().await.expect("list");

    assert_eq!(overrides.len(), 2);
    let holiday = overrides.get("2025-12-25").expect("record");
    assert_eq!(holiday.kind, "discount");
    assert_eq!(holiday.value, Some(30));
    assert_eq!(overrides.get("2025-12-31").expect("record").kind, "blackout");
}

#[tokio::test]
async fn test_save_override_delete_flag() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/discounts"))
        .and(body_partial_json(json!({
            "date": "2025-12-25",
            "delete": true
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "success": true })))
        .mount(&server)
        .await;

    let body = OverrideWriteBody {
        date: "2025-12-25".into(),
        kind: None,
        value: None,
        description: None,
        delete: Some(true),
    };

    client.save_override(&body).await.expect("delete");
}

// ── Dashboard metrics ───────────────────────────────────────────────

#[tokio::test]
async fn test_get_stats() {
    let (server, client) = setup().await;

    let body = json!({
        "total_revenue": 1280.5,
        "revenue_per_minute": 1.4,
        "active_rentals": 3,
        "total_users": 42,
        "total_consoles": 8,
        "available_consoles": 5,
        "activity": [
            { "type": "rental", "title": "PS5 #3 - active", "status": "active" }
        ]
    });

    Mock::given(method("GET"))
        .and(path("/api/stats"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let stats = client.get_stats().await.expect("stats");

    assert_eq!(stats.active_rentals, 3);
    assert_eq!(stats.available_consoles, 5);
    assert_eq!(stats.activity.len(), 1);
}

// ── Operators ───────────────────────────────────────────────────────

#[tokio::test]
async fn test_login_returns_operator_record() {
    let (server, client) = setup().await;

    let body = json!({
        "id": "op-1",
        "username": "admin",
        "full_name": "Head Office",
        "role": "owner",
        "permissions": ["all"],
        "stats": {
            "total_processed_requests": 12,
            "total_processed_kyc": 4,
            "daily_actions": { "2026-02-10": 3 }
        }
    });

    Mock::given(method("POST"))
        .and(path("/api/admins/login"))
        .and(body_partial_json(json!({ "username": "admin" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let record = client
        .login("admin", &SecretString::from("hunter2".to_string()))
        .await
        .expect("login");

    assert_eq!(record.id, "op-1");
    assert_eq!(record.role, "owner");
    assert_eq!(record.permissions, vec!["all".to_string()]);
    let stats = record.stats.expect("stats");
    assert_eq!(stats.total_processed_requests, 12);
    assert_eq!(stats.daily_actions.get("2026-02-10"), Some(&3));
}

#[tokio::test]
async fn test_login_bad_credentials() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/admins/login"))
        .respond_with(
            ResponseTemplate::new(401)
                .set_body_json(json!({ "error": "Invalid username or password" })),
        )
        .mount(&server)
        .await;

    let err = client
        .login("admin", &SecretString::from("wrong".to_string()))
        .await
        .expect_err("expected auth failure");

    assert!(matches!(err, Error::Authentication { .. }));
}

#[tokio::test]
async fn test_get_operator_by_id() {
    let (server, client) = setup().await;

    let body = json!({
        "id": "op-2",
        "username": "desk",
        "full_name": "Front Desk",
        "role": "staff",
        "permissions": ["rentals", "consoles"]
    });

    Mock::given(method("GET"))
        .and(path("/api/admins/current"))
        .and(query_param("id", "op-2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let record = client.get_operator("op-2").await.expect("operator");
    assert_eq!(record.username, "desk");
    assert_eq!(record.permissions.len(), 2);
}

#[tokio::test]
async fn test_daily_report() {
    let (server, client) = setup().await;

    let body = json!([
        {
            "id": "op-1",
            "full_name": "Head Office",
            "role": "owner",
            "today_actions": 7,
            "total_requests": 120,
            "total_kyc": 33
        }
    ]);

    Mock::given(method("GET"))
        .and(path("/api/admins/reports/daily"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let rows = client.daily_report().await.expect("report");
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].today_actions, 7);
}

// ── Decoding failures ───────────────────────────────────────────────

#[tokio::test]
async fn test_malformed_body_is_deserialization_error() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/requests"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>proxy error</html>"))
        .mount(&server)
        .await;

    let err = client
        .list_rental_requests()
        .await
        .expect_err("expected decode failure");

    match err {
        Error::Deserialization { body, .. } => assert!(body.contains("proxy error")),
        other => panic!("expected Deserialization, got: {other}"),
    }
}
