//! Integration tests for CRUD-then-refetch semantics against a mock
//! gateway.

use serde_json::json;
use vane_console::{Console, GatewayClient, GatewayError};
use vane_model::{RouteDraft, RouteId};
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn route_json(id: i64, name: &str, domain: &str, target: &str, enabled: bool) -> serde_json::Value {
    json!({
        "id": id,
        "name": name,
        "domain": domain,
        "target": target,
        "enabled": enabled,
        "created_at": "2025-11-02T09:00:00Z",
        "updated_at": "2025-11-02T09:00:00Z",
    })
}

fn console_for(server: &MockServer) -> Console {
    Console::new(GatewayClient::new(&server.uri()).unwrap())
}

#[tokio::test]
async fn test_create_resyncs_desired_view() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/routes"))
        .respond_with(
            ResponseTemplate::new(201)
                .set_body_json(route_json(1, "api", "api.local", "http://127.0.0.1:3000", true)),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/routes"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([route_json(
            1,
            "api",
            "api.local",
            "http://127.0.0.1:3000",
            true
        )])))
        .expect(1)
        .mount(&server)
        .await;

    let console = console_for(&server);
    let draft = RouteDraft {
        name: "api".to_string(),
        domain: "api.local".to_string(),
        target: "http://127.0.0.1:3000".to_string(),
        enabled: true,
    };

    let created = console.create_route(&draft).await.unwrap();
    assert_eq!(created.id, RouteId::new(1));

    let store = console.store();
    assert_eq!(store.routes().await.len(), 1);

    // Nothing applied yet, so the new route is pending.
    assert!(store.is_changed(RouteId::new(1)).await);
}

#[tokio::test]
async fn test_failed_create_leaves_local_state_untouched() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/routes"))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(json!({"error": "domain already in use"})),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/routes"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(0)
        .mount(&server)
        .await;

    let console = console_for(&server);
    let draft = RouteDraft {
        name: "api".to_string(),
        domain: "api.local".to_string(),
        target: "http://127.0.0.1:3000".to_string(),
        enabled: true,
    };

    let err = console.create_route(&draft).await.unwrap_err();
    match err {
        GatewayError::Rejected { status, message } => {
            assert_eq!(status, 400);
            assert_eq!(message, "domain already in use");
        }
        other => panic!("expected rejection, got {other:?}"),
    }

    assert!(console.store().routes().await.is_empty());
}

#[tokio::test]
async fn test_unparseable_error_body_yields_generic_message() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/routes"))
        .respond_with(ResponseTemplate::new(500).set_body_string("caddy fell over"))
        .mount(&server)
        .await;

    let console = console_for(&server);
    let err = console.refresh_routes().await.unwrap_err();

    match err {
        GatewayError::Rejected { status, message } => {
            assert_eq!(status, 500);
            assert_eq!(message, "request failed");
        }
        other => panic!("expected rejection, got {other:?}"),
    }
}

#[tokio::test]
async fn test_update_and_toggle_resync_desired_view() {
    let server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/routes/1"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(route_json(1, "api", "api.local", "http://127.0.0.1:4000", true)),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/routes/1/toggle"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(route_json(1, "api", "api.local", "http://127.0.0.1:4000", false)),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/routes"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([route_json(
            1,
            "api",
            "api.local",
            "http://127.0.0.1:4000",
            false
        )])))
        .expect(2)
        .mount(&server)
        .await;

    let console = console_for(&server);
    let draft = RouteDraft {
        name: "api".to_string(),
        domain: "api.local".to_string(),
        target: "http://127.0.0.1:4000".to_string(),
        enabled: true,
    };

    let updated = console.update_route(RouteId::new(1), &draft).await.unwrap();
    assert_eq!(updated.target, "http://127.0.0.1:4000");

    let toggled = console.toggle_route(RouteId::new(1)).await.unwrap();
    assert!(!toggled.enabled);

    let routes = console.store().routes().await;
    assert_eq!(routes.len(), 1);
    assert!(!routes[0].enabled);
}

#[tokio::test]
async fn test_delete_resyncs_desired_view() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/routes/1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"message": "Route deleted"})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/routes"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let console = console_for(&server);
    console.delete_route(RouteId::new(1)).await.unwrap();
    assert!(console.store().routes().await.is_empty());
}

#[tokio::test]
async fn test_import_sends_drafts_and_resyncs() {
    let server = MockServer::start().await;

    let drafts = vec![
        RouteDraft {
            name: "api".to_string(),
            domain: "api.local".to_string(),
            target: "http://127.0.0.1:3000".to_string(),
            enabled: true,
        },
        RouteDraft {
            name: "web".to_string(),
            domain: "web.local".to_string(),
            target: "http://127.0.0.1:8080".to_string(),
            enabled: false,
        },
    ];

    Mock::given(method("POST"))
        .and(path("/import"))
        .and(body_json(&drafts))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"message": "Imported 2 routes"})),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/routes"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            route_json(1, "api", "api.local", "http://127.0.0.1:3000", true),
            route_json(2, "web", "web.local", "http://127.0.0.1:8080", false),
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let console = console_for(&server);
    let ack = console.import_routes(&drafts).await.unwrap();
    assert_eq!(ack.message, "Imported 2 routes");
    assert_eq!(console.store().routes().await.len(), 2);
}

#[tokio::test]
async fn test_export_passes_document_through() {
    let server = MockServer::start().await;

    let document = json!([
        {"name": "api", "domain": "api.local", "target": "http://127.0.0.1:3000", "enabled": true},
    ]);
    Mock::given(method("GET"))
        .and(path("/export"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&document))
        .mount(&server)
        .await;

    let console = console_for(&server);
    assert_eq!(console.export_config().await.unwrap(), document);
}

#[tokio::test]
async fn test_missing_route_surfaces_gateway_message() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/routes/9"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"error": "Route not found"})))
        .mount(&server)
        .await;

    let console = console_for(&server);
    let err = console.client().get_route(RouteId::new(9)).await.unwrap_err();

    assert_eq!(err.status(), Some(404));
    assert_eq!(err.to_string(), "Route not found");
}
