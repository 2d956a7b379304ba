use catalog_mgmt::services::catalog_management::*;
use catalog_mgmt::{CatalogError, ClientConfig, NoAuthAuthenticator};
use httpmock::prelude::*;
use serde_json::json;
use std::time::Duration;

fn client_for(server: &MockServer) -> CatalogManagementV1 {
    let config = ClientConfig::new(NoAuthAuthenticator).with_service_url(server.base_url());
    CatalogManagementV1::new(config).unwrap()
}

#[tokio::test]
async fn test_not_found_carries_status_and_message() {
    let server = MockServer::start();
    let get_mock = server.mock(|when, then| {
        when.method(GET).path("/plans/missing");
        then.status(404).json_body(json!({
            "errors": [{"code": "not_found", "message": "Plan 'missing' was not found"}],
            "trace": "abc-123",
            "status_code": 404
        }));
    });

    let err = client_for(&server)
        .get_plan(&GetPlanOptions::new("missing"))
        .await
        .unwrap_err();

    get_mock.assert();
    assert!(err.is_not_found());
    assert_eq!(err.stage(), "http-request-err");
    assert_eq!(err.operation(), Some("get_plan"));
    match err {
        CatalogError::HttpStatus {
            status,
            message,
            body,
            ..
        } => {
            assert_eq!(status, 404);
            assert_eq!(message, "Plan 'missing' was not found");
            assert_eq!(body.unwrap()["trace"], "abc-123");
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[tokio::test]
async fn test_non_json_error_body_uses_text() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/plans/p1/publish/publish_approved/true");
        then.status(503).body("upstream unavailable");
    });

    let err = client_for(&server)
        .publish_plan(&PublishPlanOptions::new("p1"))
        .await
        .unwrap_err();

    assert_eq!(err.status_code(), Some(503));
    assert!(err.to_string().contains("upstream unavailable"));
    assert!(err.to_string().starts_with("publish_plan:"));
}

#[tokio::test]
async fn test_invalid_json_response_is_unmarshal_error() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/catalogs/cat-1");
        then.status(200).body("{not json");
    });

    let err = client_for(&server)
        .get_catalog(&GetCatalogOptions::new("cat-1"))
        .await
        .unwrap_err();

    assert_eq!(err.stage(), "unmarshal-resp-error");
    assert_eq!(err.operation(), Some("get_catalog"));
}

#[tokio::test]
async fn test_empty_path_param_fails_before_sending() {
    let server = MockServer::start();
    let any_mock = server.mock(|when, then| {
        when.any_request();
        then.status(200);
    });

    let client = client_for(&server);
    let err = client
        .list_plans(&ListPlansOptions::new("cat-1", ""))
        .await
        .unwrap_err();
    assert_eq!(err.stage(), "struct-validation-error");

    let err = client
        .delete_version(&DeleteVersionOptions::new(""))
        .await
        .unwrap_err();
    assert_eq!(err.operation(), Some("delete_version"));

    assert_eq!(any_mock.hits(), 0);
}

#[tokio::test]
async fn test_invalid_caller_header_is_build_error() {
    let server = MockServer::start();
    let client = client_for(&server);

    let options = GetCatalogOptions::new("cat-1").with_header("X-Note", "line\nbreak");
    let err = client.get_catalog(&options).await.unwrap_err();

    assert_eq!(err.stage(), "build-error");
}

#[tokio::test]
async fn test_unreachable_service_is_http_request_error() {
    let config = ClientConfig::new(NoAuthAuthenticator)
        .with_service_url("http://127.0.0.1:9")
        .with_timeout(Duration::from_secs(2));
    let client = CatalogManagementV1::new(config).unwrap();

    let err = client
        .list_catalogs(&ListCatalogsOptions::new())
        .await
        .unwrap_err();

    assert!(matches!(err, CatalogError::HttpRequest { .. }));
    assert_eq!(err.stage(), "http-request-err");
    assert_eq!(err.status_code(), None);
}

#[tokio::test]
async fn test_errors_are_not_retried() {
    let server = MockServer::start();
    let failing_mock = server.mock(|when, then| {
        when.method(GET).path("/catalogs");
        then.status(500).json_body(json!({"message": "internal error"}));
    });

    let err = client_for(&server)
        .list_catalogs(&ListCatalogsOptions::new())
        .await
        .unwrap_err();

    assert_eq!(err.status_code(), Some(500));
    failing_mock.assert_hits(1);
}

#[tokio::test]
async fn test_null_collections_are_accepted() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/plans/p1");
        then.status(200).json_body(json!({"id": "p1", "tags": null}));
    });
    server.mock(|when, then| {
        when.method(GET).path("/catalogs");
        then.status(200).json_body(json!({"total_count": 0, "resources": null}));
    });

    let client = client_for(&server);
    let plan = client
        .get_plan(&GetPlanOptions::new("p1"))
        .await
        .unwrap()
        .into_result()
        .unwrap();
    assert_eq!(plan.id.as_deref(), Some("p1"));
    assert!(plan.tags.is_empty());

    let catalogs = client
        .list_catalogs(&ListCatalogsOptions::new())
        .await
        .unwrap()
        .into_result()
        .unwrap();
    assert_eq!(catalogs.total_count, Some(0));
    assert!(catalogs.resources.is_empty());
}
