use catalog_mgmt::services::catalog_management::*;
use catalog_mgmt::{
    BasicAuthenticator, BearerTokenAuthenticator, ClientConfig, IamAuthenticator,
    NoAuthAuthenticator,
};
use httpmock::prelude::*;
use serde_json::json;
use std::collections::HashMap;
use std::time::{Duration, Instant};

#[tokio::test]
async fn test_bearer_token_is_sent() {
    let server = MockServer::start();
    let get_mock = server.mock(|when, then| {
        when.method(GET)
            .path("/plans/p1")
            .header("Authorization", "Bearer static-token");
        then.status(200).json_body(json!({"id": "p1"}));
    });

    let config = ClientConfig::new(BearerTokenAuthenticator::new("static-token").unwrap())
        .with_service_url(server.base_url());
    let client = CatalogManagementV1::new(config).unwrap();
    client.get_plan(&GetPlanOptions::new("p1")).await.unwrap();

    get_mock.assert();
}

#[tokio::test]
async fn test_basic_auth_is_sent() {
    let server = MockServer::start();
    let get_mock = server.mock(|when, then| {
        when.method(GET)
            .path("/catalogs")
            .header("Authorization", "Basic YWRtaW46czNjcjN0");
        then.status(200).json_body(json!({"resources": []}));
    });

    let config = ClientConfig::new(BasicAuthenticator::new("admin", "s3cr3t").unwrap())
        .with_service_url(server.base_url());
    let client = CatalogManagementV1::new(config).unwrap();
    let response = client.list_catalogs(&ListCatalogsOptions::new()).await.unwrap();

    get_mock.assert();
    assert!(response.result.unwrap().resources.is_empty());
}

#[tokio::test]
async fn test_iam_token_is_exchanged_once_and_reused() {
    let iam = MockServer::start();
    let token_mock = iam.mock(|when, then| {
        when.method(POST)
            .path("/identity/token")
            .header("Content-Type", "application/x-www-form-urlencoded")
            .body_contains("apikey=my-api-key");
        then.status(200).json_body(json!({
            "access_token": "iam-access-token",
            "refresh_token": "not-used",
            "token_type": "Bearer",
            "expires_in": 3600,
            "expiration": 1893456000
        }));
    });

    let api = MockServer::start();
    let plan_mock = api.mock(|when, then| {
        when.method(GET)
            .path("/plans/p1")
            .header("Authorization", "Bearer iam-access-token");
        then.status(200).json_body(json!({"id": "p1"}));
    });

    let authenticator = IamAuthenticator::with_url("my-api-key", &iam.base_url()).unwrap();
    let config = ClientConfig::new(authenticator).with_service_url(api.base_url());
    let client = CatalogManagementV1::new(config).unwrap();

    for _ in 0..3 {
        client.get_plan(&GetPlanOptions::new("p1")).await.unwrap();
    }

    token_mock.assert_hits(1);
    plan_mock.assert_hits(3);
}

#[tokio::test]
async fn test_iam_token_failure_is_authentication_error() {
    let iam = MockServer::start();
    iam.mock(|when, then| {
        when.method(POST).path("/identity/token");
        then.status(400).json_body(json!({"errorMessage": "Provided API key could not be found"}));
    });

    let api = MockServer::start();
    let plan_mock = api.mock(|when, then| {
        when.any_request();
        then.status(200);
    });

    let authenticator = IamAuthenticator::with_url("bad-key", &iam.base_url()).unwrap();
    let config = ClientConfig::new(authenticator).with_service_url(api.base_url());
    let client = CatalogManagementV1::new(config).unwrap();

    let err = client.get_plan(&GetPlanOptions::new("p1")).await.unwrap_err();
    assert_eq!(err.stage(), "authentication-error");
    assert!(err.to_string().contains("could not be found"));
    assert_eq!(plan_mock.hits(), 0);
}

#[tokio::test]
async fn test_stalled_iam_endpoint_times_out() {
    let iam = MockServer::start();
    iam.mock(|when, then| {
        when.method(POST).path("/identity/token");
        then.status(200)
            .delay(Duration::from_secs(5))
            .json_body(json!({"access_token": "late", "expires_in": 3600}));
    });

    let api = MockServer::start();
    let plan_mock = api.mock(|when, then| {
        when.any_request();
        then.status(200);
    });

    let authenticator = IamAuthenticator::with_url("my-api-key", &iam.base_url())
        .unwrap()
        .with_timeout(Duration::from_millis(300))
        .unwrap();
    let config = ClientConfig::new(authenticator).with_service_url(api.base_url());
    let client = CatalogManagementV1::new(config).unwrap();

    let started = Instant::now();
    let err = client.get_plan(&GetPlanOptions::new("p1")).await.unwrap_err();

    assert_eq!(err.stage(), "authentication-error");
    assert!(started.elapsed() < Duration::from_secs(4));
    assert_eq!(plan_mock.hits(), 0);
}

#[tokio::test]
async fn test_sdk_headers_override_caller_headers() {
    let server = MockServer::start();
    let get_mock = server.mock(|when, then| {
        when.method(GET)
            .path("/plans/p1")
            .header("Accept", "application/json")
            .header(
                "X-IBMCloud-SDK-Analytics",
                "service_name=catalog_management;service_version=V1;operation_id=GetPlan",
            )
            .header("X-Correlation-Id", "req-42");
        then.status(200).json_body(json!({"id": "p1"}));
    });

    let config = ClientConfig::new(NoAuthAuthenticator).with_service_url(server.base_url());
    let client = CatalogManagementV1::new(config).unwrap();
    let options = GetPlanOptions::new("p1")
        .with_header("accept", "text/plain")
        .with_header("X-Correlation-Id", "req-42");
    client.get_plan(&options).await.unwrap();

    get_mock.assert();
}

#[tokio::test]
async fn test_default_headers_apply_unless_overridden() {
    let server = MockServer::start();
    let default_mock = server.mock(|when, then| {
        when.method(GET)
            .path("/catalogs/cat-1")
            .header("X-Tenant", "default-tenant");
        then.status(200).json_body(json!({"id": "cat-1"}));
    });
    let override_mock = server.mock(|when, then| {
        when.method(GET)
            .path("/catalogs/cat-2")
            .header("X-Tenant", "caller-tenant");
        then.status(200).json_body(json!({"id": "cat-2"}));
    });

    let config = ClientConfig::new(NoAuthAuthenticator)
        .with_service_url(server.base_url())
        .with_header("X-Tenant", "default-tenant");
    let client = CatalogManagementV1::new(config).unwrap();

    client
        .get_catalog(&GetCatalogOptions::new("cat-1"))
        .await
        .unwrap();
    client
        .get_catalog(&GetCatalogOptions::new("cat-2").with_header("X-Tenant", "caller-tenant"))
        .await
        .unwrap();

    default_mock.assert();
    override_mock.assert();
}

#[tokio::test]
async fn test_set_default_headers_replaces_previous_defaults() {
    let server = MockServer::start();
    let get_mock = server.mock(|when, then| {
        when.method(GET).path("/catalogs").header("X-Env", "staging");
        then.status(200).json_body(json!({"resources": []}));
    });

    let config = ClientConfig::new(NoAuthAuthenticator)
        .with_service_url(server.base_url())
        .with_header("X-Env", "prod");
    let mut client = CatalogManagementV1::new(config).unwrap();
    client.set_default_headers(HashMap::from([("X-Env".to_string(), "staging".to_string())]));

    client.list_catalogs(&ListCatalogsOptions::new()).await.unwrap();
    get_mock.assert();
}
