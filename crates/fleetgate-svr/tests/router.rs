use axum::{body::Body, Router};
use fleetgate_core::Config;
use http::{Request, StatusCode};
use http_body_util::BodyExt;
use httpmock::MockServer;
use serde_json::{json, Value};
use tokio::{
    io::{AsyncReadExt, AsyncWriteExt},
    net::TcpListener,
};
use tower::ServiceExt;

fn config(oracle_base: &str) -> Value {
    json!({
        "server": { "addr": "127.0.0.1:0" },
        "oracles": [
            { "id": "motorq", "name": "Motorq", "url": oracle_base },
            { "id": "smartcar", "name": "Smartcar", "url": "https://smartcar.invalid", "use_pending_mode": true }
        ],
        "public": { "client_id": "0xfleet", "login_url": "https://login.example.com" }
    })
}

fn app(config: Value) -> Router {
    let config: Config = serde_json::from_value(config).unwrap();
    fleetgate_svr::router(config).unwrap()
}

async fn body_bytes(response: axum::response::Response) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .unwrap()
        .to_bytes()
        .to_vec()
}

#[tokio::test]
async fn oracle_route_rewrites_path_and_relays_response() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(httpmock::Method::GET)
                .path("/v1/vehicles")
                .query_param("foo", "1")
                .header("accept", "application/json")
                .header("tenant-id", "tenant-7");
            then.status(203)
                .header("content-type", "application/json")
                .body(r#"{"vehicles": [ ] }"#);
        })
        .await;

    let response = app(config(&server.base_url()))
        .oneshot(
            Request::get("/oracle/motorq/vehicles?foo=1")
                .header("Tenant-Id", "tenant-7")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NON_AUTHORITATIVE_INFORMATION);
    assert_eq!(response.headers()["content-type"], "application/json");
    assert_eq!(body_bytes(response).await, br#"{"vehicles": [ ] }"#);
    mock.assert_async().await;
}

#[tokio::test]
async fn unknown_oracle_is_rejected_without_calling_upstream() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.any_request();
            then.status(200);
        })
        .await;

    let response = app(config(&server.base_url()))
        .oneshot(
            Request::get("/oracle/unknown/vehicles")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = serde_json::from_slice(&body_bytes(response).await).unwrap();
    assert_eq!(body["code"], 400);
    assert_eq!(body["message"], "Unknown oracle: unknown");
    assert_eq!(mock.hits_async().await, 0);
}

#[tokio::test]
async fn oracle_body_is_forwarded_untouched() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(httpmock::Method::PUT)
                .path("/v1/vehicle/verify")
                .header("content-type", "application/json")
                .body("{\"vins\": [\"A\",,]");
            then.status(400).body("{\"error\":\"unparseable\"}  ");
        })
        .await;

    let response = app(config(&server.base_url()))
        .oneshot(
            Request::put("/oracle/motorq/vehicle/verify")
                .body(Body::from("{\"vins\": [\"A\",,]"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_bytes(response).await, b"{\"error\":\"unparseable\"}  ");
    mock.assert_async().await;
}

#[tokio::test]
async fn bare_oracle_route_targets_version_root() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(httpmock::Method::DELETE).path("/v1");
            then.status(204);
        })
        .await;

    let response = app(config(&server.base_url()))
        .oneshot(
            Request::delete("/oracle/motorq")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    mock.assert_async().await;
}

#[tokio::test]
async fn unreachable_oracle_is_bad_gateway() {
    let response = app(config("http://127.0.0.1:1"))
        .oneshot(
            Request::get("/oracle/motorq/vehicles")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let body: Value = serde_json::from_slice(&body_bytes(response).await).unwrap();
    assert_eq!(body["message"], "Failed to send request");
}

// Announces more bytes than it sends, then hangs up.
async fn truncated_upstream() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut buf = [0u8; 4096];
        let _ = socket.read(&mut buf).await;
        socket
            .write_all(b"HTTP/1.1 200 OK\r\ncontent-length: 100\r\n\r\nshort")
            .await
            .unwrap();
    });
    format!("http://{addr}")
}

#[tokio::test]
async fn truncated_upstream_body_is_reported_as_read_failure() {
    let response = app(config(&truncated_upstream().await))
        .oneshot(
            Request::get("/oracle/motorq/vehicles")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = serde_json::from_slice(&body_bytes(response).await).unwrap();
    assert_eq!(body["message"], "Failed to read response");
}

#[tokio::test]
async fn public_settings_list_oracles_without_urls() {
    let response = app(config("https://motorq.invalid"))
        .oneshot(
            Request::get("/public/settings")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = serde_json::from_slice(&body_bytes(response).await).unwrap();
    assert_eq!(
        body,
        json!({
            "clientId": "0xfleet",
            "loginUrl": "https://login.example.com/",
            "oracles": [
                { "oracleId": "motorq", "name": "Motorq", "usePendingMode": false },
                { "oracleId": "smartcar", "name": "Smartcar", "usePendingMode": true }
            ]
        })
    );
}

#[tokio::test]
async fn private_settings_render_unset_urls_as_empty() {
    let mut config = config("https://motorq.invalid");
    config["upstream"] = json!({ "accounts": "https://accounts.example.com" });
    config["frontend"] = json!({
        "environment": "dev",
        "rpc_url": "https://rpc.example.com",
        "turnkey": { "org_id": "org-1", "rp_id": "fleet.example.com" }
    });

    let response = app(config)
        .oneshot(Request::get("/v1/settings").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = serde_json::from_slice(&body_bytes(response).await).unwrap();
    assert_eq!(
        body,
        json!({
            "accountsApiUrl": "https://accounts.example.com/",
            "paymasterUrl": "",
            "rpcUrl": "https://rpc.example.com/",
            "bundlerUrl": "",
            "environment": "dev",
            "turnkeyOrgId": "org-1",
            "turnkeyApiUrl": "",
            "turnkeyRpId": "fleet.example.com"
        })
    );
}

#[tokio::test]
async fn root_reports_liveness() {
    let response = app(config("https://motorq.invalid"))
        .oneshot(Request::get("/").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = serde_json::from_slice(&body_bytes(response).await).unwrap();
    assert_eq!(body, json!({ "data": "Server is up and running" }));

    let mut config = config("https://motorq.invalid");
    config["application"] = json!({ "health_check": false });
    let response = app(config)
        .oneshot(Request::get("/").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn add_vehicles_validates_before_contacting_provider() {
    let app = app(config("https://motorq.invalid"));

    let empty = app
        .clone()
        .oneshot(
            Request::post("/v1/vehicles")
                .header("content-type", "application/json")
                .body(Body::from(r#"{"vins": [], "email": "fleet@example.com"}"#))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(empty.status(), StatusCode::BAD_REQUEST);

    let short = app
        .clone()
        .oneshot(
            Request::post("/v1/vehicles")
                .header("content-type", "application/json")
                .body(Body::from(
                    r#"{"vins": ["1HGCM82633A004352", "SHORT"], "email": "fleet@example.com"}"#,
                ))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(short.status(), StatusCode::BAD_REQUEST);
    let body: Value = serde_json::from_slice(&body_bytes(short).await).unwrap();
    assert!(body["message"].as_str().unwrap().contains("SHORT"));

    // no api key configured
    let unauthenticated = app
        .oneshot(
            Request::post("/v1/vehicles")
                .header("content-type", "application/json")
                .body(Body::from(
                    r#"{"vins": ["1HGCM82633A004352"], "email": "fleet@example.com"}"#,
                ))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(unauthenticated.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = serde_json::from_slice(&body_bytes(unauthenticated).await).unwrap();
    assert_eq!(body["message"], "Failed to authenticate with fleet provider");
}

#[tokio::test]
async fn account_routes_need_configured_upstream() {
    let response = app(config("https://motorq.invalid"))
        .oneshot(
            Request::get("/account/fleet@example.com")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn account_lookup_carries_developer_token() {
    let identity = MockServer::start_async().await;
    let register = identity
        .mock_async(|when, then| {
            when.method(httpmock::Method::POST)
                .path("/developer/register-key");
            then.status(200);
        })
        .await;
    let accounts = MockServer::start_async().await;
    let lookup = accounts
        .mock_async(|when, then| {
            when.method(httpmock::Method::GET)
                .path("/api/account/fleet@example.com")
                .header_exists("authorization");
            then.status(200).body(r#"{"email":"fleet@example.com"}"#);
        })
        .await;

    let mut config = config("https://motorq.invalid");
    config["upstream"] = json!({ "accounts": accounts.base_url() });
    config["developer"] = json!({ "api_url": identity.base_url(), "client_id": "0xfleet" });
    let app = app(config);

    for _ in 0..2 {
        let response = app
            .clone()
            .oneshot(
                Request::get("/account/fleet@example.com")
                    .header("Authorization", "Bearer end-user")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            body_bytes(response).await,
            br#"{"email":"fleet@example.com"}"#
        );
    }

    assert_eq!(lookup.hits_async().await, 2);
    assert_eq!(register.hits_async().await, 1);
}

#[tokio::test]
async fn identity_vehicle_rejects_non_numeric_token_id() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.any_request();
            then.status(200);
        })
        .await;

    let mut config = config("https://motorq.invalid");
    config["upstream"] = json!({ "identity": server.url("/query") });
    let response = app(config)
        .oneshot(
            Request::get("/identity/vehicle/12abc")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(mock.hits_async().await, 0);
}

#[tokio::test]
async fn duplicate_oracle_ids_fail_startup() {
    let mut config = config("https://motorq.invalid");
    config["oracles"][1]["id"] = json!("motorq");
    let config: Config = serde_json::from_value(config).unwrap();
    assert!(fleetgate_svr::router(config).is_err());
}

#[tokio::test]
async fn malformed_fleet_endpoint_fails_startup() {
    let mut config = config("https://motorq.invalid");
    config["fleet"] = json!({ "endpoint": "not a uri" });
    let config: Config = serde_json::from_value(config).unwrap();
    assert!(fleetgate_svr::router(config).is_err());
}
