// Integration tests for `ApiClient` using wiremock.
#![allow(clippy::unwrap_used)]

use secrecy::SecretString;
use serde_json::json;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use devctl_api::{ApiClient, DeviceQuery, DeviceStatus, Error, NewDevice};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, ApiClient) {
    let server = MockServer::start().await;
    let client = ApiClient::from_reqwest(&server.uri(), reqwest::Client::new()).unwrap();
    (server, client)
}

fn list_body() -> serde_json::Value {
    json!({
        "Code": 200,
        "Data": {
            "list": [
                {
                    "sn": "SN-A1",
                    "deviceType": "speaker",
                    "vendorName": "acme",
                    "productModel": "X1",
                    "status": "activated",
                    "createTime": "2025-06-01T08:00:00Z"
                }
            ],
            "total": 1
        },
        "Message": ""
    })
}

// ── Happy-path tests ────────────────────────────────────────────────

#[tokio::test]
async fn test_list_devices_unwraps_envelope() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/device/fetch"))
        .and(query_param("pageNum", "1"))
        .and(query_param("pageSize", "10"))
        .respond_with(ResponseTemplate::new(200).set_body_json(list_body()))
        .mount(&server)
        .await;

    let page = client.list_devices(&DeviceQuery::default()).await.unwrap();

    assert_eq!(page.total, 1);
    assert_eq!(page.list.len(), 1);
    assert_eq!(page.list[0].sn, "SN-A1");
    assert_eq!(page.list[0].status, DeviceStatus::Activated);
}

#[tokio::test]
async fn test_list_devices_passes_filters() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/device/fetch"))
        .and(query_param("pageNum", "3"))
        .and(query_param("pageSize", "20"))
        .and(query_param("sn", "SN-A1"))
        .and(query_param("vendorName", "acme"))
        .and(query_param("status", "disabled"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "Code": 200,
            "Data": { "list": [], "total": 0 },
            "Message": ""
        })))
        .expect(1)
        .mount(&server)
        .await;

    let query = DeviceQuery {
        page_num: 3,
        page_size: 20,
        sn: Some("SN-A1".into()),
        vendor_name: Some("acme".into()),
        status: Some(DeviceStatus::Disabled),
        ..DeviceQuery::default()
    };

    let page = client.list_devices(&query).await.unwrap();
    assert!(page.list.is_empty());
}

#[tokio::test]
async fn test_add_device_posts_body() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/device/add"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "Code": 200,
            "Data": null,
            "Message": "ok"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let device = NewDevice {
        sn: "SN-NEW".into(),
        device_type: "camera".into(),
        vendor_name: "acme".into(),
        product_model: None,
        status: None,
    };

    client.add_device(&device).await.unwrap();
}

#[tokio::test]
async fn test_delete_device_by_id() {
    let (server, client) = setup().await;

    Mock::given(method("DELETE"))
        .and(path("/device/SN-A1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "Code": 200,
            "Data": null,
            "Message": ""
        })))
        .expect(1)
        .mount(&server)
        .await;

    client.delete_device("SN-A1").await.unwrap();
}

// ── Token injection ─────────────────────────────────────────────────

#[tokio::test]
async fn test_bearer_token_attached_when_set() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/device/fetch"))
        .and(header("authorization", "Bearer sekrit"))
        .respond_with(ResponseTemplate::new(200).set_body_json(list_body()))
        .expect(1)
        .mount(&server)
        .await;

    client.set_token(SecretString::from("sekrit"));
    client.list_devices(&DeviceQuery::default()).await.unwrap();
}

#[tokio::test]
async fn test_cleared_token_is_not_sent() {
    let (server, client) = setup().await;

    // Any request carrying an Authorization header misses this mock
    // and the call fails, so a pass proves the header is gone.
    Mock::given(method("GET"))
        .and(path("/device/fetch"))
        .and(|req: &wiremock::Request| !req.headers.contains_key("authorization"))
        .respond_with(ResponseTemplate::new(200).set_body_json(list_body()))
        .mount(&server)
        .await;

    client.set_token(SecretString::from("sekrit"));
    client.clear_token();
    assert!(!client.has_token());
    client.list_devices(&DeviceQuery::default()).await.unwrap();
}

// ── Error classification ────────────────────────────────────────────

#[tokio::test]
async fn test_envelope_failure_rejects_with_message() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/device/fetch"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "Code": 3002,
            "Data": null,
            "Message": "device not found"
        })))
        .mount(&server)
        .await;

    let result = client.list_devices(&DeviceQuery::default()).await;

    match result {
        Err(Error::Api { code, ref message }) => {
            assert_eq!(code, 3002);
            assert_eq!(message, "device not found");
        }
        other => panic!("expected Api error, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_status_401_session_expired() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let err = client
        .list_devices(&DeviceQuery::default())
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Status { status: 401, .. }));
    assert!(err.is_auth_expired());
    assert_eq!(err.user_message(), "Session expired, please log in again");
}

#[tokio::test]
async fn test_status_403_permission_denied() {
    let (server, client) = setup().await;

    Mock::given(method("DELETE"))
        .respond_with(ResponseTemplate::new(403))
        .mount(&server)
        .await;

    let err = client.delete_device("SN-A1").await.unwrap_err();
    assert_eq!(err.user_message(), "Permission denied");
}

#[tokio::test]
async fn test_status_500_server_error() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500).set_body_string("panic"))
        .mount(&server)
        .await;

    let err = client
        .list_devices(&DeviceQuery::default())
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Status { status: 500, .. }));
    assert_eq!(err.user_message(), "Internal server error");
}

#[tokio::test]
async fn test_other_status_carries_detail() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(418).set_body_string("teapot"))
        .mount(&server)
        .await;

    let err = client
        .list_devices(&DeviceQuery::default())
        .await
        .unwrap_err();

    assert_eq!(err.user_message(), "Request failed: teapot");
}

#[tokio::test]
async fn test_network_error_without_response() {
    // Unbound port: the connection is refused before any response.
    let client =
        ApiClient::from_reqwest("http://127.0.0.1:9", reqwest::Client::new()).unwrap();

    let err = client
        .list_devices(&DeviceQuery::default())
        .await
        .unwrap_err();

    assert!(err.is_network());
    assert_eq!(err.user_message(), "Network error, check your connection");
}

#[tokio::test]
async fn test_missing_data_error_carries_raw_body() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/device/fetch"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "Code": 200,
            "Message": ""
        })))
        .mount(&server)
        .await;

    let result = client.list_devices(&DeviceQuery::default()).await;

    match result {
        Err(Error::Deserialization { ref message, ref body }) => {
            assert!(message.contains("Data"), "unexpected message: {message}");
            assert!(body.contains("\"Code\""), "expected raw body, got: {body}");
        }
        other => panic!("expected Deserialization error, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_malformed_body_is_deserialization_error() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let result = client.list_devices(&DeviceQuery::default()).await;
    assert!(matches!(result, Err(Error::Deserialization { .. })));
}

// ── Busy signal lifecycle ───────────────────────────────────────────

#[tokio::test]
async fn test_busy_signal_returns_to_idle_after_success() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(list_body()))
        .mount(&server)
        .await;

    assert!(!client.busy().is_busy());
    client.list_devices(&DeviceQuery::default()).await.unwrap();
    assert!(!client.busy().is_busy());
}

#[tokio::test]
async fn test_busy_signal_returns_to_idle_after_failure() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let _ = client.list_devices(&DeviceQuery::default()).await;
    assert!(!client.busy().is_busy());
}
