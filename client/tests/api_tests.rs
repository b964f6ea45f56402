//! Backend client tests
//!
//! Runs the client against a mock backend to cover:
//! - Session headers on every request
//! - Error mapping (401, invalid JSON, 4xx messages, masked 5xx)
//! - Response envelope normalization

use serde_json::{json, Value};
use wiremock::matchers::{header, header_exists, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use scrap_erp_client::error::MASKED_SERVER_ERROR;
use scrap_erp_client::{ApiClient, ClientError, CompanyCredentials, Session};

// ============================================================================
// Helpers
// ============================================================================

fn logged_in_session() -> Session {
    Session {
        user_id: Some("42".to_string()),
        user_name: Some("operator".to_string()),
        company_id: Some("7".to_string()),
        ..Default::default()
    }
    .with_company(CompanyCredentials::new("indus", "secret"))
    .with_production_unit("3", "Unit 3")
}

fn client_for(server: &MockServer) -> ApiClient {
    ApiClient::with_base_url(server.uri())
}

// ============================================================================
// Session Headers
// ============================================================================

#[tokio::test]
async fn test_anonymous_request_carries_zero_ids() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/scrap/groups"))
        .and(header("UserID", "0"))
        .and(header("CompanyID", "0"))
        .and(header("DBType", "MSSQL"))
        .and(header_exists("FYear"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"id": 1}])))
        .expect(1)
        .mount(&server)
        .await;

    let api = client_for(&server);
    let groups = api.scrap().groups(&Session::new()).await.unwrap();
    assert_eq!(groups, json!([{"id": 1}]));
}

#[tokio::test]
async fn test_logged_in_request_carries_session_context() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/scrap/warehouses"))
        .and(header("Authorization", "Basic aW5kdXM6c2VjcmV0"))
        .and(header("X-User-Name", "operator"))
        .and(header("UserID", "42"))
        .and(header("X-Company-Id", "7"))
        .and(header("ProductionUnitID", "3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": [{"WarehouseID": 2, "WarehouseName": "Scrap Yard"}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let api = client_for(&server);
    let warehouses = api.scrap().warehouses(&logged_in_session()).await.unwrap();
    assert_eq!(warehouses[0]["WarehouseName"], "Scrap Yard");
}

#[tokio::test]
async fn test_company_login_uses_explicit_credentials() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/scrap/auth/company"))
        .and(header("Authorization", "Basic YWNtZTpodW50ZXIy"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"message": "Company verified"})))
        .expect(1)
        .mount(&server)
        .await;

    let api = client_for(&server);
    let response = api
        .auth()
        .authenticate_company(&logged_in_session(), &CompanyCredentials::new("acme", "hunter2"))
        .await
        .unwrap();
    assert!(response.success);
    assert_eq!(response.message.as_deref(), Some("Company verified"));
}

// ============================================================================
// Error Mapping
// ============================================================================

#[tokio::test]
async fn test_unauthorized_is_reported_before_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/scrap/auth/session"))
        .respond_with(ResponseTemplate::new(401).set_body_string("<html>login</html>"))
        .mount(&server)
        .await;

    let api = client_for(&server);
    let err = api.auth().validate_session(&Session::new()).await.unwrap_err();
    assert!(err.is_unauthorized());
}

#[tokio::test]
async fn test_invalid_json_is_rejected_even_on_error_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/scrap/groups"))
        .respond_with(ResponseTemplate::new(502).set_body_string("<html>Bad gateway</html>"))
        .mount(&server)
        .await;

    let api = client_for(&server).production(true);
    match api.scrap().groups(&Session::new()).await {
        Err(ClientError::InvalidJson(excerpt)) => assert!(excerpt.contains("Bad gateway")),
        other => panic!("expected InvalidJson, got {:?}", other),
    }
}

#[tokio::test]
async fn test_client_error_message_is_surfaced() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/scrap/entry"))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(json!({"Message": "Warehouse is closed"})),
        )
        .mount(&server)
        .await;

    let api = client_for(&server);
    let err = api
        .post(&Session::new(), "/api/scrap/entry", Some(&json!({})))
        .await
        .unwrap_err();
    assert_eq!(err.status(), Some(400));
    assert_eq!(err.to_string(), "Warehouse is closed");
}

#[tokio::test]
async fn test_status_message_when_body_has_none() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/api/invoice/9"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let api = client_for(&server);
    let err = api.invoice().delete(&Session::new(), 9).await.unwrap_err();
    assert_eq!(err.to_string(), "Request failed with status 404");
}

#[tokio::test]
async fn test_server_error_masked_in_production() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/invoice/clients"))
        .respond_with(
            ResponseTemplate::new(500)
                .set_body_json(json!({"ExceptionMessage": "Invalid column name 'LedgerID'"})),
        )
        .mount(&server)
        .await;

    let session = Session::new();
    let production = client_for(&server).production(true);
    let err = production.invoice().clients(&session).await.unwrap_err();
    assert_eq!(err.to_string(), MASKED_SERVER_ERROR);

    let development = client_for(&server);
    let err = development.invoice().clients(&session).await.unwrap_err();
    assert_eq!(err.to_string(), "Invalid column name 'LedgerID'");
}

#[tokio::test]
async fn test_unreachable_backend_is_network_error() {
    let api = ApiClient::with_base_url("http://127.0.0.1:9");
    let err = api.scrap().groups(&Session::new()).await.unwrap_err();
    assert!(matches!(err, ClientError::Network(_)));
}

// ============================================================================
// Envelope
// ============================================================================

#[tokio::test]
async fn test_rejected_envelope_fails_the_call() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/api/invoice/12/approve"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": false,
            "message": "Invoice already approved"
        })))
        .mount(&server)
        .await;

    let api = client_for(&server);
    match api.invoice().approve(&Session::new(), 12).await {
        Err(ClientError::Rejected(message)) => assert_eq!(message, "Invoice already approved"),
        other => panic!("expected Rejected, got {:?}", other),
    }
}

#[tokio::test]
async fn test_user_login_updates_session() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/scrap/auth/user"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "Id": 17,
            "UserID": 17,
            "CompanyID": 2,
            "ProductionUnitID": 5
        })))
        .expect(1)
        .mount(&server)
        .await;

    let api = client_for(&server);
    let mut session = Session::new();
    api.auth().login(&mut session, "operator", "pw").await.unwrap();
    assert_eq!(session.user_id.as_deref(), Some("17"));
    assert_eq!(session.company_id.as_deref(), Some("2"));
    assert_eq!(session.production_unit_id(), Some("5"));
    assert_eq!(session.user_name.as_deref(), Some("operator"));

    let requests = server.received_requests().await.unwrap();
    let body: Value = serde_json::from_slice(&requests[0].body).unwrap();
    assert_eq!(body, json!({"Username": "operator", "Password": "pw"}));
}

#[tokio::test]
async fn test_materials_are_normalized() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/scrap/materials"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"ItemID": 15, "ItemCode": "PAP-001", "ItemName": "Art Paper",
             "ItemGroupName": "PAPER", "StockUnit": "KG", "GSM": "170"}
        ])))
        .mount(&server)
        .await;

    let api = client_for(&server);
    let materials = api.scrap().materials(&Session::new()).await.unwrap();
    assert_eq!(materials.len(), 1);
    assert_eq!(materials[0].id, 15);
    assert_eq!(materials[0].gsm, Some(170.0));
}

#[tokio::test]
async fn test_ledger_query_parameters() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/scrap/ledger"))
        .and(query_param("itemId", "15"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let api = client_for(&server);
    let rows = api
        .scrap()
        .ledger(&Session::new(), Some(15), &Default::default())
        .await
        .unwrap();
    assert!(rows.is_empty());
}
