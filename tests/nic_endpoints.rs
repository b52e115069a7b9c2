//! HTTP-level tests for the four provider drivers and the catalog sync,
//! driven through the `MidClient` facade against a mock provider.

use midtools::{Error, MidClient};
use mockito::{Matcher, Server, ServerGuard};
use serde_json::json;
use std::time::Duration;

fn client_for(server: &ServerGuard) -> MidClient {
    MidClient::builder()
        .api_endpoint(server.url())
        .api_key("test-key")
        .rate_limit(Duration::ZERO, 2)
        .build()
        .unwrap()
}

#[tokio::test]
async fn brown_cards_mixes_screened_and_remote_results() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/public-api/generate-browncard")
        .match_header("authorization", "x-api-key test-key")
        .match_header("content-type", "application/json")
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "success": true,
                "data": {"statusCode": "200", "brownCardNumber": "BC-42", "url": "https://nic/cards/42.pdf"},
                "message": "",
                "httpStatusCode": 200
            })
            .to_string(),
        )
        .create_async()
        .await;

    let client = client_for(&server);
    // ZZ123422 fails plate screening and must never reach the provider.
    let results = client.brown_cards("GR123422,ZZ123422").await.unwrap();

    assert_eq!(results.len(), 2);
    let rejected = results.iter().find(|r| r.car_number == "ZZ123422").unwrap();
    assert!(!rejected.status);
    assert_eq!(rejected.message, "Invalid region code: ZZ");
    assert!(rejected.brown_card_number.is_empty());

    let issued = results.iter().find(|r| r.car_number == "GR123422").unwrap();
    assert!(issued.status);
    assert_eq!(issued.brown_card_number, "BC-42");
    assert_eq!(issued.url, "https://nic/cards/42.pdf");
    assert_eq!(issued.message, "Brown card generated successfully");

    mock.assert_async().await;
}

#[tokio::test]
async fn stickers_surface_business_rejection_message() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", "/public-api/generate-sticker")
        .with_header("content-type", "application/json")
        .with_body(json!({"success": false, "message": "Policy expired"}).to_string())
        .create_async()
        .await;

    let client = client_for(&server);
    let results = client.stickers("AS1234GH").await.unwrap();

    assert_eq!(results.len(), 1);
    assert!(!results[0].status);
    assert_eq!(results[0].message, "Policy expired");
    assert!(results[0].sticker_link.is_empty());
}

#[tokio::test]
async fn policy_verification_trims_registration_and_maps_window() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/public-api/policy-verification")
        .match_body(Matcher::Json(
            json!({"data": {"registrationNumber": "GR123422"}}),
        ))
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "success": true,
                "data": {"productName": "Third Party", "startDate": "2026-01-01", "endDate": "2026-12-31"}
            })
            .to_string(),
        )
        .create_async()
        .await;

    let client = client_for(&server);
    let results = client.policy_verifications(" GR123422").await.unwrap();

    assert_eq!(results.len(), 1);
    assert!(results[0].status);
    assert_eq!(results[0].product_name, "Third Party");
    assert_eq!(results[0].start_date, "2026-01-01");
    assert_eq!(results[0].end_date, "2026-12-31");
    // The output echoes the raw submitted token, the wire body the trimmed one.
    assert_eq!(results[0].car_number, " GR123422");

    mock.assert_async().await;
}

#[tokio::test]
async fn ussd_check_success_comes_from_msg_field() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", "/public-api/vehicle-insurance-ussd-check")
        .match_body(Matcher::PartialJson(json!({"USERID": "1", "MSISDN": "8"})))
        .with_header("content-type", "application/json")
        .with_body(
            json!({"USERID": "1", "MSISDN": "8", "MSG": "Insured until 2026-12-31", "MSGTYPE": true})
                .to_string(),
        )
        .create_async()
        .await;

    let client = client_for(&server);
    let results = client.ussd_checks("GT512419").await.unwrap();

    assert_eq!(results.len(), 1);
    assert!(results[0].status);
    assert_eq!(results[0].message, "Insured until 2026-12-31");
}

#[tokio::test]
async fn undecodable_body_becomes_failed_outcome() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", "/public-api/generate-browncard")
        .with_body("<html>gateway timeout</html>")
        .create_async()
        .await;

    let client = client_for(&server);
    let results = client.brown_cards("GR123422").await.unwrap();

    assert_eq!(results.len(), 1);
    assert!(!results[0].status);
    assert_eq!(results[0].message, "Invalid response from NIC");
}

#[tokio::test]
async fn transport_failure_becomes_failed_outcome() {
    // Nothing listens on this port; the connection itself fails.
    let client = MidClient::builder()
        .api_endpoint("http://127.0.0.1:1")
        .api_key("test-key")
        .rate_limit(Duration::ZERO, 2)
        .http_timeout(Duration::from_millis(500))
        .build()
        .unwrap();

    let results = client.brown_cards("GR123422").await.unwrap();

    assert_eq!(results.len(), 1);
    assert!(!results[0].status);
    assert!(!results[0].message.is_empty());
}

#[tokio::test]
async fn whitespace_only_input_is_a_validation_error() {
    let server = Server::new_async().await;
    let client = client_for(&server);
    let err = client.stickers(" \t\n").await.unwrap_err();
    assert!(matches!(err, Error::Validation { .. }));
}

#[tokio::test]
async fn sync_products_stores_parseable_entries() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/public-api/products")
        .match_header("authorization", "x-api-key test-key")
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "success": true,
                "data": {"products": [
                    {"id": "1", "name": "Third Party", "productCode": "TP", "description": "Minimum cover"},
                    {"id": "abc", "name": "Broken", "productCode": "XX", "description": ""},
                    {"id": "2", "name": "Comprehensive", "productCode": "CM", "description": "Full cover"}
                ]}
            })
            .to_string(),
        )
        .create_async()
        .await;

    let client = client_for(&server);
    client.sync_products().await.unwrap();

    let products = client.products().await.unwrap();
    // The entry with the non-numeric id is skipped.
    assert_eq!(products.len(), 2);
    assert_eq!(products[0].product_id, 1);
    assert_eq!(products[0].name, "Third Party");
    assert_eq!(products[1].product_code, "CM");
}

#[tokio::test]
async fn sync_risk_types_rejected_envelope_is_remote_error() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/public-api/risk-types")
        .with_header("content-type", "application/json")
        .with_body(json!({"success": false}).to_string())
        .create_async()
        .await;

    let client = client_for(&server);
    let err = client.sync_risk_types().await.unwrap_err();
    assert!(matches!(err, Error::Remote { .. }));
    // The stored catalog is untouched by the failed sync.
    assert!(client.risk_types().await.unwrap().is_empty());
}

#[tokio::test]
async fn sync_risk_types_success_replaces_store() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/public-api/risk-types")
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "success": true,
                "data": {"riskTypes": [
                    {"id": "7", "name": "Private Motor", "riskCategory": "motor",
                     "riskTypeCode": "PM", "description": "Private use"}
                ]}
            })
            .to_string(),
        )
        .create_async()
        .await;

    let client = client_for(&server);
    client.sync_risk_types().await.unwrap();

    let risk_types = client.risk_types().await.unwrap();
    assert_eq!(risk_types.len(), 1);
    assert_eq!(risk_types[0].risk_type_id, 7);
    assert_eq!(risk_types[0].risk_type_code, "PM");
}
