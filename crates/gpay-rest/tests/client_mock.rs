//! End-to-end tests of the wallet client against a mock server.
//!
//! The mock plays the server's side of the protocol: it checks the
//! signature on each incoming request and signs each response it sends.

use auth::{ApiCredentials, RequestSigner, Salt, SignableFields, SignatureEncoding};
use gpay_rest::{
    ClientConfig, GPayRestClient, GPayRestError, SignedFields, BALANCE_FIELDS,
    OUTSTANDING_FIELDS, PAYMENT_REQUEST_FIELDS, PAYMENT_STATUS_FIELDS, SEND_MONEY_FIELDS,
    STATEMENT_FIELDS, WALLET_CHECK_FIELDS,
};
use model::{Coded, OperationType, TransactionStatus};
use rust_decimal_macros::dec;
use serde_json::Value;
use std::collections::BTreeMap;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Match, Mock, MockServer, Request, ResponseTemplate};

fn credentials() -> ApiCredentials {
    ApiCredentials::new("test-key".into(), "s3cr3t".into(), "p@ss".into())
}

async fn client_for(server: &MockServer, config: ClientConfig) -> GPayRestClient {
    common::init_logging();
    GPayRestClient::with_config(credentials(), config.with_base_url(server.uri())).unwrap()
}

/// Accepts only requests whose signature headers match their JSON body.
struct SignedRequest {
    credentials: ApiCredentials,
    encoding: SignatureEncoding,
}

impl SignedRequest {
    fn base64() -> Self {
        Self {
            credentials: credentials(),
            encoding: SignatureEncoding::Base64,
        }
    }
}

impl Match for SignedRequest {
    fn matches(&self, request: &Request) -> bool {
        let Ok(body) = serde_json::from_slice::<BTreeMap<String, String>>(&request.body) else {
            return false;
        };
        let fields: SignableFields = body.into_iter().collect();

        let header = |name: &str| {
            request
                .headers
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string)
        };
        let (Some(salt), Some(signature)) = (header("x-signature-salt"), header("x-signature-hash"))
        else {
            return false;
        };
        let Ok(salt) = Salt::parse(&salt) else {
            return false;
        };

        let expected = RequestSigner::new(&self.credentials)
            .with_encoding(self.encoding)
            .sign_with_salt(&salt, &fields);
        fields.get("request_timestamp").is_some() && expected == signature
    }
}

/// A 200 response whose `data` is signed the way the server signs it.
fn signed_response(signed: &SignedFields, data_json: &str) -> ResponseTemplate {
    signed_response_with(signed, data_json, |sig| sig)
}

fn signed_response_with(
    signed: &SignedFields,
    data_json: &str,
    tweak: impl FnOnce(String) -> String,
) -> ResponseTemplate {
    let creds = credentials();
    let data: Value = serde_json::from_str(data_json).unwrap();
    let salt = Salt::generate().unwrap();
    let fields = signed.extract(&data).unwrap();
    let signature = RequestSigner::new(&creds)
        .with_encoding(SignatureEncoding::Hex)
        .sign_with_salt(&salt, &fields);

    ResponseTemplate::new(200)
        .insert_header("X-Signature-Salt", salt.as_str())
        .insert_header("X-Signature-Hash", tweak(signature).as_str())
        .set_body_raw(format!(r#"{{"data":{data_json}}}"#), "application/json")
}

const BALANCE_DATA: &str = r#"{"balance": 1250.75, "response_timestamp": 1700000000000}"#;

#[tokio::test]
async fn test_balance_round_trip() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/info/balance"))
        .and(header("authorization", "Bearer test-key"))
        .and(header("accept-language", "en"))
        .and(SignedRequest::base64())
        .respond_with(signed_response(&BALANCE_FIELDS, BALANCE_DATA))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, ClientConfig::default()).await;
    let balance = client.get_wallet_balance().await.unwrap();

    assert_eq!(balance.balance, dec!(1250.75));
    assert_eq!(balance.response_timestamp_ms, 1_700_000_000_000);
}

#[tokio::test]
async fn test_tampered_payload_rejected() {
    let server = MockServer::start().await;

    // Signed over one balance, delivered with another.
    let genuine = signed_response(&BALANCE_FIELDS, BALANCE_DATA);
    let forged_body = r#"{"data":{"balance": 999999.00, "response_timestamp": 1700000000000}}"#;
    Mock::given(method("POST"))
        .and(path("/info/balance"))
        .respond_with(genuine.set_body_raw(forged_body, "application/json"))
        .mount(&server)
        .await;

    let client = client_for(&server, ClientConfig::default()).await;
    let err = client.get_wallet_balance().await.unwrap_err();

    assert!(err.is_verification_failure(), "unexpected error: {err}");
}

#[tokio::test]
async fn test_flipped_signature_rejected() {
    let server = MockServer::start().await;
    let flip = |sig: String| -> String {
        let mut chars: Vec<char> = sig.chars().collect();
        chars[0] = if chars[0] == 'a' { 'b' } else { 'a' };
        chars.into_iter().collect()
    };
    Mock::given(method("POST"))
        .and(path("/info/balance"))
        .respond_with(signed_response_with(&BALANCE_FIELDS, BALANCE_DATA, flip))
        .mount(&server)
        .await;

    let client = client_for(&server, ClientConfig::default()).await;
    let err = client.get_wallet_balance().await.unwrap_err();

    assert!(matches!(
        err,
        GPayRestError::Auth(auth::AuthError::SignatureMismatch)
    ));
}

#[tokio::test]
async fn test_uppercase_hex_signature_accepted() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/info/balance"))
        .respond_with(signed_response_with(&BALANCE_FIELDS, BALANCE_DATA, |s| {
            s.to_uppercase()
        }))
        .mount(&server)
        .await;

    let client = client_for(&server, ClientConfig::default()).await;
    assert!(client.get_wallet_balance().await.is_ok());
}

#[tokio::test]
async fn test_missing_signature_headers_rejected() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/info/balance"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw(format!(r#"{{"data":{BALANCE_DATA}}}"#), "application/json"),
        )
        .mount(&server)
        .await;

    let client = client_for(&server, ClientConfig::default()).await;
    let err = client.get_wallet_balance().await.unwrap_err();

    assert!(err.is_verification_failure());
    assert!(matches!(
        err,
        GPayRestError::Auth(auth::AuthError::MissingHeader(_))
    ));
}

#[tokio::test]
async fn test_missing_required_field_rejected() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/info/balance"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("X-Signature-Salt", "AAAA")
                .insert_header("X-Signature-Hash", "00")
                .set_body_raw(r#"{"data":{"balance":"1.00"}}"#, "application/json"),
        )
        .mount(&server)
        .await;

    let client = client_for(&server, ClientConfig::default()).await;
    let err = client.get_wallet_balance().await.unwrap_err();

    assert!(matches!(
        err,
        GPayRestError::Auth(auth::AuthError::MissingField(ref name)) if name == "response_timestamp"
    ));
    assert!(err.is_verification_failure());
}

#[tokio::test]
async fn test_http_error_is_transport_fault() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500).set_body_string("internal error"))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, ClientConfig::default()).await;
    let err = client.get_wallet_balance().await.unwrap_err();

    assert!(err.is_transport());
    assert!(!err.is_verification_failure());
}

#[tokio::test]
async fn test_create_payment_request_with_null_reference() {
    let server = MockServer::start().await;
    let data = r#"{"requester_username":"shop","request_id":"5f0c6a1e-0000-4000-8000-000000000001",
        "request_time":1700000000123,"amount":"10.50","reference_no":null,
        "response_timestamp":1700000000200}"#;
    Mock::given(method("POST"))
        .and(path("/payment/create-payment-request"))
        .and(body_partial_json(serde_json::json!({
            "amount": "10.50",
            "reference_no": "",
            "description": "Order 42"
        })))
        .and(SignedRequest::base64())
        .respond_with(signed_response(&PAYMENT_REQUEST_FIELDS, data))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, ClientConfig::default()).await;
    let request = client
        .create_payment_request(dec!(10.50), None, Some("Order 42"))
        .await
        .unwrap();

    assert_eq!(request.requester_username, "shop");
    assert_eq!(request.amount, dec!(10.50));
    assert_eq!(request.reference_no, None);
    assert_eq!(request.request_time_ms, 1_700_000_000_123);
}

#[tokio::test]
async fn test_check_payment_status() {
    let server = MockServer::start().await;
    let data = r#"{"request_id":"req-1","transaction_id":"tx-9","amount":"10.50",
        "payment_timestamp":1700000005000,"reference_no":"INV_7","description":null,
        "is_paid":true,"response_timestamp":1700000006000}"#;
    Mock::given(method("POST"))
        .and(path("/payment/check-payment-status"))
        .and(body_partial_json(serde_json::json!({"request_id": "req-1"})))
        .and(SignedRequest::base64())
        .respond_with(signed_response(&PAYMENT_STATUS_FIELDS, data))
        .mount(&server)
        .await;

    let client = client_for(&server, ClientConfig::default()).await;
    let status = client.check_payment_status("req-1").await.unwrap();

    assert!(status.is_paid);
    assert_eq!(status.transaction_id.as_deref(), Some("tx-9"));
    assert_eq!(status.payment_timestamp_ms, Some(1_700_000_005_000));
    assert_eq!(status.description, None);
}

#[tokio::test]
async fn test_send_money() {
    let server = MockServer::start().await;
    let data = r#"{"amount":"25.00","sender_fee":"0.25","transaction_id":"tx-1",
        "old_balance":"100.00","new_balance":"74.75","timestamp":1700000001000,
        "reference_no":"R1","response_timestamp":1700000001500}"#;
    Mock::given(method("POST"))
        .and(path("/payment/send-money"))
        .and(body_partial_json(serde_json::json!({
            "amount": "25.00",
            "wallet_gateway_id": "wallet-2",
            "reference_no": "R1",
            "description": ""
        })))
        .and(SignedRequest::base64())
        .respond_with(signed_response(&SEND_MONEY_FIELDS, data))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, ClientConfig::default()).await;
    let result = client
        .send_money(dec!(25.00), "wallet-2", Some("R1"), None)
        .await
        .unwrap();

    assert_eq!(result.sender_fee, dec!(0.25));
    assert_eq!(result.new_balance, dec!(74.75));
    assert_eq!(result.reference_no.as_deref(), Some("R1"));
}

#[tokio::test]
async fn test_get_statement() {
    let server = MockServer::start().await;
    let data = r#"{"available_balance":"74.75","outstanding_credit":"0.00","outstanding_debit":"5.00",
        "day_balance":"74.75","day_total_in":"0.00","day_total_out":"25.25",
        "response_timestamp":1700000002000,
        "day_statement":[
            {"transaction_id":"tx-1","datetime":"2023-11-14 22:13:21","timestamp":1700000001000,
             "description":null,"amount":"-25.00","balance":"75.00","reference_no":"R1",
             "op_type_id":1,"status":1,"created_at":1700000001000},
            {"transaction_id":"tx-2","datetime":"2023-11-14 22:13:21","op_type_id":5,"status":7}
        ]}"#;
    Mock::given(method("POST"))
        .and(path("/info/statement"))
        .and(body_partial_json(serde_json::json!({"date": "2023-11-14"})))
        .and(SignedRequest::base64())
        .respond_with(signed_response(&STATEMENT_FIELDS, data))
        .mount(&server)
        .await;

    let client = client_for(&server, ClientConfig::default()).await;
    let statement = client.get_statement("2023-11-14").await.unwrap();

    assert_eq!(statement.day_total_out, dec!(25.25));
    assert_eq!(statement.day_statement.len(), 2);
    assert_eq!(
        statement.day_statement[0].op_type,
        Some(Coded::Known(OperationType::DirectTransfer))
    );
    assert_eq!(
        statement.day_statement[1].op_type,
        Some(Coded::Known(OperationType::TransactionFee))
    );
    assert_eq!(statement.day_statement[1].status, Some(Coded::Unknown(7)));
}

#[tokio::test]
async fn test_invalid_date_sends_nothing() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let client = client_for(&server, ClientConfig::default()).await;
    let err = client.get_statement("14/11/2023").await.unwrap_err();

    assert!(matches!(err, GPayRestError::InvalidArgument(_)));
}

#[tokio::test]
async fn test_check_wallet() {
    let server = MockServer::start().await;
    let data = r#"{"exists":true,"wallet_gateway_id":"wallet-2","wallet_name":"Corner Shop",
        "user_account_name":null,"can_receive_money":false,"response_timestamp":1700000003000}"#;
    Mock::given(method("POST"))
        .and(path("/info/check-wallet"))
        .and(SignedRequest::base64())
        .respond_with(signed_response(&WALLET_CHECK_FIELDS, data))
        .mount(&server)
        .await;

    let client = client_for(&server, ClientConfig::default()).await;
    let check = client.check_wallet("wallet-2").await.unwrap();

    assert!(check.exists);
    assert!(!check.can_receive_money);
    assert_eq!(check.wallet_name.as_deref(), Some("Corner Shop"));
    assert_eq!(check.user_account_name, None);
}

#[tokio::test]
async fn test_outstanding_transactions() {
    let server = MockServer::start().await;
    let data = r#"{"outstanding_credit":"12.00","outstanding_debit":"0.00",
        "response_timestamp":1700000004000,
        "outstanding_transactions":[
            {"transaction_id":"tx-3","datetime":"2023-11-14 22:20:00","amount":"12.00",
             "op_type_id":3,"status":0}
        ]}"#;
    Mock::given(method("POST"))
        .and(path("/info/outstanding-transactions"))
        .and(SignedRequest::base64())
        .respond_with(signed_response(&OUTSTANDING_FIELDS, data))
        .mount(&server)
        .await;

    let client = client_for(&server, ClientConfig::default()).await;
    let outstanding = client.get_outstanding_transactions().await.unwrap();

    assert_eq!(outstanding.outstanding_credit, dec!(12.00));
    let tx = &outstanding.outstanding_transactions[0];
    assert_eq!(tx.op_type, Some(Coded::Known(OperationType::BankDeposit)));
    assert_eq!(tx.status, Some(Coded::Known(TransactionStatus::Pending)));
}

#[tokio::test]
async fn test_language_and_hex_request_encoding() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/info/balance"))
        .and(header("accept-language", "ar"))
        .and(SignedRequest {
            credentials: credentials(),
            encoding: SignatureEncoding::Hex,
        })
        .respond_with(signed_response(&BALANCE_FIELDS, BALANCE_DATA))
        .expect(1)
        .mount(&server)
        .await;

    let config = ClientConfig::default()
        .with_language("ar")
        .with_request_encoding(SignatureEncoding::Hex);
    let client = client_for(&server, config).await;

    assert!(client.get_wallet_balance().await.is_ok());
}

#[tokio::test]
async fn test_empty_language_in_config_literal_sends_en() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/info/balance"))
        .and(header("accept-language", "en"))
        .and(SignedRequest::base64())
        .respond_with(signed_response(&BALANCE_FIELDS, BALANCE_DATA))
        .expect(1)
        .mount(&server)
        .await;

    let config = ClientConfig {
        language: String::new(),
        ..ClientConfig::default()
    };
    let client = client_for(&server, config).await;

    assert_eq!(client.language(), "en");
    assert!(client.get_wallet_balance().await.is_ok());
}
