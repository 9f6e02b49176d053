use salomo_common::{CheckoutLineItem, CheckoutProcessor, CheckoutSessionRequest};
use salomo_config::StripeConfig;
use salomo_stripe::{StripeCheckoutService, StripeError};
use serde_json::json;
use std::collections::BTreeMap;
use wiremock::matchers::{body_string_contains, header, header_exists, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn service_for(server: &MockServer) -> StripeCheckoutService {
    StripeCheckoutService::new(&StripeConfig {
        secret_key: "sk_test_secret".to_string(),
        publishable_key: "pk_test_public".to_string(),
        api_base: server.uri(),
        timeout_secs: 5,
        ..StripeConfig::default()
    })
    .unwrap()
}

fn match_fee_request() -> CheckoutSessionRequest {
    let mut metadata = BTreeMap::new();
    metadata.insert("menu".to_string(), "Sushi".to_string());
    CheckoutSessionRequest {
        line_item: CheckoutLineItem {
            currency: "jpy".to_string(),
            unit_amount: 500,
            product_name: "SALOMO Match Fee".to_string(),
            description: "Menu: Sushi".to_string(),
            quantity: 1,
        },
        success_url: "https://salomo.example/success?session_id={CHECKOUT_SESSION_ID}".to_string(),
        cancel_url: "https://salomo.example/cancel".to_string(),
        metadata,
    }
}

#[tokio::test]
async fn test_create_session_posts_form_to_stripe() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/checkout/sessions"))
        .and(header_exists("authorization"))
        .and(header("stripe-version", "2024-06-20"))
        .and(body_string_contains("mode=payment"))
        .and(body_string_contains("line_items%5B0%5D%5Bprice_data%5D%5Bcurrency%5D=jpy"))
        .and(body_string_contains("line_items%5B0%5D%5Bprice_data%5D%5Bunit_amount%5D=500"))
        .and(body_string_contains("line_items%5B0%5D%5Bquantity%5D=1"))
        .and(body_string_contains("metadata%5Bmenu%5D=Sushi"))
        .and(body_string_contains("%7BCHECKOUT_SESSION_ID%7D"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "cs_test_abc",
            "object": "checkout.session",
            "url": "https://checkout.stripe.com/c/pay/cs_test_abc"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let session = service_for(&server)
        .create_session(match_fee_request())
        .await
        .unwrap();
    assert_eq!(session.id, "cs_test_abc");
    assert_eq!(session.url, "https://checkout.stripe.com/c/pay/cs_test_abc");
}

#[tokio::test]
async fn test_create_session_surfaces_stripe_error_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/checkout/sessions"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "error": {
                "message": "Invalid API Key provided: sk_test_****cret",
                "type": "invalid_request_error"
            }
        })))
        .mount(&server)
        .await;

    let err = service_for(&server)
        .create_session(match_fee_request())
        .await
        .unwrap_err();
    match err {
        StripeError::ApiError { status_code, message } => {
            assert_eq!(status_code, 401);
            assert_eq!(message, "Invalid API Key provided: sk_test_****cret");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_create_session_without_url_is_an_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/checkout/sessions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": "cs_test_nourl" })))
        .mount(&server)
        .await;

    let err = service_for(&server)
        .create_session(match_fee_request())
        .await
        .unwrap_err();
    assert!(matches!(err, StripeError::MissingSessionUrl));
}

#[tokio::test]
async fn test_retrieve_session_expands_nested_objects() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/checkout/sessions/cs_test_abc"))
        .and(query_param("expand[]", "customer_details"))
        .and(query_param("expand[]", "line_items"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "cs_test_abc",
            "object": "checkout.session",
            "status": "complete",
            "metadata": { "menu": "Sushi" },
            "line_items": { "object": "list", "data": [] }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let session = service_for(&server)
        .retrieve_session("cs_test_abc", &["customer_details", "line_items"])
        .await
        .unwrap();
    assert_eq!(session["status"], "complete");
    assert_eq!(session["metadata"]["menu"], "Sushi");
}

#[tokio::test]
async fn test_retrieve_unknown_session() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/checkout/sessions/sess_doesnotexist"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "error": { "message": "No such checkout.session: 'sess_doesnotexist'" }
        })))
        .mount(&server)
        .await;

    let err = service_for(&server)
        .retrieve_session("sess_doesnotexist", &["customer_details"])
        .await
        .unwrap_err();
    assert_eq!(err.message(), "No such checkout.session: 'sess_doesnotexist'");
}

#[tokio::test]
async fn test_publishable_key_is_exposed() {
    let server = MockServer::start().await;
    assert_eq!(service_for(&server).publishable_key(), "pk_test_public");
}
