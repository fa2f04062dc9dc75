//! Integration tests for `EbayClient` using wiremock HTTP mocks.

use std::time::Duration;

use flipcalc_core::{Category, CostBasis, FeeSchedule, SearchParams};
use flipcalc_ebay::{EbayClient, EbayError, SearchRequest};
use rust_decimal_macros::dec;
use wiremock::matchers::{body_string_contains, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const TOKEN_PATH: &str = "/identity/v1/oauth2/token";
const SEARCH_PATH: &str = "/buy/browse/v1/item_summary/search";
// base64("test-id:test-secret")
const BASIC_AUTH: &str = "Basic dGVzdC1pZDp0ZXN0LXNlY3JldA==";

fn test_client(base_url: &str) -> EbayClient {
    EbayClient::with_base_url("test-id", "test-secret", 30, "flipcalc-test/0.1", base_url)
        .expect("client construction should not fail")
}

fn params(term: &str, category: Category) -> SearchParams {
    SearchParams {
        search_term: term.to_string(),
        category,
        max_price: dec!(30),
        cost_basis: CostBasis::Cogs(dec!(2)),
        shipping_cost: dec!(4.47),
        ad_rate_percent: dec!(3),
        limit: 25,
    }
}

fn item(id: &str, title: &str, price: &str, condition_id: &str) -> serde_json::Value {
    serde_json::json!({
        "itemId": id,
        "title": title,
        "price": { "value": price, "currency": "USD" },
        "shippingOptions": [
            { "shippingCostType": "FIXED", "shippingCost": { "value": "3.99", "currency": "USD" } }
        ],
        "condition": "Good",
        "conditionId": condition_id,
        "buyingOptions": ["FIXED_PRICE"],
        "seller": {
            "username": "bookbarn",
            "feedbackPercentage": "98.6",
            "feedbackScore": 1204
        },
        "itemWebUrl": format!("https://www.ebay.com/itm/{id}")
    })
}

async fn mount_token(server: &MockServer, token: &str, expires_in: u64, expected_calls: u64) {
    Mock::given(method("POST"))
        .and(path(TOKEN_PATH))
        .and(header("authorization", BASIC_AUTH))
        .and(body_string_contains("grant_type=client_credentials"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "access_token": token,
            "expires_in": expires_in,
            "token_type": "Application Access Token"
        })))
        .expect(expected_calls)
        .mount(server)
        .await;
}

async fn mount_empty_search(server: &MockServer, token: &str) {
    Mock::given(method("GET"))
        .and(path(SEARCH_PATH))
        .and(header("authorization", format!("Bearer {token}").as_str()))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({ "total": 0, "itemSummaries": [] })),
        )
        .mount(server)
        .await;
}

#[tokio::test]
async fn search_sends_query_filters_and_bearer_token() {
    let server = MockServer::start().await;
    mount_token(&server, "tok-1", 7200, 1).await;

    Mock::given(method("GET"))
        .and(path(SEARCH_PATH))
        .and(header("authorization", "Bearer tok-1"))
        .and(query_param("q", "\"dune\""))
        .and(query_param(
            "filter",
            "price:[1..30],priceCurrency:USD,conditions:{1000|1500|2000|2500|3000},buyingOptions:{FIXED_PRICE|BEST_OFFER}",
        ))
        .and(query_param("limit", "25"))
        .and(query_param("sort", "price"))
        .and(query_param("category_ids", "267"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "total": 2,
            "itemSummaries": [
                item("v1|1|0", "Dune paperback", "7.50", "5000"),
                item("v1|2|0", "Dune hardcover", "12.00", "4000")
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let request = SearchRequest::from_params(&params("dune", Category::Books));
    let response = client.search(&request).await.expect("search should succeed");

    assert_eq!(response.total, Some(2));
    assert_eq!(response.item_summaries.len(), 2);
}

#[tokio::test]
async fn token_is_reused_across_searches() {
    let server = MockServer::start().await;
    mount_token(&server, "tok-cached", 7200, 1).await;
    mount_empty_search(&server, "tok-cached").await;

    let client = test_client(&server.uri());
    let request = SearchRequest::from_params(&params("dune", Category::All));
    client.search(&request).await.expect("first search");
    client.search(&request).await.expect("second search");
}

#[tokio::test]
async fn short_lived_token_is_refetched() {
    let server = MockServer::start().await;
    // 30s is inside the expiry margin, so the token is stale immediately.
    mount_token(&server, "tok-short", 30, 2).await;
    mount_empty_search(&server, "tok-short").await;

    let client = test_client(&server.uri());
    let request = SearchRequest::from_params(&params("dune", Category::All));
    client.search(&request).await.expect("first search");
    client.search(&request).await.expect("second search");
}

#[tokio::test]
async fn rejected_credentials_return_auth_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(TOKEN_PATH))
        .respond_with(ResponseTemplate::new(401).set_body_string(
            r#"{"error":"invalid_client","error_description":"client authentication failed"}"#,
        ))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client.access_token().await.unwrap_err();

    match err {
        EbayError::Auth(msg) => {
            assert!(msg.contains("401"), "message was: {msg}");
            assert!(msg.contains("invalid_client"), "message was: {msg}");
        }
        other => panic!("expected Auth, got: {other:?}"),
    }
}

#[tokio::test]
async fn token_response_without_access_token_is_auth_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(TOKEN_PATH))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({ "expires_in": 7200 })),
        )
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client.access_token().await.unwrap_err();
    assert!(matches!(err, EbayError::Auth(_)), "got: {err:?}");
}

#[tokio::test]
async fn non_success_search_returns_api_error_with_request() {
    let server = MockServer::start().await;
    mount_token(&server, "tok-1", 7200, 1).await;

    Mock::given(method("GET"))
        .and(path(SEARCH_PATH))
        .respond_with(ResponseTemplate::new(500).set_body_string("upstream exploded"))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let request = SearchRequest::from_params(&params("halo 3", Category::VideoGames));
    let err = client.search(&request).await.unwrap_err();

    match err {
        EbayError::Api {
            status,
            body,
            context,
        } => {
            assert_eq!(status, 500);
            assert_eq!(body, "upstream exploded");
            assert!(context.contains("q=\"halo 3\""), "context was: {context}");
            assert!(context.contains("category_ids=1249"), "context was: {context}");
        }
        other => panic!("expected Api, got: {other:?}"),
    }
}

#[tokio::test]
async fn search_timeout_returns_transport_error_with_request() {
    let server = MockServer::start().await;
    mount_token(&server, "tok-1", 7200, 1).await;

    Mock::given(method("GET"))
        .and(path(SEARCH_PATH))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({ "total": 0, "itemSummaries": [] }))
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&server)
        .await;

    let client =
        EbayClient::with_base_url("test-id", "test-secret", 1, "flipcalc-test/0.1", &server.uri())
            .expect("client construction should not fail");
    let request = SearchRequest::from_params(&params("dune", Category::Books));
    let err = client.search(&request).await.unwrap_err();

    match err {
        EbayError::SearchTransport { context, source } => {
            assert!(source.is_timeout(), "source was: {source}");
            assert!(context.contains("price:[1..30]"), "context was: {context}");
            assert!(context.contains("q=\"dune\""), "context was: {context}");
        }
        other => panic!("expected SearchTransport, got: {other:?}"),
    }
}

#[tokio::test]
async fn unreachable_token_endpoint_returns_token_transport_error() {
    // Nothing listens on port 1; the connection is refused.
    let client = test_client("http://127.0.0.1:1");
    let err = client.access_token().await.unwrap_err();
    assert!(matches!(err, EbayError::TokenTransport(_)), "got: {err:?}");
}

#[tokio::test]
async fn invalid_search_json_returns_deserialize_error() {
    let server = MockServer::start().await;
    mount_token(&server, "tok-1", 7200, 1).await;

    Mock::given(method("GET"))
        .and(path(SEARCH_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let request = SearchRequest::from_params(&params("dune", Category::Books));
    let err = client.search(&request).await.unwrap_err();
    assert!(matches!(err, EbayError::Deserialize { .. }), "got: {err:?}");
}

#[tokio::test]
async fn search_listings_normalizes_and_counts_skips() {
    let server = MockServer::start().await;
    mount_token(&server, "tok-1", 7200, 1).await;

    Mock::given(method("GET"))
        .and(path(SEARCH_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "total": 4,
            "itemSummaries": [
                item("v1|1|0", "Dune paperback", "7.50", "5000"),
                item("v1|2|0", "Dune parts lot", "2.00", "7000"),
                item("v1|3|0", "Dune signed first edition", "29.00", "3000"),
                { "itemId": "v1|4|0", "price": 12 }
            ]
        })))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let report = client
        .search_listings(&params("dune", Category::Books), &FeeSchedule::default())
        .await
        .expect("search should succeed");

    assert_eq!(report.listings.len(), 1);
    let listing = &report.listings[0];
    assert_eq!(listing.item_id, "v1|1|0");
    assert_eq!(listing.price, dec!(7.50));
    assert_eq!(listing.buyer_shipping, dec!(3.99));
    assert_eq!(listing.seller, "bookbarn");
    assert_eq!(report.skipped_for_parts, 1);
    assert_eq!(report.skipped_over_budget, 1);
    assert_eq!(report.malformed, 1);
}
