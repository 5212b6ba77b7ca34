//! Integration tests for `BackendClient` using wiremock HTTP mocks.

use pricewatch_client::{BackendClient, ClientError};
use pricewatch_core::Filter;
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client(base_url: &str) -> BackendClient {
    BackendClient::new(base_url, 30, "pricewatch-test/0.1")
        .expect("client construction should not fail")
}

#[tokio::test]
async fn list_products_returns_parsed_products() {
    let server = MockServer::start().await;

    let body = serde_json::json!([
        {
            "id": 1,
            "url": "https://www.flipkart.com/item/p/u1",
            "title": "Wireless Headphones",
            "description": "Over-ear, 40h battery",
            "current_price": 1999.0,
            "original_price": 2999.0,
            "ratings": 4.3,
            "purchases": 120,
            "price_history": [
                { "date": "2025-06-01", "price": 2499.0 },
                { "date": "2025-07-01", "price": 1999.0 }
            ]
        }
    ]);

    Mock::given(method("GET"))
        .and(path("/api/products"))
        .and(query_param("search", ""))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let products = client
        .list_products(&Filter::default())
        .await
        .expect("should parse products");

    assert_eq!(products.len(), 1);
    assert_eq!(products[0].id, 1);
    assert_eq!(products[0].title, "Wireless Headphones");
    assert_eq!(products[0].current_price, 1999.0);
    assert_eq!(products[0].price_history.len(), 2);
    assert!(products[0].show_price_trend());
}

#[tokio::test]
async fn list_products_sends_price_bounds_as_query_params() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/products"))
        .and(query_param("search", "headphones"))
        .and(query_param("min_price", "500"))
        .and(query_param("max_price", "2000"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .mount(&server)
        .await;

    let filter = Filter {
        search: "headphones".to_string(),
        min_price: Some(500.0),
        max_price: Some(2000.0),
    };
    let client = test_client(&server.uri());
    let products = client
        .list_products(&filter)
        .await
        .expect("should return empty list");

    assert!(products.is_empty());
}

#[tokio::test]
async fn list_products_maps_server_error_to_unexpected_status() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/products"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let result = client.list_products(&Filter::default()).await;

    assert!(
        matches!(result, Err(ClientError::UnexpectedStatus { status: 500, .. })),
        "expected UnexpectedStatus(500), got: {result:?}"
    );
}

#[tokio::test]
async fn list_products_rejects_malformed_body() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/products"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let result = client.list_products(&Filter::default()).await;

    assert!(matches!(result, Err(ClientError::Deserialize { .. })));
}

#[tokio::test]
async fn create_product_returns_created_record() {
    let server = MockServer::start().await;

    let body = serde_json::json!({
        "id": 42,
        "url": "https://www.flipkart.com/item/p/u2",
        "title": "Mechanical Keyboard",
        "description": "",
        "current_price": 3499.0,
        "price_history": []
    });

    Mock::given(method("POST"))
        .and(path("/api/products"))
        .and(body_json(
            serde_json::json!({ "url": "https://www.flipkart.com/item/p/u2" }),
        ))
        .respond_with(ResponseTemplate::new(201).set_body_json(&body))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let product = client
        .create_product("https://www.flipkart.com/item/p/u2")
        .await
        .expect("should parse created product");

    assert_eq!(product.id, 42);
    assert_eq!(product.url, "https://www.flipkart.com/item/p/u2");
    assert!(!product.show_price_trend());
}

#[tokio::test]
async fn create_product_surfaces_backend_rejection_message() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/products"))
        .respond_with(
            ResponseTemplate::new(400)
                .set_body_json(serde_json::json!({ "error": "Unsupported site" })),
        )
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let result = client.create_product("https://example.com/nope").await;

    let err = result.expect_err("expected a rejection");
    assert_eq!(err.rejection_message(), Some("Unsupported site"));
}

#[tokio::test]
async fn create_product_rejection_without_body_has_no_message() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/products"))
        .respond_with(ResponseTemplate::new(422))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let result = client.create_product("https://example.com/nope").await;

    assert!(
        matches!(result, Err(ClientError::Rejected { message: None })),
        "expected Rejected without message, got: {result:?}"
    );
}

#[tokio::test]
async fn recheck_product_succeeds_on_200_without_consuming_body() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/products/recheck"))
        .and(body_json(
            serde_json::json!({ "url": "https://www.flipkart.com/item/p/u1" }),
        ))
        .respond_with(ResponseTemplate::new(200).set_body_string("ignored"))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    client
        .recheck_product("https://www.flipkart.com/item/p/u1")
        .await
        .expect("recheck should succeed");
}

#[tokio::test]
async fn recheck_product_surfaces_rejection_message() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/products/recheck"))
        .respond_with(
            ResponseTemplate::new(404)
                .set_body_json(serde_json::json!({ "error": "Product not tracked" })),
        )
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let result = client
        .recheck_product("https://www.flipkart.com/item/p/unknown")
        .await;

    let err = result.expect_err("expected a rejection");
    assert_eq!(err.rejection_message(), Some("Product not tracked"));
}
