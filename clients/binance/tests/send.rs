use std::sync::Arc;

use clients_binance::{BinanceError, BinancePerpsClient, BinancePerpsClientConfig, Params};
use httpmock::prelude::*;
use reqwest::Method;
use serde_json::json;

fn client(base_url: &str) -> BinancePerpsClient {
    let config = BinancePerpsClientConfig::new("test-key", "test-secret")
        .with_base_url(base_url)
        .unwrap();
    BinancePerpsClient::new(Arc::new(reqwest::Client::new()), config)
}

#[tokio::test]
async fn send_attaches_api_key_and_signature() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/fapi/v1/leverage")
                .header("X-MBX-APIKEY", "test-key")
                .query_param("symbol", "ETCUSDT")
                .query_param("leverage", "5")
                .query_param_exists("signature");
            then.status(200).json_body(json!({
                "leverage": 5,
                "maxNotionalValue": "1000000",
                "symbol": "ETCUSDT"
            }));
        })
        .await;

    let perps = client(&server.base_url());
    let params: Params = vec![
        ("symbol", "ETCUSDT".to_string()),
        ("leverage", "5".to_string()),
    ];
    let body = perps
        .send("/fapi/v1/leverage", Method::POST, &params)
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(body["leverage"], 5);
}

#[tokio::test]
async fn send_returns_error_body_regardless_of_status() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/fapi/v1/order");
            then.status(400)
                .json_body(json!({"code": -2019, "msg": "Margin is insufficient."}));
        })
        .await;

    let perps = client(&server.base_url());
    let body = perps
        .send("/fapi/v1/order", Method::POST, &[])
        .await
        .unwrap();
    assert_eq!(body["code"], -2019);
}

#[tokio::test]
async fn typed_wrapper_classifies_error_body() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/fapi/v1/leverage");
            then.status(400)
                .json_body(json!({"code": -1121, "msg": "Invalid symbol."}));
        })
        .await;

    let perps = client(&server.base_url());
    let err = perps.set_leverage("NOPEUSDT", 5).await.unwrap_err();
    assert!(matches!(err, BinanceError::Api { code: -1121, .. }));
}

#[tokio::test]
async fn cancel_order_uses_delete() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(DELETE)
                .path("/fapi/v1/order")
                .query_param("symbol", "ETCUSDT")
                .query_param("orderId", "42")
                .query_param("recvWindow", "5000")
                .query_param_exists("timestamp")
                .query_param_exists("signature");
            then.status(200).json_body(json!({
                "orderId": 42,
                "symbol": "ETCUSDT",
                "status": "CANCELED",
                "side": "SELL",
                "type": "LIMIT"
            }));
        })
        .await;

    let perps = client(&server.base_url());
    let order = perps.cancel_order("ETCUSDT", 42).await.unwrap();
    mock.assert_async().await;
    assert_eq!(order.status, "CANCELED");
}

#[tokio::test]
async fn exchange_info_decodes_public_endpoint() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET).path("/fapi/v1/exchangeInfo");
            then.status(200).json_body(json!({
                "symbols": [{"symbol": "ETCUSDT", "quantityPrecision": 1}]
            }));
        })
        .await;

    let perps = client(&server.base_url());
    let info = perps.exchange_info().await.unwrap();
    mock.assert_async().await;
    assert_eq!(info.symbols.len(), 1);
}

#[tokio::test]
async fn connection_failure_is_http_error() {
    // Nothing listens on port 1.
    let perps = client("http://127.0.0.1:1");
    let err = perps.balance().await.unwrap_err();
    assert!(matches!(err, BinanceError::Http(_)));
}
