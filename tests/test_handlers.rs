//! HTTP level tests. Routes needing GraphQL data talk to an address where
//! nothing listens, so only the local paths and error handling are exercised.

use marketplace_api::cfg::{CacheConfig, GraphqlConfig};
use marketplace_api::currency::CurrencyDict;
use marketplace_api::graphql::{GraphqlClient, Queries};
use marketplace_api::handlers::*;
use marketplace_api::services::error::{handle_rejection, USER_REJECTED_MESSAGE};
use serde_json::{json, Value};
use warp::http::StatusCode;
use warp::Filter;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn offline_queries() -> Queries {
    let cfg = GraphqlConfig {
        url: "http://127.0.0.1:9/graphql".to_string(),
        api_key: None,
        timeout_secs: 2,
    };
    Queries::new(GraphqlClient::new(&cfg).unwrap(), CurrencyDict::default())
}

fn body<B: AsRef<[u8]>>(response: &warp::http::Response<B>) -> Value {
    serde_json::from_slice(response.body().as_ref()).unwrap()
}

// ---------------------------------------------------------------------------
// Steps
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_step_display_echoes_transaction_hash() {
    let response = warp::test::request()
        .method("GET")
        .path("/steps/accept-offer/TRANSACTION_PENDING?transactionHash=0xabc")
        .reply(&get_step())
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body(&response);
    assert_eq!(json["flow"], json!("accept-offer"));
    assert_eq!(json["step"], json!("TRANSACTION_PENDING"));
    assert_eq!(json["transactionHash"], json!("0xabc"));
    assert_eq!(json["icon"], json!("SPINNER"));
    assert!(json["title"].is_string());
}

#[tokio::test]
async fn test_step_outside_flow_is_not_found() {
    let response = warp::test::request()
        .path("/steps/cancel-offer/APPROVAL_SIGNATURE")
        .reply(&get_step())
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_unknown_flow_is_bad_request() {
    let response = warp::test::request()
        .path("/steps/burn/INITIAL")
        .reply(&get_step())
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_format_error_endpoint() {
    let response = warp::test::request()
        .method("POST")
        .path("/errors/format")
        .json(&json!({ "error": { "data": { "message": "insufficient funds" } } }))
        .reply(&post_format_error())
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body(&response)["message"], json!("insufficient funds"));

    let response = warp::test::request()
        .method("POST")
        .path("/errors/format")
        .json(&json!({ "message": "MetaMask Tx Signature: User denied transaction signature." }))
        .reply(&post_format_error())
        .await;
    assert_eq!(body(&response)["message"], json!(USER_REJECTED_MESSAGE));
}

#[tokio::test]
async fn test_rejections_are_json() {
    let routes = get_step().recover(handle_rejection);
    let response = warp::test::request()
        .path("/nowhere")
        .reply(&routes)
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body(&response)["message"], json!("Not Found"));
}

// ---------------------------------------------------------------------------
// Data routes
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_invalid_chain_id_is_bad_request() {
    let cache = response_cache(&CacheConfig::default());
    let response = warp::test::request()
        .path("/collections/mainnet/0xabc")
        .reply(&get_collection(offline_queries(), cache))
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_graphql_failure_is_generic_server_error() {
    let cache = response_cache(&CacheConfig::default());
    let response = warp::test::request()
        .path("/explore/assets?chains=1&page=2")
        .reply(&get_explore_assets(offline_queries(), cache.clone(), 12))
        .await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body(&response)["message"], json!("Something went wrong"));
    assert_eq!(cache.entry_count(), 0);
}

// ---------------------------------------------------------------------------
// Documentation
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_swagger_lists_routes() {
    let response = warp::test::request()
        .path("/swagger.json")
        .reply(&get_swagger_json("http://localhost:8080".to_string()))
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let doc = body(&response);
    for path in [
        "/explore/assets",
        "/assets/{chainId}/{collection}/{tokenId}",
        "/collections/{chainId}/{address}",
        "/users/{address}",
        "/users/{address}/trades",
        "/home",
        "/steps/{flow}/{step}",
        "/errors/format",
    ] {
        assert!(doc["paths"].get(path).is_some(), "{} is missing", path);
    }
}
