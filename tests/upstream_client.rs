//! Upstream client against a mock provider.

#![allow(clippy::panic)]

mod common;

use std::time::Duration;

use axum::Router;
use axum::http::StatusCode;
use axum::routing::get;
use quote_gateway::domain::{Quote, RequestContext};
use quote_gateway::error::FetchError;
use quote_gateway::service::UpstreamClient;

async fn provider(body: &'static str) -> String {
    let router = Router::new().route(common::PROVIDER_PATH, get(move || async move { body }));
    let addr = common::spawn_server(router).await;
    format!("http://{addr}{}", common::PROVIDER_PATH)
}

fn ctx() -> RequestContext {
    RequestContext::with_budget(Duration::from_millis(200))
}

#[tokio::test]
async fn extracts_bid_of_configured_pair() {
    let url = provider(
        r#"{"USDBRL":{"code":"USD","codein":"BRL","bid":"5.2531","ask":"5.2541"},"EURBRL":{"bid":"6.10"}}"#,
    )
    .await;
    let client = UpstreamClient::new(common::http_client(), url, "USDBRL");

    let Ok(quote) = client.fetch(&ctx()).await else {
        panic!("fetch failed");
    };
    assert_eq!(quote, Quote::new("5.2531"));
}

#[tokio::test]
async fn missing_pair_is_a_decode_error() {
    let url = provider(r#"{"EURBRL":{"bid":"6.10"}}"#).await;
    let client = UpstreamClient::new(common::http_client(), url, "USDBRL");

    let result = client.fetch(&ctx()).await;
    assert!(matches!(result, Err(FetchError::Decode(_))));
}

#[tokio::test]
async fn missing_bid_is_a_decode_error() {
    let url = provider(r#"{"USDBRL":{"ask":"5.26"}}"#).await;
    let client = UpstreamClient::new(common::http_client(), url, "USDBRL");

    let result = client.fetch(&ctx()).await;
    assert!(matches!(result, Err(FetchError::Decode(_))));
}

#[tokio::test]
async fn malformed_json_is_a_decode_error() {
    let url = provider("<html>maintenance</html>").await;
    let client = UpstreamClient::new(common::http_client(), url, "USDBRL");

    let result = client.fetch(&ctx()).await;
    assert!(matches!(result, Err(FetchError::Decode(_))));
}

#[tokio::test]
async fn error_status_is_a_transport_error() {
    let router = Router::new().route(
        common::PROVIDER_PATH,
        get(|| async { (StatusCode::SERVICE_UNAVAILABLE, "busy") }),
    );
    let addr = common::spawn_server(router).await;
    let url = format!("http://{addr}{}", common::PROVIDER_PATH);
    let client = UpstreamClient::new(common::http_client(), url, "USDBRL");

    let result = client.fetch(&ctx()).await;
    assert!(matches!(result, Err(FetchError::Transport(_))));
}

#[tokio::test]
async fn slow_provider_hits_the_deadline() {
    let router = Router::new().route(
        common::PROVIDER_PATH,
        get(|| async {
            tokio::time::sleep(Duration::from_millis(500)).await;
            r#"{"USDBRL":{"bid":"5.25"}}"#
        }),
    );
    let addr = common::spawn_server(router).await;
    let url = format!("http://{addr}{}", common::PROVIDER_PATH);
    let client = UpstreamClient::new(common::http_client(), url, "USDBRL");

    let started = std::time::Instant::now();
    let result = client.fetch(&RequestContext::with_budget(Duration::from_millis(100))).await;
    assert!(matches!(result, Err(FetchError::DeadlineExceeded(_))));
    assert!(started.elapsed() < Duration::from_millis(400));
}

#[tokio::test]
async fn unusable_url_is_a_build_error() {
    let client = UpstreamClient::new(common::http_client(), "not a url", "USDBRL");

    let result = client.fetch(&ctx()).await;
    assert!(matches!(result, Err(FetchError::RequestBuild(_))));
}

#[tokio::test]
async fn unreachable_provider_is_a_transport_error() {
    let Ok(listener) = tokio::net::TcpListener::bind("127.0.0.1:0").await else {
        panic!("bind");
    };
    let Ok(addr) = listener.local_addr() else {
        panic!("addr");
    };
    drop(listener);

    let client = UpstreamClient::new(common::http_client(), format!("http://{addr}/"), "USDBRL");
    let result = client.fetch(&ctx()).await;
    let Err(err) = result else {
        panic!("fetch against closed port succeeded");
    };
    assert!(err.is_transport());
}
