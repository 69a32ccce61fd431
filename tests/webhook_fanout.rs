//! Integration tests for webhook fan-out behavior.

use chrono::{TimeZone, Utc};
use webwatch::prelude::*;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn event_for(target: &str) -> ChangeEvent {
    ChangeEvent {
        target: target.to_string(),
        detected_at: Utc.with_ymd_and_hms(2021, 6, 1, 3, 0, 0).unwrap(),
    }
}

#[tokio::test]
async fn one_failing_endpoint_does_not_block_the_other() {
    let failing = MockServer::start().await;
    let healthy = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/hook"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&failing)
        .await;
    Mock::given(method("POST"))
        .and(path("/hook"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&healthy)
        .await;

    let notifier = WebhookNotifier::new(
        reqwest::Client::new(),
        vec![
            format!("{}/hook", failing.uri()),
            format!("{}/hook", healthy.uri()),
        ],
    );

    notifier.notify(&event_for("https://example.com/page")).await;

    // Both endpoints were attempted exactly once; the 500 was logged and
    // swallowed, the delivery to the healthy endpoint went through.
    assert_eq!(failing.received_requests().await.unwrap().len(), 1);
    assert_eq!(healthy.received_requests().await.unwrap().len(), 1);
}

#[tokio::test]
async fn unreachable_endpoint_is_tolerated() {
    let healthy = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/hook"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&healthy)
        .await;

    let notifier = WebhookNotifier::new(
        reqwest::Client::new(),
        vec![
            "http://127.0.0.1:9/hook".to_string(),
            format!("{}/hook", healthy.uri()),
        ],
    );

    notifier.notify(&event_for("https://example.com/page")).await;
    assert_eq!(healthy.received_requests().await.unwrap().len(), 1);
}

#[tokio::test]
async fn payload_is_json_with_a_single_content_field() {
    let hook = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/hook"))
        .and(header("content-type", "application/json"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&hook)
        .await;

    let notifier =
        WebhookNotifier::new(reqwest::Client::new(), vec![format!("{}/hook", hook.uri())]);
    notifier.notify(&event_for("https://example.com/page")).await;

    let requests = hook.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);

    let payload: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
    assert_eq!(
        payload,
        serde_json::json!({
            "content": "Modify detected!\n2021/06/01 12:00\nhttps://example.com/page"
        })
    );
}
