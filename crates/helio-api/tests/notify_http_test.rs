//! HTTP-level tests for the webhook endpoint: response codes for
//! acknowledged, malformed, unauthorized, and failed-insert payloads.

use std::sync::Arc;

use serde_json::json;

use helio_api::services::{DispatchConfig, NotificationDispatcher};
use helio_api::{app, AppState};
use helio_mirror::mock::{MockContentFetcher, MockCredentialResolver, MockTimelineClient};

async fn serve(resolver: MockCredentialResolver, fetcher: MockContentFetcher) -> String {
    let dispatcher = NotificationDispatcher::new(
        Arc::new(resolver),
        Arc::new(fetcher),
        DispatchConfig {
            nearby_events_url: "http://events.test/".to_string(),
            social_feed_url: "http://social.test/feed".to_string(),
            self_base_url: "http://self.test".to_string(),
        },
    );
    let state = AppState {
        dispatcher: Arc::new(dispatcher),
    };
    let router = app(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}")
}

#[tokio::test]
async fn test_notify_acknowledges_unknown_collection() {
    let base = serve(
        MockCredentialResolver::new().with_client("u1", MockTimelineClient::new()),
        MockContentFetcher::new(),
    )
    .await;

    let response = reqwest::Client::new()
        .post(format!("{base}/notify"))
        .body(r#"{"userToken": "u1", "collection": "calendar"}"#)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);

    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["state"], "ignored");
}

#[tokio::test]
async fn test_notify_acknowledges_malformed_payload() {
    let base = serve(MockCredentialResolver::new(), MockContentFetcher::new()).await;

    for payload in ["not json at all", "{}", r#"{"collection": "timeline"}"#] {
        let response = reqwest::Client::new()
            .post(format!("{base}/notify"))
            .body(payload)
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), 200, "payload {payload:?}");

        let body: serde_json::Value = response.json().await.unwrap();
        assert_eq!(body["state"], "ignored");
    }
}

#[tokio::test]
async fn test_notify_unauthorized_token_is_401() {
    let base = serve(MockCredentialResolver::new(), MockContentFetcher::new()).await;

    let response = reqwest::Client::new()
        .post(format!("{base}/notify"))
        .body(r#"{"userToken": "stranger", "collection": "timeline"}"#)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 401);

    let body: serde_json::Value = response.json().await.unwrap();
    assert!(body["error"].as_str().unwrap().contains("stranger"));
}

#[tokio::test]
async fn test_notify_insert_failure_is_502() {
    let client = MockTimelineClient::new()
        .with_item_text("i1", "x")
        .with_insert_failure("timeline outage");
    let base = serve(
        MockCredentialResolver::new().with_client("u1", client),
        MockContentFetcher::new(),
    )
    .await;

    let payload = json!({
        "userToken": "u1", "collection": "timeline", "itemId": "i1",
        "userActions": [{"type": "SHARE"}]
    });
    let response = reqwest::Client::new()
        .post(format!("{base}/notify"))
        .body(payload.to_string())
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 502);
}

#[tokio::test]
async fn test_notify_share_end_to_end_over_http() {
    let client = MockTimelineClient::new().with_item_text("i1", "hello");
    let base = serve(
        MockCredentialResolver::new().with_client("u1", client.clone()),
        MockContentFetcher::new(),
    )
    .await;

    let payload = json!({
        "userToken": "u1", "collection": "timeline", "itemId": "i1",
        "userActions": [{"type": "SHARE"}]
    });
    let response = reqwest::Client::new()
        .post(format!("{base}/notify"))
        .body(payload.to_string())
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);

    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["state"], "item_echoed");
    assert_eq!(client.insert_count(), 1);
}

#[tokio::test]
async fn test_health_endpoint() {
    let base = serve(MockCredentialResolver::new(), MockContentFetcher::new()).await;

    let response = reqwest::Client::new()
        .get(format!("{base}/health"))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);

    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["status"], "ok");
}
