//! Locations handler integration tests: location fetch, nearby-events
//! query, composition, and insert, driven against mock collaborators.

use std::sync::Arc;

use serde_json::json;

use helio_api::services::{DispatchConfig, DispatchOutcome, NotificationDispatcher};
use helio_core::{Error, Location, MenuAction, Notification};
use helio_mirror::mock::{MockContentFetcher, MockCredentialResolver, MockTimelineClient};

const EVENTS_URL: &str = "http://events.test/directory/json/";

fn dispatcher(
    resolver: MockCredentialResolver,
    fetcher: MockContentFetcher,
) -> NotificationDispatcher {
    NotificationDispatcher::new(
        Arc::new(resolver),
        Arc::new(fetcher),
        DispatchConfig {
            nearby_events_url: EVENTS_URL.to_string(),
            social_feed_url: "http://social.test/feed".to_string(),
            self_base_url: "http://self.test".to_string(),
        },
    )
}

fn notification(value: serde_json::Value) -> Notification {
    serde_json::from_value(value).unwrap()
}

fn location(lat: Option<f64>, lng: Option<f64>) -> Location {
    Location {
        id: Some("i1".into()),
        latitude: lat,
        longitude: lng,
        accuracy: None,
        display_name: None,
        address: None,
        timestamp: None,
    }
}

fn events_feed(titles: &[&str]) -> serde_json::Value {
    json!({ "events": titles.iter().map(|t| json!({"title": t})).collect::<Vec<_>>() })
}

#[tokio::test]
async fn test_locations_end_to_end() {
    // Spec example: location (1.0, 2.0), three events titled A, B, C.
    let client = MockTimelineClient::new().with_location("i1", location(Some(1.0), Some(2.0)));
    let fetcher = MockContentFetcher::new().with_json(EVENTS_URL, events_feed(&["A", "B", "C"]));
    let d = dispatcher(
        MockCredentialResolver::new().with_client("u1", client.clone()),
        fetcher.clone(),
    );

    let outcome = d
        .handle(&notification(json!({
            "userToken": "u1", "collection": "locations", "itemId": "i1"
        })))
        .await
        .unwrap();
    assert_eq!(outcome, DispatchOutcome::LocationsPosted);

    let inserted = client.inserted();
    assert_eq!(inserted.len(), 1);
    let body = &inserted[0].body;

    assert!(body.content.is_html());
    let html = body.content.as_str();
    assert_eq!(html.matches("<li>").count(), 3);
    assert!(html.contains("<li>A</li><li>B</li><li>C</li>"));
    assert!(html.contains("Nearby Events"));

    assert_eq!(body.menu_items.len(), 2);
    assert_eq!(body.menu_items[0].action, MenuAction::Custom);
    assert_eq!(body.menu_items[0].id.as_deref(), Some("social-stream"));
    assert_eq!(body.menu_items[1].action, MenuAction::Delete);

    // The original location is echoed on the inserted item.
    assert_eq!(body.location.as_ref().unwrap().latitude, Some(1.0));
    assert_eq!(body.location.as_ref().unwrap().longitude, Some(2.0));
    assert!(inserted[0].media.is_none());

    // The nearby query carries the coordinates and bounded radius.
    let urls = fetcher.requested_urls();
    assert_eq!(urls.len(), 1);
    assert!(urls[0].contains("lat=1"));
    assert!(urls[0].contains("lng=2"));
    assert!(urls[0].contains("radius=0.5"));
}

#[tokio::test]
async fn test_locations_list_capped_at_five() {
    for (feed_size, expected) in [(0usize, 0usize), (1, 1), (5, 5), (6, 5), (100, 5)] {
        let titles: Vec<String> = (0..feed_size).map(|i| format!("event {i}")).collect();
        let title_refs: Vec<&str> = titles.iter().map(String::as_str).collect();

        let client = MockTimelineClient::new().with_location("i1", location(Some(1.0), Some(2.0)));
        let fetcher = MockContentFetcher::new().with_json(EVENTS_URL, events_feed(&title_refs));
        let d = dispatcher(
            MockCredentialResolver::new().with_client("u1", client.clone()),
            fetcher,
        );

        d.handle(&notification(json!({
            "userToken": "u1", "collection": "locations", "itemId": "i1"
        })))
        .await
        .unwrap();

        let inserted = client.inserted();
        assert_eq!(inserted.len(), 1, "feed size {feed_size}");
        assert_eq!(
            inserted[0].body.content.as_str().matches("<li>").count(),
            expected,
            "feed size {feed_size}"
        );
    }
}

#[tokio::test]
async fn test_locations_zero_events_still_inserts() {
    let client = MockTimelineClient::new().with_location("i1", location(Some(1.0), Some(2.0)));
    let fetcher = MockContentFetcher::new().with_json(EVENTS_URL, events_feed(&[]));
    let d = dispatcher(
        MockCredentialResolver::new().with_client("u1", client.clone()),
        fetcher,
    );

    let outcome = d
        .handle(&notification(json!({
            "userToken": "u1", "collection": "locations", "itemId": "i1"
        })))
        .await
        .unwrap();
    assert_eq!(outcome, DispatchOutcome::LocationsPosted);
    assert_eq!(client.insert_count(), 1);
    assert!(client.inserted()[0].body.content.as_str().contains("<ul"));
}

#[tokio::test]
async fn test_locations_missing_coordinates_aborts_without_insert() {
    let client = MockTimelineClient::new().with_location("i1", location(None, Some(2.0)));
    let d = dispatcher(
        MockCredentialResolver::new().with_client("u1", client.clone()),
        MockContentFetcher::new(),
    );

    let outcome = d
        .handle(&notification(json!({
            "userToken": "u1", "collection": "locations", "itemId": "i1"
        })))
        .await
        .unwrap();
    assert_eq!(outcome, DispatchOutcome::Skipped);
    assert_eq!(client.insert_count(), 0);
}

#[tokio::test]
async fn test_locations_upstream_fetch_failure_aborts_without_insert() {
    let client = MockTimelineClient::new().with_location("i1", location(Some(1.0), Some(2.0)));
    let fetcher = MockContentFetcher::new().with_json_failure("events directory down");
    let d = dispatcher(
        MockCredentialResolver::new().with_client("u1", client.clone()),
        fetcher,
    );

    let outcome = d
        .handle(&notification(json!({
            "userToken": "u1", "collection": "locations", "itemId": "i1"
        })))
        .await
        .unwrap();
    assert_eq!(outcome, DispatchOutcome::Skipped);
    assert_eq!(client.insert_count(), 0);
}

#[tokio::test]
async fn test_locations_missing_item_id_is_noop() {
    let client = MockTimelineClient::new();
    let d = dispatcher(
        MockCredentialResolver::new().with_client("u1", client.clone()),
        MockContentFetcher::new(),
    );

    let outcome = d
        .handle(&notification(json!({
            "userToken": "u1", "collection": "locations"
        })))
        .await
        .unwrap();
    assert_eq!(outcome, DispatchOutcome::Skipped);
    assert_eq!(client.insert_count(), 0);
}

#[tokio::test]
async fn test_locations_insert_failure_fails_request() {
    let client = MockTimelineClient::new()
        .with_location("i1", location(Some(1.0), Some(2.0)))
        .with_insert_failure("timeline outage");
    let fetcher = MockContentFetcher::new().with_json(EVENTS_URL, events_feed(&["A"]));
    let d = dispatcher(
        MockCredentialResolver::new().with_client("u1", client),
        fetcher,
    );

    let err = d
        .handle(&notification(json!({
            "userToken": "u1", "collection": "locations", "itemId": "i1"
        })))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::InsertFailed(_)));
}

#[tokio::test]
async fn test_locations_event_titles_are_escaped() {
    let client = MockTimelineClient::new().with_location("i1", location(Some(1.0), Some(2.0)));
    let fetcher = MockContentFetcher::new().with_json(
        EVENTS_URL,
        events_feed(&["<img src=x onerror=alert(1)>"]),
    );
    let d = dispatcher(
        MockCredentialResolver::new().with_client("u1", client.clone()),
        fetcher,
    );

    d.handle(&notification(json!({
        "userToken": "u1", "collection": "locations", "itemId": "i1"
    })))
    .await
    .unwrap();

    let html = client.inserted()[0].body.content.as_str().to_string();
    assert!(!html.contains("<img src=x"));
    assert!(html.contains("&lt;img"));
}
