//! Mock collaborators for deterministic testing.
//!
//! Provides mock implementations of the credential resolver, timeline
//! client, and content fetcher with builder-style seeding and interior call
//! logs, so dispatch and composition tests can assert exactly which
//! downstream calls were made.
//!
//! ## Usage
//!
//! ```rust
//! use helio_mirror::mock::MockTimelineClient;
//!
//! let client = MockTimelineClient::new()
//!     .with_item_text("i1", "shared thing");
//! // hand to the dispatcher, then assert on client.inserted()
//! ```

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use helio_core::{
    AttachmentContent, AttachmentRef, ComposedBody, ContentFetcher, CredentialResolver, Error,
    Location, MediaPayload, Result, TimelineClient, TimelineItem,
};

/// One recorded insert call.
#[derive(Debug, Clone)]
pub struct InsertRecord {
    pub body: ComposedBody,
    pub media: Option<MediaPayload>,
}

#[derive(Clone, Default)]
struct MockTimelineConfig {
    items: HashMap<String, TimelineItem>,
    locations: HashMap<String, Location>,
    attachments: HashMap<(String, String), AttachmentRef>,
    contents: HashMap<String, AttachmentContent>,
    insert_failure: Option<String>,
}

/// Mock timeline client with seeded resources and an insert log.
#[derive(Clone, Default)]
pub struct MockTimelineClient {
    config: Arc<MockTimelineConfig>,
    inserts: Arc<Mutex<Vec<InsertRecord>>>,
}

impl MockTimelineClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a timeline item.
    pub fn with_item(mut self, item: TimelineItem) -> Self {
        let config = Arc::make_mut(&mut self.config);
        config.items.insert(item.id.clone(), item);
        self
    }

    /// Seed a text-only item (shorthand for SHARE tests).
    pub fn with_item_text(self, id: &str, text: &str) -> Self {
        self.with_item(TimelineItem {
            id: id.to_string(),
            text: Some(text.to_string()),
            html: None,
            attachments: Vec::new(),
            notification: None,
            created: None,
            updated: None,
        })
    }

    /// Seed a location resource.
    pub fn with_location(mut self, id: &str, location: Location) -> Self {
        let config = Arc::make_mut(&mut self.config);
        config.locations.insert(id.to_string(), location);
        self
    }

    /// Seed attachment metadata for `(item_id, attachment_id)`.
    pub fn with_attachment(mut self, item_id: &str, attachment: AttachmentRef) -> Self {
        let config = Arc::make_mut(&mut self.config);
        config
            .attachments
            .insert((item_id.to_string(), attachment.id.clone()), attachment);
        self
    }

    /// Seed raw content served for a content URL.
    pub fn with_content(mut self, content_url: &str, status: u16, data: Vec<u8>) -> Self {
        let config = Arc::make_mut(&mut self.config);
        config
            .contents
            .insert(content_url.to_string(), AttachmentContent { status, data });
        self
    }

    /// Make every insert call fail with the given message.
    pub fn with_insert_failure(mut self, message: &str) -> Self {
        let config = Arc::make_mut(&mut self.config);
        config.insert_failure = Some(message.to_string());
        self
    }

    /// All recorded insert calls, in order.
    pub fn inserted(&self) -> Vec<InsertRecord> {
        self.inserts.lock().unwrap().clone()
    }

    pub fn insert_count(&self) -> usize {
        self.inserts.lock().unwrap().len()
    }
}

#[async_trait]
impl TimelineClient for MockTimelineClient {
    async fn get_item(&self, id: &str) -> Result<TimelineItem> {
        self.config
            .items
            .get(id)
            .cloned()
            .ok_or_else(|| Error::Request(format!("no such item: {id}")))
    }

    async fn get_location(&self, id: &str) -> Result<Location> {
        self.config
            .locations
            .get(id)
            .cloned()
            .ok_or_else(|| Error::Request(format!("no such location: {id}")))
    }

    async fn get_attachment(&self, item_id: &str, attachment_id: &str) -> Result<AttachmentRef> {
        self.config
            .attachments
            .get(&(item_id.to_string(), attachment_id.to_string()))
            .cloned()
            .ok_or_else(|| Error::Request(format!("no such attachment: {attachment_id}")))
    }

    async fn fetch_attachment_content(&self, content_url: &str) -> Result<AttachmentContent> {
        self.config
            .contents
            .get(content_url)
            .cloned()
            .ok_or_else(|| Error::Request(format!("no content at {content_url}")))
    }

    async fn insert_item(
        &self,
        body: &ComposedBody,
        media: Option<MediaPayload>,
    ) -> Result<TimelineItem> {
        if let Some(message) = &self.config.insert_failure {
            return Err(Error::InsertFailed(message.clone()));
        }
        self.inserts.lock().unwrap().push(InsertRecord {
            body: body.clone(),
            media,
        });
        Ok(TimelineItem {
            id: format!("inserted-{}", self.inserts.lock().unwrap().len()),
            text: None,
            html: None,
            attachments: Vec::new(),
            notification: None,
            created: None,
            updated: None,
        })
    }
}

#[derive(Clone, Default)]
struct MockFetcherConfig {
    json: HashMap<String, serde_json::Value>,
    images: HashMap<String, Vec<u8>>,
    json_failure: Option<String>,
    image_failure: Option<String>,
}

/// Mock content fetcher with seeded responses and a request log.
#[derive(Clone, Default)]
pub struct MockContentFetcher {
    config: Arc<MockFetcherConfig>,
    requests: Arc<Mutex<Vec<String>>>,
}

impl MockContentFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a JSON response. The URL matches by prefix so tests don't have
    /// to reproduce full query strings.
    pub fn with_json(mut self, url_prefix: &str, value: serde_json::Value) -> Self {
        let config = Arc::make_mut(&mut self.config);
        config.json.insert(url_prefix.to_string(), value);
        self
    }

    /// Seed image bytes for a URL.
    pub fn with_image(mut self, url: &str, data: Vec<u8>) -> Self {
        let config = Arc::make_mut(&mut self.config);
        config.images.insert(url.to_string(), data);
        self
    }

    /// Make every JSON fetch fail with an upstream error.
    pub fn with_json_failure(mut self, message: &str) -> Self {
        let config = Arc::make_mut(&mut self.config);
        config.json_failure = Some(message.to_string());
        self
    }

    /// Make every image fetch fail with an upstream error.
    pub fn with_image_failure(mut self, message: &str) -> Self {
        let config = Arc::make_mut(&mut self.config);
        config.image_failure = Some(message.to_string());
        self
    }

    /// All fetched URLs, in order.
    pub fn requested_urls(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl ContentFetcher for MockContentFetcher {
    async fn fetch_json(&self, url: &str) -> Result<serde_json::Value> {
        self.requests.lock().unwrap().push(url.to_string());
        if let Some(message) = &self.config.json_failure {
            return Err(Error::UpstreamFetch(message.clone()));
        }
        self.config
            .json
            .iter()
            .find(|(prefix, _)| url.starts_with(prefix.as_str()))
            .map(|(_, value)| value.clone())
            .ok_or_else(|| Error::UpstreamFetch(format!("no seeded JSON for {url}")))
    }

    async fn fetch_image(&self, url: &str) -> Result<Vec<u8>> {
        self.requests.lock().unwrap().push(url.to_string());
        if let Some(message) = &self.config.image_failure {
            return Err(Error::UpstreamFetch(message.clone()));
        }
        self.config
            .images
            .get(url)
            .cloned()
            .ok_or_else(|| Error::UpstreamFetch(format!("no seeded image for {url}")))
    }
}

/// Mock credential resolver mapping user tokens to mock clients.
#[derive(Clone, Default)]
pub struct MockCredentialResolver {
    clients: Arc<Mutex<HashMap<String, Arc<MockTimelineClient>>>>,
}

impl MockCredentialResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Authorize `user_token` with the given client.
    pub fn with_client(self, user_token: &str, client: MockTimelineClient) -> Self {
        self.clients
            .lock()
            .unwrap()
            .insert(user_token.to_string(), Arc::new(client));
        self
    }
}

#[async_trait]
impl CredentialResolver for MockCredentialResolver {
    async fn resolve(&self, user_token: &str) -> Result<Arc<dyn TimelineClient>> {
        let clients = self.clients.lock().unwrap();
        clients
            .get(user_token)
            .map(|c| c.clone() as Arc<dyn TimelineClient>)
            .ok_or_else(|| {
                Error::Unauthorized(format!("no stored credentials for token {user_token}"))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use helio_core::{BodyContent, ComposedBody};

    #[tokio::test]
    async fn test_mock_client_records_inserts() {
        let client = MockTimelineClient::new();
        let body = ComposedBody::new(BodyContent::Text("hi".into()));
        client.insert_item(&body, None).await.unwrap();
        client
            .insert_item(
                &body,
                Some(MediaPayload {
                    content_type: "image/jpeg".into(),
                    data: vec![0xff],
                }),
            )
            .await
            .unwrap();

        let inserted = client.inserted();
        assert_eq!(inserted.len(), 2);
        assert!(inserted[0].media.is_none());
        assert_eq!(
            inserted[1].media.as_ref().unwrap().content_type,
            "image/jpeg"
        );
    }

    #[tokio::test]
    async fn test_mock_client_insert_failure() {
        let client = MockTimelineClient::new().with_insert_failure("boom");
        let body = ComposedBody::new(BodyContent::Text("hi".into()));
        let err = client.insert_item(&body, None).await.unwrap_err();
        assert!(matches!(err, Error::InsertFailed(_)));
        assert_eq!(client.insert_count(), 0);
    }

    #[tokio::test]
    async fn test_mock_fetcher_prefix_match_and_log() {
        let fetcher = MockContentFetcher::new()
            .with_json("http://events.example/", serde_json::json!({"events": []}));
        let value = fetcher
            .fetch_json("http://events.example/?lat=1&lng=2")
            .await
            .unwrap();
        assert!(value["events"].as_array().unwrap().is_empty());
        assert_eq!(fetcher.requested_urls().len(), 1);
    }

    #[tokio::test]
    async fn test_mock_resolver_unknown_token() {
        let resolver = MockCredentialResolver::new();
        let err = resolver.resolve("u1").await.err().unwrap();
        assert!(matches!(err, Error::Unauthorized(_)));
    }
}
