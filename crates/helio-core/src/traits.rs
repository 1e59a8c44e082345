//! Trait seams for heliograph's external collaborators.
//!
//! These traits define the interfaces the dispatch engine calls through,
//! enabling pluggable backends and testability. The concrete HTTP-backed
//! implementations live in `helio-mirror`, alongside deterministic mocks.

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::Result;
use crate::models::*;

/// Resolves a user token to an authorized timeline client.
///
/// The resolved client is scoped to one user's grant and is threaded through
/// the handler call chain as a value; it is never stored on shared state and
/// never reused across distinct user tokens.
#[async_trait]
pub trait CredentialResolver: Send + Sync {
    /// Resolve stored credentials for `user_token`.
    ///
    /// Returns [`crate::Error::Unauthorized`] when no grant is stored or the
    /// grant has been revoked; this is the one failure that rejects the
    /// whole inbound request.
    async fn resolve(&self, user_token: &str) -> Result<Arc<dyn TimelineClient>>;
}

/// Typed capability over the timeline service, authorized for one user.
#[async_trait]
pub trait TimelineClient: Send + Sync {
    /// Fetch a timeline item by id.
    async fn get_item(&self, id: &str) -> Result<TimelineItem>;

    /// Fetch a location resource by id.
    async fn get_location(&self, id: &str) -> Result<Location>;

    /// Fetch attachment metadata (content type and content URL).
    async fn get_attachment(&self, item_id: &str, attachment_id: &str) -> Result<AttachmentRef>;

    /// Fetch raw attachment bytes from a content URL.
    ///
    /// Non-200 upstream statuses are returned in [`AttachmentContent`], not
    /// as errors: callers decide whether missing media is fatal (it never is
    /// in the SHARE flow).
    async fn fetch_attachment_content(&self, content_url: &str) -> Result<AttachmentContent>;

    /// Insert a new timeline item, with at most one media attachment.
    async fn insert_item(
        &self,
        body: &ComposedBody,
        media: Option<MediaPayload>,
    ) -> Result<TimelineItem>;
}

/// Fetches third-party content over HTTP with explicit deadlines.
#[async_trait]
pub trait ContentFetcher: Send + Sync {
    /// GET `url` and parse the response as JSON.
    async fn fetch_json(&self, url: &str) -> Result<serde_json::Value>;

    /// GET `url` and return the raw bytes, bounded by the image deadline.
    async fn fetch_image(&self, url: &str) -> Result<Vec<u8>>;
}
