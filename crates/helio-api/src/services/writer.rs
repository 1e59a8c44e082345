//! Item writer: thin orchestration over the timeline client's insert.

use tracing::warn;

use helio_core::defaults::IMAGE_UPLOAD_CONTENT_TYPE;
use helio_core::{
    BodyContent, ComposedBody, ContentFetcher, MediaPayload, OutboundMessage, Result,
    TimelineClient, TimelineItem,
};

/// Writes outbound messages to the timeline, one insert per message, with
/// at most one media attachment each.
pub struct ItemWriter<'a> {
    client: &'a dyn TimelineClient,
    fetcher: &'a dyn ContentFetcher,
    self_base_url: &'a str,
}

impl<'a> ItemWriter<'a> {
    pub fn new(
        client: &'a dyn TimelineClient,
        fetcher: &'a dyn ContentFetcher,
        self_base_url: &'a str,
    ) -> Self {
        Self {
            client,
            fetcher,
            self_base_url,
        }
    }

    /// Insert a batch of messages.
    ///
    /// The list seam exists so future batching can slot in here; current
    /// behavior is one insert call per entry, in order, fetch before
    /// insert. The first insert failure aborts the batch.
    pub async fn insert_messages(&self, messages: &[OutboundMessage]) -> Result<usize> {
        for message in messages {
            self.insert_message(message).await?;
        }
        Ok(messages.len())
    }

    /// Insert a single message, fetching and attaching its image if one is
    /// referenced.
    pub async fn insert_message(&self, message: &OutboundMessage) -> Result<TimelineItem> {
        let content = if message.use_html_body {
            BodyContent::Html(message.text.clone())
        } else {
            BodyContent::Text(message.text.clone())
        };
        let mut body = ComposedBody::new(content);
        body.is_bundle_cover = message.is_bundle_cover;
        body.bundle_id = message.bundle_id.clone();

        let media = match message.image_url.as_deref() {
            Some(url) => self.fetch_media(url).await,
            None => None,
        };

        self.client.insert_item(&body, media).await
    }

    /// Fetch the referenced image as upload media. Failures are soft: the
    /// item is inserted without media, matching the attachment policy of
    /// the SHARE flow.
    async fn fetch_media(&self, image_url: &str) -> Option<MediaPayload> {
        let resolved = if image_url.starts_with('/') {
            format!("{}{}", self.self_base_url.trim_end_matches('/'), image_url)
        } else {
            image_url.to_string()
        };

        match self.fetcher.fetch_image(&resolved).await {
            Ok(data) => Some(MediaPayload {
                content_type: IMAGE_UPLOAD_CONTENT_TYPE.to_string(),
                data,
            }),
            Err(e) => {
                warn!(url = %resolved, error = %e, "Image fetch failed, inserting without media");
                None
            }
        }
    }
}
