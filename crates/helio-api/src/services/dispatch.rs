//! Notification classifier and dispatcher.
//!
//! Consumes one parsed [`Notification`] and routes it to the matching
//! handler. Classification is total: every payload maps to exactly one of
//! the locations handler, the timeline handler, or a logged no-op. Malformed
//! or unrecognized input degrades to a logged no-op so webhook deliveries
//! are never retried for data a retry cannot fix; only credential
//! resolution failures and timeline insert failures propagate out of
//! [`NotificationDispatcher::handle`].

use std::sync::Arc;

use tracing::{debug, info, warn};

use helio_core::defaults::{
    MAX_ATTACHMENTS_PROPAGATED, NEARBY_QUERY_TERM, NEARBY_SEARCH_RADIUS_KM, SOCIAL_STREAM_PAYLOAD,
};
use helio_core::{
    ActionKind, Collection, ContentFetcher, CredentialResolver, Error, MediaPayload, Notification,
    Result, TimelineClient, UserAction,
};

use super::compose;
use super::writer::ItemWriter;

/// How user actions within one timeline notification are dispatched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchPolicy {
    /// Scan actions in order and handle the first recognized one, then stop.
    /// Unrecognized actions are logged and skipped; at most one derived side
    /// effect is produced per notification.
    FirstRecognized,
}

/// Active dispatch policy.
pub const DISPATCH_POLICY: DispatchPolicy = DispatchPolicy::FirstRecognized;

/// What the dispatcher did with a notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// Nearby-events item inserted for a location change.
    LocationsPosted,
    /// Shared item echoed back to the timeline.
    ItemEchoed { with_media: bool },
    /// Social feed entries republished.
    SocialStreamPosted { inserted: usize },
    /// Recognized nothing actionable; acknowledged without side effects.
    Ignored,
    /// A handler started but aborted on degraded upstream data.
    Skipped,
}

impl DispatchOutcome {
    pub fn label(&self) -> &'static str {
        match self {
            DispatchOutcome::LocationsPosted => "locations_posted",
            DispatchOutcome::ItemEchoed { .. } => "item_echoed",
            DispatchOutcome::SocialStreamPosted { .. } => "social_stream_posted",
            DispatchOutcome::Ignored => "ignored",
            DispatchOutcome::Skipped => "skipped",
        }
    }
}

/// Endpoint configuration for the dispatcher.
#[derive(Debug, Clone)]
pub struct DispatchConfig {
    /// Nearby-events directory endpoint.
    pub nearby_events_url: String,
    /// Fixed social feed endpoint.
    pub social_feed_url: String,
    /// This service's own public base URL, for resolving relative image
    /// URLs in outbound messages.
    pub self_base_url: String,
}

/// The notification dispatch engine.
///
/// The authorized timeline client is resolved per request and threaded
/// through the handler calls as a parameter; it is never stored on the
/// dispatcher, which keeps requests isolated from each other.
pub struct NotificationDispatcher {
    resolver: Arc<dyn CredentialResolver>,
    fetcher: Arc<dyn ContentFetcher>,
    config: DispatchConfig,
}

enum RecognizedAction {
    Share,
    SocialStream,
}

fn recognize(action: &UserAction) -> Option<RecognizedAction> {
    match action.kind {
        ActionKind::Share => Some(RecognizedAction::Share),
        ActionKind::Custom if action.payload.as_deref() == Some(SOCIAL_STREAM_PAYLOAD) => {
            Some(RecognizedAction::SocialStream)
        }
        _ => None,
    }
}

impl NotificationDispatcher {
    pub fn new(
        resolver: Arc<dyn CredentialResolver>,
        fetcher: Arc<dyn ContentFetcher>,
        config: DispatchConfig,
    ) -> Self {
        Self {
            resolver,
            fetcher,
            config,
        }
    }

    /// Classify and handle one notification.
    ///
    /// Errors returned here fail the webhook request; both are deliberate:
    /// [`Error::Unauthorized`] from credential resolution and
    /// [`Error::InsertFailed`] from a timeline write.
    pub async fn handle(&self, notification: &Notification) -> Result<DispatchOutcome> {
        let client = self.resolver.resolve(&notification.user_token).await?;

        match notification.collection {
            Collection::Locations => self.handle_locations(client.as_ref(), notification).await,
            Collection::Timeline => self.handle_timeline(client.as_ref(), notification).await,
            Collection::Unknown => {
                info!(
                    user_token = %notification.user_token,
                    "Ignoring notification for unrecognized collection"
                );
                Ok(DispatchOutcome::Ignored)
            }
        }
    }

    /// Locations handler: republish nearby events for the changed location.
    async fn handle_locations(
        &self,
        client: &dyn TimelineClient,
        notification: &Notification,
    ) -> Result<DispatchOutcome> {
        let Some(item_id) = notification.item_id.as_deref() else {
            warn!("Locations notification without itemId, nothing to fetch");
            return Ok(DispatchOutcome::Skipped);
        };

        let location = match client.get_location(item_id).await {
            Ok(location) => location,
            Err(e) => {
                warn!(item_id, error = %e, "Location fetch failed, aborting handler");
                return Ok(DispatchOutcome::Skipped);
            }
        };

        let (Some(lat), Some(lng)) = (location.latitude, location.longitude) else {
            warn!(item_id, "Location has no coordinates, aborting handler");
            return Ok(DispatchOutcome::Skipped);
        };
        info!(latitude = lat, longitude = lng, "New location");

        let url = format!(
            "{}?lat={}&lng={}&radius={}&q={}",
            self.config.nearby_events_url,
            lat,
            lng,
            NEARBY_SEARCH_RADIUS_KM,
            urlencoding::encode(NEARBY_QUERY_TERM)
        );
        let feed = match self.fetcher.fetch_json(&url).await {
            Ok(feed) => feed,
            Err(e) => {
                warn!(error = %e, "Nearby events fetch failed, aborting handler");
                return Ok(DispatchOutcome::Skipped);
            }
        };

        let titles = compose::event_titles(&feed);
        let body = compose::nearby_events_body(location, &titles);
        client.insert_item(&body, None).await?;
        info!(result_count = titles.len(), "Posted nearby events item");
        Ok(DispatchOutcome::LocationsPosted)
    }

    /// Timeline handler: dispatch the first recognized user action.
    async fn handle_timeline(
        &self,
        client: &dyn TimelineClient,
        notification: &Notification,
    ) -> Result<DispatchOutcome> {
        match DISPATCH_POLICY {
            DispatchPolicy::FirstRecognized => {}
        }

        for action in &notification.user_actions {
            match recognize(action) {
                Some(RecognizedAction::Share) => {
                    // First recognized action wins; remaining actions are
                    // deliberately not processed.
                    return self.handle_share(client, notification).await;
                }
                Some(RecognizedAction::SocialStream) => {
                    return self.handle_social_stream(client).await;
                }
                None => {
                    info!(
                        kind = ?action.kind,
                        payload = action.payload.as_deref().unwrap_or(""),
                        "Unrecognized user action, skipping"
                    );
                }
            }
        }
        Ok(DispatchOutcome::Ignored)
    }

    /// SHARE branch: echo the shared item, republishing its first
    /// attachment when the content is retrievable.
    async fn handle_share(
        &self,
        client: &dyn TimelineClient,
        notification: &Notification,
    ) -> Result<DispatchOutcome> {
        let Some(item_id) = notification.item_id.as_deref() else {
            warn!("SHARE notification without itemId, nothing to echo");
            return Ok(DispatchOutcome::Skipped);
        };

        let item = match client.get_item(item_id).await {
            Ok(item) => item,
            Err(e) => {
                warn!(item_id, error = %e, "Shared item fetch failed, aborting handler");
                return Ok(DispatchOutcome::Skipped);
            }
        };

        let mut media = None;
        if let Some(attachment) = item.attachments.iter().take(MAX_ATTACHMENTS_PROPAGATED).next()
        {
            match self.fetch_share_media(client, item_id, &attachment.id).await {
                Ok(payload) => media = Some(payload),
                Err(e) => {
                    // Soft failure: the echo item is still inserted, just
                    // without media.
                    warn!(item_id, attachment_id = %attachment.id, error = %e,
                        "Unable to retrieve attachment");
                }
            }
        }

        let body = compose::share_echo_body(item.text.as_deref());
        let with_media = media.is_some();
        client.insert_item(&body, media).await?;
        info!(item_id, with_media, "Echoed shared item");
        Ok(DispatchOutcome::ItemEchoed { with_media })
    }

    async fn fetch_share_media(
        &self,
        client: &dyn TimelineClient,
        item_id: &str,
        attachment_id: &str,
    ) -> Result<MediaPayload> {
        let attachment = client.get_attachment(item_id, attachment_id).await?;
        let content_url = attachment
            .content_url
            .as_deref()
            .ok_or_else(|| Error::Request(format!("attachment {attachment_id} has no content URL")))?;

        let content = client.fetch_attachment_content(content_url).await?;
        if !content.is_ok() {
            return Err(Error::AttachmentUnavailable {
                status: content.status,
            });
        }

        debug!(attachment_id, bytes = content.data.len(), "Fetched attachment content");
        Ok(MediaPayload {
            content_type: attachment
                .content_type
                .unwrap_or_else(|| "application/octet-stream".to_string()),
            data: content.data,
        })
    }

    /// CUSTOM/social-stream branch: republish entries from the fixed feed.
    async fn handle_social_stream(&self, client: &dyn TimelineClient) -> Result<DispatchOutcome> {
        let feed = match self.fetcher.fetch_json(&self.config.social_feed_url).await {
            Ok(feed) => feed,
            Err(e) => {
                // Sequential form: one feed fetch serves all entries, so a
                // fetch failure aborts the whole loop.
                warn!(error = %e, "Social feed fetch failed, aborting handler");
                return Ok(DispatchOutcome::Skipped);
            }
        };

        let messages = compose::social_feed_messages(&feed);
        let writer = ItemWriter::new(client, self.fetcher.as_ref(), &self.config.self_base_url);
        let inserted = writer.insert_messages(&messages).await?;
        info!(insert_count = inserted, "Posted social stream items");
        Ok(DispatchOutcome::SocialStreamPosted { inserted })
    }
}
