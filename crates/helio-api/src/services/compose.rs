//! Composition engine: turns fetched data into wire-ready item bodies.
//!
//! Pure functions over already-fetched data; all network work happens in
//! the dispatcher and the item writer. The [`BodyContent`] enum guarantees
//! each composed body carries exactly one of html/text.

use helio_core::defaults::{
    SOCIAL_STREAM_DISPLAY_NAME, SOCIAL_STREAM_ICON_URL, SOCIAL_STREAM_PAYLOAD,
};
use helio_core::html::{nearby_events_html, social_entry_html, social_feed_entries};
use helio_core::{BodyContent, ComposedBody, Location, MenuItem, OutboundMessage};

/// Extract event titles from a nearby-events response.
///
/// Entries live in the `events` array; entries without a string `title` are
/// dropped. A response without an `events` array yields no titles.
pub fn event_titles(feed: &serde_json::Value) -> Vec<String> {
    feed.get("events")
        .and_then(|e| e.as_array())
        .map(|events| {
            events
                .iter()
                .filter_map(|event| event.get("title").and_then(|t| t.as_str()))
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

/// Build the nearby-events item body: rendered event list, the original
/// location echoed back, and the social-stream + delete menu items.
pub fn nearby_events_body(location: Location, titles: &[String]) -> ComposedBody {
    ComposedBody::new(BodyContent::Html(nearby_events_html(titles)))
        .with_location(location)
        .with_menu_items(vec![
            MenuItem::custom(
                SOCIAL_STREAM_PAYLOAD,
                SOCIAL_STREAM_DISPLAY_NAME,
                SOCIAL_STREAM_ICON_URL,
            ),
            MenuItem::delete(),
        ])
}

/// Build the SHARE echo body. An item with no text echoes an empty suffix.
pub fn share_echo_body(original_text: Option<&str>) -> ComposedBody {
    ComposedBody::new(BodyContent::Text(format!(
        "Echoing your shared item: {}",
        original_text.unwrap_or("")
    )))
}

/// Transform a social feed response into outbound messages, one HTML card
/// per entry, capped by the composition helpers.
pub fn social_feed_messages(feed: &serde_json::Value) -> Vec<OutboundMessage> {
    social_feed_entries(feed)
        .into_iter()
        .map(|(text, image_url)| {
            OutboundMessage::html(social_entry_html(text.as_deref(), image_url.as_deref()))
        })
        .collect()
}
