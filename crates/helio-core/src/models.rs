//! Core data models for heliograph.
//!
//! These types are shared across all heliograph crates and represent the
//! inbound notification payload and the timeline service's wire shapes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// =============================================================================
// INBOUND NOTIFICATION
// =============================================================================

/// A push notification delivered by the timeline service.
///
/// Parsed leniently: an unrecognized `collection` or action type degrades to
/// the `Unknown`/`Other` arm instead of a deserialization failure, so the
/// webhook can always acknowledge deliveries it chooses to ignore.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    /// Opaque token identifying the user the notification belongs to.
    pub user_token: String,
    /// Which collection changed.
    #[serde(default)]
    pub collection: Collection,
    /// Id of the changed item within the collection.
    #[serde(default)]
    pub item_id: Option<String>,
    /// Ordered user actions that triggered the notification.
    #[serde(default)]
    pub user_actions: Vec<UserAction>,
}

/// The collection a notification refers to.
///
/// Closed enumeration with an explicit unknown arm so dispatch totality is
/// enforced by the compiler rather than a runtime string compare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Collection {
    Locations,
    Timeline,
    #[serde(other)]
    #[default]
    Unknown,
}

/// A single user action attached to a timeline notification.
#[derive(Debug, Clone, Deserialize)]
pub struct UserAction {
    /// Action type; unrecognized types map to [`ActionKind::Other`].
    #[serde(rename = "type", default)]
    pub kind: ActionKind,
    /// Action payload, e.g. the menu item id for `CUSTOM` actions.
    #[serde(default)]
    pub payload: Option<String>,
}

/// Kind of user action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActionKind {
    Share,
    Custom,
    #[serde(other)]
    #[default]
    Other,
}

// =============================================================================
// TIMELINE RESOURCES
// =============================================================================

/// A timeline item as returned by the timeline service.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineItem {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub html: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attachments: Vec<AttachmentRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notification: Option<NotificationConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated: Option<DateTime<Utc>>,
}

/// Reference to a binary attachment on a timeline item.
///
/// `content_type` and `content_url` are populated by the attachment metadata
/// endpoint; the refs embedded in an item may carry only the id.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttachmentRef {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_url: Option<String>,
}

/// Raw attachment bytes plus the upstream status they came with.
///
/// Non-200 statuses are carried rather than turned into errors: the SHARE
/// flow inserts its echo item without media in that case.
#[derive(Debug, Clone)]
pub struct AttachmentContent {
    pub status: u16,
    pub data: Vec<u8>,
}

impl AttachmentContent {
    pub fn is_ok(&self) -> bool {
        self.status == 200
    }
}

/// A geographic location resource.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accuracy: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
}

// =============================================================================
// OUTBOUND ITEM BODY
// =============================================================================

/// Body content of an outbound timeline item: HTML or plain text.
///
/// Exactly one of the two is populated per item; encoding the choice as an
/// enum makes the invariant unrepresentable to violate. Serializes to the
/// `html` or `text` wire field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum BodyContent {
    #[serde(rename = "html")]
    Html(String),
    #[serde(rename = "text")]
    Text(String),
}

impl BodyContent {
    pub fn is_html(&self) -> bool {
        matches!(self, BodyContent::Html(_))
    }

    pub fn as_str(&self) -> &str {
        match self {
            BodyContent::Html(s) | BodyContent::Text(s) => s,
        }
    }
}

/// Notification behavior of an inserted item.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationConfig {
    pub level: NotificationLevel,
}

impl NotificationConfig {
    pub fn default_level() -> Self {
        Self {
            level: NotificationLevel::Default,
        }
    }
}

/// Notification level for an inserted item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NotificationLevel {
    Default,
}

/// Menu item attached to an outbound timeline item.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItem {
    pub action: MenuAction,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub values: Vec<MenuValue>,
}

impl MenuItem {
    /// A `CUSTOM` menu item with an id and a single display value.
    pub fn custom(id: &str, display_name: &str, icon_url: &str) -> Self {
        Self {
            action: MenuAction::Custom,
            id: Some(id.to_string()),
            values: vec![MenuValue {
                display_name: display_name.to_string(),
                icon_url: Some(icon_url.to_string()),
            }],
        }
    }

    /// The built-in delete menu item.
    pub fn delete() -> Self {
        Self {
            action: MenuAction::Delete,
            id: None,
            values: Vec::new(),
        }
    }
}

/// Built-in or custom menu action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MenuAction {
    Custom,
    Delete,
}

/// Display value for a custom menu item.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuValue {
    pub display_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon_url: Option<String>,
}

/// Wire-ready body for a timeline insert call.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComposedBody {
    #[serde(flatten)]
    pub content: BodyContent,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub menu_items: Vec<MenuItem>,
    pub notification: NotificationConfig,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_bundle_cover: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bundle_id: Option<String>,
}

impl ComposedBody {
    /// A minimal body with the given content and default notification level.
    pub fn new(content: BodyContent) -> Self {
        Self {
            content,
            location: None,
            menu_items: Vec::new(),
            notification: NotificationConfig::default_level(),
            is_bundle_cover: None,
            bundle_id: None,
        }
    }

    pub fn with_location(mut self, location: Location) -> Self {
        self.location = Some(location);
        self
    }

    pub fn with_menu_items(mut self, items: Vec<MenuItem>) -> Self {
        self.menu_items = items;
        self
    }
}

/// Binary media uploaded alongside a timeline insert.
#[derive(Debug, Clone)]
pub struct MediaPayload {
    pub content_type: String,
    pub data: Vec<u8>,
}

// =============================================================================
// ITEM WRITER INPUT
// =============================================================================

/// A message destined for the timeline, produced by the composition engine
/// and consumed exactly once by the item writer.
#[derive(Debug, Clone)]
pub struct OutboundMessage {
    /// Render `text` as the item's HTML body instead of plain text.
    pub use_html_body: bool,
    /// Body content (HTML fragment or plain text, per `use_html_body`).
    pub text: String,
    /// Optional image to fetch and attach; may be relative to the service's
    /// own base URL.
    pub image_url: Option<String>,
    pub is_bundle_cover: Option<bool>,
    pub bundle_id: Option<String>,
}

impl OutboundMessage {
    pub fn html(fragment: impl Into<String>) -> Self {
        Self {
            use_html_body: true,
            text: fragment.into(),
            image_url: None,
            is_bundle_cover: None,
            bundle_id: None,
        }
    }

    pub fn text(text: impl Into<String>) -> Self {
        Self {
            use_html_body: false,
            text: text.into(),
            image_url: None,
            is_bundle_cover: None,
            bundle_id: None,
        }
    }

    pub fn with_image_url(mut self, url: impl Into<String>) -> Self {
        self.image_url = Some(url.into());
        self
    }
}
