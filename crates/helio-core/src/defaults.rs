//! Centralized default constants for heliograph.
//!
//! **This module is the single source of truth** for shared default values
//! and dispatch policy knobs. Crates reference these constants instead of
//! defining their own magic numbers; the policy constants in particular make
//! deliberate behavior (single-attachment propagation, bounded list
//! rendering) discoverable and testable rather than implicit in control flow.

// =============================================================================
// DISPATCH POLICY
// =============================================================================

/// Number of attachments propagated when echoing a shared item.
///
/// Only the first attachment is ever republished; the rest are ignored.
pub const MAX_ATTACHMENTS_PROPAGATED: usize = 1;

/// Maximum nearby-event titles rendered into a locations item.
pub const NEARBY_EVENTS_LIMIT: usize = 5;

/// Maximum social feed entries republished per notification.
pub const SOCIAL_FEED_LIMIT: usize = 5;

/// Menu item id / action payload that selects the social-stream flow.
pub const SOCIAL_STREAM_PAYLOAD: &str = "social-stream";

// =============================================================================
// NEARBY EVENTS QUERY
// =============================================================================

/// Search radius passed to the nearby-events API.
pub const NEARBY_SEARCH_RADIUS_KM: f64 = 0.5;

/// Fixed query term for the nearby-events search.
pub const NEARBY_QUERY_TERM: &str = "EB_DEMO 2013";

// =============================================================================
// MENU ITEMS
// =============================================================================

/// Display name of the custom social-stream menu entry.
pub const SOCIAL_STREAM_DISPLAY_NAME: &str = "Social Stream";

/// Icon shown next to the social-stream menu entry.
pub const SOCIAL_STREAM_ICON_URL: &str =
    "https://fbcdn-profile-a.akamaihd.net/hprofile-ak-ash4/373119_15818120260_657956353_q.jpg";

// =============================================================================
// TIMEOUTS
// =============================================================================

/// Deadline for fetching an image referenced by an outbound message.
pub const IMAGE_FETCH_TIMEOUT_SECS: u64 = 20;

/// Deadline for third-party JSON content fetches.
pub const CONTENT_FETCH_TIMEOUT_SECS: u64 = 10;

/// Deadline for timeline API calls (reads and inserts).
pub const MIRROR_TIMEOUT_SECS: u64 = 30;

// =============================================================================
// MEDIA
// =============================================================================

/// Content type used when attaching a fetched image to an insert.
pub const IMAGE_UPLOAD_CONTENT_TYPE: &str = "image/jpeg";

// =============================================================================
// ENDPOINTS
// =============================================================================

/// Default timeline API base URL.
pub const MIRROR_BASE_URL: &str = "https://www.googleapis.com/mirror/v1";

/// Default timeline API media upload base URL.
pub const MIRROR_UPLOAD_BASE_URL: &str = "https://www.googleapis.com/upload/mirror/v1";

/// Default nearby-events directory endpoint.
pub const NEARBY_EVENTS_URL: &str = "http://www.eventbrite.com/directory/json/";

/// Default social feed endpoint (fixed feed id).
pub const SOCIAL_FEED_URL: &str =
    "http://www.eventbrite.com/ajax/event/7778380345/experience/more/?next=0";

// =============================================================================
// SERVER
// =============================================================================

/// Default bind host.
pub const BIND_HOST: &str = "0.0.0.0";

/// Default bind port.
pub const BIND_PORT: u16 = 8080;

/// Maximum accepted webhook body size. Notification payloads are small;
/// anything larger is noise.
pub const MAX_BODY_BYTES: usize = 64 * 1024;
