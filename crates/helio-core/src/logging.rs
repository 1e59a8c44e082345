//! Structured logging field name constants for heliograph.
//!
//! All crates use these constants for consistent structured logging fields,
//! so log aggregation tools can query by standardized names across every
//! subsystem.
//!
//! ## Log Level Contract
//!
//! | Level | Usage |
//! |-------|-------|
//! | ERROR | Request-fatal failures (credential resolution, insert errors) |
//! | WARN  | Degraded handling, fallback applied (no-media echo, aborted handler) |
//! | INFO  | Lifecycle events, dispatch outcomes, inserted items |
//! | DEBUG | Payloads, decision points, composed bodies |

/// Correlation ID propagated from the inbound request. Format: UUIDv7.
pub const REQUEST_ID: &str = "request_id";

/// User token the notification belongs to.
pub const USER_TOKEN: &str = "user_token";

/// Collection named by the notification ("locations", "timeline", ...).
pub const COLLECTION: &str = "collection";

/// Timeline item id the notification refers to.
pub const ITEM_ID: &str = "item_id";

/// Attachment id being fetched or republished.
pub const ATTACHMENT_ID: &str = "attachment_id";

/// Logical operation name, e.g. "dispatch", "insert_item", "fetch_json".
pub const OPERATION: &str = "op";

/// Upstream HTTP status for a content or attachment fetch.
pub const UPSTREAM_STATUS: &str = "upstream_status";

/// Number of items inserted by a handler.
pub const INSERT_COUNT: &str = "insert_count";

/// Wall-clock duration in milliseconds.
pub const DURATION_MS: &str = "duration_ms";
