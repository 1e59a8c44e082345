//! The `/notify` webhook endpoint.

use axum::extract::State;
use axum::Json;
use serde::Serialize;
use tracing::{debug, warn};

use helio_core::{Error, Notification};

use crate::error::ApiError;
use crate::AppState;

/// Response body for an acknowledged notification.
#[derive(Debug, Serialize)]
pub struct NotifyResponse {
    /// What the dispatcher did: "locations_posted", "item_echoed",
    /// "social_stream_posted", "ignored", or "skipped".
    pub state: String,
}

/// Handle a notification ping.
///
/// The body is taken raw and parsed leniently: malformed payloads are
/// logged and acknowledged with 200 so the sender does not redeliver data
/// a retry cannot fix. Only credential resolution failures (401) and
/// timeline insert failures (502) produce error responses.
pub async fn notify(
    State(state): State<AppState>,
    body: String,
) -> Result<Json<NotifyResponse>, ApiError> {
    debug!(payload = %body, "Got a notification");

    let notification: Notification = match serde_json::from_str(&body) {
        Ok(notification) => notification,
        Err(e) => {
            let err = Error::MalformedNotification(e.to_string());
            warn!(error = %err, "Acknowledging malformed notification without action");
            return Ok(Json(NotifyResponse {
                state: "ignored".to_string(),
            }));
        }
    };

    let outcome = state.dispatcher.handle(&notification).await?;
    Ok(Json(NotifyResponse {
        state: outcome.label().to_string(),
    }))
}
