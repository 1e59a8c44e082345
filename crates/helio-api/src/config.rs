//! Environment-based configuration.

use helio_core::defaults;

/// Server configuration, read once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    /// Timeline API base URL.
    pub mirror_base_url: String,
    /// Timeline API media upload base URL.
    pub mirror_upload_base_url: String,
    /// Nearby-events directory endpoint.
    pub nearby_events_url: String,
    /// Fixed social feed endpoint.
    pub social_feed_url: String,
    /// This service's own public base URL, for resolving relative image
    /// URLs in outbound messages.
    pub self_base_url: String,
    /// JSON object of `user_token -> access_token`, loaded into the
    /// credential store at startup.
    pub credentials_json: Option<String>,
}

impl Config {
    /// Read configuration from the environment, falling back to defaults.
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| defaults::BIND_HOST.to_string());
        let port: u16 = std::env::var("PORT")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults::BIND_PORT);

        Self {
            host,
            port,
            mirror_base_url: std::env::var("MIRROR_BASE_URL")
                .unwrap_or_else(|_| defaults::MIRROR_BASE_URL.to_string()),
            mirror_upload_base_url: std::env::var("MIRROR_UPLOAD_BASE_URL")
                .unwrap_or_else(|_| defaults::MIRROR_UPLOAD_BASE_URL.to_string()),
            nearby_events_url: std::env::var("NEARBY_EVENTS_URL")
                .unwrap_or_else(|_| defaults::NEARBY_EVENTS_URL.to_string()),
            social_feed_url: std::env::var("SOCIAL_FEED_URL")
                .unwrap_or_else(|_| defaults::SOCIAL_FEED_URL.to_string()),
            self_base_url: std::env::var("SELF_BASE_URL")
                .unwrap_or_else(|_| format!("http://localhost:{port}")),
            credentials_json: std::env::var("HELIO_CREDENTIALS").ok(),
        }
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
