//! helio-api - webhook HTTP server for heliograph

use std::sync::Arc;

use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use helio_api::config::Config;
use helio_api::services::{DispatchConfig, NotificationDispatcher};
use helio_api::{app, AppState};
use helio_mirror::{HttpContentFetcher, InMemoryCredentialStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing with configurable output
    //
    // Environment variables:
    //   LOG_FORMAT - "json" or "text" (default: "text")
    //   RUST_LOG   - standard env filter (default: "helio_api=debug,tower_http=debug")
    let log_format = std::env::var("LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "helio_api=debug,tower_http=debug".into());

    let registry = tracing_subscriber::registry().with(env_filter);
    if log_format == "json" {
        registry
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }

    let config = Config::from_env();
    info!(
        mirror_base_url = %config.mirror_base_url,
        nearby_events_url = %config.nearby_events_url,
        social_feed_url = %config.social_feed_url,
        "Configuration loaded"
    );

    // Credential store: external collaborator, seeded from the environment.
    let store = InMemoryCredentialStore::with_endpoints(
        config.mirror_base_url.clone(),
        config.mirror_upload_base_url.clone(),
    );
    if let Some(json) = &config.credentials_json {
        store.load_json(json).await?;
    }

    let dispatcher = NotificationDispatcher::new(
        Arc::new(store),
        Arc::new(HttpContentFetcher::new()),
        DispatchConfig {
            nearby_events_url: config.nearby_events_url.clone(),
            social_feed_url: config.social_feed_url.clone(),
            self_base_url: config.self_base_url.clone(),
        },
    );

    let state = AppState {
        dispatcher: Arc::new(dispatcher),
    };
    let router = app(state);

    let addr = config.bind_addr();
    info!("Starting server on {}", addr);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}
