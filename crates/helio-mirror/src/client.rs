//! Authorized timeline API client.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, info, warn};

use helio_core::defaults::{MIRROR_BASE_URL, MIRROR_TIMEOUT_SECS, MIRROR_UPLOAD_BASE_URL};
use helio_core::{
    AttachmentContent, AttachmentRef, ComposedBody, Error, Location, MediaPayload, Result,
    TimelineClient, TimelineItem,
};

/// REST client for the timeline service, authorized for a single user.
///
/// One instance per resolved credential; instances are never shared across
/// user tokens.
pub struct MirrorClient {
    client: Client,
    base_url: String,
    upload_base_url: String,
    access_token: String,
}

impl MirrorClient {
    /// Create a client against the default API endpoints.
    pub fn new(access_token: String) -> Self {
        Self::with_config(
            MIRROR_BASE_URL.to_string(),
            MIRROR_UPLOAD_BASE_URL.to_string(),
            access_token,
        )
    }

    /// Create a client with custom base URLs (tests, staging).
    pub fn with_config(base_url: String, upload_base_url: String, access_token: String) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(MIRROR_TIMEOUT_SECS))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            base_url,
            upload_base_url,
            access_token,
        }
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = format!("{}/{}", self.base_url, path);
        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.access_token)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Request(format!(
                "timeline API returned {} for {}: {}",
                status, path, body
            )));
        }

        Ok(response.json::<T>().await?)
    }
}

#[async_trait]
impl TimelineClient for MirrorClient {
    async fn get_item(&self, id: &str) -> Result<TimelineItem> {
        self.get_json(&format!("timeline/{}", urlencoding::encode(id)))
            .await
    }

    async fn get_location(&self, id: &str) -> Result<Location> {
        self.get_json(&format!("locations/{}", urlencoding::encode(id)))
            .await
    }

    async fn get_attachment(&self, item_id: &str, attachment_id: &str) -> Result<AttachmentRef> {
        self.get_json(&format!(
            "timeline/{}/attachments/{}",
            urlencoding::encode(item_id),
            urlencoding::encode(attachment_id)
        ))
        .await
    }

    async fn fetch_attachment_content(&self, content_url: &str) -> Result<AttachmentContent> {
        let response = self
            .client
            .get(content_url)
            .bearer_auth(&self.access_token)
            .send()
            .await?;

        let status = response.status().as_u16();
        let data = if response.status().is_success() {
            response.bytes().await?.to_vec()
        } else {
            Vec::new()
        };

        debug!(upstream_status = status, "Fetched attachment content");
        Ok(AttachmentContent { status, data })
    }

    async fn insert_item(
        &self,
        body: &ComposedBody,
        media: Option<MediaPayload>,
    ) -> Result<TimelineItem> {
        match media {
            None => {
                let response = self
                    .client
                    .post(format!("{}/timeline", self.base_url))
                    .bearer_auth(&self.access_token)
                    .json(body)
                    .send()
                    .await
                    .map_err(|e| Error::InsertFailed(e.to_string()))?;

                if !response.status().is_success() {
                    let status = response.status();
                    let text = response.text().await.unwrap_or_default();
                    return Err(Error::InsertFailed(format!(
                        "timeline insert returned {}: {}",
                        status, text
                    )));
                }

                let item: TimelineItem = response
                    .json()
                    .await
                    .map_err(|e| Error::InsertFailed(e.to_string()))?;
                info!(item_id = %item.id, "Inserted timeline item");
                Ok(item)
            }
            Some(media) => self.insert_with_media(body, media).await,
        }
    }
}

impl MirrorClient {
    /// Resumable media upload: initiate a session carrying the item body and
    /// the media content type, then upload the bytes to the session URI.
    async fn insert_with_media(
        &self,
        body: &ComposedBody,
        media: MediaPayload,
    ) -> Result<TimelineItem> {
        let initiate = self
            .client
            .post(format!(
                "{}/timeline?uploadType=resumable",
                self.upload_base_url
            ))
            .bearer_auth(&self.access_token)
            .header("X-Upload-Content-Type", &media.content_type)
            .json(body)
            .send()
            .await
            .map_err(|e| Error::InsertFailed(format!("upload initiation failed: {}", e)))?;

        if !initiate.status().is_success() {
            let status = initiate.status();
            let text = initiate.text().await.unwrap_or_default();
            return Err(Error::InsertFailed(format!(
                "upload initiation returned {}: {}",
                status, text
            )));
        }

        let session_uri = initiate
            .headers()
            .get(reqwest::header::LOCATION)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
            .ok_or_else(|| {
                Error::InsertFailed("upload initiation response missing session URI".to_string())
            })?;

        debug!(
            content_type = %media.content_type,
            media_bytes = media.data.len(),
            "Uploading media to resumable session"
        );

        let upload = self
            .client
            .put(&session_uri)
            .bearer_auth(&self.access_token)
            .header(reqwest::header::CONTENT_TYPE, &media.content_type)
            .body(media.data)
            .send()
            .await
            .map_err(|e| Error::InsertFailed(format!("media upload failed: {}", e)))?;

        if !upload.status().is_success() {
            let status = upload.status();
            warn!(upstream_status = status.as_u16(), "Media upload rejected");
            let text = upload.text().await.unwrap_or_default();
            return Err(Error::InsertFailed(format!(
                "media upload returned {}: {}",
                status, text
            )));
        }

        let item: TimelineItem = upload
            .json()
            .await
            .map_err(|e| Error::InsertFailed(e.to_string()))?;
        info!(item_id = %item.id, "Inserted timeline item with media");
        Ok(item)
    }
}
