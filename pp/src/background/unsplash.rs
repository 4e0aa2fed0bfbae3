//! Unsplash random-photo search

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use super::{Background, ImageSearch, ImageSearchError};
use crate::config::BackgroundConfig;

/// Unsplash API client
pub struct UnsplashClient {
    access_key: String,
    base_url: String,
    http: Client,
}

impl UnsplashClient {
    /// Build a client with the configured timeout
    pub fn new(config: &BackgroundConfig, access_key: String) -> Result<Self, reqwest::Error> {
        debug!(base_url = %config.base_url, timeout_ms = config.timeout_ms, "UnsplashClient::new: called");
        let http = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()?;

        Ok(Self {
            access_key,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            http,
        })
    }
}

#[async_trait]
impl ImageSearch for UnsplashClient {
    async fn random_photo(&self, query: &str) -> Result<Background, ImageSearchError> {
        debug!(%query, "UnsplashClient::random_photo: called");
        let url = format!("{}/photos/random", self.base_url);

        let response = self
            .http
            .get(url)
            .query(&[
                ("query", query),
                ("orientation", "landscape"),
                ("client_id", self.access_key.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        if status != reqwest::StatusCode::OK {
            debug!(%status, "UnsplashClient::random_photo: non-200");
            return Err(ImageSearchError::Status(status.as_u16()));
        }

        let photo: UnsplashPhoto = response.json().await?;
        Ok(Background::new(photo.urls.regular, photo.color))
    }
}

#[derive(Debug, Deserialize)]
struct UnsplashPhoto {
    urls: UnsplashUrls,
    color: String,
}

#[derive(Debug, Deserialize)]
struct UnsplashUrls {
    regular: String,
}
