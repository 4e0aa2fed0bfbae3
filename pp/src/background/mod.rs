//! Background Selector
//!
//! Cosmetic backdrop for the session: an image URL plus its dominant color,
//! which drives the accent and the contrast-aware text color. Every failure
//! (no key, timeout, non-200, bad body) degrades to a fixed fallback pair and
//! is never surfaced to the traveler.

pub mod contrast;
mod unsplash;

pub use contrast::{DARK_TEXT, LIGHT_TEXT, contrast_text_color, parse_hex_color};
pub use unsplash::UnsplashClient;

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;
use tracing::{debug, warn};

use crate::config::BackgroundConfig;

/// Image URL and dominant color
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Background {
    pub image_url: String,
    /// Hex color, e.g. `#F09819`
    pub color: String,
}

impl Background {
    pub fn new(image_url: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            image_url: image_url.into(),
            color: color.into(),
        }
    }

    /// Readable text color on top of [`Background::color`]
    pub fn text_color(&self) -> &'static str {
        contrast_text_color(&self.color)
    }
}

/// Which backdrop is wanted
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackgroundQuery {
    /// Session start and after reset
    Generic,
    /// Right after an itinerary for this destination was generated
    Destination(String),
}

impl BackgroundQuery {
    /// Search terms sent to the image search
    pub fn terms(&self, generic_query: &str) -> String {
        match self {
            Self::Generic => generic_query.to_string(),
            Self::Destination(dest) => format!("{},landmark,landscape", dest),
        }
    }
}

/// Errors from an image search call
#[derive(Debug, Error)]
pub enum ImageSearchError {
    #[error("Image search returned HTTP {0}")]
    Status(u16),

    #[error("Image search request failed: {0}")]
    Network(#[from] reqwest::Error),
}

/// Image search collaborator: query in, photo URL and color out
#[async_trait]
pub trait ImageSearch: Send + Sync {
    async fn random_photo(&self, query: &str) -> Result<Background, ImageSearchError>;
}

/// Chooses backdrops, absorbing every search failure
#[derive(Clone)]
pub struct BackgroundSelector {
    search: Option<Arc<dyn ImageSearch>>,
    fallback: Background,
    generic_query: String,
}

impl BackgroundSelector {
    /// Build from config; without an access key every fetch uses the fallback
    pub fn from_config(config: &BackgroundConfig) -> Self {
        let search: Option<Arc<dyn ImageSearch>> = match config.api_key() {
            Some(key) => match UnsplashClient::new(config, key) {
                Ok(client) => Some(Arc::new(client)),
                Err(e) => {
                    warn!(error = %e, "BackgroundSelector::from_config: could not build image search client");
                    None
                }
            },
            None => {
                debug!(api_key_env = %config.api_key_env, "BackgroundSelector::from_config: no access key, fallback only");
                None
            }
        };

        Self {
            search,
            fallback: Background::new(&config.fallback_image, &config.fallback_color),
            generic_query: config.generic_query.clone(),
        }
    }

    /// Build around an explicit search collaborator
    pub fn new(search: Option<Arc<dyn ImageSearch>>, config: &BackgroundConfig) -> Self {
        Self {
            search,
            fallback: Background::new(&config.fallback_image, &config.fallback_color),
            generic_query: config.generic_query.clone(),
        }
    }

    /// The pair used whenever search is unavailable
    pub fn fallback(&self) -> &Background {
        &self.fallback
    }

    /// Fetch a backdrop; never fails
    pub async fn fetch(&self, query: &BackgroundQuery) -> Background {
        let terms = query.terms(&self.generic_query);
        debug!(?query, %terms, "BackgroundSelector::fetch: called");

        let Some(search) = &self.search else {
            return self.fallback.clone();
        };

        match search.random_photo(&terms).await {
            Ok(background) => {
                debug!(image_url = %background.image_url, color = %background.color, "BackgroundSelector::fetch: got photo");
                background
            }
            Err(e) => {
                warn!(error = %e, %terms, "Background search failed, using fallback");
                self.fallback.clone()
            }
        }
    }
}
