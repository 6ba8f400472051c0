// src/formatting/posters.rs
//! Poster location policy, including the placeholder fallback.
//!
//! Presentation only: resolving a poster never changes the item.

use crate::constants::{DEFAULT_IMAGE_BASE_URL, PLACEHOLDER_POSTER};
use crate::model::Item;
use crate::types::{ValidatedUrl, ValidationError};

/// Where a poster image should be loaded from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PosterSource {
    /// The item's own poster.
    Remote(String),
    /// The placeholder, because the item has no poster or it failed to load.
    Placeholder(String),
}

impl PosterSource {
    pub fn location(&self) -> &str {
        match self {
            Self::Remote(url) | Self::Placeholder(url) => url,
        }
    }

    pub fn is_placeholder(&self) -> bool {
        matches!(self, Self::Placeholder(_))
    }
}

/// Resolves item posters against an image base URL.
#[derive(Debug, Clone)]
pub struct PosterResolver {
    image_base: ValidatedUrl,
    placeholder: String,
}

impl PosterResolver {
    pub fn new(image_base: ValidatedUrl, placeholder: impl Into<String>) -> Self {
        Self {
            image_base,
            placeholder: placeholder.into(),
        }
    }

    /// Resolver for the public catalog's image host.
    pub fn with_defaults() -> Result<Self, ValidationError> {
        Ok(Self::new(
            ValidatedUrl::parse(DEFAULT_IMAGE_BASE_URL)?,
            PLACEHOLDER_POSTER,
        ))
    }

    pub fn resolve(&self, item: &Item) -> PosterSource {
        match &item.poster_image {
            Some(poster) => PosterSource::Remote(self.image_base.join_segment(poster)),
            None => self.on_load_failure(),
        }
    }

    /// What to show once a poster failed to load.
    pub fn on_load_failure(&self) -> PosterSource {
        PosterSource::Placeholder(self.image_base.join_segment(&self.placeholder))
    }
}
