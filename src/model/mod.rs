// src/model/mod.rs
//! Domain model for catalog pages.
//!
//! These are the types the core works with after parsing. They carry no
//! wire-format names; see `api::responses` for the JSON shape.

use crate::types::PageIndex;

/// One catalog entry.
///
/// Items have no identity of their own. Their position in the accumulated
/// collection is what distinguishes two items with the same name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    pub name: String,
    pub poster_image: Option<String>,
}

impl Item {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            poster_image: None,
        }
    }

    pub fn with_poster(mut self, poster_image: impl Into<String>) -> Self {
        self.poster_image = Some(poster_image.into());
        self
    }
}

/// The response for one page request.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PageResult {
    pub title: String,
    pub items: Vec<Item>,
}

impl PageResult {
    pub fn new(title: impl Into<String>, items: Vec<Item>) -> Self {
        Self {
            title: title.into(),
            items,
        }
    }
}

/// A point-in-time copy of the catalog state, safe to hand to readers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogSnapshot {
    pub title: String,
    pub items: Vec<Item>,
    pub next_page_index: PageIndex,
    pub has_more: bool,
    pub in_flight: bool,
}
