// src/api/responses.rs
//! Wire types for the catalog page JSON document.
//!
//! ```text
//! { "page": { "title": "...", "content-items": { "content": [ { "name": "...", "poster-image": "..." } ] } } }
//! ```
//!
//! Unknown fields (`total-content-items`, `page-num`, ...) are ignored.

use serde::{Deserialize, Serialize};

use crate::model::{Item, PageResult};

/// Top-level envelope of a page document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageEnvelope {
    pub page: PageBody,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageBody {
    pub title: String,
    #[serde(rename = "content-items")]
    pub content_items: ContentItems,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentItems {
    #[serde(default)]
    pub content: Vec<WireItem>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WireItem {
    pub name: String,
    #[serde(rename = "poster-image", default, skip_serializing_if = "Option::is_none")]
    pub poster_image: Option<String>,
}

/// Trait for converting wire types to domain types
pub trait ToDomain<T> {
    fn to_domain(self) -> T;
}

impl ToDomain<Item> for WireItem {
    fn to_domain(self) -> Item {
        // An empty poster string behaves like a missing one.
        let poster_image = self.poster_image.filter(|p| !p.trim().is_empty());
        Item {
            name: self.name,
            poster_image,
        }
    }
}

impl ToDomain<PageResult> for PageEnvelope {
    fn to_domain(self) -> PageResult {
        PageResult {
            title: self.page.title,
            items: self
                .page
                .content_items
                .content
                .into_iter()
                .map(ToDomain::to_domain)
                .collect(),
        }
    }
}
