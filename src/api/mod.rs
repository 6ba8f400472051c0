// src/api/mod.rs
//! Page retrieval: the ability to fetch one catalog page by index.
//!
//! Business logic depends on [`PageSource`], never on HTTP or filesystem
//! details.

pub mod client;
pub mod fixtures;
pub mod parser;
pub mod responses;

use crate::error::FetchError;
use crate::model::PageResult;
use crate::types::PageIndex;

/// The ability to retrieve one page of the catalog.
///
/// Implementations perform I/O and nothing else: no caching of results,
/// no mutation of shared state. Calling `fetch_page` twice with the same
/// index must be safe.
#[async_trait::async_trait]
pub trait PageSource: Send + Sync {
    async fn fetch_page(&self, page_index: PageIndex) -> Result<PageResult, FetchError>;

    /// Human-readable location of the source, for logs.
    fn describe(&self) -> String {
        "page source".to_string()
    }
}

// Re-export the public interface
pub use client::CatalogHttpClient;
pub use fixtures::FixtureDirectory;
