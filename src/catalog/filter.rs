// src/catalog/filter.rs
//! Live, case-insensitive substring filter over the accumulated items.
//!
//! Filtering never touches the collection it reads; each call builds a new
//! sequence.

use crate::model::{CatalogSnapshot, Item};

/// Keeps the items whose name contains `query`, ignoring case.
///
/// An empty query keeps everything, in the original order.
pub fn filter_items(items: &[Item], query: &str) -> Vec<Item> {
    if query.is_empty() {
        return items.to_vec();
    }
    let needle = query.to_lowercase();
    items
        .iter()
        .filter(|item| item.name.to_lowercase().contains(&needle))
        .cloned()
        .collect()
}

/// Whether to show "no results": the query is non-empty and matched nothing.
pub fn no_results_found(filtered: &[Item], query: &str) -> bool {
    filtered.is_empty() && !query.is_empty()
}

/// The derived, read-only view a renderer draws from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilteredCatalog {
    pub title: String,
    pub query: String,
    pub items: Vec<Item>,
    /// Size of the whole accumulated collection, not of `items`.
    pub total_items: usize,
    pub no_results_found: bool,
    pub in_flight: bool,
}

/// Holds the live query.
#[derive(Debug, Clone, Default)]
pub struct FilterView {
    query: String,
}

impl FilterView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    /// Replaces the query. Returns `false` if it was unchanged.
    pub fn set_query(&mut self, query: impl Into<String>) -> bool {
        let query = query.into();
        if query == self.query {
            return false;
        }
        self.query = query;
        true
    }

    pub fn apply(&self, snapshot: &CatalogSnapshot) -> FilteredCatalog {
        let items = filter_items(&snapshot.items, &self.query);
        FilteredCatalog {
            title: snapshot.title.clone(),
            query: self.query.clone(),
            no_results_found: no_results_found(&items, &self.query),
            items,
            total_items: snapshot.items.len(),
            in_flight: snapshot.in_flight,
        }
    }
}
