// src/catalog/accumulator.rs
//! The owner of the growing, order-preserving item collection.
//!
//! # Laws
//!
//! - **Append-only**: `merge` only extends `items`; an item's position never
//!   changes and nothing is removed.
//! - **Cursor step**: every dispatched fetch advances `next_page_index` by
//!   exactly one, whatever its outcome. A cursor that cannot advance ends
//!   pagination instead of repeating an index.
//! - **Monotonic exhaustion**: once `has_more` is false it stays false.

use crate::model::{CatalogSnapshot, Item, PageResult};
use crate::types::{PageIndex, PageLimit};

/// Catalog state plus the operations that are allowed to change it.
#[derive(Debug, Clone)]
pub struct Accumulator {
    title: String,
    items: Vec<Item>,
    next_page_index: PageIndex,
    has_more: bool,
    in_flight: bool,
}

impl Default for Accumulator {
    fn default() -> Self {
        Self::new()
    }
}

impl Accumulator {
    /// Fresh state: no items, cursor at page 1, more pages expected.
    pub fn new() -> Self {
        Self::starting_at(PageIndex::FIRST)
    }

    pub fn starting_at(first: PageIndex) -> Self {
        Self {
            title: String::new(),
            items: Vec::new(),
            next_page_index: first,
            has_more: true,
            in_flight: false,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn next_page_index(&self) -> PageIndex {
        self.next_page_index
    }

    pub fn has_more(&self) -> bool {
        self.has_more
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight
    }

    /// Appends the page's items in order and takes its title.
    ///
    /// Returns how many items were appended.
    pub fn merge(&mut self, result: PageResult) -> usize {
        let added = result.items.len();
        self.title = result.title;
        self.items.extend(result.items);
        added
    }

    /// Moves the cursor to the next page index.
    pub fn advance_cursor(&mut self) {
        match self.next_page_index.next() {
            Some(next) => self.next_page_index = next,
            None => {
                log::warn!(
                    "Page index {} is the last representable one",
                    self.next_page_index
                );
                self.terminate();
            }
        }
    }

    /// Clears `has_more` once `page_index_just_fetched` reaches the limit.
    ///
    /// Page contents play no part here: an empty page before the limit
    /// keeps pagination going, and a full page at the limit ends it.
    pub fn evaluate_has_more(&mut self, page_index_just_fetched: PageIndex, page_limit: PageLimit) {
        if !page_limit.has_pages_after(page_index_just_fetched) {
            self.terminate();
        }
    }

    /// Ends pagination for good.
    pub fn terminate(&mut self) {
        if self.has_more {
            log::debug!(
                "Catalog exhausted with {} items; next index would have been {}",
                self.items.len(),
                self.next_page_index
            );
        }
        self.has_more = false;
    }

    /// Marks a fetch as dispatched: sets `in_flight`, advances the cursor and
    /// returns the index that fetch must request.
    pub(crate) fn begin_fetch(&mut self) -> PageIndex {
        debug_assert!(!self.in_flight, "a fetch is already in flight");
        self.in_flight = true;
        let requested = self.next_page_index;
        self.advance_cursor();
        requested
    }

    /// Marks the dispatched fetch as resolved.
    pub(crate) fn end_fetch(&mut self) {
        self.in_flight = false;
    }

    pub fn snapshot(&self) -> CatalogSnapshot {
        CatalogSnapshot {
            title: self.title.clone(),
            items: self.items.clone(),
            next_page_index: self.next_page_index,
            has_more: self.has_more,
            in_flight: self.in_flight,
        }
    }
}
