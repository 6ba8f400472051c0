// src/catalog/events.rs
//! "View changed" notifications for whoever renders the catalog.
//!
//! The core never re-renders anything itself. It publishes what happened
//! and lets subscribers decide what to redraw.

use crate::constants::EVENT_CHANNEL_CAPACITY;
use crate::types::PageIndex;
use tokio::sync::{broadcast, watch};

/// Something a renderer may want to react to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogEvent {
    /// A fetch was dispatched (`true`) or resolved (`false`).
    LoadingChanged { in_flight: bool },
    /// A page was appended to the collection.
    PageMerged {
        page_index: PageIndex,
        items_added: usize,
        total_items: usize,
    },
    /// A page could not be fetched; the collection is unchanged.
    FetchFailed { page_index: PageIndex, message: String },
    /// No further pages will be requested.
    Exhausted,
    /// The live filter query changed.
    QueryChanged { query: String },
}

/// The two flags that gate fetching, published for the proximity detector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadStatus {
    pub in_flight: bool,
    pub has_more: bool,
}

impl LoadStatus {
    /// Whether a new fetch could be dispatched right now.
    pub fn accepts_fetch(&self) -> bool {
        !self.in_flight && self.has_more
    }
}

impl Default for LoadStatus {
    fn default() -> Self {
        Self {
            in_flight: false,
            has_more: true,
        }
    }
}

/// Fan-out for catalog events plus the latest load status.
#[derive(Debug)]
pub struct EventHub {
    events: broadcast::Sender<CatalogEvent>,
    status: watch::Sender<LoadStatus>,
}

impl Default for EventHub {
    fn default() -> Self {
        Self::new()
    }
}

impl EventHub {
    pub fn new() -> Self {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        let (status, _) = watch::channel(LoadStatus::default());
        Self { events, status }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<CatalogEvent> {
        self.events.subscribe()
    }

    pub fn watch_status(&self) -> watch::Receiver<LoadStatus> {
        self.status.subscribe()
    }

    /// Publishes an event. Having no subscribers is fine.
    pub fn emit(&self, event: CatalogEvent) {
        log::trace!("event: {:?}", event);
        let _ = self.events.send(event);
    }

    pub fn publish_status(&self, status: LoadStatus) {
        self.status.send_replace(status);
    }
}
