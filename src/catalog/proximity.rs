// src/catalog/proximity.rs
//! Scroll-proximity detection: "the last rendered item has reached the
//! bottom of the viewport".
//!
//! The detector is fed scroll positions by whatever owns the viewport and
//! forwards a signal to the current subscriber. It stays quiet while a fetch
//! is in flight or once the catalog is exhausted. The scheduler re-checks
//! both conditions anyway.

use super::events::LoadStatus;
use parking_lot::Mutex;
use std::sync::Arc;
use tokio::sync::{mpsc, watch};

/// Where the viewport is and where the last rendered item starts.
///
/// Units are whatever the front end measures in (pixels, terminal rows).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollMetrics {
    /// Offset of the top of the viewport from the top of the content.
    pub scroll_offset: u32,
    pub viewport_height: u32,
    /// Offset of the last rendered item; `None` when nothing is rendered.
    pub last_item_offset: Option<u32>,
}

impl ScrollMetrics {
    /// Whether the viewport's bottom edge has reached the last item.
    pub fn is_near_end(&self) -> bool {
        match self.last_item_offset {
            Some(last) => self.scroll_offset.saturating_add(self.viewport_height) >= last,
            None => false,
        }
    }
}

/// Emitted when the consumer scrolled to the end of the rendered items.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProximitySignal {
    pub metrics: ScrollMetrics,
}

#[derive(Debug, Default)]
struct Slot {
    generation: u64,
    sender: Option<mpsc::UnboundedSender<ProximitySignal>>,
}

/// Turns scroll positions into proximity signals.
#[derive(Debug)]
pub struct ProximityDetector {
    status: watch::Receiver<LoadStatus>,
    slot: Arc<Mutex<Slot>>,
}

impl ProximityDetector {
    pub fn new(status: watch::Receiver<LoadStatus>) -> Self {
        Self {
            status,
            slot: Arc::new(Mutex::new(Slot::default())),
        }
    }

    /// Starts delivering signals to a new subscription.
    ///
    /// A detector has one listener at a time; subscribing again replaces the
    /// previous subscription, which then receives nothing further.
    pub fn subscribe(&self) -> ProximitySubscription {
        let (sender, receiver) = mpsc::unbounded_channel();
        let mut slot = self.slot.lock();
        slot.generation += 1;
        slot.sender = Some(sender);
        log::debug!("Proximity subscription {} started", slot.generation);
        ProximitySubscription {
            receiver,
            generation: slot.generation,
            slot: Arc::clone(&self.slot),
        }
    }

    pub fn is_subscribed(&self) -> bool {
        self.slot.lock().sender.is_some()
    }

    /// Feeds one scroll position. Returns whether a signal was emitted.
    pub fn observe(&self, metrics: ScrollMetrics) -> bool {
        if !metrics.is_near_end() {
            return false;
        }
        if !self.status.borrow().accepts_fetch() {
            log::trace!("Near end, but loading is not accepted right now");
            return false;
        }
        let slot = self.slot.lock();
        match &slot.sender {
            Some(sender) => sender.send(ProximitySignal { metrics }).is_ok(),
            None => false,
        }
    }
}

/// A live subscription to proximity signals. Dropping it unsubscribes.
#[derive(Debug)]
pub struct ProximitySubscription {
    receiver: mpsc::UnboundedReceiver<ProximitySignal>,
    generation: u64,
    slot: Arc<Mutex<Slot>>,
}

impl ProximitySubscription {
    /// Waits for the next signal; `None` once replaced by a newer subscription.
    pub async fn next_signal(&mut self) -> Option<ProximitySignal> {
        self.receiver.recv().await
    }

    /// Takes a pending signal without waiting.
    pub fn try_next(&mut self) -> Option<ProximitySignal> {
        self.receiver.try_recv().ok()
    }
}

impl Drop for ProximitySubscription {
    fn drop(&mut self) {
        let mut slot = self.slot.lock();
        if slot.generation == self.generation {
            slot.sender = None;
            log::debug!("Proximity subscription {} released", self.generation);
        }
    }
}
