// src/catalog/scheduler.rs
//! Decides when a page is fetched, and makes sure only one is in flight.
//!
//! # Laws
//!
//! - **Single flight**: a trigger that arrives while a fetch is unresolved
//!   produces no adapter call.
//! - **Request order = merge order**: because of single flight, pages are
//!   merged in exactly the order they were requested.
//! - **Terminal**: once the accumulator reports no more pages, or the cursor
//!   has moved past the page limit, every trigger is rejected.
//! - **Failures are absorbed**: a failed fetch clears the in-flight flag and
//!   changes nothing else. It is logged and published, never returned as `Err`.
//! - **Cancel safety**: dropping a dispatch before it resolves clears the
//!   in-flight flag as if the fetch had failed.

use super::accumulator::Accumulator;
use super::events::{CatalogEvent, EventHub, LoadStatus};
use crate::api::PageSource;
use crate::error::FetchError;
use crate::error_recovery::retry_with_backoff;
use crate::model::{CatalogSnapshot, PageResult};
use crate::types::{PageIndex, PageLimit};
use parking_lot::Mutex;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{broadcast, watch};

/// What asked for a fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    /// The single load issued when the controller starts.
    InitialLoad,
    /// The consumer scrolled near the end of the rendered items.
    Proximity,
}

/// How pagination decides there are no more pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TerminationPolicy {
    /// Stop after the configured page limit has been fetched.
    #[default]
    PageLimit,
    /// Also stop as soon as a page arrives with no items.
    EmptyPage,
}

/// What to do when a page fetch fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RetryPolicy {
    /// Give up on the page; the next trigger requests the following index.
    #[default]
    None,
    /// Re-request the same index with exponential backoff before giving up.
    /// The fetch stays in flight for the whole sequence.
    Backoff {
        max_attempts: u32,
        initial_delay: Duration,
        max_delay: Duration,
    },
}

/// Fixed pagination rules for one controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SchedulerPolicy {
    pub page_limit: PageLimit,
    pub termination: TerminationPolicy,
    pub retry: RetryPolicy,
}

/// Why a trigger did not produce a fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    InFlight,
    Exhausted,
    AlreadyStarted,
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InFlight => write!(f, "a fetch is already in flight"),
            Self::Exhausted => write!(f, "no more pages"),
            Self::AlreadyStarted => write!(f, "initial load already dispatched"),
        }
    }
}

/// Result of a single trigger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    Merged {
        page_index: PageIndex,
        items_added: usize,
    },
    Failed {
        page_index: PageIndex,
        error: FetchError,
    },
    Rejected(RejectReason),
}

impl DispatchOutcome {
    /// Whether the trigger reached the page source.
    pub fn was_dispatched(&self) -> bool {
        !matches!(self, Self::Rejected(_))
    }
}

struct SchedulerState {
    accumulator: Accumulator,
    page_limit: PageLimit,
    initial_dispatched: bool,
}

impl SchedulerState {
    fn new(page_limit: PageLimit) -> Self {
        Self {
            accumulator: Accumulator::new(),
            page_limit,
            initial_dispatched: false,
        }
    }

    /// More pages may be requested: `has_more` holds and the cursor is still
    /// within the page limit. A failed last page closes pagination here
    /// without touching `has_more`.
    fn is_open(&self) -> bool {
        self.accumulator.has_more() && self.page_limit.covers(self.accumulator.next_page_index())
    }

    fn rejection_for(&self, trigger: Trigger) -> Option<RejectReason> {
        if self.accumulator.is_in_flight() {
            Some(RejectReason::InFlight)
        } else if !self.is_open() {
            Some(RejectReason::Exhausted)
        } else if trigger == Trigger::InitialLoad && self.initial_dispatched {
            Some(RejectReason::AlreadyStarted)
        } else {
            None
        }
    }

    fn load_status(&self) -> LoadStatus {
        LoadStatus {
            in_flight: self.accumulator.is_in_flight(),
            has_more: self.is_open(),
        }
    }

    fn snapshot(&self) -> CatalogSnapshot {
        CatalogSnapshot {
            has_more: self.is_open(),
            ..self.accumulator.snapshot()
        }
    }
}

/// Clears the in-flight mark if a dispatch is dropped before it resolves.
struct InFlightGuard<'a> {
    scheduler: &'a FetchScheduler,
    page_index: PageIndex,
    armed: bool,
}

impl InFlightGuard<'_> {
    fn disarm(mut self) {
        self.armed = false;
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        log::warn!(
            "Fetch of page {} was dropped before it resolved",
            self.page_index
        );
        let mut state = self.scheduler.state.lock();
        state.accumulator.end_fetch();
        self.scheduler.publish_resolution(&state);
    }
}

/// Gatekeeper between triggers and the page source.
pub struct FetchScheduler {
    source: Arc<dyn PageSource>,
    policy: SchedulerPolicy,
    state: Mutex<SchedulerState>,
    hub: EventHub,
}

impl FetchScheduler {
    pub fn new(source: Arc<dyn PageSource>, policy: SchedulerPolicy) -> Self {
        Self {
            source,
            policy,
            state: Mutex::new(SchedulerState::new(policy.page_limit)),
            hub: EventHub::new(),
        }
    }

    pub fn policy(&self) -> &SchedulerPolicy {
        &self.policy
    }

    pub fn subscribe(&self) -> broadcast::Receiver<CatalogEvent> {
        self.hub.subscribe()
    }

    pub fn watch_status(&self) -> watch::Receiver<LoadStatus> {
        self.hub.watch_status()
    }

    pub(crate) fn hub(&self) -> &EventHub {
        &self.hub
    }

    /// Current catalog state. `has_more` is false once no further page may
    /// be requested.
    pub fn snapshot(&self) -> CatalogSnapshot {
        self.state.lock().snapshot()
    }

    pub fn load_status(&self) -> LoadStatus {
        self.state.lock().load_status()
    }

    /// Handles one trigger: checks eligibility, fetches, merges.
    ///
    /// The eligibility check and the in-flight mark happen under one lock
    /// acquisition; the lock is released before awaiting the source.
    pub async fn dispatch(&self, trigger: Trigger) -> DispatchOutcome {
        let guard = {
            let mut state = self.state.lock();
            if let Some(reason) = state.rejection_for(trigger) {
                log::debug!("{:?} trigger rejected: {}", trigger, reason);
                return DispatchOutcome::Rejected(reason);
            }
            if trigger == Trigger::InitialLoad {
                state.initial_dispatched = true;
            }
            let page_index = state.accumulator.begin_fetch();
            self.hub.publish_status(state.load_status());
            self.hub.emit(CatalogEvent::LoadingChanged { in_flight: true });
            InFlightGuard {
                scheduler: self,
                page_index,
                armed: true,
            }
        };
        let page_index = guard.page_index;

        log::info!(
            "Fetching page {} from {} ({:?})",
            page_index,
            self.source.describe(),
            trigger
        );

        let result = self.fetch_with_policy(page_index).await;
        guard.disarm();
        self.resolve(page_index, result)
    }

    async fn fetch_with_policy(&self, page_index: PageIndex) -> Result<PageResult, FetchError> {
        match self.policy.retry {
            RetryPolicy::None => self.source.fetch_page(page_index).await,
            RetryPolicy::Backoff {
                max_attempts,
                initial_delay,
                max_delay,
            } => {
                retry_with_backoff(
                    || self.source.fetch_page(page_index),
                    max_attempts,
                    initial_delay,
                    max_delay,
                )
                .await
            }
        }
    }

    fn resolve(
        &self,
        page_index: PageIndex,
        result: Result<PageResult, FetchError>,
    ) -> DispatchOutcome {
        let mut state = self.state.lock();

        let outcome = match result {
            Ok(page) => {
                let items_added = state.accumulator.merge(page);
                state
                    .accumulator
                    .evaluate_has_more(page_index, self.policy.page_limit);
                if items_added == 0 && self.policy.termination == TerminationPolicy::EmptyPage {
                    log::info!("Page {} was empty; ending pagination", page_index);
                    state.accumulator.terminate();
                }
                let total_items = state.accumulator.items().len();
                log::info!(
                    "Merged page {}: {} new items, {} total",
                    page_index,
                    items_added,
                    total_items
                );
                self.hub.emit(CatalogEvent::PageMerged {
                    page_index,
                    items_added,
                    total_items,
                });
                DispatchOutcome::Merged {
                    page_index,
                    items_added,
                }
            }
            Err(error) => {
                log::error!("Error fetching catalog page: {}", error);
                self.hub.emit(CatalogEvent::FetchFailed {
                    page_index,
                    message: error.message.clone(),
                });
                DispatchOutcome::Failed { page_index, error }
            }
        };

        state.accumulator.end_fetch();
        self.publish_resolution(&state);
        outcome
    }

    /// Publishes the end of a dispatch. Called with the state lock held so
    /// consecutive dispatches never interleave their events.
    fn publish_resolution(&self, state: &SchedulerState) {
        self.hub.publish_status(state.load_status());
        self.hub.emit(CatalogEvent::LoadingChanged { in_flight: false });
        // Only reachable from an open state, so this fires once.
        if !state.is_open() {
            self.hub.emit(CatalogEvent::Exhausted);
        }
    }
}
