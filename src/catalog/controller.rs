// src/catalog/controller.rs
//! One catalog session: scheduler, live filter and proximity detector wired
//! together behind a small API a front end can drive.

use super::events::CatalogEvent;
use super::filter::{FilterView, FilteredCatalog};
use super::proximity::{ProximityDetector, ProximitySubscription};
use super::scheduler::{DispatchOutcome, FetchScheduler, SchedulerPolicy, Trigger};
use crate::api::PageSource;
use crate::model::CatalogSnapshot;
use parking_lot::RwLock;
use std::sync::Arc;
use tokio::sync::broadcast;

/// Owns the state of one catalog session.
pub struct CatalogController {
    scheduler: FetchScheduler,
    filter: RwLock<FilterView>,
    detector: ProximityDetector,
}

impl CatalogController {
    pub fn new(source: Arc<dyn PageSource>, policy: SchedulerPolicy) -> Self {
        let scheduler = FetchScheduler::new(source, policy);
        let detector = ProximityDetector::new(scheduler.watch_status());
        Self {
            scheduler,
            filter: RwLock::new(FilterView::new()),
            detector,
        }
    }

    /// Issues the initial page load. Only the first call fetches.
    pub async fn start(&self) -> DispatchOutcome {
        self.scheduler.dispatch(Trigger::InitialLoad).await
    }

    /// Handles a proximity signal by requesting the next page if allowed.
    pub async fn on_proximity(&self) -> DispatchOutcome {
        self.scheduler.dispatch(Trigger::Proximity).await
    }

    /// Dispatches one fetch for every signal already waiting on `subscription`.
    pub async fn drain_signals(
        &self,
        subscription: &mut ProximitySubscription,
    ) -> Vec<DispatchOutcome> {
        let mut outcomes = Vec::new();
        while let Some(signal) = subscription.try_next() {
            log::debug!("Proximity signal at {:?}", signal.metrics);
            outcomes.push(self.on_proximity().await);
        }
        outcomes
    }

    /// Replaces the live query and notifies subscribers if it changed.
    pub fn set_query(&self, query: impl Into<String>) {
        let query = query.into();
        let changed = self.filter.write().set_query(query.clone());
        if changed {
            log::debug!("Filter query is now {:?}", query);
            self.scheduler
                .hub()
                .emit(CatalogEvent::QueryChanged { query });
        }
    }

    pub fn query(&self) -> String {
        self.filter.read().query().to_string()
    }

    pub fn snapshot(&self) -> CatalogSnapshot {
        self.scheduler.snapshot()
    }

    /// The filtered view over the current collection.
    pub fn view(&self) -> FilteredCatalog {
        let snapshot = self.scheduler.snapshot();
        self.filter.read().apply(&snapshot)
    }

    pub fn subscribe_events(&self) -> broadcast::Receiver<CatalogEvent> {
        self.scheduler.subscribe()
    }

    pub fn detector(&self) -> &ProximityDetector {
        &self.detector
    }

    pub fn policy(&self) -> &SchedulerPolicy {
        self.scheduler.policy()
    }
}
