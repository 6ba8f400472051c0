// src/catalog/mod.rs
//! The paginated-accumulation-and-filter core.
//!
//! ```text
//! ProximityDetector ──signal──▶ FetchScheduler ──fetch_page──▶ PageSource
//!                                    │
//!                                    ▼
//!                               Accumulator ──snapshot──▶ FilterView
//!                                    │
//!                                    ▼
//!                          CatalogEvent (broadcast)
//! ```
//!
//! Only the scheduler writes to the accumulator. Everything else reads
//! snapshots.

pub mod accumulator;
pub mod controller;
pub mod events;
pub mod filter;
pub mod proximity;
pub mod scheduler;

pub use accumulator::Accumulator;
pub use controller::CatalogController;
pub use events::{CatalogEvent, LoadStatus};
pub use filter::{filter_items, no_results_found, FilterView, FilteredCatalog};
pub use proximity::{ProximityDetector, ProximitySignal, ProximitySubscription, ScrollMetrics};
pub use scheduler::{
    DispatchOutcome, FetchScheduler, RejectReason, RetryPolicy, SchedulerPolicy,
    TerminationPolicy, Trigger,
};
