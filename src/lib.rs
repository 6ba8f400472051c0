// src/lib.rs
//! catalog-scroll library: incrementally loads a paginated catalog, keeps the
//! pages in one ordered collection, and filters it live.
//!
//! # Public API
//!
//! The library exposes types organized by concern:
//! - **Error handling**: `AppError`, `FetchError`, `ValidationError`
//! - **Configuration**: `CatalogConfig`, `CommandLineInput`
//! - **Domain model**: `Item`, `PageResult`, `CatalogSnapshot`
//! - **Page sources**: `PageSource`, `CatalogHttpClient`, `FixtureDirectory`
//! - **Core**: `CatalogController`, `FetchScheduler`, `Accumulator`, `FilterView`,
//!   `ProximityDetector`
//! - **Presentation**: `PosterResolver`, `ScreenRenderer`

pub mod api;
pub mod catalog;
pub mod config;
pub mod constants;
pub mod error;
pub mod error_recovery;
pub mod formatting;
pub mod model;
pub mod types;

// --- Error Handling ---
pub use crate::error::{AppError, FetchError, FetchErrorKind};
pub use crate::types::ValidationError;

// --- Configuration ---
pub use crate::config::{CatalogConfig, CommandLineInput, PageOrigin};

// --- Domain Model ---
pub use crate::model::{CatalogSnapshot, Item, PageResult};

// --- Domain Types ---
pub use crate::types::{PageIndex, PageLimit, ValidatedUrl};

// --- Page Sources ---
pub use crate::api::{
    parser::{parse_page_body, parse_page_response},
    CatalogHttpClient, FixtureDirectory, PageSource,
};

// --- Core ---
pub use crate::catalog::{
    filter_items, no_results_found, Accumulator, CatalogController, CatalogEvent,
    DispatchOutcome, FetchScheduler, FilterView, FilteredCatalog, LoadStatus, ProximityDetector,
    ProximitySignal, ProximitySubscription, RejectReason, RetryPolicy, SchedulerPolicy,
    ScrollMetrics, TerminationPolicy, Trigger,
};

// --- Presentation ---
pub use crate::formatting::{PosterResolver, PosterSource, ScreenRenderer};
