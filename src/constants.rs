// src/constants.rs
//! Domain constants that define the operational boundaries of the catalog.
//!
//! Each constant is named for the domain concept it constrains. Reading
//! them top to bottom tells you where pages come from, how many there are,
//! and what the consumer sees when a poster is missing.

// ---------------------------------------------------------------------------
// Page source
// ---------------------------------------------------------------------------

/// Where catalog pages live when neither `--base-url` nor `CATALOG_BASE_URL`
/// is given. Page `n` is served as `{base}/page{n}.json`.
pub const DEFAULT_CATALOG_BASE_URL: &str = "https://test.create.diagnal.com/data";

/// Environment variable consulted for the page base URL.
pub const CATALOG_BASE_URL_ENV: &str = "CATALOG_BASE_URL";

/// The first page index of every catalog session.
pub const FIRST_PAGE_INDEX: u32 = 1;

/// How many pages the catalog is known to have.
///
/// Termination is driven by this bound, not by inspecting page contents.
pub const DEFAULT_PAGE_LIMIT: u32 = 3;

/// Upper bound on a single page request, so a hung server cannot stall
/// pagination forever.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

// ---------------------------------------------------------------------------
// Retry
// ---------------------------------------------------------------------------

/// Initial delay between attempts when a retry policy is enabled.
pub const DEFAULT_RETRY_DELAY_MS: u64 = 250;

/// Ceiling for the exponential backoff delay.
pub const MAX_RETRY_DELAY_MS: u64 = 4_000;

// ---------------------------------------------------------------------------
// Posters
// ---------------------------------------------------------------------------

/// Base location for poster images.
pub const DEFAULT_IMAGE_BASE_URL: &str = "https://test.create.diagnal.com/images";

/// Image shown for items without a poster, or whose poster fails to load.
pub const PLACEHOLDER_POSTER: &str = "placeholder_for_missing_posters.png";

// ---------------------------------------------------------------------------
// Events
// ---------------------------------------------------------------------------

/// Buffered catalog events per subscriber before slow receivers start lagging.
pub const EVENT_CHANNEL_CAPACITY: usize = 64;

// ---------------------------------------------------------------------------
// Error display
// ---------------------------------------------------------------------------

/// Maximum characters shown when previewing error response bodies.
pub const ERROR_BODY_PREVIEW_LENGTH: usize = 200;
