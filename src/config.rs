// src/config.rs
use crate::catalog::{RetryPolicy, SchedulerPolicy, TerminationPolicy};
use crate::constants::{
    CATALOG_BASE_URL_ENV, DEFAULT_CATALOG_BASE_URL, DEFAULT_IMAGE_BASE_URL, DEFAULT_PAGE_LIMIT,
    DEFAULT_REQUEST_TIMEOUT_SECS, DEFAULT_RETRY_DELAY_MS, MAX_RETRY_DELAY_MS, PLACEHOLDER_POSTER,
};
use crate::error::AppError;
use crate::types::{PageLimit, ValidatedUrl};
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

/// Parsed command-line input.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct CommandLineInput {
    /// Base URL serving page1.json, page2.json, ... (falls back to $CATALOG_BASE_URL)
    #[arg(long)]
    pub base_url: Option<String>,

    /// Read pages from a local directory instead of over HTTP
    #[arg(long, conflicts_with = "base_url")]
    pub fixtures: Option<String>,

    /// Number of pages the catalog has
    #[arg(long, default_value_t = DEFAULT_PAGE_LIMIT)]
    pub page_limit: u32,

    /// Also stop paginating when a page comes back empty
    #[arg(long, default_value_t = false)]
    pub stop_on_empty_page: bool,

    /// Attempts per page before giving up on it (1 = no retry)
    #[arg(long, default_value_t = 1)]
    pub retry_attempts: u32,

    /// Initial delay between retries in milliseconds
    #[arg(long, default_value_t = DEFAULT_RETRY_DELAY_MS)]
    pub retry_delay_ms: u64,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = DEFAULT_REQUEST_TIMEOUT_SECS)]
    pub timeout_secs: u64,

    /// Base URL for poster images
    #[arg(long, default_value = DEFAULT_IMAGE_BASE_URL)]
    pub image_base: String,

    /// Initial filter query
    #[arg(short, long)]
    pub query: Option<String>,

    /// Enable verbose logging (debug level)
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,
}

/// Where pages are read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageOrigin {
    Http(ValidatedUrl),
    Fixtures(PathBuf),
}

/// Resolved configuration, validated and ready to build a session.
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    pub origin: PageOrigin,
    pub page_limit: PageLimit,
    pub termination: TerminationPolicy,
    pub retry: RetryPolicy,
    pub request_timeout: Duration,
    pub image_base: ValidatedUrl,
    pub placeholder: String,
    pub initial_query: Option<String>,
    pub verbose: bool,
}

impl CatalogConfig {
    /// Resolves a complete configuration from CLI input and environment.
    pub fn resolve(cli: CommandLineInput) -> Result<Self, AppError> {
        let env_base_url = std::env::var(CATALOG_BASE_URL_ENV).ok();
        Self::resolve_with_env(cli, env_base_url)
    }

    fn resolve_with_env(
        cli: CommandLineInput,
        env_base_url: Option<String>,
    ) -> Result<Self, AppError> {
        let origin = match cli.fixtures {
            Some(dir) => PageOrigin::Fixtures(PathBuf::from(dir)),
            None => {
                let base = cli
                    .base_url
                    .or(env_base_url)
                    .unwrap_or_else(|| DEFAULT_CATALOG_BASE_URL.to_string());
                PageOrigin::Http(ValidatedUrl::parse(&base)?)
            }
        };

        let termination = if cli.stop_on_empty_page {
            TerminationPolicy::EmptyPage
        } else {
            TerminationPolicy::PageLimit
        };

        let retry = if cli.retry_attempts > 1 {
            RetryPolicy::Backoff {
                max_attempts: cli.retry_attempts,
                initial_delay: Duration::from_millis(cli.retry_delay_ms),
                max_delay: Duration::from_millis(MAX_RETRY_DELAY_MS.max(cli.retry_delay_ms)),
            }
        } else {
            RetryPolicy::None
        };

        if cli.timeout_secs == 0 {
            return Err(AppError::MissingConfiguration(
                "--timeout-secs must be at least 1".to_string(),
            ));
        }

        Ok(CatalogConfig {
            origin,
            page_limit: PageLimit::new(cli.page_limit)?,
            termination,
            retry,
            request_timeout: Duration::from_secs(cli.timeout_secs),
            image_base: ValidatedUrl::parse(&cli.image_base)?,
            placeholder: PLACEHOLDER_POSTER.to_string(),
            initial_query: cli.query,
            verbose: cli.verbose,
        })
    }

    /// The pagination rules this configuration implies.
    pub fn scheduler_policy(&self) -> SchedulerPolicy {
        SchedulerPolicy {
            page_limit: self.page_limit,
            termination: self.termination,
            retry: self.retry,
        }
    }
}
