// src/error.rs
//! Application error types with structured error handling.
//!
//! `AppError` covers everything that can stop the program: configuration,
//! I/O, templates and client construction. `FetchError` is narrower. It is
//! what a page source reports, and the scheduler absorbs it rather than
//! letting it escape.

use crate::types::PageIndex;
use std::fmt;
use thiserror::Error;

/// Main application error type.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Missing configuration: {0}")]
    MissingConfiguration(String),

    #[error("Network failure: {0}")]
    NetworkFailure(#[from] reqwest::Error),

    #[error("Filesystem IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Template render error for template {name}: {message}")]
    TemplateRender { name: String, message: String },

    #[error(transparent)]
    Validation(#[from] crate::types::ValidationError),
}

/// Why a page could not be turned into a [`PageResult`](crate::model::PageResult).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchErrorKind {
    /// Network unreachable, missing file, or a non-2xx status.
    Transport,
    /// The body arrived but is not a catalog page.
    Decode,
}

impl fmt::Display for FetchErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Transport => write!(f, "transport"),
            Self::Decode => write!(f, "decode"),
        }
    }
}

/// A failed page fetch.
///
/// Carries the requested index and a message so the failure can be logged.
/// The scheduler treats every kind identically.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("page {page_index} failed ({kind}): {message}")]
pub struct FetchError {
    pub page_index: PageIndex,
    pub kind: FetchErrorKind,
    pub message: String,
}

impl FetchError {
    pub fn transport(page_index: PageIndex, message: impl Into<String>) -> Self {
        Self {
            page_index,
            kind: FetchErrorKind::Transport,
            message: message.into(),
        }
    }

    pub fn decode(page_index: PageIndex, message: impl Into<String>) -> Self {
        Self {
            page_index,
            kind: FetchErrorKind::Decode,
            message: message.into(),
        }
    }
}

/// Result type alias for convenience
pub type Result<T, E = AppError> = std::result::Result<T, E>;
