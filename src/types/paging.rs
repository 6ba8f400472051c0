// src/types/paging.rs
//! Page cursor and page bound newtypes.

use super::ValidationError;
use crate::constants::{DEFAULT_PAGE_LIMIT, FIRST_PAGE_INDEX};
use std::fmt;

/// One-based index of a catalog page.
///
/// Zero is not a page; constructing one is a validation error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PageIndex(u32);

impl PageIndex {
    /// The index every session starts from.
    pub const FIRST: PageIndex = PageIndex(FIRST_PAGE_INDEX);

    pub fn new(value: u32) -> Result<Self, ValidationError> {
        if value < FIRST_PAGE_INDEX {
            return Err(ValidationError::OutOfBounds {
                value,
                min: FIRST_PAGE_INDEX,
                max: u32::MAX,
            });
        }
        Ok(Self(value))
    }

    pub fn get(self) -> u32 {
        self.0
    }

    /// The index that follows this one, or `None` past `u32::MAX`.
    pub fn next(self) -> Option<Self> {
        self.0.checked_add(1).map(Self)
    }

    /// File name the page is published under, e.g. `page2.json`.
    pub fn file_name(self) -> String {
        format!("page{}.json", self.0)
    }
}

impl Default for PageIndex {
    fn default() -> Self {
        Self::FIRST
    }
}

impl fmt::Display for PageIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Total number of pages the catalog is known to have.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageLimit(u32);

impl PageLimit {
    pub fn new(value: u32) -> Result<Self, ValidationError> {
        if value < 1 {
            return Err(ValidationError::OutOfBounds {
                value,
                min: 1,
                max: u32::MAX,
            });
        }
        Ok(Self(value))
    }

    pub fn get(self) -> u32 {
        self.0
    }

    /// Whether pages beyond `index` may still exist.
    pub fn has_pages_after(self, index: PageIndex) -> bool {
        index.get() < self.0
    }

    /// Whether `index` is one of the catalog's pages.
    pub fn covers(self, index: PageIndex) -> bool {
        index.get() <= self.0
    }
}

impl Default for PageLimit {
    fn default() -> Self {
        Self(DEFAULT_PAGE_LIMIT)
    }
}

impl fmt::Display for PageLimit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
