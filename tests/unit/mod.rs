// tests/unit/mod.rs
//! Unit tests for catalog-scroll components
//!
//! Unit tests focus on testing individual components in isolation,
//! without network access.

#[cfg(test)]
mod api_parsing;

#[cfg(test)]
mod error_handling;

#[cfg(test)]
mod filtering;
