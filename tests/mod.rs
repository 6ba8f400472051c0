// tests/mod.rs
//! Test suite organization for catalog-scroll
//!
//! Unit tests live under `unit/`. Scenario tests that drive the controller
//! end to end sit beside this file as their own test crates.

#[cfg(test)]
pub mod unit;
