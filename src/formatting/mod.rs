// src/formatting/mod.rs
//! Presentation of the catalog: poster fallback and text screens.
//!
//! Nothing here feeds back into catalog state.

pub mod posters;
pub mod screen;

pub use posters::{PosterResolver, PosterSource};
pub use screen::{CatalogScreen, ScreenEntry, ScreenRenderer};
