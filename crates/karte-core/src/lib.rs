//! # karte-core
//!
//! Core crate for the Karte report-link subsystem. Contains configuration
//! schemas, the unified error system, and the seam traits (clock) shared by
//! the other crates.
//!
//! This crate has **no** internal dependencies on other Karte crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;

pub use error::AppError;
pub use result::AppResult;
