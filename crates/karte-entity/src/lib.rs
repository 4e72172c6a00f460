//! # karte-entity
//!
//! Domain entity models for the Karte report-link subsystem. Every struct
//! in this crate represents a database table row or a domain value object.
//! Database entities derive `sqlx::FromRow`.

pub mod link;

pub use link::{IssuedLink, ReportLink};
