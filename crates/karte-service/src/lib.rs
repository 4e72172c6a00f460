//! # karte-service
//!
//! Business logic for the report-link subsystem. The service orchestrates
//! the link store and token generator to implement issuance, validation,
//! revocation, and the expiry sweep.
//!
//! Services follow constructor injection — all dependencies are provided
//! at construction time via `Arc` references.

pub mod link;

pub use link::{LinkService, LinkStatus, LinkTokenGenerator};
