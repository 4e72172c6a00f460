//! # karte-api
//!
//! HTTP boundary for the Karte report-link subsystem, built on Axum.
//!
//! Staff administration lives under `/api/links`; the anonymous resolver —
//! the endpoint a patient's browser hits — is `GET /r/{token}`.

pub mod dto;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use router::build_router;
pub use state::AppState;
