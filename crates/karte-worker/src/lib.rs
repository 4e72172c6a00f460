//! # karte-worker
//!
//! Background task scheduling for Karte. The only periodic task is the
//! expired-link sweep, which is advisory storage hygiene — validation
//! rejects expired links on its own.

pub mod sweep;

pub use sweep::SweepScheduler;
