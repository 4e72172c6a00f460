//! Seam traits shared across Karte crates.

pub mod clock;

pub use clock::{Clock, ManualClock, SystemClock};
