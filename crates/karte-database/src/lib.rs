//! # karte-database
//!
//! The [`LinkStore`] contract — the sole source of truth for issued report
//! links — together with its PostgreSQL and in-memory implementations, plus
//! connection pool management and the migration runner.

pub mod connection;
pub mod memory;
pub mod migration;
pub mod repositories;
pub mod store;

pub use connection::DatabasePool;
pub use memory::MemoryLinkStore;
pub use repositories::link::PgLinkStore;
pub use store::LinkStore;
