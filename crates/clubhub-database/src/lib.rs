//! # clubhub-database
//!
//! Store traits for every ClubHub table, PostgreSQL connection management,
//! `sqlx` repository implementations and, behind the `memory` feature, an
//! in-memory backend used by tests and local demos.

pub mod connection;
#[cfg(feature = "memory")]
pub mod memory;
pub mod migration;
pub mod repositories;
pub mod store;

pub use connection::DatabasePool;
pub use store::Stores;
