//! SQLite storage implementation for the Tirta back office.
//!
//! This crate provides all database-related functionality using Diesel ORM with SQLite.
//! It implements the repository traits defined in `tirta-core` and contains:
//! - Database connection pooling and management
//! - Diesel migrations
//! - Repository implementations for all domain entities
//! - Database-specific model types (with Diesel derives)
//!
//! # Architecture
//!
//! This crate is the only place in the application where Diesel dependencies exist.
//! The `core` crate and the server are database-agnostic and work with traits.
//!
//! ```text
//! core (domain)          apps/server (HTTP)
//!       │                      │
//!       └──────────┬───────────┘
//!                  │
//!                  ▼
//!          storage-sqlite (this crate)
//!                  │
//!                  ▼
//!              SQLite DB
//! ```
//!
//! Source documents never store a posted flag: journal entries and
//! depreciation lines count as posted while a `gl_lines` row references them.

pub mod db;
pub mod errors;
pub mod schema;
pub mod utils;

#[cfg(test)]
mod test_utils;

// Repository implementations
pub mod accounts;
pub mod assets;
pub mod cost_centers;
pub mod depreciation;
pub mod journals;
pub mod ledger;

// Re-export database utilities
pub use db::{
    create_pool, get_connection, init, ping, run_migrations, spawn_writer, DbConnection, DbPool,
    WriteHandle,
};

// Re-export storage errors and conversion helpers
pub use errors::{IntoCore, StorageError};

pub use accounts::AccountRepository;
pub use assets::AssetRepository;
pub use cost_centers::CostCenterRepository;
pub use depreciation::DepreciationRepository;
pub use journals::JournalRepository;
pub use ledger::LedgerRepository;

// Re-export from tirta-core for convenience
pub use tirta_core::errors::{DatabaseError, Error, Result};
