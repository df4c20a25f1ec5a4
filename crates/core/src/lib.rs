//! Tirta Core - Domain entities, services, and traits.
//!
//! This crate contains the accounting logic of the back office: the chart of
//! accounts, the fixed-asset register and its depreciation, journal entries,
//! posting into the general ledger, and the balance sheet.
//! It is database-agnostic and defines traits that are implemented
//! by the `storage-sqlite` crate.

pub mod accounts;
pub mod assets;
pub mod balance_sheet;
pub mod constants;
pub mod cost_centers;
pub mod depreciation;
pub mod errors;
pub mod journals;
pub mod ledger;
pub mod utils;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
