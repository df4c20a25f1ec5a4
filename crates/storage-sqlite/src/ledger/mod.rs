//! SQLite storage implementation for the general ledger.

mod model;
mod repository;

pub use model::{GlHeaderDB, GlLineDB};
pub use repository::LedgerRepository;
