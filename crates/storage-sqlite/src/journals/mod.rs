//! SQLite storage implementation for journal categories and entries.

mod model;
mod repository;

pub use model::{JournalCategoryDB, JournalEntryDB};
pub use repository::JournalRepository;
