//! Journal entries and the categories mapping them to ledger accounts.

mod journals_model;
mod journals_service;
mod journals_traits;


pub use journals_model::{
    JournalCategory, JournalCategoryUpdate, JournalEntry, JournalEntryUpdate, JournalFilter,
    NewJournalCategory, NewJournalEntry,
};
pub use journals_service::JournalService;
pub use journals_traits::{JournalRepositoryTrait, JournalServiceTrait};
