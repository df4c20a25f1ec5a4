use async_trait::async_trait;

use super::journals_model::{
    JournalCategory, JournalCategoryUpdate, JournalEntry, JournalEntryUpdate, JournalFilter,
    NewJournalCategory, NewJournalEntry,
};
use crate::errors::Result;

/// Trait defining the contract for journal persistence.
///
/// Implementations derive each entry's `posted` flag from the ledger.
#[async_trait]
pub trait JournalRepositoryTrait: Send + Sync {
    fn list_categories(&self) -> Result<Vec<JournalCategory>>;
    fn get_category(&self, category_id: &str) -> Result<JournalCategory>;
    async fn create_category(&self, new_category: NewJournalCategory) -> Result<JournalCategory>;
    async fn update_category(&self, category_update: JournalCategoryUpdate)
        -> Result<JournalCategory>;
    async fn delete_category(&self, category_id: &str) -> Result<usize>;

    fn list_entries(&self, filter: &JournalFilter) -> Result<Vec<JournalEntry>>;
    fn get_entry(&self, entry_id: &str) -> Result<JournalEntry>;
    async fn create_entry(&self, new_entry: NewJournalEntry) -> Result<JournalEntry>;
    async fn update_entry(&self, entry_update: JournalEntryUpdate) -> Result<JournalEntry>;
    async fn delete_entry(&self, entry_id: &str) -> Result<usize>;
}

/// Trait defining the contract for journal service operations.
#[async_trait]
pub trait JournalServiceTrait: Send + Sync {
    fn get_categories(&self) -> Result<Vec<JournalCategory>>;
    /// Creates a category. Both accounts must exist and differ.
    async fn create_category(&self, new_category: NewJournalCategory) -> Result<JournalCategory>;
    async fn update_category(&self, category_update: JournalCategoryUpdate)
        -> Result<JournalCategory>;
    /// Deletes a category no journal entry uses.
    async fn delete_category(&self, category_id: &str) -> Result<()>;

    fn get_entries(&self, filter: &JournalFilter) -> Result<Vec<JournalEntry>>;
    fn get_entry(&self, entry_id: &str) -> Result<JournalEntry>;
    async fn create_entry(&self, new_entry: NewJournalEntry) -> Result<JournalEntry>;
    /// Updates an unposted entry. Posted entries must be unposted first.
    async fn update_entry(&self, entry_update: JournalEntryUpdate) -> Result<JournalEntry>;
    async fn delete_entry(&self, entry_id: &str) -> Result<()>;
}
