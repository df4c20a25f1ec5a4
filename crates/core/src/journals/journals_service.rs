use std::sync::Arc;

use async_trait::async_trait;
use log::debug;

use super::journals_model::{
    JournalCategory, JournalCategoryUpdate, JournalEntry, JournalEntryUpdate, JournalFilter,
    NewJournalCategory, NewJournalEntry,
};
use super::journals_traits::{JournalRepositoryTrait, JournalServiceTrait};
use crate::accounts::AccountRepositoryTrait;
use crate::errors::{DatabaseError, Error, Result, ValidationError};

/// Service for journal categories and journal entries.
pub struct JournalService {
    repository: Arc<dyn JournalRepositoryTrait>,
    account_repository: Arc<dyn AccountRepositoryTrait>,
}

impl JournalService {
    pub fn new(
        repository: Arc<dyn JournalRepositoryTrait>,
        account_repository: Arc<dyn AccountRepositoryTrait>,
    ) -> Self {
        Self {
            repository,
            account_repository,
        }
    }

    fn ensure_accounts_exist(&self, debit_account_id: &str, credit_account_id: &str) -> Result<()> {
        for account_id in [debit_account_id, credit_account_id] {
            if let Err(e) = self.account_repository.get_by_id(account_id) {
                if e.is_not_found() {
                    return Err(Error::Validation(ValidationError::InvalidInput(format!(
                        "Account {} does not exist",
                        account_id
                    ))));
                }
                return Err(e);
            }
        }
        Ok(())
    }

    fn ensure_category_exists(&self, category_id: &str) -> Result<()> {
        match self.repository.get_category(category_id) {
            Ok(_) => Ok(()),
            Err(e) if e.is_not_found() => Err(Error::Validation(ValidationError::InvalidInput(
                format!("Journal category {} does not exist", category_id),
            ))),
            Err(e) => Err(e),
        }
    }

    fn ensure_unposted(&self, entry_id: &str) -> Result<JournalEntry> {
        let entry = self.repository.get_entry(entry_id)?;
        if entry.posted {
            return Err(Error::ConstraintViolation(format!(
                "Journal entry {} is posted; unpost it first",
                entry.reference
            )));
        }
        Ok(entry)
    }
}

#[async_trait]
impl JournalServiceTrait for JournalService {
    fn get_categories(&self) -> Result<Vec<JournalCategory>> {
        self.repository.list_categories()
    }

    async fn create_category(&self, new_category: NewJournalCategory) -> Result<JournalCategory> {
        new_category.validate()?;
        self.ensure_accounts_exist(&new_category.debit_account_id, &new_category.credit_account_id)?;
        self.repository.create_category(new_category).await
    }

    async fn update_category(
        &self,
        category_update: JournalCategoryUpdate,
    ) -> Result<JournalCategory> {
        category_update.validate()?;
        self.ensure_accounts_exist(
            &category_update.debit_account_id,
            &category_update.credit_account_id,
        )?;
        self.repository.update_category(category_update).await
    }

    async fn delete_category(&self, category_id: &str) -> Result<()> {
        let deleted = self
            .repository
            .delete_category(category_id)
            .await
            .map_err(|e| match e {
                Error::Database(DatabaseError::ForeignKeyViolation(_)) => {
                    Error::ConstraintViolation("Journal category is still in use".to_string())
                }
                other => other,
            })?;
        if deleted == 0 {
            return Err(Error::NotFound(format!("Journal category {}", category_id)));
        }
        Ok(())
    }

    fn get_entries(&self, filter: &JournalFilter) -> Result<Vec<JournalEntry>> {
        self.repository.list_entries(filter)
    }

    fn get_entry(&self, entry_id: &str) -> Result<JournalEntry> {
        self.repository.get_entry(entry_id)
    }

    async fn create_entry(&self, new_entry: NewJournalEntry) -> Result<JournalEntry> {
        new_entry.validate()?;
        self.ensure_category_exists(&new_entry.category_id)?;
        debug!(
            "Creating journal entry {} for {}",
            new_entry.reference, new_entry.amount
        );
        self.repository.create_entry(new_entry).await
    }

    async fn update_entry(&self, entry_update: JournalEntryUpdate) -> Result<JournalEntry> {
        entry_update.validate()?;
        let entry_id = entry_update.id.clone().unwrap_or_default();
        self.ensure_unposted(&entry_id)?;
        self.ensure_category_exists(&entry_update.category_id)?;
        self.repository.update_entry(entry_update).await
    }

    async fn delete_entry(&self, entry_id: &str) -> Result<()> {
        self.ensure_unposted(entry_id)?;
        let deleted = self.repository.delete_entry(entry_id).await?;
        if deleted == 0 {
            return Err(Error::NotFound(format!("Journal entry {}", entry_id)));
        }
        Ok(())
    }
}
