use log::debug;
use std::sync::Arc;

use super::accounts_model::{Account, AccountUpdate, NewAccount};
use super::accounts_traits::{AccountRepositoryTrait, AccountServiceTrait};
use crate::errors::{Error, Result};
use crate::ledger::LedgerRepositoryTrait;

/// Service for managing the chart of accounts
pub struct AccountService {
    repository: Arc<dyn AccountRepositoryTrait>,
    ledger_repository: Arc<dyn LedgerRepositoryTrait>,
}

impl AccountService {
    pub fn new(
        repository: Arc<dyn AccountRepositoryTrait>,
        ledger_repository: Arc<dyn LedgerRepositoryTrait>,
    ) -> Self {
        Self {
            repository,
            ledger_repository,
        }
    }
}

#[async_trait::async_trait]
impl AccountServiceTrait for AccountService {
    async fn create_account(&self, new_account: NewAccount) -> Result<Account> {
        new_account.validate()?;
        debug!("Creating account {} ({})", new_account.code, new_account.kind);
        self.repository.create(new_account).await.map_err(|e| {
            if e.is_unique_violation() {
                Error::ConstraintViolation("Account code already exists".to_string())
            } else {
                e
            }
        })
    }

    async fn update_account(&self, account_update: AccountUpdate) -> Result<Account> {
        account_update.validate()?;
        let id = account_update.id.clone().unwrap_or_default();
        let existing = self.repository.get_by_id(&id)?;

        let reclassified = existing.kind != account_update.kind
            || existing.is_contra != account_update.is_contra;
        if reclassified && self.ledger_repository.account_has_lines(&id)? {
            return Err(Error::ConstraintViolation(format!(
                "Account {} has ledger lines; its kind cannot change",
                existing.code
            )));
        }

        self.repository.update(account_update).await.map_err(|e| {
            if e.is_unique_violation() {
                Error::ConstraintViolation("Account code already exists".to_string())
            } else {
                e
            }
        })
    }

    async fn delete_account(&self, account_id: &str) -> Result<()> {
        if self.ledger_repository.account_has_lines(account_id)? {
            return Err(Error::ConstraintViolation(
                "Account is referenced by ledger lines".to_string(),
            ));
        }
        let deleted = self.repository.delete(account_id).await?;
        if deleted == 0 {
            return Err(Error::NotFound(format!("Account {}", account_id)));
        }
        Ok(())
    }

    fn get_account(&self, account_id: &str) -> Result<Account> {
        self.repository.get_by_id(account_id)
    }

    fn list_accounts(&self, is_active_filter: Option<bool>) -> Result<Vec<Account>> {
        self.repository.list(is_active_filter)
    }
}
