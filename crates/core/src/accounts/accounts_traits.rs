//! Account repository and service traits.
//!
//! These traits define the contract for chart-of-accounts operations without
//! any database-specific types.

use async_trait::async_trait;

use super::accounts_model::{Account, AccountUpdate, NewAccount};
use crate::errors::Result;

/// Trait defining the contract for Account repository operations.
#[async_trait]
pub trait AccountRepositoryTrait: Send + Sync {
    /// Creates a new account. Duplicate codes surface as a unique violation.
    async fn create(&self, new_account: NewAccount) -> Result<Account>;

    /// Updates an existing account.
    async fn update(&self, account_update: AccountUpdate) -> Result<Account>;

    /// Deletes an account by its ID.
    ///
    /// Returns the number of deleted records.
    async fn delete(&self, account_id: &str) -> Result<usize>;

    /// Retrieves an account by its ID.
    fn get_by_id(&self, account_id: &str) -> Result<Account>;

    /// Lists accounts, optionally only active (or inactive) ones.
    fn list(&self, is_active_filter: Option<bool>) -> Result<Vec<Account>>;
}

/// Trait defining the contract for Account service operations.
#[async_trait]
pub trait AccountServiceTrait: Send + Sync {
    async fn create_account(&self, new_account: NewAccount) -> Result<Account>;

    /// Updates an account. The kind and contra flag are frozen once the
    /// account carries ledger lines.
    async fn update_account(&self, account_update: AccountUpdate) -> Result<Account>;

    /// Deletes an account that no ledger line references.
    async fn delete_account(&self, account_id: &str) -> Result<()>;

    fn get_account(&self, account_id: &str) -> Result<Account>;

    fn list_accounts(&self, is_active_filter: Option<bool>) -> Result<Vec<Account>>;
}
