use async_trait::async_trait;
use diesel::prelude::*;
use std::sync::Arc;

use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::IntoCore;
use crate::schema::accounts;
use crate::schema::accounts::dsl::*;

use super::model::AccountDB;
use tirta_core::accounts::{Account, AccountRepositoryTrait, AccountUpdate, NewAccount};
use tirta_core::errors::{Error, Result};

/// Repository for managing ledger accounts in the database
pub struct AccountRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl AccountRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }
}

#[async_trait]
impl AccountRepositoryTrait for AccountRepository {
    async fn create(&self, new_account: NewAccount) -> Result<Account> {
        new_account.validate()?;

        self.writer
            .exec(move |conn| {
                let account_db: AccountDB = new_account.into();
                diesel::insert_into(accounts::table)
                    .values(&account_db)
                    .execute(conn)
                    .into_core()?;
                Account::try_from(account_db)
            })
            .await
    }

    async fn update(&self, account_update: AccountUpdate) -> Result<Account> {
        account_update.validate()?;

        self.writer
            .exec(move |conn| {
                let mut account_db: AccountDB = account_update.into();

                let existing = accounts
                    .select(AccountDB::as_select())
                    .find(&account_db.id)
                    .first::<AccountDB>(conn)
                    .optional()
                    .into_core()?
                    .ok_or_else(|| Error::NotFound(format!("Account {}", account_db.id)))?;

                account_db.created_at = existing.created_at;

                diesel::update(accounts.find(&account_db.id))
                    .set(&account_db)
                    .execute(conn)
                    .into_core()?;

                Account::try_from(account_db)
            })
            .await
    }

    /// Deletes an account by its ID and returns the number of deleted records
    async fn delete(&self, account_id: &str) -> Result<usize> {
        let account_id = account_id.to_string();
        self.writer
            .exec(move |conn| {
                diesel::delete(accounts.find(account_id))
                    .execute(conn)
                    .into_core()
            })
            .await
    }

    fn get_by_id(&self, account_id: &str) -> Result<Account> {
        let mut conn = get_connection(&self.pool)?;

        let account = accounts
            .select(AccountDB::as_select())
            .find(account_id)
            .first::<AccountDB>(&mut conn)
            .optional()
            .into_core()?
            .ok_or_else(|| Error::NotFound(format!("Account {}", account_id)))?;

        account.try_into()
    }

    /// Lists accounts ordered by code, optionally filtering by active status
    fn list(&self, is_active_filter: Option<bool>) -> Result<Vec<Account>> {
        let mut conn = get_connection(&self.pool)?;

        let mut query = accounts::table.into_boxed();
        if let Some(active) = is_active_filter {
            query = query.filter(is_active.eq(active));
        }

        query
            .select(AccountDB::as_select())
            .order(code.asc())
            .load::<AccountDB>(&mut conn)
            .into_core()?
            .into_iter()
            .map(Account::try_from)
            .collect()
    }
}
