//! Database model for accounts.

use chrono::NaiveDateTime;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use crate::utils::parse_enum;
use tirta_core::accounts::{Account, AccountUpdate, NewAccount};
use tirta_core::errors::Error;

/// Database model for accounts
#[derive(
    Queryable,
    Identifiable,
    Insertable,
    AsChangeset,
    Selectable,
    PartialEq,
    Serialize,
    Deserialize,
    Debug,
    Clone,
)]
#[diesel(table_name = crate::schema::accounts)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct AccountDB {
    pub id: String,
    pub code: String,
    pub name: String,
    pub kind: String,
    pub is_contra: bool,
    pub is_active: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl TryFrom<AccountDB> for Account {
    type Error = Error;

    fn try_from(db: AccountDB) -> Result<Self, Self::Error> {
        Ok(Self {
            kind: parse_enum(&db.kind)?,
            id: db.id,
            code: db.code,
            name: db.name,
            is_contra: db.is_contra,
            is_active: db.is_active,
            created_at: db.created_at,
            updated_at: db.updated_at,
        })
    }
}

impl From<NewAccount> for AccountDB {
    fn from(domain: NewAccount) -> Self {
        let now = chrono::Utc::now().naive_utc();
        Self {
            id: domain
                .id
                .unwrap_or_else(|| uuid::Uuid::new_v4().to_string()),
            code: domain.code.trim().to_string(),
            name: domain.name.trim().to_string(),
            kind: domain.kind.as_str().to_string(),
            is_contra: domain.is_contra,
            is_active: domain.is_active,
            created_at: now,
            updated_at: now,
        }
    }
}

impl From<AccountUpdate> for AccountDB {
    fn from(domain: AccountUpdate) -> Self {
        Self {
            id: domain.id.unwrap_or_default(),
            code: domain.code.trim().to_string(),
            name: domain.name.trim().to_string(),
            kind: domain.kind.as_str().to_string(),
            is_contra: domain.is_contra,
            is_active: domain.is_active,
            created_at: NaiveDateTime::default(), // filled from the existing record
            updated_at: chrono::Utc::now().naive_utc(),
        }
    }
}
