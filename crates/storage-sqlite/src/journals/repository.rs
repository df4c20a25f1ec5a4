use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;

use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::IntoCore;
use crate::schema::{gl_lines, journal_categories, journal_entries};
use crate::utils::{chunk_for_sqlite, like_pattern, LIKE_ESCAPE};

use super::model::{JournalCategoryDB, JournalEntryDB};
use tirta_core::errors::{Error, Result};
use tirta_core::journals::{
    JournalCategory, JournalCategoryUpdate, JournalEntry, JournalEntryUpdate, JournalFilter,
    JournalRepositoryTrait, NewJournalCategory, NewJournalEntry,
};

pub struct JournalRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl JournalRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }
}

fn posted_among(conn: &mut SqliteConnection, entry_ids: &[String]) -> Result<HashSet<String>> {
    let mut posted = HashSet::new();
    for chunk in chunk_for_sqlite(entry_ids) {
        let found = gl_lines::table
            .filter(gl_lines::journal_entry_id.eq_any(chunk))
            .select(gl_lines::journal_entry_id)
            .distinct()
            .load::<Option<String>>(conn)
            .into_core()?;
        posted.extend(found.into_iter().flatten());
    }
    Ok(posted)
}

fn load_entry(conn: &mut SqliteConnection, entry_id: &str) -> Result<JournalEntry> {
    let row = journal_entries::table
        .find(entry_id)
        .select(JournalEntryDB::as_select())
        .first::<JournalEntryDB>(conn)
        .optional()
        .into_core()?
        .ok_or_else(|| Error::NotFound(format!("Journal entry {}", entry_id)))?;
    let posted = !posted_among(conn, &[row.id.clone()])?.is_empty();
    row.into_domain(posted)
}

#[async_trait]
impl JournalRepositoryTrait for JournalRepository {
    fn list_categories(&self) -> Result<Vec<JournalCategory>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = journal_categories::table
            .select(JournalCategoryDB::as_select())
            .order(journal_categories::name.asc())
            .load::<JournalCategoryDB>(&mut conn)
            .into_core()?;
        Ok(rows.into_iter().map(JournalCategory::from).collect())
    }

    fn get_category(&self, category_id: &str) -> Result<JournalCategory> {
        let mut conn = get_connection(&self.pool)?;
        journal_categories::table
            .find(category_id)
            .select(JournalCategoryDB::as_select())
            .first::<JournalCategoryDB>(&mut conn)
            .optional()
            .into_core()?
            .map(JournalCategory::from)
            .ok_or_else(|| Error::NotFound(format!("Journal category {}", category_id)))
    }

    async fn create_category(&self, new_category: NewJournalCategory) -> Result<JournalCategory> {
        self.writer
            .exec(move |conn| {
                let row: JournalCategoryDB = new_category.into();
                diesel::insert_into(journal_categories::table)
                    .values(&row)
                    .execute(conn)
                    .into_core()?;
                Ok(row.into())
            })
            .await
    }

    async fn update_category(
        &self,
        category_update: JournalCategoryUpdate,
    ) -> Result<JournalCategory> {
        self.writer
            .exec(move |conn| {
                let mut row: JournalCategoryDB = category_update.into();
                row.created_at = journal_categories::table
                    .find(&row.id)
                    .select(journal_categories::created_at)
                    .first::<chrono::NaiveDateTime>(conn)
                    .optional()
                    .into_core()?
                    .ok_or_else(|| Error::NotFound(format!("Journal category {}", row.id)))?;

                diesel::update(journal_categories::table.find(&row.id))
                    .set(&row)
                    .execute(conn)
                    .into_core()?;
                Ok(row.into())
            })
            .await
    }

    async fn delete_category(&self, category_id: &str) -> Result<usize> {
        let category_id = category_id.to_string();
        self.writer
            .exec(move |conn| {
                diesel::delete(journal_categories::table.find(category_id))
                    .execute(conn)
                    .into_core()
            })
            .await
    }

    fn list_entries(&self, filter: &JournalFilter) -> Result<Vec<JournalEntry>> {
        let mut conn = get_connection(&self.pool)?;

        let mut query = journal_entries::table.into_boxed();
        if let Some(from) = filter.from {
            query = query.filter(journal_entries::entry_date.ge(from));
        }
        if let Some(to) = filter.to {
            query = query.filter(journal_entries::entry_date.le(to));
        }
        if let Some(q) = filter.q.as_deref().map(str::trim).filter(|q| !q.is_empty()) {
            let pattern = like_pattern(q);
            query = query.filter(
                journal_entries::reference
                    .like(pattern.clone())
                    .escape(LIKE_ESCAPE)
                    .or(journal_entries::description.like(pattern).escape(LIKE_ESCAPE)),
            );
        }

        let rows = query
            .select(JournalEntryDB::as_select())
            .order((
                journal_entries::entry_date.asc(),
                journal_entries::reference.asc(),
            ))
            .load::<JournalEntryDB>(&mut conn)
            .into_core()?;

        let ids: Vec<String> = rows.iter().map(|r| r.id.clone()).collect();
        let posted = posted_among(&mut conn, &ids)?;

        let mut entries = Vec::with_capacity(rows.len());
        for row in rows {
            let is_posted = posted.contains(&row.id);
            if filter.status.is_some_and(|s| !s.matches(is_posted)) {
                continue;
            }
            entries.push(row.into_domain(is_posted)?);
        }
        Ok(entries)
    }

    fn get_entry(&self, entry_id: &str) -> Result<JournalEntry> {
        let mut conn = get_connection(&self.pool)?;
        load_entry(&mut conn, entry_id)
    }

    async fn create_entry(&self, new_entry: NewJournalEntry) -> Result<JournalEntry> {
        self.writer
            .exec(move |conn| {
                let row: JournalEntryDB = new_entry.into();
                diesel::insert_into(journal_entries::table)
                    .values(&row)
                    .execute(conn)
                    .into_core()?;
                row.into_domain(false)
            })
            .await
    }

    async fn update_entry(&self, entry_update: JournalEntryUpdate) -> Result<JournalEntry> {
        self.writer
            .exec(move |conn| {
                let mut row: JournalEntryDB = entry_update.into();
                let existing = load_entry(conn, &row.id)?;
                row.created_at = existing.created_at;

                diesel::update(journal_entries::table.find(&row.id))
                    .set(&row)
                    .execute(conn)
                    .into_core()?;
                row.into_domain(existing.posted)
            })
            .await
    }

    async fn delete_entry(&self, entry_id: &str) -> Result<usize> {
        let entry_id = entry_id.to_string();
        self.writer
            .exec(move |conn| {
                diesel::delete(journal_entries::table.find(entry_id))
                    .execute(conn)
                    .into_core()
            })
            .await
    }
}
