use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;
use log::debug;

use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::IntoCore;
use crate::schema::{depreciation_lines, gl_lines};
use crate::utils::chunk_for_sqlite;

use super::model::DepreciationLineDB;
use tirta_core::depreciation::{
    DepreciationLine, DepreciationRepositoryTrait, LineFilter, NewDepreciationLine,
};
use tirta_core::errors::{Error, Result};
use tirta_core::utils::Period;

/// Repository for depreciation lines. Whether a line is posted is read from
/// the ledger lines that reference it.
pub struct DepreciationRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl DepreciationRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }
}

/// Returns the subset of `line_ids` referenced by at least one ledger line.
fn posted_among(conn: &mut SqliteConnection, line_ids: &[String]) -> Result<HashSet<String>> {
    let mut posted = HashSet::new();
    for chunk in chunk_for_sqlite(line_ids) {
        let found = gl_lines::table
            .filter(gl_lines::depreciation_line_id.eq_any(chunk))
            .select(gl_lines::depreciation_line_id)
            .distinct()
            .load::<Option<String>>(conn)
            .into_core()?;
        posted.extend(found.into_iter().flatten());
    }
    Ok(posted)
}

/// Deletes the lines in `line_ids` that no ledger line references.
fn delete_unposted(conn: &mut SqliteConnection, line_ids: Vec<String>) -> Result<usize> {
    let posted = posted_among(conn, &line_ids)?;
    let unposted: Vec<String> = line_ids
        .into_iter()
        .filter(|id| !posted.contains(id))
        .collect();

    let mut deleted = 0;
    for chunk in chunk_for_sqlite(&unposted) {
        deleted += diesel::delete(depreciation_lines::table.filter(depreciation_lines::id.eq_any(chunk)))
            .execute(conn)
            .into_core()?;
    }
    Ok(deleted)
}

#[async_trait]
impl DepreciationRepositoryTrait for DepreciationRepository {
    fn list_lines(&self, filter: &LineFilter) -> Result<Vec<DepreciationLine>> {
        let mut conn = get_connection(&self.pool)?;

        let mut query = depreciation_lines::table.into_boxed();
        if let Some(asset_id) = &filter.asset_id {
            query = query.filter(depreciation_lines::asset_id.eq(asset_id.clone()));
        }
        // YYYY-MM text sorts chronologically
        if let Some(period) = filter.period {
            query = query.filter(depreciation_lines::period.eq(period.to_string()));
        }
        if let Some(from) = filter.from {
            query = query.filter(depreciation_lines::period.ge(from.to_string()));
        }
        if let Some(to) = filter.to {
            query = query.filter(depreciation_lines::period.le(to.to_string()));
        }

        let rows = query
            .select(DepreciationLineDB::as_select())
            .order((depreciation_lines::period.asc(), depreciation_lines::asset_id.asc()))
            .load::<DepreciationLineDB>(&mut conn)
            .into_core()?;

        let ids: Vec<String> = rows.iter().map(|r| r.id.clone()).collect();
        let posted = posted_among(&mut conn, &ids)?;

        let mut lines = Vec::with_capacity(rows.len());
        for row in rows {
            let is_posted = posted.contains(&row.id);
            if filter.status.is_some_and(|s| !s.matches(is_posted)) {
                continue;
            }
            lines.push(row.into_domain(is_posted)?);
        }
        Ok(lines)
    }

    fn get_line(&self, line_id: &str) -> Result<DepreciationLine> {
        let mut conn = get_connection(&self.pool)?;

        let row = depreciation_lines::table
            .find(line_id)
            .select(DepreciationLineDB::as_select())
            .first::<DepreciationLineDB>(&mut conn)
            .optional()
            .into_core()?
            .ok_or_else(|| Error::NotFound(format!("Depreciation line {}", line_id)))?;

        let posted = !posted_among(&mut conn, &[row.id.clone()])?.is_empty();
        row.into_domain(posted)
    }

    fn has_posted_lines(&self, asset_id: &str) -> Result<bool> {
        let mut conn = get_connection(&self.pool)?;

        let ids = depreciation_lines::table
            .filter(depreciation_lines::asset_id.eq(asset_id))
            .select(depreciation_lines::id)
            .load::<String>(&mut conn)
            .into_core()?;

        Ok(!posted_among(&mut conn, &ids)?.is_empty())
    }

    async fn insert_lines(&self, lines: Vec<NewDepreciationLine>) -> Result<usize> {
        if lines.is_empty() {
            return Ok(0);
        }
        self.writer
            .exec(move |conn| {
                let mut inserted = 0;
                for line in lines {
                    let row: DepreciationLineDB = line.into();
                    // (asset_id, period) is unique; an existing line wins
                    inserted += diesel::insert_or_ignore_into(depreciation_lines::table)
                        .values(&row)
                        .execute(conn)
                        .into_core()?;
                }
                Ok(inserted)
            })
            .await
    }

    async fn delete_unposted_for_period(&self, period: Period) -> Result<usize> {
        self.writer
            .exec(move |conn| {
                let ids = depreciation_lines::table
                    .filter(depreciation_lines::period.eq(period.to_string()))
                    .select(depreciation_lines::id)
                    .load::<String>(conn)
                    .into_core()?;
                let deleted = delete_unposted(conn, ids)?;
                debug!("Deleted {} unposted depreciation lines of {}", deleted, period);
                Ok(deleted)
            })
            .await
    }

    async fn delete_unposted_for_asset(&self, asset_id: &str) -> Result<usize> {
        let asset_id = asset_id.to_string();
        self.writer
            .exec(move |conn| {
                let ids = depreciation_lines::table
                    .filter(depreciation_lines::asset_id.eq(&asset_id))
                    .select(depreciation_lines::id)
                    .load::<String>(conn)
                    .into_core()?;
                delete_unposted(conn, ids)
            })
            .await
    }
}
