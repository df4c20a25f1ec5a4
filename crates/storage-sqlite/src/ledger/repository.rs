use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use diesel::prelude::*;
use log::debug;
use rust_decimal::Decimal;

use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::IntoCore;
use crate::schema::{accounts, gl_headers, gl_lines};
use crate::utils::{chunk_for_sqlite, like_pattern, parse_decimal, LIKE_ESCAPE};

use super::model::{GlHeaderDB, GlLineDB};
use tirta_core::errors::Result;
use tirta_core::ledger::{
    GlFilter, GlHeader, GlHeaderSummary, GlLine, LedgerRepositoryTrait, NewPosting, PostedAmount,
    Segment, SourceRef, SourceType,
};

/// Repository for GL headers and lines.
pub struct LedgerRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl LedgerRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }
}

#[derive(Default)]
struct Totals {
    debit: Decimal,
    credit: Decimal,
    lines: usize,
}

#[async_trait]
impl LedgerRepositoryTrait for LedgerRepository {
    fn list_headers(&self, filter: &GlFilter) -> Result<Vec<GlHeaderSummary>> {
        let mut conn = get_connection(&self.pool)?;

        let mut query = gl_headers::table.into_boxed();
        if let Some(from) = filter.from {
            query = query.filter(gl_headers::posting_date.ge(from));
        }
        if let Some(to) = filter.to {
            query = query.filter(gl_headers::posting_date.le(to));
        }
        if let Some(source_type) = filter.source {
            query = query.filter(gl_headers::source_type.eq(source_type.as_str()));
        }
        if let Some(q) = filter.q.as_deref().map(str::trim).filter(|q| !q.is_empty()) {
            let pattern = like_pattern(q);
            let by_account_code = gl_lines::table
                .inner_join(accounts::table)
                .filter(accounts::code.like(pattern.clone()).escape(LIKE_ESCAPE))
                .select(gl_lines::header_id);
            query = query.filter(
                gl_headers::description
                    .like(pattern.clone())
                    .escape(LIKE_ESCAPE)
                    .or(gl_headers::source_id.like(pattern).escape(LIKE_ESCAPE))
                    .or(gl_headers::id.eq_any(by_account_code)),
            );
        }

        let headers = query
            .select(GlHeaderDB::as_select())
            .order((gl_headers::posting_date.desc(), gl_headers::created_at.desc()))
            .load::<GlHeaderDB>(&mut conn)
            .into_core()?;

        let header_ids: Vec<String> = headers.iter().map(|h| h.id.clone()).collect();
        let mut totals: HashMap<String, Totals> = HashMap::new();
        for chunk in chunk_for_sqlite(&header_ids) {
            let amounts = gl_lines::table
                .filter(gl_lines::header_id.eq_any(chunk))
                .select((gl_lines::header_id, gl_lines::debit, gl_lines::credit))
                .load::<(String, String, String)>(&mut conn)
                .into_core()?;
            for (header_id, debit, credit) in amounts {
                let entry = totals.entry(header_id).or_default();
                entry.debit += parse_decimal("debit", &debit)?;
                entry.credit += parse_decimal("credit", &credit)?;
                entry.lines += 1;
            }
        }

        headers
            .into_iter()
            .map(|db| {
                let sums = totals.remove(&db.id).unwrap_or_default();
                let header = GlHeader::try_from(db)?;
                Ok(GlHeaderSummary {
                    id: header.id,
                    source: header.source,
                    posting_date: header.posting_date,
                    description: header.description,
                    total_debit: sums.debit,
                    total_credit: sums.credit,
                    line_count: sums.lines,
                })
            })
            .collect()
    }

    fn get_header(&self, header_id: &str) -> Result<GlHeader> {
        let mut conn = get_connection(&self.pool)?;
        gl_headers::table
            .find(header_id)
            .select(GlHeaderDB::as_select())
            .first::<GlHeaderDB>(&mut conn)
            .optional()
            .into_core()?
            .ok_or_else(|| tirta_core::Error::NotFound(format!("GL header {}", header_id)))?
            .try_into()
    }

    fn get_lines(&self, header_id: &str) -> Result<Vec<GlLine>> {
        let mut conn = get_connection(&self.pool)?;
        gl_lines::table
            .filter(gl_lines::header_id.eq(header_id))
            .select(GlLineDB::as_select())
            .order(gl_lines::line_no.asc())
            .load::<GlLineDB>(&mut conn)
            .into_core()?
            .into_iter()
            .map(GlLine::try_from)
            .collect()
    }

    fn is_posted(&self, source: &SourceRef) -> Result<bool> {
        let mut conn = get_connection(&self.pool)?;
        let query = gl_lines::table.select(gl_lines::id).into_boxed();
        let query = match source {
            SourceRef::Journal(id) => query.filter(gl_lines::journal_entry_id.eq(id.clone())),
            SourceRef::Depreciation(id) => {
                query.filter(gl_lines::depreciation_line_id.eq(id.clone()))
            }
        };
        let found = query
            .first::<String>(&mut conn)
            .optional()
            .into_core()?;
        Ok(found.is_some())
    }

    fn posted_source_ids(&self, source_type: SourceType) -> Result<HashSet<String>> {
        let mut conn = get_connection(&self.pool)?;
        let ids = match source_type {
            SourceType::Journal => gl_lines::table
                .filter(gl_lines::journal_entry_id.is_not_null())
                .select(gl_lines::journal_entry_id)
                .distinct()
                .load::<Option<String>>(&mut conn),
            SourceType::Depreciation => gl_lines::table
                .filter(gl_lines::depreciation_line_id.is_not_null())
                .select(gl_lines::depreciation_line_id)
                .distinct()
                .load::<Option<String>>(&mut conn),
        }
        .into_core()?;
        Ok(ids.into_iter().flatten().collect())
    }

    fn account_has_lines(&self, account_id: &str) -> Result<bool> {
        let mut conn = get_connection(&self.pool)?;
        let found = gl_lines::table
            .filter(gl_lines::account_id.eq(account_id))
            .select(gl_lines::id)
            .first::<String>(&mut conn)
            .optional()
            .into_core()?;
        Ok(found.is_some())
    }

    fn load_postings(&self, as_of: NaiveDate, segment: &Segment) -> Result<Vec<PostedAmount>> {
        let mut conn = get_connection(&self.pool)?;

        let mut query = gl_lines::table
            .inner_join(gl_headers::table)
            .filter(gl_headers::posting_date.le(as_of))
            .into_boxed();
        match segment {
            Segment::All => {}
            Segment::CostCenter(id) => {
                query = query.filter(gl_lines::cost_center_id.eq(id.clone()));
            }
            Segment::Asset(id) => {
                query = query.filter(gl_lines::asset_id.eq(id.clone()));
            }
        }

        let rows = query
            .select((
                gl_lines::account_id,
                gl_headers::posting_date,
                gl_lines::debit,
                gl_lines::credit,
            ))
            .load::<(String, NaiveDate, String, String)>(&mut conn)
            .into_core()?;

        rows.into_iter()
            .map(|(account_id, posting_date, debit, credit)| {
                Ok(PostedAmount {
                    account_id,
                    posting_date,
                    debit: parse_decimal("debit", &debit)?,
                    credit: parse_decimal("credit", &credit)?,
                })
            })
            .collect()
    }

    async fn insert_posting(&self, posting: NewPosting) -> Result<GlHeader> {
        self.writer
            .exec(move |conn| {
                let header = GlHeaderDB {
                    id: uuid::Uuid::new_v4().to_string(),
                    source_type: posting.source.source_type().as_str().to_string(),
                    source_id: posting.source.id().to_string(),
                    posting_date: posting.posting_date,
                    description: posting.description,
                    created_at: chrono::Utc::now().naive_utc(),
                };
                diesel::insert_into(gl_headers::table)
                    .values(&header)
                    .execute(conn)
                    .into_core()?;

                let lines: Vec<GlLineDB> = posting
                    .lines
                    .into_iter()
                    .enumerate()
                    .map(|(index, line)| {
                        GlLineDB::new(&header.id, index as i32 + 1, &posting.source, line)
                    })
                    .collect();
                diesel::insert_into(gl_lines::table)
                    .values(&lines)
                    .execute(conn)
                    .into_core()?;

                debug!(
                    "Inserted GL header {} with {} lines for {}",
                    header.id,
                    lines.len(),
                    posting.source
                );
                GlHeader::try_from(header)
            })
            .await
    }

    async fn delete_posting(&self, source: &SourceRef) -> Result<usize> {
        let source = source.clone();
        self.writer
            .exec(move |conn| {
                let removed = match &source {
                    SourceRef::Journal(id) => diesel::delete(
                        gl_lines::table.filter(gl_lines::journal_entry_id.eq(id.clone())),
                    )
                    .execute(conn),
                    SourceRef::Depreciation(id) => diesel::delete(
                        gl_lines::table.filter(gl_lines::depreciation_line_id.eq(id.clone())),
                    )
                    .execute(conn),
                }
                .into_core()?;

                diesel::delete(
                    gl_headers::table
                        .filter(gl_headers::source_type.eq(source.source_type().as_str()))
                        .filter(gl_headers::source_id.eq(source.id())),
                )
                .execute(conn)
                .into_core()?;

                Ok(removed)
            })
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::journals::JournalRepository;
    use crate::test_utils::{create_account, setup, TestDb};
    use rust_decimal_macros::dec;
    use tirta_core::accounts::AccountKind;
    use tirta_core::journals::{JournalRepositoryTrait, NewJournalCategory, NewJournalEntry};
    use tirta_core::ledger::NewGlLine;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    async fn seed_entry(db: &TestDb, entry_id: &str) -> JournalRepository {
        let journals = JournalRepository::new(db.pool.clone(), db.writer.clone());
        if journals.get_category("cat-1").is_err() {
            create_account(db, "cash", "1101", AccountKind::Asset).await;
            create_account(db, "revenue", "4101", AccountKind::Revenue).await;
            journals
                .create_category(NewJournalCategory {
                    id: Some("cat-1".to_string()),
                    name: "Pendapatan Air".to_string(),
                    debit_account_id: "cash".to_string(),
                    credit_account_id: "revenue".to_string(),
                })
                .await
                .unwrap();
        }
        journals
            .create_entry(NewJournalEntry {
                id: Some(entry_id.to_string()),
                reference: format!("JU-{}", entry_id),
                entry_date: date(2024, 3, 5),
                category_id: "cat-1".to_string(),
                description: Some("Rekening air Maret".to_string()),
                amount: dec!(250000),
                cost_center_id: None,
            })
            .await
            .unwrap();
        journals
    }

    fn posting(entry_id: &str, amount: Decimal) -> NewPosting {
        NewPosting {
            source: SourceRef::Journal(entry_id.to_string()),
            posting_date: date(2024, 3, 5),
            description: Some(format!("JU-{} Rekening air", entry_id)),
            lines: vec![
                NewGlLine {
                    account_id: "cash".to_string(),
                    cost_center_id: None,
                    asset_id: None,
                    debit: amount,
                    credit: Decimal::ZERO,
                    memo: None,
                },
                NewGlLine {
                    account_id: "revenue".to_string(),
                    cost_center_id: None,
                    asset_id: None,
                    debit: Decimal::ZERO,
                    credit: amount,
                    memo: None,
                },
            ],
        }
    }

    #[tokio::test]
    async fn test_insert_posting_marks_source_posted() {
        let db = setup().await;
        let journals = seed_entry(&db, "je-1").await;
        let ledger = LedgerRepository::new(db.pool.clone(), db.writer.clone());

        let header = ledger.insert_posting(posting("je-1", dec!(250000))).await.unwrap();
        assert_eq!(header.source, SourceRef::Journal("je-1".to_string()));

        let lines = ledger.get_lines(&header.id).unwrap();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].line_no, 1);
        assert_eq!(lines[0].debit, dec!(250000));
        assert_eq!(lines[1].credit, dec!(250000));
        assert!(lines.iter().all(|l| l.source == header.source));

        assert!(ledger.is_posted(&header.source).unwrap());
        assert!(journals.get_entry("je-1").unwrap().posted);
        assert!(ledger
            .posted_source_ids(SourceType::Journal)
            .unwrap()
            .contains("je-1"));
        assert!(ledger.account_has_lines("cash").unwrap());
    }

    #[tokio::test]
    async fn test_second_posting_of_same_source_is_rejected() {
        let db = setup().await;
        seed_entry(&db, "je-1").await;
        let ledger = LedgerRepository::new(db.pool.clone(), db.writer.clone());

        ledger.insert_posting(posting("je-1", dec!(100))).await.unwrap();
        let err = ledger
            .insert_posting(posting("je-1", dec!(100)))
            .await
            .unwrap_err();
        assert!(err.is_unique_violation());

        // The rejected transaction left nothing behind
        let headers = ledger.list_headers(&GlFilter::default()).unwrap();
        assert_eq!(headers.len(), 1);
        assert_eq!(headers[0].line_count, 2);
    }

    #[tokio::test]
    async fn test_delete_posting_removes_lines_and_header() {
        let db = setup().await;
        let journals = seed_entry(&db, "je-1").await;
        let ledger = LedgerRepository::new(db.pool.clone(), db.writer.clone());
        let source = SourceRef::Journal("je-1".to_string());

        ledger.insert_posting(posting("je-1", dec!(100))).await.unwrap();
        assert_eq!(ledger.delete_posting(&source).await.unwrap(), 2);

        assert!(!ledger.is_posted(&source).unwrap());
        assert!(!journals.get_entry("je-1").unwrap().posted);
        assert!(ledger.list_headers(&GlFilter::default()).unwrap().is_empty());
        assert_eq!(ledger.delete_posting(&source).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_list_headers_filters() {
        let db = setup().await;
        seed_entry(&db, "je-1").await;
        seed_entry(&db, "je-2").await;
        let ledger = LedgerRepository::new(db.pool.clone(), db.writer.clone());
        ledger.insert_posting(posting("je-1", dec!(100))).await.unwrap();
        let mut later = posting("je-2", dec!(40));
        later.posting_date = date(2024, 4, 1);
        ledger.insert_posting(later).await.unwrap();

        let all = ledger.list_headers(&GlFilter::default()).unwrap();
        assert_eq!(all.len(), 2);
        // Newest first
        assert_eq!(all[0].source.id(), "je-2");
        assert_eq!(all[1].total_debit, dec!(100));
        assert_eq!(all[1].total_credit, dec!(100));

        let march = ledger
            .list_headers(&GlFilter {
                to: Some(date(2024, 3, 31)),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(march.len(), 1);

        let by_code = ledger
            .list_headers(&GlFilter {
                q: Some("4101".to_string()),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(by_code.len(), 2);

        let wildcard = ledger
            .list_headers(&GlFilter {
                q: Some("41_1".to_string()),
                ..Default::default()
            })
            .unwrap();
        assert!(wildcard.is_empty());

        let by_source = ledger
            .list_headers(&GlFilter {
                source: Some(SourceType::Depreciation),
                ..Default::default()
            })
            .unwrap();
        assert!(by_source.is_empty());
    }

    #[tokio::test]
    async fn test_load_postings_respects_date_and_segment() {
        let db = setup().await;
        seed_entry(&db, "je-1").await;
        seed_entry(&db, "je-2").await;
        let ledger = LedgerRepository::new(db.pool.clone(), db.writer.clone());
        ledger.insert_posting(posting("je-1", dec!(100))).await.unwrap();
        let mut later = posting("je-2", dec!(40));
        later.posting_date = date(2024, 4, 1);
        ledger.insert_posting(later).await.unwrap();

        let march = ledger.load_postings(date(2024, 3, 31), &Segment::All).unwrap();
        assert_eq!(march.len(), 2);
        let debit: Decimal = march.iter().map(|p| p.debit).sum();
        assert_eq!(debit, dec!(100));

        let april = ledger.load_postings(date(2024, 4, 30), &Segment::All).unwrap();
        assert_eq!(april.len(), 4);

        let segment = ledger
            .load_postings(date(2024, 4, 30), &Segment::CostCenter("cc-x".to_string()))
            .unwrap();
        assert!(segment.is_empty());
    }
}
