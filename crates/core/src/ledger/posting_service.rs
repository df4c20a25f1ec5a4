//! Posting of source documents into the general ledger.
//!
//! A journal entry posts on its entry date to the two accounts of its
//! category. A depreciation line posts on the last day of its period, debiting
//! the asset's expense account and crediting its accumulated-depreciation
//! account. Either way the posting is one header with one debit and one
//! credit line of the same amount.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use log::{debug, info, warn};
use rust_decimal::Decimal;

use super::ledger_model::{
    GlFilter, GlHeaderDetail, GlHeaderSummary, GlLineView, NewGlLine, NewPosting, PostItemError,
    PostRequest, PostResult, PostingPreview, PreviewLine, SourceCandidate, SourceFilter, SourceRef,
    SourceType,
};
use super::ledger_traits::{LedgerRepositoryTrait, PostingServiceTrait};
use crate::accounts::{Account, AccountRepositoryTrait};
use crate::assets::AssetRepositoryTrait;
use crate::depreciation::{DepreciationRepositoryTrait, LineFilter};
use crate::errors::{Error, Result};
use crate::journals::{JournalFilter, JournalRepositoryTrait};
use crate::utils::{is_balanced, Period};

/// One side of a posting before its accounts are checked.
struct DraftLine {
    account_id: Option<String>,
    cost_center_id: Option<String>,
    asset_id: Option<String>,
    debit: Decimal,
    credit: Decimal,
    memo: Option<String>,
}

/// What posting a source would write, plus anything that blocks it.
struct Draft {
    source: SourceRef,
    posting_date: NaiveDate,
    description: Option<String>,
    lines: Vec<DraftLine>,
    accounts: HashMap<String, Account>,
    issues: Vec<String>,
}

impl Draft {
    fn totals(&self) -> (Decimal, Decimal) {
        self.lines.iter().fold((Decimal::ZERO, Decimal::ZERO), |(d, c), line| {
            (d + line.debit, c + line.credit)
        })
    }

    fn into_posting(self) -> NewPosting {
        NewPosting {
            source: self.source,
            posting_date: self.posting_date,
            description: self.description,
            lines: self
                .lines
                .into_iter()
                .filter_map(|line| {
                    Some(NewGlLine {
                        account_id: line.account_id?,
                        cost_center_id: line.cost_center_id,
                        asset_id: line.asset_id,
                        debit: line.debit,
                        credit: line.credit,
                        memo: line.memo,
                    })
                })
                .collect(),
        }
    }
}

enum ItemOutcome {
    Posted,
    Skipped,
    Failed(String),
}

/// Service moving source documents in and out of the general ledger.
pub struct PostingService {
    ledger_repository: Arc<dyn LedgerRepositoryTrait>,
    journal_repository: Arc<dyn JournalRepositoryTrait>,
    depreciation_repository: Arc<dyn DepreciationRepositoryTrait>,
    asset_repository: Arc<dyn AssetRepositoryTrait>,
    account_repository: Arc<dyn AccountRepositoryTrait>,
}

impl PostingService {
    pub fn new(
        ledger_repository: Arc<dyn LedgerRepositoryTrait>,
        journal_repository: Arc<dyn JournalRepositoryTrait>,
        depreciation_repository: Arc<dyn DepreciationRepositoryTrait>,
        asset_repository: Arc<dyn AssetRepositoryTrait>,
        account_repository: Arc<dyn AccountRepositoryTrait>,
    ) -> Self {
        Self {
            ledger_repository,
            journal_repository,
            depreciation_repository,
            asset_repository,
            account_repository,
        }
    }

    /// Builds the draft posting of a source. Fails only when the source
    /// itself cannot be loaded.
    fn draft(&self, source: &SourceRef) -> Result<Draft> {
        let mut issues = Vec::new();

        let (posting_date, description, debit_account, credit_account, amount, cost_center, asset_id) =
            match source {
                SourceRef::Journal(id) => {
                    let entry = self.journal_repository.get_entry(id)?;
                    let (debit, credit) = match self.journal_repository.get_category(&entry.category_id) {
                        Ok(category) => (
                            Some(category.debit_account_id),
                            Some(category.credit_account_id),
                        ),
                        Err(e) if e.is_not_found() => {
                            issues.push(format!(
                                "Journal category {} does not exist",
                                entry.category_id
                            ));
                            (None, None)
                        }
                        Err(e) => return Err(e),
                    };
                    let description = entry
                        .description
                        .clone()
                        .unwrap_or_else(|| entry.reference.clone());
                    (
                        entry.entry_date,
                        format!("{} {}", entry.reference, description),
                        debit,
                        credit,
                        entry.amount,
                        entry.cost_center_id,
                        None,
                    )
                }
                SourceRef::Depreciation(id) => {
                    let line = self.depreciation_repository.get_line(id)?;
                    let asset = self.asset_repository.get_by_id(&line.asset_id)?;
                    if asset.expense_account_id.is_none() {
                        issues.push(format!("Asset {} has no expense account", asset.code));
                    }
                    if asset.accumulated_account_id.is_none() {
                        issues.push(format!(
                            "Asset {} has no accumulated depreciation account",
                            asset.code
                        ));
                    }
                    (
                        line.period.last_day(),
                        format!("Penyusutan {} {}", asset.code, line.period),
                        asset.expense_account_id,
                        asset.accumulated_account_id,
                        line.expense,
                        asset.cost_center_id,
                        Some(asset.id),
                    )
                }
            };

        if amount <= Decimal::ZERO {
            issues.push(format!("Amount {} must be greater than zero", amount));
        }

        let mut accounts = HashMap::new();
        for account_id in [&debit_account, &credit_account].into_iter().flatten() {
            if accounts.contains_key(account_id) {
                continue;
            }
            match self.account_repository.get_by_id(account_id) {
                Ok(account) => {
                    if !account.is_active {
                        issues.push(format!("Account {} is inactive", account.code));
                    }
                    accounts.insert(account_id.clone(), account);
                }
                Err(e) if e.is_not_found() => {
                    issues.push(format!("Account {} does not exist", account_id));
                }
                Err(e) => return Err(e),
            }
        }

        let memo = Some(description.clone());
        let lines = vec![
            DraftLine {
                account_id: debit_account,
                cost_center_id: cost_center.clone(),
                asset_id: asset_id.clone(),
                debit: amount,
                credit: Decimal::ZERO,
                memo: memo.clone(),
            },
            DraftLine {
                account_id: credit_account,
                cost_center_id: cost_center,
                asset_id,
                debit: Decimal::ZERO,
                credit: amount,
                memo,
            },
        ];

        Ok(Draft {
            source: source.clone(),
            posting_date,
            description: Some(description),
            lines,
            accounts,
            issues,
        })
    }

    async fn post_one(&self, source: &SourceRef) -> ItemOutcome {
        match self.ledger_repository.is_posted(source) {
            Ok(true) => return ItemOutcome::Skipped,
            Ok(false) => {}
            Err(e) => return ItemOutcome::Failed(e.to_string()),
        }

        let draft = match self.draft(source) {
            Ok(draft) => draft,
            Err(e) => return ItemOutcome::Failed(e.to_string()),
        };
        if !draft.issues.is_empty() {
            return ItemOutcome::Failed(draft.issues.join("; "));
        }
        let (total_debit, total_credit) = draft.totals();
        if !is_balanced(total_debit, total_credit) {
            return ItemOutcome::Failed(format!(
                "Debit {} does not equal credit {}",
                total_debit, total_credit
            ));
        }

        match self.ledger_repository.insert_posting(draft.into_posting()).await {
            Ok(header) => {
                debug!("Posted {} as ledger header {}", source, header.id);
                ItemOutcome::Posted
            }
            // Another request posted the same source first.
            Err(e) if e.is_unique_violation() => ItemOutcome::Skipped,
            Err(e) => ItemOutcome::Failed(e.to_string()),
        }
    }

    fn journal_candidates(&self, filter: &SourceFilter) -> Result<Vec<SourceCandidate>> {
        let entries = self.journal_repository.list_entries(&JournalFilter {
            from: filter.from,
            to: filter.to,
            q: filter.q.clone(),
            status: filter.status,
        })?;
        Ok(entries
            .into_iter()
            .map(|entry| SourceCandidate {
                source_type: SourceType::Journal,
                id: entry.id,
                date: entry.entry_date,
                reference: entry.reference,
                description: entry.description,
                amount: entry.amount,
                posted: entry.posted,
            })
            .collect())
    }

    fn depreciation_candidates(&self, filter: &SourceFilter) -> Result<Vec<SourceCandidate>> {
        let lines = self.depreciation_repository.list_lines(&LineFilter {
            from: filter.from.map(Period::from_date),
            to: filter.to.map(Period::from_date),
            status: filter.status,
            ..Default::default()
        })?;
        let assets: HashMap<String, _> = self
            .asset_repository
            .list()?
            .into_iter()
            .map(|asset| (asset.id.clone(), asset))
            .collect();
        let needle = filter.q.as_ref().map(|q| q.to_lowercase());

        let mut candidates = Vec::with_capacity(lines.len());
        for line in lines {
            let Some(asset) = assets.get(&line.asset_id) else {
                warn!("Depreciation line {} references unknown asset {}", line.id, line.asset_id);
                continue;
            };
            if let Some(needle) = &needle {
                if !asset.code.to_lowercase().contains(needle)
                    && !asset.name.to_lowercase().contains(needle)
                {
                    continue;
                }
            }
            candidates.push(SourceCandidate {
                source_type: SourceType::Depreciation,
                id: line.id,
                date: line.period.last_day(),
                reference: format!("{}/{}", asset.code, line.period),
                description: Some(format!("Penyusutan {} {}", asset.name, line.period)),
                amount: line.expense,
                posted: line.posted,
            });
        }
        Ok(candidates)
    }
}

#[async_trait]
impl PostingServiceTrait for PostingService {
    async fn post(&self, request: PostRequest) -> Result<PostResult> {
        let mut result = PostResult::default();
        for item in &request.items {
            let outcome = match item.resolve() {
                Ok(source) => self.post_one(&source).await,
                Err(e) => ItemOutcome::Failed(e.to_string()),
            };
            match outcome {
                ItemOutcome::Posted => result.posted += 1,
                ItemOutcome::Skipped => result.skipped += 1,
                ItemOutcome::Failed(message) => {
                    warn!(
                        "Could not post {} {}: {}",
                        item.source_type, item.id, message
                    );
                    result.errors.push(PostItemError {
                        source_type: item.source_type.clone(),
                        id: item.id.clone(),
                        message,
                    });
                }
            }
        }
        info!(
            "Posting batch of {}: {} posted, {} skipped, {} failed",
            request.items.len(),
            result.posted,
            result.skipped,
            result.errors.len()
        );
        Ok(result)
    }

    async fn unpost(&self, source: &SourceRef) -> Result<()> {
        let removed = self.ledger_repository.delete_posting(source).await?;
        if removed == 0 {
            return Err(Error::NotFound(format!("Posting of {}", source)));
        }
        info!("Unposted {} ({} ledger lines removed)", source, removed);
        Ok(())
    }

    fn preview(&self, source: &SourceRef) -> Result<PostingPreview> {
        let already_posted = self.ledger_repository.is_posted(source)?;
        let draft = self.draft(source)?;
        let (total_debit, total_credit) = draft.totals();

        let lines = draft
            .lines
            .iter()
            .map(|line| {
                let account = line
                    .account_id
                    .as_ref()
                    .and_then(|id| draft.accounts.get(id));
                PreviewLine {
                    account_id: line.account_id.clone(),
                    account_code: account.map(|a| a.code.clone()),
                    account_name: account.map(|a| a.name.clone()),
                    cost_center_id: line.cost_center_id.clone(),
                    debit: line.debit,
                    credit: line.credit,
                    memo: line.memo.clone(),
                }
            })
            .collect();

        Ok(PostingPreview {
            source: draft.source,
            posting_date: draft.posting_date,
            description: draft.description,
            lines,
            total_debit,
            total_credit,
            balanced: is_balanced(total_debit, total_credit),
            already_posted,
            issues: draft.issues,
        })
    }

    fn list(&self, filter: &GlFilter) -> Result<Vec<GlHeaderSummary>> {
        self.ledger_repository.list_headers(filter)
    }

    fn detail(&self, header_id: &str) -> Result<GlHeaderDetail> {
        let header = self.ledger_repository.get_header(header_id)?;
        let lines = self.ledger_repository.get_lines(header_id)?;
        let accounts: HashMap<String, Account> = self
            .account_repository
            .list(None)?
            .into_iter()
            .map(|account| (account.id.clone(), account))
            .collect();

        let mut total_debit = Decimal::ZERO;
        let mut total_credit = Decimal::ZERO;
        let lines = lines
            .into_iter()
            .map(|line| {
                total_debit += line.debit;
                total_credit += line.credit;
                let (account_code, account_name) = accounts
                    .get(&line.account_id)
                    .map(|a| (a.code.clone(), a.name.clone()))
                    .unwrap_or_else(|| (line.account_id.clone(), String::new()));
                GlLineView {
                    line,
                    account_code,
                    account_name,
                }
            })
            .collect();

        Ok(GlHeaderDetail {
            header,
            lines,
            total_debit,
            total_credit,
        })
    }

    fn sources(&self, filter: &SourceFilter) -> Result<Vec<SourceCandidate>> {
        let mut candidates = Vec::new();
        if filter.source_type != Some(SourceType::Depreciation) {
            candidates.extend(self.journal_candidates(filter)?);
        }
        if filter.source_type != Some(SourceType::Journal) {
            candidates.extend(self.depreciation_candidates(filter)?);
        }
        candidates.sort_by(|a, b| a.date.cmp(&b.date).then_with(|| a.reference.cmp(&b.reference)));
        Ok(candidates)
    }
}
