use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use log::{debug, info, warn};

use super::depreciation_calculator::{calculate, resolve_useful_life};
use super::depreciation_model::{
    DepreciationLine, DepreciationReport, DepreciationRunResult, LineFilter, NewDepreciationLine,
    ReportKind, RunError,
};
use super::depreciation_report::{build_report, render_csv};
use super::depreciation_traits::{DepreciationRepositoryTrait, DepreciationServiceTrait};
use crate::assets::{Asset, AssetRepositoryTrait};
use crate::errors::Result;
use crate::utils::Period;

/// Service running monthly depreciation and building its reports.
pub struct DepreciationService {
    asset_repository: Arc<dyn AssetRepositoryTrait>,
    repository: Arc<dyn DepreciationRepositoryTrait>,
}

impl DepreciationService {
    pub fn new(
        asset_repository: Arc<dyn AssetRepositoryTrait>,
        repository: Arc<dyn DepreciationRepositoryTrait>,
    ) -> Self {
        Self {
            asset_repository,
            repository,
        }
    }

    fn lines_by_asset(&self, period: Period) -> Result<HashMap<String, DepreciationLine>> {
        let filter = LineFilter {
            period: Some(period),
            ..Default::default()
        };
        Ok(self
            .repository
            .list_lines(&filter)?
            .into_iter()
            .map(|line| (line.asset_id.clone(), line))
            .collect())
    }
}

/// True when `period` falls inside the asset's useful life.
fn life_covers(asset: &Asset, period: Period) -> bool {
    let params = asset.depreciation_params();
    let offset = params.start.months_until(period);
    offset >= 0 && offset < resolve_useful_life(&params) as i64
}

#[async_trait::async_trait]
impl DepreciationServiceTrait for DepreciationService {
    async fn run_depreciation(&self, period: Period) -> Result<DepreciationRunResult> {
        let assets = self.asset_repository.list_active()?;
        let existing: HashSet<String> = self.lines_by_asset(period)?.into_keys().collect();

        let mut skipped = 0;
        let mut errors = Vec::new();
        let mut new_lines = Vec::new();

        for asset in &assets {
            if existing.contains(&asset.id) || !life_covers(asset, period) {
                skipped += 1;
                continue;
            }
            match calculate(&asset.depreciation_params(), period) {
                // Nothing to post; a zero line would stay unposted forever.
                Ok(amounts) if amounts.expense.is_zero() => skipped += 1,
                Ok(amounts) => new_lines.push(NewDepreciationLine {
                    asset_id: asset.id.clone(),
                    period,
                    expense: amounts.expense,
                    accumulated: amounts.accumulated,
                    book_value: amounts.book_value,
                }),
                Err(e) => {
                    warn!("Depreciation run {} failed for asset {}: {}", period, asset.code, e);
                    errors.push(RunError {
                        asset_id: asset.id.clone(),
                        asset_code: asset.code.clone(),
                        message: e.to_string(),
                    });
                }
            }
        }

        let attempted = new_lines.len();
        let created = if attempted > 0 {
            self.repository.insert_lines(new_lines).await?
        } else {
            0
        };
        // Lines inserted concurrently by another run are ignored by the store.
        skipped += attempted - created.min(attempted);

        info!(
            "Depreciation run {}: {} created, {} skipped, {} failed",
            period,
            created,
            skipped,
            errors.len()
        );
        Ok(DepreciationRunResult {
            period,
            created,
            skipped,
            errors,
        })
    }

    async fn rollback_run(&self, period: Period) -> Result<usize> {
        let removed = self.repository.delete_unposted_for_period(period).await?;
        info!("Rolled back {} unposted depreciation lines of {}", removed, period);
        Ok(removed)
    }

    fn list_lines(&self, filter: &LineFilter) -> Result<Vec<DepreciationLine>> {
        self.repository.list_lines(filter)
    }

    fn get_report(&self, kind: ReportKind, period: Option<Period>) -> Result<DepreciationReport> {
        let period = period.unwrap_or_else(|| Period::current().end_of_year());
        let stored = self.lines_by_asset(period)?;
        let assets: Vec<Asset> = self
            .asset_repository
            .list()?
            .into_iter()
            .filter(|asset| asset.is_active || stored.contains_key(&asset.id))
            .collect();
        debug!(
            "Building {:?} depreciation report for {} over {} assets ({} stored lines)",
            kind,
            period,
            assets.len(),
            stored.len()
        );
        Ok(build_report(kind, period, &assets, &stored))
    }

    fn export_report_csv(&self, kind: ReportKind, period: Option<Period>) -> Result<Vec<u8>> {
        let report = self.get_report(kind, period)?;
        render_csv(&report)
    }
}
