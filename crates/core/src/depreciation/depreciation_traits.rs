use super::depreciation_model::{
    DepreciationLine, DepreciationReport, DepreciationRunResult, LineFilter, NewDepreciationLine,
    ReportKind,
};
use crate::errors::Result;
use crate::utils::Period;

/// Trait defining the contract for depreciation line persistence.
///
/// Implementations derive each line's `posted` flag from the ledger.
#[async_trait::async_trait]
pub trait DepreciationRepositoryTrait: Send + Sync {
    fn list_lines(&self, filter: &LineFilter) -> Result<Vec<DepreciationLine>>;
    fn get_line(&self, line_id: &str) -> Result<DepreciationLine>;
    fn has_posted_lines(&self, asset_id: &str) -> Result<bool>;

    /// Inserts lines, ignoring any whose (asset, period) already exists.
    /// Returns the number of lines actually inserted.
    async fn insert_lines(&self, lines: Vec<NewDepreciationLine>) -> Result<usize>;

    /// Deletes the unposted lines of `period`, returning how many were removed.
    async fn delete_unposted_for_period(&self, period: Period) -> Result<usize>;
    async fn delete_unposted_for_asset(&self, asset_id: &str) -> Result<usize>;
}

/// Trait defining the contract for depreciation service operations.
#[async_trait::async_trait]
pub trait DepreciationServiceTrait: Send + Sync {
    /// Creates the missing line of `period` for every active asset in life.
    async fn run_depreciation(&self, period: Period) -> Result<DepreciationRunResult>;

    /// Removes the unposted lines of `period`. Posted lines are kept.
    async fn rollback_run(&self, period: Period) -> Result<usize>;

    fn list_lines(&self, filter: &LineFilter) -> Result<Vec<DepreciationLine>>;

    /// Builds a report as of `period`, or December of the current year.
    fn get_report(&self, kind: ReportKind, period: Option<Period>) -> Result<DepreciationReport>;

    /// Same report rendered as CSV bytes.
    fn export_report_csv(&self, kind: ReportKind, period: Option<Period>) -> Result<Vec<u8>>;
}
