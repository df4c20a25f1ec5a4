use std::sync::Arc;

use crate::config::Config;
use tirta_core::{
    accounts::{AccountService, AccountServiceTrait},
    assets::{AssetService, AssetServiceTrait},
    balance_sheet::{BalanceSheetService, BalanceSheetServiceTrait},
    cost_centers::{CostCenterService, CostCenterServiceTrait},
    depreciation::{DepreciationService, DepreciationServiceTrait},
    journals::{JournalService, JournalServiceTrait},
    ledger::{PostingService, PostingServiceTrait},
};
use tirta_storage_sqlite::{
    db, AccountRepository, AssetRepository, CostCenterRepository, DbPool,
    DepreciationRepository, JournalRepository, LedgerRepository,
};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

pub struct AppState {
    pub account_service: Arc<dyn AccountServiceTrait + Send + Sync>,
    pub cost_center_service: Arc<dyn CostCenterServiceTrait + Send + Sync>,
    pub asset_service: Arc<dyn AssetServiceTrait + Send + Sync>,
    pub depreciation_service: Arc<dyn DepreciationServiceTrait + Send + Sync>,
    pub journal_service: Arc<dyn JournalServiceTrait + Send + Sync>,
    pub posting_service: Arc<dyn PostingServiceTrait + Send + Sync>,
    pub balance_sheet_service: Arc<dyn BalanceSheetServiceTrait + Send + Sync>,
    pub pool: Arc<DbPool>,
    pub db_path: String,
}

pub fn init_tracing(log_format: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    // try_init: tests build several apps in one process
    if log_format.eq_ignore_ascii_case("json") {
        let _ = registry
            .with(fmt::layer().json().with_current_span(false))
            .try_init();
    } else {
        let _ = registry
            .with(fmt::layer().with_target(true).with_line_number(true))
            .try_init();
    }
}

pub async fn build_state(config: &Config) -> anyhow::Result<Arc<AppState>> {
    let db_path = db::init(&config.db_path)?;
    tracing::info!("Database path in use: {}", db_path);

    let pool = db::create_pool(&db_path)?;
    db::run_migrations(&pool)?;
    let writer = db::spawn_writer(&pool)?;

    let account_repository = Arc::new(AccountRepository::new(pool.clone(), writer.clone()));
    let cost_center_repository = Arc::new(CostCenterRepository::new(pool.clone(), writer.clone()));
    let asset_repository = Arc::new(AssetRepository::new(pool.clone(), writer.clone()));
    let depreciation_repository =
        Arc::new(DepreciationRepository::new(pool.clone(), writer.clone()));
    let journal_repository = Arc::new(JournalRepository::new(pool.clone(), writer.clone()));
    let ledger_repository = Arc::new(LedgerRepository::new(pool.clone(), writer.clone()));

    let account_service = Arc::new(AccountService::new(
        account_repository.clone(),
        ledger_repository.clone(),
    ));
    let cost_center_service = Arc::new(CostCenterService::new(cost_center_repository));
    let asset_service = Arc::new(AssetService::new(
        asset_repository.clone(),
        depreciation_repository.clone(),
    ));
    let depreciation_service = Arc::new(DepreciationService::new(
        asset_repository.clone(),
        depreciation_repository.clone(),
    ));
    let journal_service = Arc::new(JournalService::new(
        journal_repository.clone(),
        account_repository.clone(),
    ));
    let posting_service = Arc::new(PostingService::new(
        ledger_repository.clone(),
        journal_repository,
        depreciation_repository,
        asset_repository,
        account_repository.clone(),
    ));
    let balance_sheet_service = Arc::new(BalanceSheetService::new(
        account_repository,
        ledger_repository,
    ));

    Ok(Arc::new(AppState {
        account_service,
        cost_center_service,
        asset_service,
        depreciation_service,
        journal_service,
        posting_service,
        balance_sheet_service,
        pool,
        db_path,
    }))
}
