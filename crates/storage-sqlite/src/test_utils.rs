//! Shared fixtures for repository tests backed by a temporary SQLite file.

use std::sync::Arc;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tempfile::TempDir;

use crate::accounts::AccountRepository;
use crate::assets::AssetRepository;
use crate::db::{create_pool, init, run_migrations, spawn_writer, DbPool, WriteHandle};
use tirta_core::accounts::{Account, AccountKind, AccountRepositoryTrait, NewAccount};
use tirta_core::assets::{Asset, AssetRepositoryTrait, NewAsset};
use tirta_core::depreciation::DepreciationMethod;

pub struct TestDb {
    pub pool: Arc<DbPool>,
    pub writer: WriteHandle,
    // Keeps the database file alive for the duration of the test
    _dir: TempDir,
}

pub async fn setup() -> TestDb {
    let dir = tempfile::tempdir().expect("Failed to create temp directory");
    let db_path = dir.path().join("test.db").to_string_lossy().to_string();
    init(&db_path).expect("Failed to initialise database");
    let pool = create_pool(&db_path).expect("Failed to create pool");
    run_migrations(&pool).expect("Failed to run migrations");
    let writer = spawn_writer(&pool).expect("Failed to spawn writer");
    TestDb {
        pool,
        writer,
        _dir: dir,
    }
}

pub async fn create_account(db: &TestDb, id: &str, code: &str, kind: AccountKind) -> Account {
    AccountRepository::new(db.pool.clone(), db.writer.clone())
        .create(NewAccount {
            id: Some(id.to_string()),
            code: code.to_string(),
            name: format!("Akun {}", code),
            kind,
            is_contra: false,
            is_active: true,
        })
        .await
        .expect("Failed to create account")
}

pub async fn create_asset(db: &TestDb, id: &str, value: Decimal) -> Asset {
    AssetRepository::new(db.pool.clone(), db.writer.clone())
        .create(NewAsset {
            id: Some(id.to_string()),
            code: id.to_uppercase(),
            name: format!("Pompa {}", id),
            acquisition_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            acquisition_value: value,
            residual_value: Decimal::ZERO,
            useful_life_months: Some(12),
            depreciation_start: None,
            method: DepreciationMethod::StraightLine,
            depreciation_class: None,
            declining_rate: None,
            expense_account_id: None,
            accumulated_account_id: None,
            cost_center_id: None,
        })
        .await
        .expect("Failed to create asset")
}
