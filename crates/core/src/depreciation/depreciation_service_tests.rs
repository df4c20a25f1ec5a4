#[cfg(test)]
mod tests {
    use crate::assets::{Asset, AssetRepositoryTrait, AssetUpdate, NewAsset};
    use crate::depreciation::{
        DepreciationClass, DepreciationLine, DepreciationMethod, DepreciationRepositoryTrait,
        DepreciationService, DepreciationServiceTrait, LineFilter, LineOrigin, NewDepreciationLine,
        ReportKind,
    };
    use crate::errors::{Error, Result};
    use crate::utils::Period;
    use async_trait::async_trait;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;
    use std::sync::{Arc, Mutex};

    // --- Mock AssetRepository ---
    struct MockAssetRepository {
        assets: Vec<Asset>,
    }

    #[async_trait]
    impl AssetRepositoryTrait for MockAssetRepository {
        async fn create(&self, _new_asset: NewAsset) -> Result<Asset> {
            unimplemented!()
        }

        async fn update(&self, _asset_update: AssetUpdate) -> Result<Asset> {
            unimplemented!()
        }

        fn get_by_id(&self, asset_id: &str) -> Result<Asset> {
            self.assets
                .iter()
                .find(|a| a.id == asset_id)
                .cloned()
                .ok_or_else(|| Error::NotFound(format!("Asset {}", asset_id)))
        }

        fn list(&self) -> Result<Vec<Asset>> {
            Ok(self.assets.clone())
        }

        fn list_active(&self) -> Result<Vec<Asset>> {
            Ok(self.assets.iter().filter(|a| a.is_active).cloned().collect())
        }

        async fn delete(&self, _asset_id: &str) -> Result<usize> {
            unimplemented!()
        }
    }

    // --- Mock DepreciationRepository ---
    #[derive(Default)]
    struct MockDepreciationRepository {
        lines: Mutex<Vec<DepreciationLine>>,
    }

    impl MockDepreciationRepository {
        fn with_lines(lines: Vec<DepreciationLine>) -> Self {
            Self {
                lines: Mutex::new(lines),
            }
        }
    }

    #[async_trait]
    impl DepreciationRepositoryTrait for MockDepreciationRepository {
        fn list_lines(&self, filter: &LineFilter) -> Result<Vec<DepreciationLine>> {
            let lines = self.lines.lock().unwrap();
            Ok(lines
                .iter()
                .filter(|l| filter.period.map_or(true, |p| l.period == p))
                .filter(|l| filter.asset_id.as_ref().map_or(true, |a| &l.asset_id == a))
                .filter(|l| filter.status.map_or(true, |s| s.matches(l.posted)))
                .cloned()
                .collect())
        }

        fn get_line(&self, _line_id: &str) -> Result<DepreciationLine> {
            unimplemented!()
        }

        fn has_posted_lines(&self, asset_id: &str) -> Result<bool> {
            let lines = self.lines.lock().unwrap();
            Ok(lines.iter().any(|l| l.asset_id == asset_id && l.posted))
        }

        async fn insert_lines(&self, new_lines: Vec<NewDepreciationLine>) -> Result<usize> {
            let mut lines = self.lines.lock().unwrap();
            let mut inserted = 0;
            for new_line in new_lines {
                if lines
                    .iter()
                    .any(|l| l.asset_id == new_line.asset_id && l.period == new_line.period)
                {
                    continue;
                }
                let id = format!("line-{}", lines.len() + 1);
                lines.push(line(
                    &id,
                    &new_line.asset_id,
                    new_line.period,
                    new_line.expense,
                    new_line.accumulated,
                    new_line.book_value,
                    false,
                ));
                inserted += 1;
            }
            Ok(inserted)
        }

        async fn delete_unposted_for_period(&self, period: Period) -> Result<usize> {
            let mut lines = self.lines.lock().unwrap();
            let before = lines.len();
            lines.retain(|l| l.period != period || l.posted);
            Ok(before - lines.len())
        }

        async fn delete_unposted_for_asset(&self, _asset_id: &str) -> Result<usize> {
            unimplemented!()
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn period(s: &str) -> Period {
        s.parse().unwrap()
    }

    fn asset(id: &str, acquisition: Decimal, life: u32, class: Option<DepreciationClass>) -> Asset {
        Asset {
            id: id.to_string(),
            code: id.to_uppercase(),
            name: format!("Asset {}", id),
            acquisition_date: date(2024, 1, 10),
            acquisition_value: acquisition,
            residual_value: Decimal::ZERO,
            useful_life_months: Some(life),
            depreciation_start: date(2024, 1, 1),
            method: DepreciationMethod::StraightLine,
            depreciation_class: class,
            declining_rate: None,
            expense_account_id: Some("expense".to_string()),
            accumulated_account_id: Some("accumulated".to_string()),
            cost_center_id: None,
            is_active: true,
            created_at: date(2024, 1, 10).and_hms_opt(0, 0, 0).unwrap(),
            updated_at: date(2024, 1, 10).and_hms_opt(0, 0, 0).unwrap(),
        }
    }

    fn line(
        id: &str,
        asset_id: &str,
        period: Period,
        expense: Decimal,
        accumulated: Decimal,
        book_value: Decimal,
        posted: bool,
    ) -> DepreciationLine {
        DepreciationLine {
            id: id.to_string(),
            asset_id: asset_id.to_string(),
            period,
            expense,
            accumulated,
            book_value,
            posted,
            created_at: date(2024, 1, 31).and_hms_opt(0, 0, 0).unwrap(),
        }
    }

    fn service(
        assets: Vec<Asset>,
        repository: Arc<MockDepreciationRepository>,
    ) -> DepreciationService {
        DepreciationService::new(Arc::new(MockAssetRepository { assets }), repository)
    }

    #[tokio::test]
    async fn test_run_creates_lines_and_is_idempotent() {
        let repo = Arc::new(MockDepreciationRepository::default());
        let svc = service(vec![asset("a1", dec!(1200), 12, None)], repo.clone());

        let first = svc.run_depreciation(period("2024-03")).await.unwrap();
        assert_eq!(first.created, 1);
        assert_eq!(first.skipped, 0);
        assert!(first.errors.is_empty());

        let stored = repo.lines.lock().unwrap()[0].clone();
        assert_eq!(stored.expense, dec!(100));
        assert_eq!(stored.accumulated, dec!(300));
        assert_eq!(stored.book_value, dec!(900));

        let second = svc.run_depreciation(period("2024-03")).await.unwrap();
        assert_eq!(second.created, 0);
        assert_eq!(second.skipped, 1);
        assert_eq!(repo.lines.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_run_skips_assets_outside_their_life_and_inactive_ones() {
        let repo = Arc::new(MockDepreciationRepository::default());
        let mut retired = asset("a3", dec!(500), 12, None);
        retired.is_active = false;
        let svc = service(
            vec![
                asset("a1", dec!(1200), 12, None),
                asset("a2", dec!(1200), 3, None),
                retired,
            ],
            repo.clone(),
        );

        let result = svc.run_depreciation(period("2024-06")).await.unwrap();
        assert_eq!(result.created, 1);
        assert_eq!(result.skipped, 1);

        let before_start = svc.run_depreciation(period("2023-12")).await.unwrap();
        assert_eq!(before_start.created, 0);
        assert_eq!(before_start.skipped, 2);
    }

    #[tokio::test]
    async fn test_run_collects_per_asset_errors() {
        let repo = Arc::new(MockDepreciationRepository::default());
        let mut broken = asset("bad", dec!(1000), 12, Some(DepreciationClass::BuildingPermanent));
        broken.method = DepreciationMethod::DecliningBalance;
        let svc = service(vec![broken, asset("ok", dec!(1200), 12, None)], repo.clone());

        let result = svc.run_depreciation(period("2024-01")).await.unwrap();
        assert_eq!(result.created, 1);
        assert_eq!(result.errors.len(), 1);
        assert_eq!(result.errors[0].asset_id, "bad");
    }

    #[tokio::test]
    async fn test_run_skips_zero_expense_assets() {
        let repo = Arc::new(MockDepreciationRepository::default());
        let mut fully_residual = asset("land", dec!(5000), 12, None);
        fully_residual.residual_value = dec!(5000);
        let svc = service(
            vec![fully_residual, asset("a1", dec!(1200), 12, None)],
            repo.clone(),
        );

        let result = svc.run_depreciation(period("2024-02")).await.unwrap();
        assert_eq!(result.created, 1);
        assert_eq!(result.skipped, 1);
        assert!(result.errors.is_empty());
        let lines = repo.lines.lock().unwrap();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].asset_id, "a1");
    }

    #[tokio::test]
    async fn test_rollback_keeps_posted_lines() {
        let p = period("2024-02");
        let repo = Arc::new(MockDepreciationRepository::with_lines(vec![
            line("l1", "a1", p, dec!(100), dec!(200), dec!(1000), true),
            line("l2", "a2", p, dec!(100), dec!(200), dec!(1000), false),
            line("l3", "a2", period("2024-01"), dec!(100), dec!(100), dec!(1100), false),
        ]));
        let svc = service(Vec::new(), repo.clone());

        assert_eq!(svc.rollback_run(p).await.unwrap(), 1);
        let remaining: Vec<String> = repo.lines.lock().unwrap().iter().map(|l| l.id.clone()).collect();
        assert_eq!(remaining, vec!["l1", "l3"]);
    }

    #[test]
    fn test_report_prefers_stored_line_and_synthesizes_the_rest() {
        let p = period("2024-06");
        let repo = Arc::new(MockDepreciationRepository::with_lines(vec![line(
            "l1",
            "a1",
            p,
            dec!(99),
            dec!(594),
            dec!(606),
            true,
        )]));
        let svc = service(
            vec![
                asset("a1", dec!(1200), 12, Some(DepreciationClass::Group1)),
                asset("a2", dec!(2400), 24, Some(DepreciationClass::Group1)),
            ],
            repo,
        );

        let report = svc.get_report(ReportKind::Detail, Some(p)).unwrap();
        assert_eq!(report.rows.len(), 2);

        let stored = &report.rows[0];
        assert_eq!(stored.origin, LineOrigin::Stored);
        assert_eq!(stored.expense, dec!(99));
        assert!(stored.posted);

        let synthesized = &report.rows[1];
        assert_eq!(synthesized.origin, LineOrigin::Synthesized);
        assert_eq!(synthesized.expense, dec!(100));
        assert_eq!(synthesized.accumulated, dec!(600));
        assert!(!synthesized.posted);

        assert_eq!(report.totals.expense, dec!(199));
        assert_eq!(report.totals.acquisition_value, dec!(3600));
    }

    #[test]
    fn test_report_falls_back_to_zero_row_on_calculation_error() {
        let mut broken = asset("bad", dec!(1000), 12, Some(DepreciationClass::BuildingPermanent));
        broken.method = DepreciationMethod::DecliningBalance;
        let svc = service(vec![broken], Arc::new(MockDepreciationRepository::default()));

        let report = svc.get_report(ReportKind::Detail, Some(period("2024-06"))).unwrap();
        let row = &report.rows[0];
        assert_eq!(row.origin, LineOrigin::Fallback);
        assert_eq!(row.expense, Decimal::ZERO);
        assert_eq!(row.accumulated, Decimal::ZERO);
        assert_eq!(row.book_value, dec!(1000));
    }

    #[test]
    fn test_report_survives_oversized_assets() {
        let huge = Decimal::MAX / dec!(2) + Decimal::ONE;
        let svc = service(
            vec![
                asset("h1", huge, 12, None),
                asset("h2", huge, 12, None),
            ],
            Arc::new(MockDepreciationRepository::default()),
        );

        for kind in [ReportKind::Rekap, ReportKind::Detail] {
            let report = svc.get_report(kind, Some(period("2024-06"))).unwrap();
            assert_eq!(report.totals.expense, Decimal::ZERO);
            assert_eq!(report.totals.acquisition_value, Decimal::MAX);
        }
        let detail = svc.get_report(ReportKind::Detail, Some(period("2024-06"))).unwrap();
        assert!(detail.rows.iter().all(|r| r.origin == LineOrigin::Fallback));
    }

    #[test]
    fn test_rekap_groups_by_class_with_unclassified_last() {
        let svc = service(
            vec![
                asset("a1", dec!(1200), 12, None),
                asset("a2", dec!(2400), 24, Some(DepreciationClass::Group2)),
                asset("a3", dec!(1200), 12, Some(DepreciationClass::Group1)),
                asset("a4", dec!(1200), 12, Some(DepreciationClass::Group2)),
            ],
            Arc::new(MockDepreciationRepository::default()),
        );

        let report = svc.get_report(ReportKind::Rekap, Some(period("2024-01"))).unwrap();
        assert!(report.rows.is_empty());
        let labels: Vec<&str> = report.summary.iter().map(|s| s.label.as_str()).collect();
        assert_eq!(labels, vec!["Golongan 1", "Golongan 2", "Tanpa Golongan"]);
        assert_eq!(report.summary[1].asset_count, 2);
        assert_eq!(report.summary[1].expense, dec!(200));
        assert_eq!(report.totals.expense, dec!(400));
    }

    #[test]
    fn test_report_excludes_assets_acquired_later() {
        let svc = service(
            vec![asset("a1", dec!(1200), 12, None)],
            Arc::new(MockDepreciationRepository::default()),
        );
        let report = svc.get_report(ReportKind::Detail, Some(period("2023-12"))).unwrap();
        assert!(report.rows.is_empty());
        assert_eq!(report.totals.acquisition_value, Decimal::ZERO);
    }

    #[test]
    fn test_csv_export_quotes_every_field() {
        let svc = service(
            vec![asset("a1", dec!(1200), 12, Some(DepreciationClass::Group1))],
            Arc::new(MockDepreciationRepository::default()),
        );

        let csv = svc.export_report_csv(ReportKind::Detail, Some(period("2024-01"))).unwrap();
        let text = String::from_utf8(csv).unwrap();
        let mut lines = text.lines();
        assert_eq!(
            lines.next().unwrap(),
            "\"Kode Aset\",\"Nama Aset\",\"Golongan\",\"Metode\",\"Nilai Perolehan\",\"Nilai Residu\",\"Beban Periode\",\"Akumulasi Penyusutan\",\"Nilai Buku\",\"Sumber\",\"Status\""
        );
        assert_eq!(
            lines.next().unwrap(),
            "\"A1\",\"Asset a1\",\"Golongan 1\",\"Garis Lurus\",\"1200.00\",\"0.00\",\"100.00\",\"100.00\",\"1100.00\",\"Proyeksi\",\"Belum Posting\""
        );
        assert!(lines.next().is_none());
    }

    #[test]
    fn test_empty_rekap_csv_still_has_header() {
        let svc = service(Vec::new(), Arc::new(MockDepreciationRepository::default()));
        let csv = svc.export_report_csv(ReportKind::Rekap, Some(period("2024-01"))).unwrap();
        let text = String::from_utf8(csv).unwrap();
        assert!(text.starts_with("\"Golongan\",\"Jumlah Aset\""));
        assert_eq!(text.lines().count(), 1);
    }
}
