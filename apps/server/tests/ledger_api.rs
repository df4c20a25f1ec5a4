mod common;

use axum::http::{header, Method, StatusCode};
use common::{build_test_app, TestApp};
use serde_json::json;

async fn seed_accounts(app: &TestApp) {
    for (id, code, name, kind, contra) in [
        ("kas", "1-100", "Kas", "asset", false),
        ("akum", "1-290", "Akumulasi Penyusutan", "asset", true),
        ("pendapatan", "4-100", "Pendapatan Air", "revenue", false),
        ("beban", "5-300", "Beban Penyusutan", "expense", false),
    ] {
        let (status, _) = app
            .json(
                Method::POST,
                "/api/v1/accounts",
                Some(json!({
                    "id": id,
                    "code": code,
                    "name": name,
                    "kind": kind,
                    "isContra": contra,
                })),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "creating account {}", code);
    }
}

async fn seed_journal_entry(app: &TestApp) {
    let (status, _) = app
        .json(
            Method::POST,
            "/api/v1/journal-categories",
            Some(json!({
                "id": "cat-air",
                "name": "Penerimaan Rekening Air",
                "debitAccountId": "kas",
                "creditAccountId": "pendapatan",
            })),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, _) = app
        .json(
            Method::POST,
            "/api/v1/journals",
            Some(json!({
                "id": "je-1",
                "reference": "JU/2024/03/001",
                "entryDate": "2024-03-05",
                "categoryId": "cat-air",
                "description": "Penerimaan rekening Maret",
                "amount": 1000000,
            })),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
}

#[tokio::test]
async fn journal_post_unpost_roundtrip() {
    let app = build_test_app().await;
    seed_accounts(&app).await;
    seed_journal_entry(&app).await;

    let (status, preview) = app
        .json(Method::GET, "/api/v1/gl/preview?type=jurnal&id=je-1", None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(preview["balanced"], true);
    assert_eq!(preview["alreadyPosted"], false);
    assert_eq!(preview["postingDate"], "2024-03-05");
    assert_eq!(preview["lines"].as_array().unwrap().len(), 2);

    let batch = json!({ "items": [{ "type": "jurnal", "id": "je-1" }] });
    let (status, result) = app
        .json(Method::POST, "/api/v1/gl/post", Some(batch.clone()))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(result["posted"], 1);
    assert_eq!(result["skipped"], 0);

    let (_, again) = app.json(Method::POST, "/api/v1/gl/post", Some(batch)).await;
    assert_eq!(again["posted"], 0);
    assert_eq!(again["skipped"], 1);

    // Posted entries are frozen.
    let (status, _) = app.json(Method::DELETE, "/api/v1/journals/je-1", None).await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, headers) = app.json(Method::GET, "/api/v1/gl?q=1-100", None).await;
    assert_eq!(status, StatusCode::OK);
    let headers = headers.as_array().unwrap();
    assert_eq!(headers.len(), 1);
    assert_eq!(headers[0]["totalDebit"].as_f64(), Some(1_000_000.0));
    let header_id = headers[0]["id"].as_str().unwrap().to_string();

    let (status, detail) = app
        .json(Method::GET, &format!("/api/v1/gl/{}", header_id), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(detail["lines"][0]["accountCode"], "1-100");

    let (status, sheet) = app
        .json(Method::GET, "/api/v1/laporan/neraca?asOf=2024-12-31", None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(sheet["balanced"], true);
    assert_eq!(sheet["totalAssets"].as_f64(), Some(1_000_000.0));
    assert_eq!(sheet["currentYearProfit"].as_f64(), Some(1_000_000.0));

    let (status, _) = app
        .send(Method::DELETE, "/api/v1/gl/unpost?type=jurnal&id=je-1", None)
        .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = app
        .send(Method::DELETE, "/api/v1/gl/unpost?type=jurnal&id=je-1", None)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, sources) = app
        .json(Method::GET, "/api/v1/gl/sources?type=jurnal&status=unposted", None)
        .await;
    assert_eq!(sources.as_array().unwrap().len(), 1);
    assert_eq!(sources[0]["posted"], false);
}

#[tokio::test]
async fn batch_post_reports_partial_failures() {
    let app = build_test_app().await;
    seed_accounts(&app).await;
    seed_journal_entry(&app).await;

    let (status, result) = app
        .json(
            Method::POST,
            "/api/v1/gl/post",
            Some(json!({
                "items": [
                    { "type": "jurnal", "id": "je-1" },
                    { "type": "jurnal", "id": "je-missing" },
                    { "type": "kas", "id": "x" },
                ]
            })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(result["posted"], 1);
    let errors = result["errors"].as_array().unwrap();
    assert_eq!(errors.len(), 2);
    assert_eq!(errors[0]["id"], "je-missing");
    assert_eq!(errors[1]["type"], "kas");
    assert_eq!(errors[1]["id"], "x");
}

#[tokio::test]
async fn depreciation_run_post_and_report() {
    let app = build_test_app().await;
    seed_accounts(&app).await;

    let (status, _) = app
        .json(
            Method::POST,
            "/api/v1/assets",
            Some(json!({
                "id": "ast-1",
                "code": "PMP-01",
                "name": "Pompa Intake",
                "acquisitionDate": "2024-01-01",
                "acquisitionValue": 12000000,
                "usefulLifeMonths": 12,
                "method": "straight_line",
                "expenseAccountId": "beban",
                "accumulatedAccountId": "akum",
            })),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, run) = app
        .json(
            Method::POST,
            "/api/v1/depreciation/run",
            Some(json!({ "period": "2024-01" })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(run["created"], 1);

    let (_, lines) = app
        .json(Method::GET, "/api/v1/depreciation/lines?assetId=ast-1", None)
        .await;
    assert_eq!(lines.as_array().unwrap().len(), 1);
    assert_eq!(lines[0]["expense"].as_f64(), Some(1_000_000.0));
    let line_id = lines[0]["id"].as_str().unwrap().to_string();

    let (_, result) = app
        .json(
            Method::POST,
            "/api/v1/gl/post",
            Some(json!({ "items": [{ "type": "penyusutan", "id": line_id }] })),
        )
        .await;
    assert_eq!(result["posted"], 1);

    let (_, headers) = app.json(Method::GET, "/api/v1/gl?source=penyusutan", None).await;
    assert_eq!(headers[0]["postingDate"], "2024-01-31");

    // Posted lines survive a rollback of their period.
    let (_, rollback) = app
        .json(
            Method::POST,
            "/api/v1/depreciation/rollback",
            Some(json!({ "period": "2024-01" })),
        )
        .await;
    assert_eq!(rollback["removed"], 0);

    let (status, report) = app
        .json(
            Method::GET,
            "/api/v1/laporan/penyusutan?type=detail&period=2024-01",
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(report["rows"].as_array().unwrap().len(), 1);

    let (status, csv) = app
        .send(
            Method::GET,
            "/api/v1/laporan/penyusutan?type=rekap&format=csv&period=2024-01",
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert!(String::from_utf8(csv).unwrap().lines().count() >= 2);

    let (status, error) = app
        .json(Method::GET, "/api/v1/laporan/penyusutan?format=pdf", None)
        .await;
    assert_eq!(status, StatusCode::NOT_IMPLEMENTED);
    assert_eq!(error["code"], 501);
}

#[tokio::test]
async fn balance_sheet_rejects_two_segments() {
    let app = build_test_app().await;
    let (status, _) = app
        .json(
            Method::GET,
            "/api/v1/laporan/neraca?costCenterId=cc-1&assetId=ast-1",
            None,
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn csv_export_sets_attachment_headers() {
    let app = build_test_app().await;
    let response = tower::ServiceExt::oneshot(
        app.router.clone(),
        axum::http::Request::builder()
            .uri("/api/v1/laporan/penyusutan?format=csv&period=2024-01")
            .body(axum::body::Body::empty())
            .unwrap(),
    )
    .await
    .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::CONTENT_TYPE],
        "text/csv; charset=utf-8"
    );
    assert!(response.headers()[header::CONTENT_DISPOSITION]
        .to_str()
        .unwrap()
        .starts_with("attachment"));
}

#[tokio::test]
async fn out_of_range_inputs_are_rejected() {
    let app = build_test_app().await;
    seed_accounts(&app).await;

    let (status, _) = app
        .json(
            Method::GET,
            "/api/v1/laporan/penyusutan?type=detail&period=300000-06",
            None,
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let asset = |id: &str, value: f64| {
        json!({
            "id": id,
            "code": id.to_uppercase(),
            "name": "Reservoir",
            "acquisitionDate": "2024-01-01",
            "acquisitionValue": value,
            "usefulLifeMonths": 12,
            "method": "straight_line",
        })
    };
    let (status, _) = app
        .json(Method::POST, "/api/v1/assets", Some(asset("big", 4e28)))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = app
        .json(Method::POST, "/api/v1/assets", Some(asset("res-1", 1_200_000.0)))
        .await;
    assert_eq!(status, StatusCode::CREATED);
    let (status, schedule) = app
        .json(
            Method::GET,
            "/api/v1/assets/res-1/schedule?through=9999-12",
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(schedule.as_array().unwrap().len(), 24);
}
