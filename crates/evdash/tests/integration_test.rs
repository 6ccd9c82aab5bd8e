//! Integration tests for the evdash application.
//!
//! These run the whole load, aggregate, render, write cycle against files in
//! a temporary directory.

use std::io::Write;

use evdash::{AppError, DashboardApp};
use evdash_common::test_utils::init_test_logging;
use evdash_common::{EvDashError, RecordFilter};
use evdash_config::Config;

const CSV: &str = "\
County,City,Make,Model Year,Electric Vehicle Type,Electric Range,Clean Alternative Fuel Vehicle (CAFV) Eligibility
King,Seattle,TESLA,2022,Battery Electric Vehicle (BEV),310,Clean Alternative Fuel Vehicle Eligible
King,Seattle,TESLA,2023,Battery Electric Vehicle (BEV),,Eligibility unknown as battery range has not been researched
Pierce,Tacoma,TOYOTA,2019,Plug-in Hybrid Electric Vehicle (PHEV),25,Not eligible due to low battery range
";

fn config_for(dir: &tempfile::TempDir, csv: &str) -> Config {
    let data = dir.path().join("ev.csv");
    let mut file = std::fs::File::create(&data).expect("create csv");
    file.write_all(csv.as_bytes()).expect("write csv");

    let mut config = Config::default();
    config.data.path = data;
    config.data.output = Some(dir.path().join("report.json"));
    config.charts.reference_year = Some(2024);
    config
}

#[tokio::test]
async fn test_run_writes_report() {
    init_test_logging();
    let dir = tempfile::tempdir().expect("temp dir");
    let config = config_for(&dir, CSV);
    let output = config.data.output.clone().expect("output set");

    let app = DashboardApp::new(config);
    let written = app
        .run_json(&RecordFilter::county("King"), true)
        .await
        .expect("run succeeds");

    let bytes = std::fs::read(&output).expect("report exists");
    assert_eq!(bytes.len(), written);

    let json: serde_json::Value = serde_json::from_slice(&bytes).expect("valid json");
    let dashboard = &json["dashboard"];
    assert_eq!(dashboard["record_count"], 2);
    assert_eq!(dashboard["county_options"].as_array().map(Vec::len), Some(2));
    assert_eq!(dashboard["unresearched_by_model_year"]["rows"][0]["year"], 2023);
    assert_eq!(dashboard["ev_type_share"][0]["percentage"], 100.0);
}

#[tokio::test]
async fn test_malformed_row_reports_row_number() {
    let dir = tempfile::tempdir().expect("temp dir");
    let broken = CSV.replace("2019", "twenty-nineteen");
    let app = DashboardApp::new(config_for(&dir, &broken));

    let err = app.run_json(&RecordFilter::All, false).await.unwrap_err();
    match err {
        AppError::Dashboard(err @ EvDashError::Table { .. }) => {
            assert_eq!(err.row(), Some(3));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_unwritable_output() {
    let dir = tempfile::tempdir().expect("temp dir");
    let mut config = config_for(&dir, CSV);
    config.data.output = Some(dir.path().join("missing").join("report.json"));

    let err = DashboardApp::new(config)
        .run_json(&RecordFilter::All, false)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Output { .. }));
}
