#[path = "common.rs"]
mod common;

use std::fs;

use common::{PNG_MAGIC, TestWorkspace, full_sweep_rows, row};
use replplot::report::{self, ChartJob};
use replplot::{AggregateError, LoadError, Metric, ReplicationMode, ReportError};

const CHART_SET: [&str; 6] = [
    "p95_rf_0.2.png",
    "p95_rf_0.8.png",
    "throughput_modes_0.2.png",
    "throughput_modes_0.8.png",
    "throughput_rf_0.2.png",
    "throughput_rf_0.8.png",
];

#[test]
fn full_sweep_writes_every_chart() {
    let workspace = TestWorkspace::new();
    workspace.write_source(&full_sweep_rows());

    let written = report::run(&workspace.config()).expect("render sweep");
    assert_eq!(written.len(), CHART_SET.len());
    assert_eq!(workspace.charts(), CHART_SET.to_vec());

    for path in &written {
        let bytes = fs::read(path).expect("read chart");
        assert!(bytes.starts_with(PNG_MAGIC), "{} is not a png", path.display());
    }
}

#[test]
fn existing_charts_are_overwritten() {
    let workspace = TestWorkspace::new();
    workspace.write_source(&full_sweep_rows());
    fs::create_dir_all(workspace.out_dir()).expect("create out dir");
    let stale = workspace.out_dir().join("throughput_rf_0.8.png");
    fs::write(&stale, b"stale").expect("write stale chart");

    report::run(&workspace.config()).expect("render sweep");

    let bytes = fs::read(&stale).expect("read chart");
    assert!(bytes.starts_with(PNG_MAGIC));
}

#[test]
fn header_only_source_emits_no_charts() {
    let workspace = TestWorkspace::new();
    workspace.write_source(&[]);

    let err = report::run(&workspace.config()).unwrap_err();
    assert!(
        matches!(err, ReportError::Load(LoadError::EmptyDataset)),
        "got {err:?}"
    );
    assert!(workspace.charts().is_empty());
}

#[test]
fn malformed_put_ratio_halts_before_rendering() {
    let workspace = TestWorkspace::new();
    let mut rows = full_sweep_rows();
    rows.push(row("sync", 2, "0.8x", 100.0, 1.0));
    workspace.write_source(&rows);

    let err = report::run(&workspace.config()).unwrap_err();
    assert!(
        matches!(
            err,
            ReportError::Load(LoadError::MalformedRow { column: "putRatio", .. })
        ),
        "got {err:?}"
    );
    assert!(workspace.charts().is_empty());
}

#[test]
fn missing_source_is_reported() {
    let workspace = TestWorkspace::new();
    let err = report::run(&workspace.config()).unwrap_err();
    assert!(
        matches!(err, ReportError::Load(LoadError::SourceNotFound { .. })),
        "got {err:?}"
    );
}

#[test]
fn failure_keeps_charts_already_written() {
    let workspace = TestWorkspace::new();
    let rows: Vec<String> = full_sweep_rows()
        .into_iter()
        .filter(|row| !row.starts_with("semi-sync"))
        .collect();
    workspace.write_source(&rows);

    let err = report::run(&workspace.config()).unwrap_err();
    assert!(
        matches!(
            err,
            ReportError::Aggregate(AggregateError::EmptyGroup {
                mode: ReplicationMode::SemiSync,
                rf: 3
            })
        ),
        "got {err:?}"
    );
    assert_eq!(
        workspace.charts(),
        vec![
            "p95_rf_0.2.png",
            "p95_rf_0.8.png",
            "throughput_rf_0.2.png",
            "throughput_rf_0.8.png",
        ]
    );
}

#[test]
fn render_job_draws_series_with_a_missing_mode() {
    let workspace = TestWorkspace::new();
    let rows: Vec<String> = full_sweep_rows()
        .into_iter()
        .filter(|row| !row.starts_with("async"))
        .collect();
    workspace.write_source(&rows);
    fs::create_dir_all(workspace.out_dir()).expect("create out dir");

    let records = replplot::loader::load(&workspace.source_path()).expect("load");
    let job = ChartJob::RfSweep {
        metric: Metric::Throughput,
        put_ratio: 0.2,
    };
    let path = report::render_job(&records, job, &workspace.config()).expect("render");
    assert_eq!(path, workspace.out_dir().join("throughput_rf_0.2.png"));
    assert!(fs::read(&path).expect("read").starts_with(PNG_MAGIC));
}
