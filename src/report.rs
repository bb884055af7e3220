use std::fs;
use std::path::PathBuf;

use thiserror::Error;
use tracing::info;

use crate::aggregate::{self, AggregateError};
use crate::chart::{self, ChartError};
use crate::config::{PlotConfig, SweepConfig};
use crate::loader::{self, LoadError};
use crate::types::{BenchmarkRecord, Metric};

#[derive(Debug, Error)]
pub enum ReportError {
    #[error(transparent)]
    Load(#[from] LoadError),
    #[error(transparent)]
    Aggregate(#[from] AggregateError),
    #[error(transparent)]
    Chart(#[from] ChartError),
    #[error("cannot prepare output directory: {0}")]
    Io(#[from] std::io::Error),
}

/// A single chart the report produces.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ChartJob {
    /// `metric` against rf, one line per line mode.
    RfSweep { metric: Metric, put_ratio: f64 },
    /// Bar metric per bar mode at the pinned rf.
    ModeBars { metric: Metric, put_ratio: f64 },
}

impl ChartJob {
    pub fn file_name(&self) -> String {
        match *self {
            ChartJob::RfSweep { metric, put_ratio } => chart::rf_chart_file_name(metric, put_ratio),
            ChartJob::ModeBars { metric, put_ratio } => {
                chart::mode_chart_file_name(metric, put_ratio)
            }
        }
    }
}

/// Charts in the order they are rendered: each line metric across every put
/// ratio, then the bar charts.
pub fn plan(sweep: &SweepConfig) -> Vec<ChartJob> {
    let lines = sweep.line_metrics.iter().flat_map(|&metric| {
        sweep
            .put_ratios
            .iter()
            .map(move |&put_ratio| ChartJob::RfSweep { metric, put_ratio })
    });
    let bars = sweep.put_ratios.iter().map(|&put_ratio| ChartJob::ModeBars {
        metric: sweep.bar_metric,
        put_ratio,
    });
    lines.chain(bars).collect()
}

/// Aggregates and renders one chart into the output directory.
pub fn render_job(
    records: &[BenchmarkRecord],
    job: ChartJob,
    config: &PlotConfig,
) -> Result<PathBuf, ReportError> {
    let path = config.output_dir.join(job.file_name());
    match job {
        ChartJob::RfSweep { metric, put_ratio } => {
            let series = aggregate::group_by_rf_and_mode(
                records,
                put_ratio,
                metric,
                &config.sweep.line_modes,
            )?;
            chart::render_rf_chart(&series, &path, config.canvas)?;
        }
        ChartJob::ModeBars { metric, put_ratio } => {
            let bars = aggregate::group_by_mode_fixed_rf(
                records,
                put_ratio,
                config.sweep.bar_rf,
                &config.sweep.bar_modes,
                metric,
            )?;
            chart::render_mode_bars(&bars, &path, config.canvas)?;
        }
    }
    info!(path = %path.display(), "wrote chart");
    Ok(path)
}

/// Loads the source once and renders every planned chart in sequence.
///
/// Stops at the first failure; charts written before it stay on disk.
pub fn run(config: &PlotConfig) -> Result<Vec<PathBuf>, ReportError> {
    let records = loader::load(&config.source_path)?;
    fs::create_dir_all(&config.output_dir)?;

    let jobs = plan(&config.sweep);
    let mut written = Vec::with_capacity(jobs.len());
    for job in jobs {
        written.push(render_job(&records, job, config)?);
    }
    Ok(written)
}
