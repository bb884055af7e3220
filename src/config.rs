use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::types::{Metric, ReplicationMode};

/// Run-wide configuration threaded through load, aggregation and rendering.
///
/// Replaces any notion of a shared output directory or canvas: every stage
/// receives what it needs from here explicitly.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlotConfig {
    /// Benchmark results file (`results.csv`).
    pub source_path: PathBuf,
    /// Directory the chart images are written into.
    pub output_dir: PathBuf,
    /// Parameter sweep that decides which charts are produced.
    pub sweep: SweepConfig,
    /// Pixel dimensions of every chart.
    pub canvas: CanvasConfig,
}

impl PlotConfig {
    pub fn new(source_path: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            source_path: source_path.into(),
            output_dir: output_dir.into(),
            sweep: SweepConfig::default(),
            canvas: CanvasConfig::default(),
        }
    }

    pub fn with_sweep(mut self, sweep: SweepConfig) -> Self {
        self.sweep = sweep;
        self
    }

    pub fn with_canvas(mut self, canvas: CanvasConfig) -> Self {
        self.canvas = canvas;
        self
    }
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self::new("benchmarks/results.csv", "benchmarks")
    }
}

/// Fixed experiment grid the charts are drawn over.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SweepConfig {
    /// Put ratios compared; matched against the source by exact float equality.
    pub put_ratios: Vec<f64>,
    /// Metrics that get an rf line chart per put ratio.
    pub line_metrics: Vec<Metric>,
    /// Modes drawn as lines, in legend order.
    pub line_modes: Vec<ReplicationMode>,
    /// Replication factor the mode bar chart is pinned to.
    pub bar_rf: u32,
    /// Modes drawn as bars, left to right.
    pub bar_modes: Vec<ReplicationMode>,
    pub bar_metric: Metric,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            put_ratios: vec![0.8, 0.2],
            line_metrics: vec![Metric::Throughput, Metric::P95Latency],
            line_modes: vec![ReplicationMode::Sync, ReplicationMode::Async],
            bar_rf: 3,
            bar_modes: vec![
                ReplicationMode::Async,
                ReplicationMode::SemiSync,
                ReplicationMode::Sync,
            ],
            bar_metric: Metric::Throughput,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct CanvasConfig {
    pub width: u32,
    pub height: u32,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            width: 1200,
            height: 700,
        }
    }
}
