//! Charts for replication benchmark results.
//!
//! Results rows are loaded once ([`loader`]), grouped into per-mode series
//! ([`aggregate`]) and drawn to PNG ([`chart`]); [`report`] runs that
//! pipeline over the fixed experiment sweep.

pub mod aggregate;
pub mod chart;
pub mod config;
pub mod loader;
pub mod report;
pub mod types;

pub use aggregate::{
    AggregateError, ModeBar, ModeBars, ModeSeries, RfPoint, RfSeries, group_by_mode_fixed_rf,
    group_by_rf_and_mode,
};
pub use chart::ChartError;
pub use config::{CanvasConfig, PlotConfig, SweepConfig};
pub use loader::LoadError;
pub use report::{ChartJob, ReportError};
pub use types::{BenchmarkRecord, Metric, ReplicationMode};
