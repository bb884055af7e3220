use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Write-propagation strategy used by a benchmark run.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "kebab-case")]
pub enum ReplicationMode {
    Sync,
    Async,
    SemiSync,
}

impl ReplicationMode {
    pub const ALL: [ReplicationMode; 3] = [
        ReplicationMode::Sync,
        ReplicationMode::Async,
        ReplicationMode::SemiSync,
    ];

    /// Wire form as written by the benchmark harness.
    pub fn as_str(self) -> &'static str {
        match self {
            ReplicationMode::Sync => "sync",
            ReplicationMode::Async => "async",
            ReplicationMode::SemiSync => "semi-sync",
        }
    }
}

impl fmt::Display for ReplicationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown replication mode `{0}`")]
pub struct UnknownReplicationMode(pub String);

impl FromStr for ReplicationMode {
    type Err = UnknownReplicationMode;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "sync" => Ok(ReplicationMode::Sync),
            "async" => Ok(ReplicationMode::Async),
            "semi-sync" | "semi_sync" => Ok(ReplicationMode::SemiSync),
            _ => Err(UnknownReplicationMode(value.to_string())),
        }
    }
}

/// Measured quantity a chart is drawn for.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    Throughput,
    P95Latency,
}

impl Metric {
    /// Header of the results column holding this metric.
    pub const fn column(self) -> &'static str {
        match self {
            Metric::Throughput => "throughputOpsSec",
            Metric::P95Latency => "p95Ms",
        }
    }

    /// Prefix used in chart file names.
    pub fn file_stem(self) -> &'static str {
        match self {
            Metric::Throughput => "throughput",
            Metric::P95Latency => "p95",
        }
    }

    pub fn axis_label(self) -> &'static str {
        match self {
            Metric::Throughput => "ops/sec",
            Metric::P95Latency => "p95 ms",
        }
    }

    pub fn caption(self) -> &'static str {
        match self {
            Metric::Throughput => "throughput",
            Metric::P95Latency => "p95 latency",
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.file_stem())
    }
}

/// One row of the benchmark results file.
#[derive(Debug, Clone, PartialEq)]
pub struct BenchmarkRecord {
    pub put_ratio: f64,
    pub rf: u32,
    pub replication_mode: ReplicationMode,
    pub throughput_ops_sec: f64,
    pub p95_ms: f64,
    /// Columns outside the required set, as `(header, value)` in header order.
    pub extra: Vec<(String, String)>,
}

impl BenchmarkRecord {
    pub fn new(
        put_ratio: f64,
        rf: u32,
        replication_mode: ReplicationMode,
        throughput_ops_sec: f64,
        p95_ms: f64,
    ) -> Self {
        Self {
            put_ratio,
            rf,
            replication_mode,
            throughput_ops_sec,
            p95_ms,
            extra: Vec::new(),
        }
    }

    pub fn metric(&self, metric: Metric) -> f64 {
        match metric {
            Metric::Throughput => self.throughput_ops_sec,
            Metric::P95Latency => self.p95_ms,
        }
    }

    /// Raw value of a non-required column, if the source carried it.
    pub fn extra(&self, column: &str) -> Option<&str> {
        self.extra
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, value)| value.as_str())
    }
}
