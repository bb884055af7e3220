//! Reads the benchmark results file into [`BenchmarkRecord`]s.
//!
//! The header row names the columns; only the required set is decoded; any
//! other column travels along in [`BenchmarkRecord::extra`].

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use csv::{ReaderBuilder, StringRecord, Trim};
use thiserror::Error;
use tracing::{debug, info};

use crate::types::{BenchmarkRecord, Metric, ReplicationMode};

const PUT_RATIO: &str = "putRatio";
const RF: &str = "rf";
const REPLICATION_MODE: &str = "replicationMode";
const THROUGHPUT: &str = Metric::Throughput.column();
const P95: &str = Metric::P95Latency.column();

/// Errors surfaced while reading the results file.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("cannot open results file {}: {source}", path.display())]
    SourceNotFound {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("results file has no data rows")]
    EmptyDataset,
    #[error("results file is missing required column `{0}`")]
    MissingColumn(&'static str),
    #[error("malformed row at line {line}: column `{column}` has invalid value `{value}`")]
    MalformedRow {
        line: u64,
        column: &'static str,
        value: String,
    },
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
}

/// Opens `path` and parses it. The handle is closed before returning.
pub fn load(path: &Path) -> Result<Vec<BenchmarkRecord>, LoadError> {
    let file = File::open(path).map_err(|source| LoadError::SourceNotFound {
        path: path.to_path_buf(),
        source,
    })?;
    let records = parse(file)?;
    info!(path = %path.display(), records = records.len(), "loaded benchmark results");
    Ok(records)
}

/// Parses delimited results with a header row, preserving row order.
pub fn parse<R: Read>(source: R) -> Result<Vec<BenchmarkRecord>, LoadError> {
    let mut reader = ReaderBuilder::new().trim(Trim::All).from_reader(source);
    let headers = reader.headers()?.clone();
    if headers.is_empty() {
        return Err(LoadError::EmptyDataset);
    }
    let columns = ColumnIndex::resolve(&headers)?;
    debug!(columns = headers.len(), "resolved results header");

    let mut records = Vec::new();
    for row in reader.records() {
        let row = row?;
        records.push(columns.decode(&headers, &row)?);
    }

    if records.is_empty() {
        return Err(LoadError::EmptyDataset);
    }
    Ok(records)
}

/// Positions of the required columns within the header row.
struct ColumnIndex {
    put_ratio: usize,
    rf: usize,
    replication_mode: usize,
    throughput: usize,
    p95: usize,
}

impl ColumnIndex {
    fn resolve(headers: &StringRecord) -> Result<Self, LoadError> {
        let find = |name: &'static str| {
            headers
                .iter()
                .position(|header| header == name)
                .ok_or(LoadError::MissingColumn(name))
        };
        Ok(Self {
            put_ratio: find(PUT_RATIO)?,
            rf: find(RF)?,
            replication_mode: find(REPLICATION_MODE)?,
            throughput: find(THROUGHPUT)?,
            p95: find(P95)?,
        })
    }

    fn is_required(&self, idx: usize) -> bool {
        [
            self.put_ratio,
            self.rf,
            self.replication_mode,
            self.throughput,
            self.p95,
        ]
        .contains(&idx)
    }

    fn decode(
        &self,
        headers: &StringRecord,
        row: &StringRecord,
    ) -> Result<BenchmarkRecord, LoadError> {
        let line = row.position().map(|pos| pos.line()).unwrap_or_default();
        let field = |idx: usize| row.get(idx).unwrap_or_default();

        let put_ratio = parse_number(field(self.put_ratio), line, PUT_RATIO)?;
        let mode_raw = field(self.replication_mode);
        let replication_mode = mode_raw
            .parse::<ReplicationMode>()
            .map_err(|_| malformed(line, REPLICATION_MODE, mode_raw))?;
        let rf_raw = field(self.rf);
        let rf = rf_raw
            .parse::<u32>()
            .map_err(|_| malformed(line, RF, rf_raw))?;

        let extra = headers
            .iter()
            .enumerate()
            .filter(|(idx, _)| !self.is_required(*idx))
            .map(|(idx, name)| (name.to_string(), field(idx).to_string()))
            .collect();

        Ok(BenchmarkRecord {
            put_ratio,
            rf,
            replication_mode,
            throughput_ops_sec: parse_number(field(self.throughput), line, THROUGHPUT)?,
            p95_ms: parse_number(field(self.p95), line, P95)?,
            extra,
        })
    }
}

fn parse_number(raw: &str, line: u64, column: &'static str) -> Result<f64, LoadError> {
    raw.parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .ok_or_else(|| malformed(line, column, raw))
}

fn malformed(line: u64, column: &'static str, value: &str) -> LoadError {
    LoadError::MalformedRow {
        line,
        column,
        value: value.to_string(),
    }
}
