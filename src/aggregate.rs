//! Groups benchmark records into chartable series.
//!
//! Everything here is a pure function of the loaded records; nothing touches
//! the rendering backend, so the grouping rules can be tested on their own.

use std::collections::{BTreeMap, BTreeSet};

use thiserror::Error;
use tracing::{debug, warn};

use crate::types::{BenchmarkRecord, Metric, ReplicationMode};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AggregateError {
    #[error("no {mode} samples at rf={rf}")]
    EmptyGroup { mode: ReplicationMode, rf: u32 },
}

/// Mean and raw samples of one (mode, rf) group.
#[derive(Debug, Clone, PartialEq)]
pub struct RfPoint {
    pub rf: u32,
    pub mean: f64,
    pub samples: Vec<f64>,
}

/// Points for a single mode, rf ascending. Empty when the mode had no records.
#[derive(Debug, Clone, PartialEq)]
pub struct ModeSeries {
    pub mode: ReplicationMode,
    pub points: Vec<RfPoint>,
}

impl ModeSeries {
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn rfs(&self) -> Vec<u32> {
        self.points.iter().map(|point| point.rf).collect()
    }

    pub fn means(&self) -> Vec<f64> {
        self.points.iter().map(|point| point.mean).collect()
    }
}

/// Per-mode series of `metric` against rf for one put ratio.
#[derive(Debug, Clone, PartialEq)]
pub struct RfSeries {
    pub metric: Metric,
    pub put_ratio: f64,
    /// One entry per requested mode, in request order.
    pub series: Vec<ModeSeries>,
}

impl RfSeries {
    pub fn mode(&self, mode: ReplicationMode) -> Option<&ModeSeries> {
        self.series.iter().find(|series| series.mode == mode)
    }

    /// Every rf present in any series, ascending.
    pub fn rf_axis(&self) -> Vec<u32> {
        self.series
            .iter()
            .flat_map(|series| series.points.iter().map(|point| point.rf))
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Every mean and raw sample, for axis scaling.
    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        self.series
            .iter()
            .flat_map(|series| series.points.iter())
            .flat_map(|point| std::iter::once(point.mean).chain(point.samples.iter().copied()))
    }
}

/// Mean of `metric` for one mode at a pinned rf.
#[derive(Debug, Clone, PartialEq)]
pub struct ModeBar {
    pub mode: ReplicationMode,
    pub mean: f64,
    pub samples: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ModeBars {
    pub metric: Metric,
    pub put_ratio: f64,
    pub rf: u32,
    /// One bar per requested mode, in request order.
    pub bars: Vec<ModeBar>,
}

/// Unweighted arithmetic mean; `None` for an empty slice.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Groups records matching `put_ratio` by mode and rf.
///
/// `put_ratio` is compared with `==`, so it must be the same value the
/// harness wrote. The rf axis is shared by all modes: a mode that has
/// records for this put ratio must have them at every rf any requested mode
/// reached, otherwise the gap is reported as [`AggregateError::EmptyGroup`].
/// A mode with no records at all yields an empty series.
pub fn group_by_rf_and_mode(
    records: &[BenchmarkRecord],
    put_ratio: f64,
    metric: Metric,
    modes: &[ReplicationMode],
) -> Result<RfSeries, AggregateError> {
    let matching: Vec<&BenchmarkRecord> = records
        .iter()
        .filter(|record| {
            record.put_ratio == put_ratio && modes.contains(&record.replication_mode)
        })
        .collect();
    let rf_axis: BTreeSet<u32> = matching.iter().map(|record| record.rf).collect();

    let mut series = Vec::with_capacity(modes.len());
    for &mode in modes {
        let mut by_rf: BTreeMap<u32, Vec<f64>> = BTreeMap::new();
        for record in matching.iter().filter(|record| record.replication_mode == mode) {
            by_rf.entry(record.rf).or_default().push(record.metric(metric));
        }

        if by_rf.is_empty() {
            warn!(%mode, put_ratio, %metric, "no records for mode; series left empty");
            series.push(ModeSeries {
                mode,
                points: Vec::new(),
            });
            continue;
        }

        let mut points = Vec::with_capacity(rf_axis.len());
        for &rf in &rf_axis {
            let samples = by_rf.remove(&rf).unwrap_or_default();
            let mean = mean(&samples).ok_or(AggregateError::EmptyGroup { mode, rf })?;
            debug!(%mode, rf, samples = samples.len(), mean, "aggregated group");
            points.push(RfPoint { rf, mean, samples });
        }
        series.push(ModeSeries { mode, points });
    }

    Ok(RfSeries {
        metric,
        put_ratio,
        series,
    })
}

/// Mean of `metric` per mode at a fixed `put_ratio` and `rf`, in `mode_order`.
pub fn group_by_mode_fixed_rf(
    records: &[BenchmarkRecord],
    put_ratio: f64,
    rf: u32,
    mode_order: &[ReplicationMode],
    metric: Metric,
) -> Result<ModeBars, AggregateError> {
    let matching: Vec<&BenchmarkRecord> = records
        .iter()
        .filter(|record| record.put_ratio == put_ratio && record.rf == rf)
        .collect();

    let bars = mode_order
        .iter()
        .map(|&mode| {
            let samples: Vec<f64> = matching
                .iter()
                .filter(|record| record.replication_mode == mode)
                .map(|record| record.metric(metric))
                .collect();
            let mean = mean(&samples).ok_or(AggregateError::EmptyGroup { mode, rf })?;
            debug!(%mode, rf, samples = samples.len(), mean, "aggregated bar");
            Ok(ModeBar {
                mode,
                mean,
                samples,
            })
        })
        .collect::<Result<Vec<_>, AggregateError>>()?;

    Ok(ModeBars {
        metric,
        put_ratio,
        rf,
        bars,
    })
}
