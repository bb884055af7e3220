//! PNG rendering of aggregated series.
//!
//! Each call owns its drawing surface from creation to `present()`, so a
//! failed chart never leaves state behind for the next one.

use std::path::{Path, PathBuf};

use plotters::prelude::*;
use thiserror::Error;

use crate::aggregate::{ModeBars, RfSeries};
use crate::config::CanvasConfig;
use crate::types::{Metric, ReplicationMode};

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("failed to render {}: {message}", path.display())]
    Render { path: PathBuf, message: String },
}

/// Shortest form that still reads as a float (`0.8`, `1.0`).
pub fn format_ratio(ratio: f64) -> String {
    format!("{ratio:?}")
}

/// `throughput_rf_0.8.png`, `p95_rf_0.2.png`, ...
pub fn rf_chart_file_name(metric: Metric, put_ratio: f64) -> String {
    format!("{}_rf_{}.png", metric.file_stem(), format_ratio(put_ratio))
}

/// `throughput_modes_0.8.png`, ...
pub fn mode_chart_file_name(metric: Metric, put_ratio: f64) -> String {
    format!("{}_modes_{}.png", metric.file_stem(), format_ratio(put_ratio))
}

/// Same colour for a mode in every chart.
fn mode_color(mode: ReplicationMode) -> RGBColor {
    match mode {
        ReplicationMode::Sync => BLUE,
        ReplicationMode::Async => RED,
        ReplicationMode::SemiSync => GREEN,
    }
}

/// Drawing helpers bubble plotters' backend errors up untyped.
type DrawResult = Result<(), Box<dyn std::error::Error>>;

fn y_upper(values: impl Iterator<Item = f64>) -> f64 {
    let max = values.fold(0.0f64, f64::max);
    if max <= 0.0 { 1.0 } else { max * 1.1 }
}

fn render_error(path: &Path, err: Box<dyn std::error::Error>) -> ChartError {
    ChartError::Render {
        path: path.to_path_buf(),
        message: err.to_string(),
    }
}

/// Draws one line per non-empty mode over rf, with raw samples scattered
/// around each mean. Overwrites `path`.
pub fn render_rf_chart(
    series: &RfSeries,
    path: &Path,
    canvas: CanvasConfig,
) -> Result<(), ChartError> {
    draw_rf_chart(series, path, canvas).map_err(|err| render_error(path, err))
}

fn draw_rf_chart(series: &RfSeries, path: &Path, canvas: CanvasConfig) -> DrawResult {
    let root = BitMapBackend::new(path, (canvas.width, canvas.height)).into_drawing_area();
    root.fill(&WHITE)?;

    let rfs = series.rf_axis();
    let (x_lo, x_hi) = match (rfs.first(), rfs.last()) {
        (Some(&lo), Some(&hi)) => (f64::from(lo) - 0.5, f64::from(hi) + 0.5),
        _ => (0.0, 1.0),
    };
    let y_hi = y_upper(series.values());

    let caption = format!(
        "{} vs RF (putRatio={})",
        series.metric.caption(),
        format_ratio(series.put_ratio)
    );
    let mut chart = ChartBuilder::on(&root)
        .caption(caption, ("sans-serif", 20))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(70)
        .build_cartesian_2d(x_lo..x_hi, 0.0f64..y_hi)?;

    chart
        .configure_mesh()
        .x_desc("RF")
        .y_desc(series.metric.axis_label())
        .x_labels(rfs.len().max(2))
        .x_label_formatter(&|x| {
            if (x - x.round()).abs() < 1e-9 {
                format!("{x:.0}")
            } else {
                String::new()
            }
        })
        .draw()?;

    let mut labelled = false;
    for mode_series in series.series.iter().filter(|s| !s.is_empty()) {
        let color = mode_color(mode_series.mode);
        let means: Vec<(f64, f64)> = mode_series
            .points
            .iter()
            .map(|point| (f64::from(point.rf), point.mean))
            .collect();

        chart
            .draw_series(LineSeries::new(means.iter().copied(), color.stroke_width(2)))?
            .label(mode_series.mode.as_str())
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color));
        chart.draw_series(
            means
                .iter()
                .map(|&(x, y)| Circle::new((x, y), 4, color.filled())),
        )?;
        chart.draw_series(mode_series.points.iter().flat_map(|point| {
            let x = f64::from(point.rf);
            point
                .samples
                .iter()
                .map(move |&sample| Circle::new((x, sample), 3, color.mix(0.4).filled()))
        }))?;
        labelled = true;
    }

    if labelled {
        chart
            .configure_series_labels()
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .draw()?;
    }

    root.present()?;
    Ok(())
}

/// Draws one bar per mode, left to right in the order of `bars`. Overwrites `path`.
pub fn render_mode_bars(
    bars: &ModeBars,
    path: &Path,
    canvas: CanvasConfig,
) -> Result<(), ChartError> {
    draw_mode_bars(bars, path, canvas).map_err(|err| render_error(path, err))
}

fn draw_mode_bars(bars: &ModeBars, path: &Path, canvas: CanvasConfig) -> DrawResult {
    let root = BitMapBackend::new(path, (canvas.width, canvas.height)).into_drawing_area();
    root.fill(&WHITE)?;

    let count = bars.bars.len();
    let x_hi = (count as f64 - 0.5).max(0.5);
    let y_hi = y_upper(bars.bars.iter().map(|bar| bar.mean));
    let names: Vec<&str> = bars.bars.iter().map(|bar| bar.mode.as_str()).collect();

    let caption = format!(
        "{} at RF={} (putRatio={})",
        bars.metric.caption(),
        bars.rf,
        format_ratio(bars.put_ratio)
    );
    let mut chart = ChartBuilder::on(&root)
        .caption(caption, ("sans-serif", 20))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(70)
        .build_cartesian_2d(-0.5f64..x_hi, 0.0f64..y_hi)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_desc("mode")
        .y_desc(bars.metric.axis_label())
        .x_labels(count.max(1))
        .x_label_formatter(&|x| {
            let idx = x.round();
            if (x - idx).abs() < 1e-9 && idx >= 0.0 {
                names.get(idx as usize).map(|name| name.to_string()).unwrap_or_default()
            } else {
                String::new()
            }
        })
        .draw()?;

    chart.draw_series(bars.bars.iter().enumerate().map(|(idx, bar)| {
        let x = idx as f64;
        Rectangle::new(
            [(x - 0.35, 0.0), (x + 0.35, bar.mean)],
            mode_color(bar.mode).mix(0.8).filled(),
        )
    }))?;

    root.present()?;
    Ok(())
}
