/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! PNG charts of the analysis results
//!
//! The charts mirror the figures of the study: cluster-size histograms,
//! point defects versus PKA energy, cluster production on log-log axes and
//! the binned PKA spectrum.

pub mod errors;

pub use errors::{PlotError, Result};

use crate::defects::ProductionDistribution;
use crate::spectrum::SpectrumTable;
use plotters::prelude::*;
use std::path::Path;

const SIZE: (u32, u32) = (1200, 900);
const FONT: &str = "serif";

type DrawResult = std::result::Result<(), Box<dyn std::error::Error>>;

fn drawing(result: DrawResult) -> Result<()> {
    result.map_err(|e| PlotError::Drawing(e.to_string()))
}

/// Upper bound of a value axis with some headroom
fn headroom(max: f64) -> f64 {
    if max > 0.0 {
        max * 1.1
    } else {
        1.0
    }
}

/// Decade-aligned bounds enclosing all positive values
fn log_bounds(values: impl Iterator<Item = f64>) -> Option<(f64, f64)> {
    let (lo, hi) = values
        .filter(|v| *v > 0.0 && v.is_finite())
        .fold((f64::INFINITY, 0.0_f64), |(lo, hi), v| (lo.min(v), hi.max(v)));
    if hi <= 0.0 {
        return None;
    }
    Some((
        10f64.powf(lo.log10().floor()),
        10f64.powf(hi.log10().ceil().max(lo.log10().floor() + 1.0)),
    ))
}

/// Bar chart of clusters per point defect by cluster size
pub fn plot_cluster_histogram<P: AsRef<Path>>(
    path: P,
    distribution: &ProductionDistribution,
    label: &str,
) -> Result<()> {
    let max_size = distribution
        .entries
        .iter()
        .map(|e| e.size)
        .max()
        .ok_or_else(|| PlotError::NoData("empty production distribution".to_string()))?;
    let y_max = headroom(distribution.numbers().into_iter().fold(0.0, f64::max));
    drawing(draw_cluster_histogram(
        path.as_ref(),
        distribution,
        label,
        max_size,
        y_max,
    ))
}

fn draw_cluster_histogram(
    path: &Path,
    distribution: &ProductionDistribution,
    label: &str,
    max_size: usize,
    y_max: f64,
) -> DrawResult {
    let root = BitMapBackend::new(path, SIZE).into_drawing_area();
    root.fill(&WHITE)?;
    let mut chart = ChartBuilder::on(&root)
        .margin(20)
        .x_label_area_size(60)
        .y_label_area_size(90)
        .build_cartesian_2d(0.5f64..max_size as f64 + 0.5, 0f64..y_max)?;
    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_desc("Cluster size")
        .y_desc("Number of cluster")
        .label_style((FONT, 20))
        .draw()?;
    chart
        .draw_series(distribution.entries.iter().map(|e| {
            let x = e.size as f64;
            Rectangle::new([(x - 0.45, 0.0), (x + 0.45, e.number)], BLUE.filled())
        }))?
        .label(label)
        .legend(|(x, y)| Rectangle::new([(x, y - 5), (x + 15, y + 5)], BLUE.filled()));
    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperRight)
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .label_font((FONT, 18))
        .draw()?;
    root.present()?;
    Ok(())
}

/// Point defects per cascade against PKA energy on a logarithmic energy axis
pub fn plot_point_defects<P: AsRef<Path>>(path: P, points: &[(f64, f64)]) -> Result<()> {
    let mut points: Vec<(f64, f64)> = points.iter().copied().filter(|p| p.0 > 0.0).collect();
    points.sort_by(|a, b| a.0.total_cmp(&b.0));
    let (x_lo, x_hi) = log_bounds(points.iter().map(|p| p.0))
        .ok_or_else(|| PlotError::NoData("no positive PKA energies".to_string()))?;
    let y_max = headroom(points.iter().map(|p| p.1).fold(0.0, f64::max));
    drawing(draw_point_defects(path.as_ref(), &points, (x_lo, x_hi), y_max))
}

fn draw_point_defects(
    path: &Path,
    points: &[(f64, f64)],
    (x_lo, x_hi): (f64, f64),
    y_max: f64,
) -> DrawResult {
    let root = BitMapBackend::new(path, SIZE).into_drawing_area();
    root.fill(&WHITE)?;
    let mut chart = ChartBuilder::on(&root)
        .margin(20)
        .x_label_area_size(60)
        .y_label_area_size(90)
        .build_cartesian_2d((x_lo..x_hi).log_scale(), 0f64..y_max)?;
    chart
        .configure_mesh()
        .x_desc("PKA energy (keV)")
        .y_desc("Number of point defects")
        .label_style((FONT, 20))
        .draw()?;
    chart.draw_series(LineSeries::new(points.iter().copied(), RED.stroke_width(4)))?;
    chart.draw_series(points.iter().map(|&p| Circle::new(p, 5, RED.filled())))?;
    root.present()?;
    Ok(())
}

/// Several production distributions as markers on log-log axes
pub fn plot_cluster_production<P: AsRef<Path>>(
    path: P,
    series: &[(String, ProductionDistribution)],
) -> Result<()> {
    let all = || {
        series
            .iter()
            .flat_map(|(_, d)| d.entries.iter().map(|e| (e.size as f64, e.number)))
    };
    let (x_lo, x_hi) = log_bounds(all().map(|p| p.0))
        .ok_or_else(|| PlotError::NoData("no cluster sizes".to_string()))?;
    let (y_lo, y_hi) = log_bounds(all().map(|p| p.1))
        .ok_or_else(|| PlotError::NoData("no positive proportions".to_string()))?;
    drawing(draw_cluster_production(
        path.as_ref(),
        series,
        (x_lo, x_hi),
        (y_lo, y_hi),
    ))
}

fn draw_cluster_production(
    path: &Path,
    series: &[(String, ProductionDistribution)],
    (x_lo, x_hi): (f64, f64),
    (y_lo, y_hi): (f64, f64),
) -> DrawResult {
    let root = BitMapBackend::new(path, SIZE).into_drawing_area();
    root.fill(&WHITE)?;
    let mut chart = ChartBuilder::on(&root)
        .margin(20)
        .x_label_area_size(60)
        .y_label_area_size(90)
        .build_cartesian_2d((x_lo..x_hi).log_scale(), (y_lo..y_hi).log_scale())?;
    chart
        .configure_mesh()
        .x_desc("Cluster size")
        .y_desc("Proportion")
        .label_style((FONT, 20))
        .draw()?;
    for (index, (name, distribution)) in series.iter().enumerate() {
        let color = Palette99::pick(index).to_rgba();
        chart
            .draw_series(
                distribution
                    .entries
                    .iter()
                    .filter(|e| e.number > 0.0)
                    .map(move |e| {
                        Circle::new((e.size as f64, e.number), 5, color.stroke_width(2))
                    }),
            )?
            .label(name.as_str())
            .legend(move |(x, y)| Circle::new((x + 8, y), 5, color.stroke_width(2)));
    }
    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperRight)
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .label_font((FONT, 18))
        .draw()?;
    root.present()?;
    Ok(())
}

/// Grouped bar chart of binned spectra, one bar group per energy bin
pub fn plot_spectrum_histogram<P: AsRef<Path>>(
    path: P,
    series: &[(String, &SpectrumTable)],
) -> Result<()> {
    let bins = series
        .iter()
        .map(|(_, t)| t.bins.len())
        .max()
        .filter(|&n| n > 0)
        .ok_or_else(|| PlotError::NoData("no spectrum bins".to_string()))?;
    let y_max = headroom(
        series
            .iter()
            .flat_map(|(_, t)| t.proportions())
            .fold(0.0, f64::max),
    );
    drawing(draw_spectrum_histogram(path.as_ref(), series, bins, y_max))
}

fn draw_spectrum_histogram(
    path: &Path,
    series: &[(String, &SpectrumTable)],
    bins: usize,
    y_max: f64,
) -> DrawResult {
    let width = 0.8 / series.len() as f64;
    let root = BitMapBackend::new(path, SIZE).into_drawing_area();
    root.fill(&WHITE)?;
    let mut chart = ChartBuilder::on(&root)
        .margin(20)
        .x_label_area_size(60)
        .y_label_area_size(90)
        .build_cartesian_2d(0f64..bins as f64, 0f64..y_max)?;
    let medians: Vec<f64> = series[0].1.bins.iter().map(|b| b.median).collect();
    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_desc("PKA energy (keV)")
        .y_desc("Proportion")
        .x_label_formatter(&|x| {
            medians
                .get(x.floor() as usize)
                .map(|m| format!("{:.3}", m))
                .unwrap_or_default()
        })
        .label_style((FONT, 18))
        .draw()?;
    for (k, (name, table)) in series.iter().enumerate() {
        let color = Palette99::pick(k).to_rgba();
        let offset = 0.1 + k as f64 * width;
        chart
            .draw_series(table.bins.iter().enumerate().map(move |(i, b)| {
                let x = i as f64 + offset;
                Rectangle::new([(x, 0.0), (x + width, b.proportion)], color.filled())
            }))?
            .label(name.as_str())
            .legend(move |(x, y)| {
                Rectangle::new([(x, y - 5), (x + 15, y + 5)], color.filled())
            });
    }
    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperRight)
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .label_font((FONT, 18))
        .draw()?;
    root.present()?;
    Ok(())
}
