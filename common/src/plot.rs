use std::{
    fs,
    path::{Path, PathBuf},
};

use eyre::{Context, ContextCompat, Result, bail};
use plotters::prelude::*;
use serde::Serialize;
use tracing::debug;

/// A single-series bar chart with one categorical label per bar
#[derive(Debug, Clone)]
pub struct BarChart<'a> {
    pub filepath: PathBuf,
    pub title: &'a str,
    pub x_label: &'a str,
    pub y_label: &'a str,
    pub legend: &'a str,
    pub labels: Vec<String>,
    pub values: Vec<f64>,
    /// Width of each bar, in units of the spacing between bars
    pub bar_width: f64,
    pub size: (u32, u32),
}

/// Evenly spaced bar centres `1..=n`
pub fn bar_positions(n: usize) -> Vec<f64> {
    (1..=n).map(|x| x as f64).collect()
}

/// Maps an x-axis key point back to the label of the bar at that position.
/// Key points that fall between bars get no label.
pub fn tick_label(x: f64, labels: &[String]) -> String {
    let idx = x.round();
    if (x - idx).abs() > 1e-6 || idx < 1.0 {
        return String::new();
    }
    labels.get(idx as usize - 1).cloned().unwrap_or_default()
}

fn y_max(values: &[f64]) -> f64 {
    let max = values.iter().copied().fold(0.0_f64, f64::max);
    if max > 0.0 { max * 1.1 } else { 1.0 }
}

fn ensure_parent(filepath: &Path) -> Result<()> {
    if let Some(parent) = filepath.parent()
        && !parent.as_os_str().is_empty()
        && !parent.exists()
    {
        fs::create_dir_all(parent)?;
    }
    Ok(())
}

pub fn render_bar_chart(chart: &BarChart<'_>) -> Result<()> {
    if chart.values.is_empty() {
        bail!("No bars to draw for {}", chart.filepath.display());
    }
    if chart.labels.len() != chart.values.len() {
        bail!(
            "Got {} labels for {} bars in {}",
            chart.labels.len(),
            chart.values.len(),
            chart.filepath.display()
        );
    }
    ensure_parent(&chart.filepath)?;

    let n = chart.values.len();
    debug!("Drawing {n} bars to {}", chart.filepath.display());

    let root = SVGBackend::new(&chart.filepath, chart.size).into_drawing_area();
    root.fill(&WHITE)?;

    let mut ctx = ChartBuilder::on(&root)
        .caption(chart.title, ("sans-serif", 20).into_font())
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(0.5f64..n as f64 + 0.5, 0f64..y_max(&chart.values))?;

    let labels = &chart.labels;
    ctx.configure_mesh()
        .disable_x_mesh()
        .x_desc(chart.x_label)
        .y_desc(chart.y_label)
        .x_labels(n)
        .x_label_formatter(&|x| tick_label(*x, labels))
        .y_label_formatter(&|y| format!("{y:.0}"))
        .draw()?;

    let half = chart.bar_width / 2.0;
    ctx.draw_series(
        bar_positions(n)
            .into_iter()
            .zip(chart.values.iter())
            .map(|(x, value)| Rectangle::new([(x - half, 0.0), (x + half, *value)], BLUE.filled())),
    )?
    .label(chart.legend)
    .legend(|(x, y)| Rectangle::new([(x, y - 5), (x + 10, y + 5)], BLUE.filled()));

    ctx.configure_series_labels()
        .position(SeriesLabelPosition::UpperLeft)
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()?;

    root.present()
        .with_context(|| format!("Write plot {}", chart.filepath.display()))?;
    Ok(())
}

/// Writes `data` as JSON to `plot_data/<stem>.json` next to `filepath`
pub fn write_plot_data<T: Serialize>(data: &T, filepath: &Path) -> Result<PathBuf> {
    let stem = filepath
        .file_stem()
        .and_then(|s| s.to_str())
        .with_context(|| format!("Invalid plot filepath: {filepath:?}"))?;
    let plot_data_dir = match filepath.parent() {
        Some(parent) => parent.join("plot_data"),
        None => PathBuf::from("plot_data"),
    };
    if !plot_data_dir.exists() {
        fs::create_dir_all(&plot_data_dir)?;
    }
    let path = plot_data_dir.join(format!("{stem}.json"));
    fs::write(&path, serde_json::to_string(data)?)?;
    Ok(path)
}
