use std::path::{Path, PathBuf};

use common::{
    config::PlotSettings,
    plot::{BarChart, render_bar_chart, write_plot_data},
};
use eyre::Result;
use itertools::Itertools;
use serde::Serialize;
use slog_tpcc::result::Throughput;
use tracing::{debug, info};

/// Bar chart of average TPS per run, labelled by client count
#[derive(Debug, Clone)]
pub struct TpsBasic {
    pub settings: PlotSettings,
}

#[derive(Debug, Serialize)]
struct PlotData<'a> {
    labels: &'a [String],
    avg_tps: &'a [u64],
}

impl TpsBasic {
    pub fn new(settings: PlotSettings) -> Self {
        Self { settings }
    }

    pub fn chart(&self, throughput: &Throughput, filepath: PathBuf) -> BarChart<'_> {
        BarChart {
            filepath,
            title: &self.settings.title,
            x_label: &self.settings.x_label,
            y_label: &self.settings.y_label,
            legend: &self.settings.legend,
            labels: throughput.clients.iter().map(|x| x.to_string()).collect(),
            values: throughput.avg_tps.iter().map(|x| *x as f64).collect(),
            bar_width: self.settings.bar_width,
            size: (self.settings.width, self.settings.height),
        }
    }

    /// Renders `throughput` to [`PlotSettings::output`], resolved against
    /// `plot_path`, and returns the written file
    pub fn plot(&self, throughput: &Throughput, plot_path: &Path) -> Result<PathBuf> {
        throughput.validate()?;
        let filepath = plot_path.join(&self.settings.output);
        debug!(
            "Plotting clients [{}]",
            throughput.clients.iter().join(", ")
        );

        let chart = self.chart(throughput, filepath.clone());
        render_bar_chart(&chart)?;

        if self.settings.plot_data {
            let data_file = write_plot_data(
                &PlotData {
                    labels: &chart.labels,
                    avg_tps: &throughput.avg_tps,
                },
                &filepath,
            )?;
            debug!("Plot data written to {}", data_file.display());
        }
        info!("Wrote {}", filepath.display());
        Ok(filepath)
    }
}
