use std::path::{Path, PathBuf};

use eyre::{Context, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub name: String,
    /// Run directory names under [`Settings::data_dir`], in plotting order.
    /// `None` selects the built-in client-count sweep.
    pub runs: Option<Vec<String>>,
    pub settings: Settings,
    pub plot: PlotSettings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Relative paths are resolved against the working directory
    pub data_dir: PathBuf,
    pub log_file: String,
    pub run_filter: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlotSettings {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub legend: String,
    pub bar_width: f64,
    pub output: PathBuf,
    pub width: u32,
    pub height: u32,
    /// Also dump the plotted series to `plot_data/<stem>.json`
    pub plot_data: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            name: "tpcc_mh_0_t64".to_owned(),
            runs: None,
            settings: Settings::default(),
            plot: PlotSettings::default(),
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            log_file: "log_mh_0".to_owned(),
            run_filter: r"_c(\d+)$".to_owned(),
        }
    }
}

impl Default for PlotSettings {
    fn default() -> Self {
        Self {
            title: "SLOG TPC-C 50% Multi-home".to_owned(),
            x_label: "clients num".to_owned(),
            y_label: "TPS".to_owned(),
            legend: "TPS".to_owned(),
            bar_width: 0.35,
            output: PathBuf::from("test.svg"),
            width: 640,
            height: 480,
            plot_data: false,
        }
    }
}

impl Config {
    pub fn from_yaml(data: &str) -> Result<Self> {
        serde_yml::from_str(data).context("Parse config yaml")
    }

    pub fn load(path: &Path) -> Result<Self> {
        let data = std::fs::read_to_string(path)
            .with_context(|| format!("Read config file {}", path.display()))?;
        Self::from_yaml(&data)
    }
}
