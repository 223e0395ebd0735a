use std::path::{Path, PathBuf};

use common::config::Config;
use eyre::{Context, Result};
use slog_tpcc::{
    collect_throughput, has_log,
    result::Throughput,
    run::{DEFAULT_RUNS, RunDir, RunFilter, run_dirs},
    scan_run,
};
use tps_basic::TpsBasic;
use tracing::debug;

fn current_dir() -> Result<PathBuf> {
    std::env::current_dir().context("Get working directory")
}

fn runs(config: &Config, cwd: &Path) -> Vec<RunDir> {
    let data_path = cwd.join(&config.settings.data_dir);
    match &config.runs {
        Some(names) => run_dirs(&data_path, names.as_slice()),
        None => run_dirs(&data_path, DEFAULT_RUNS),
    }
}

async fn collect(config: &Config, cwd: &Path) -> Result<Throughput> {
    let filter = RunFilter::new(&config.settings.run_filter)?;
    let runs = runs(config, cwd);
    debug!("Scanning {} runs for {}", runs.len(), config.name);
    collect_throughput(&runs, &config.settings.log_file, &filter).await
}

pub async fn plot(config: &Config) -> Result<PathBuf> {
    plot_in(config, &current_dir()?).await
}

async fn plot_in(config: &Config, cwd: &Path) -> Result<PathBuf> {
    let throughput = collect(config, cwd).await?;
    TpsBasic::new(config.plot.clone()).plot(&throughput, cwd)
}

pub async fn print_throughput(config: &Config) -> Result<()> {
    let throughput = collect(config, &current_dir()?).await?;
    println!("{}", serde_json::to_string_pretty(&throughput)?);
    Ok(())
}

pub async fn list_runs(config: &Config) -> Result<()> {
    for (run, status) in run_status(config, &current_dir()?).await? {
        println!("{} -> {status}", run.name);
    }
    Ok(())
}

/// One line per run. Failures are reported per run and never abort the listing.
async fn run_status(config: &Config, cwd: &Path) -> Result<Vec<(RunDir, String)>> {
    let filter = RunFilter::new(&config.settings.run_filter)?;
    let log_file = &config.settings.log_file;
    let mut results = Vec::new();
    for run in runs(config, cwd) {
        let status = if !filter.accepts(&run) {
            "skipped".to_owned()
        } else if !has_log(&run, log_file) {
            format!("missing {log_file}")
        } else {
            match scan_run(&run, log_file, &filter).await {
                Ok(metrics) => format!(
                    "{} clients, {} avg TPS",
                    metrics.num_clients, metrics.avg_tps
                ),
                Err(err) => format!("error: {err}"),
            }
        };
        results.push((run, status));
    }
    Ok(results)
}
