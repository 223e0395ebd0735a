use std::path::PathBuf;

use clap::{Parser, Subcommand};
use common::config::Config;
use eyre::Result;
use tracing::error;
use tracing_subscriber::{
    EnvFilter,
    fmt::{layer, time::ChronoLocal},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

mod report;

const MODULES: &[&str] = &["common", "slog_tpcc", "tps_basic"];

#[derive(Parser)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
    /// YAML config overriding the built-in run list and plot settings
    #[arg(short, long)]
    config_file: Option<PathBuf>,
    #[arg(short, long)]
    log: Vec<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Scan every run log and plot average TPS (default)
    Plot,
    /// List run directories and what their logs contain
    Ls,
    /// Print the collected throughput as JSON
    Print,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let log_level = std::env::var("RUST_LOG").unwrap_or("info".to_owned());
    let args = Cli::parse();
    let file_appender = tracing_appender::rolling::never(".", "slog-tps.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    let mut env_filter = EnvFilter::new(format!("slog_tps={log_level}"));

    if !args.log.is_empty() {
        for log in &args.log {
            env_filter = env_filter.add_directive(log.parse()?);
        }
    }

    for module in MODULES {
        if !args.log.iter().any(|x| x.starts_with(module)) {
            env_filter = env_filter.add_directive(format!("{module}={log_level}").parse()?);
        }
    }

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            layer()
                .with_timer(ChronoLocal::new("%v %k:%M:%S %z".to_owned()))
                .compact(),
        )
        .with(layer().with_writer(non_blocking))
        .init();

    let config = match &args.config_file {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };

    let res = match args.command.unwrap_or(Commands::Plot) {
        Commands::Plot => report::plot(&config).await.map(|_| ()),
        Commands::Ls => report::list_runs(&config).await,
        Commands::Print => report::print_throughput(&config).await,
    };
    if let Err(err) = res {
        error!("{err:#?}");
        return Err(err);
    }

    Ok(())
}
