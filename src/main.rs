//! canscope - live CAN bus dashboard
//!
//! Monitors the configured SocketCAN interfaces (default `can0` and `can1`) and
//! redraws the terminal dashboard until Ctrl-C. Log output goes to stderr and is
//! controlled with `-v` or `RUST_LOG`.

use anyhow::{Context, Result};
use canscope::sources::SocketCanSource;
use canscope::view::TextStyle;
use canscope::{Analyzer, AnalyzerConfig, TerminalDashboard};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// canscope - live per-message view of one or more CAN buses
#[derive(Parser, Debug)]
#[command(name = "canscope")]
#[command(about = "Live CAN bus analyzer dashboard", long_about = None)]
#[command(version)]
struct Args {
    /// YAML configuration file
    #[arg(value_name = "FILE")]
    config: Option<PathBuf>,

    /// Interface to monitor, replacing the configured list (can be repeated)
    #[arg(short, long = "bus", value_name = "IFACE")]
    buses: Vec<String>,

    /// Print plain lines without screen clearing or styling
    #[arg(long)]
    plain: bool,

    /// Verbosity level (can be repeated: -v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let mut config = match &args.config {
        Some(path) => AnalyzerConfig::load(path)
            .with_context(|| format!("Failed to load config file: {}", path.display()))?,
        None => AnalyzerConfig::default(),
    };
    if !args.buses.is_empty() {
        config.buses = args.buses;
        config.validate().context("Invalid --bus list")?;
    }
    info!("canscope v{} monitoring {:?}", env!("CARGO_PKG_VERSION"), config.buses);

    let mut analyzer = Analyzer::new();
    for bus in &config.buses {
        let source = SocketCanSource::open(bus)
            .with_context(|| format!("Failed to open CAN interface {}", bus))?;
        analyzer.attach(source);
    }

    let cancel = analyzer.cancellation_token();
    let stop = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            stop.cancel();
        }
    });

    let style = if args.plain { TextStyle::Plain } else { TextStyle::Ansi };
    let dashboard =
        TerminalDashboard::new(Arc::clone(analyzer.store()), config.display).with_style(style);
    dashboard
        .run(std::io::stdout(), config.refresh_interval(), cancel)
        .await
        .context("Failed to write dashboard")?;

    let frames = analyzer.shutdown().await;
    info!("Recorded {} frames", frames);
    Ok(())
}
