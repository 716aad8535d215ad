//! mcversions - keeps `release.json` / `snapshot.json` in sync with Mojang's
//! version manifest
//!
//! Single-shot batch job meant to run from CI:
//!
//! ```text
//! mcversions release
//! mcversions snapshot --log-level debug
//! ```

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use mcversions_core::catalog::CatalogStore;
use mcversions_core::ci::CiSinks;
use mcversions_core::remote::{HttpTransport, ManifestClient};
use mcversions_core::{Channel, Reconciler, Settings, SyncReport};

/// Version type to synchronise
#[derive(Debug, Clone, Copy, ValueEnum)]
enum ChannelArg {
    Release,
    Snapshot,
}

impl From<ChannelArg> for Channel {
    fn from(arg: ChannelArg) -> Self {
        match arg {
            ChannelArg::Release => Channel::Release,
            ChannelArg::Snapshot => Channel::Snapshot,
        }
    }
}

/// Log levels
#[derive(Debug, Clone, ValueEnum)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    fn to_filter_directive(&self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

#[derive(Parser, Debug)]
#[clap(
    name = "mcversions",
    about = "Minecraft Server Protocol Version Fetcher",
    version
)]
struct Cli {
    /// Version type (release or snapshot)
    #[clap(value_enum)]
    channel: ChannelArg,

    /// Set log level
    #[clap(long, default_value = "info")]
    log_level: LogLevel,
}

/// Initialize tracing; `RUST_LOG` directives are layered on top of the level
fn initialize_tracing(log_level: &LogLevel) {
    let mut filter = EnvFilter::new(log_level.to_filter_directive());

    if let Ok(extra) = std::env::var("RUST_LOG") {
        for directive in extra.split(',').filter(|d| !d.is_empty()) {
            if let Ok(parsed) = directive.parse() {
                filter = filter.add_directive(parsed);
            }
        }
    }

    // Logs go to stderr; stdout carries the report and CI workflow commands
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    initialize_tracing(&cli.log_level);

    let project_dir = std::env::current_dir().context("Failed to determine working directory")?;
    let settings = Settings::load(&project_dir);
    debug!("Resolved settings: {:?}", settings);

    let report = sync_command(cli.channel.into(), &settings).await?;
    print_report(&report);

    Ok(())
}

async fn sync_command(channel: Channel, settings: &Settings) -> Result<SyncReport> {
    let transport = HttpTransport::new(settings.timeout())?;
    let client = ManifestClient::new(transport, settings.manifest_url.clone());
    let store = CatalogStore::new(&settings.catalog_dir);

    let reconciler = Reconciler::new(store, client, CiSinks::from_env());
    reconciler.run(channel).await
}

fn print_report(report: &SyncReport) {
    for line in report_lines(report) {
        println!("{line}");
    }
}

fn report_lines(report: &SyncReport) -> Vec<String> {
    if report.remote_count == 0 {
        return vec![format!(
            "No {} versions found in the remote manifest (unavailable or empty); catalog left unchanged.",
            report.channel
        )];
    }

    if report.is_up_to_date() {
        return vec![format!(
            "Nothing to do: {} catalog is up to date.",
            report.channel
        )];
    }

    let mut lines = vec![format!("Added Versions: {}", report.added.join(","))];
    if !report.fallbacks.is_empty() {
        lines.push(format!(
            "Recorded without metadata (download failed): {}",
            report.fallbacks.join(",")
        ));
    }
    lines
}
