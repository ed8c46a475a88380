use std::path::PathBuf;
use std::str::FromStr;

use anyhow::Result;
use clap::Parser;
use tracing::{info, warn};

use fbscrape::config::{ExportConfig, JobInputs, Settings};
use fbscrape::core::ScrapeSession;
use fbscrape::export::{ExportFormat, ExportManager};
use fbscrape::logging::{init_logging, LoggingConfig};
use fbscrape::utils::current_timestamp_slug;

/// Facebook user search scraper (public profiles only)
#[derive(Parser)]
#[command(name = "fbscrape")]
#[command(about = "Facebook user search scraper (public profiles only)")]
#[command(version = env!("CARGO_PKG_VERSION"))]
struct Cli {
    /// Path to the inputs JSON file
    #[arg(long, default_value = "data/inputs.example.json")]
    inputs: PathBuf,

    /// Path to the settings JSON file
    #[arg(long, default_value = "config/settings.json")]
    settings: PathBuf,

    /// Directory to write outputs (json/csv/xml)
    #[arg(long, default_value = "data")]
    output_dir: PathBuf,

    /// Comma-separated output formats: json,csv,xml
    #[arg(long, default_value = "json")]
    formats: String,

    /// Enable online mode (may attempt to fetch public pages).
    /// Default is offline-safe.
    #[arg(long)]
    online: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let logging_config = LoggingConfig {
        level: if cli.verbose { "debug".to_string() } else { "info".to_string() },
        ..LoggingConfig::default()
    };
    init_logging(&logging_config)?;

    info!("Starting fbscrape v{}", env!("CARGO_PKG_VERSION"));

    let settings = match Settings::load_from_file(&cli.settings) {
        Ok(settings) => settings,
        Err(e) => {
            warn!("{}; using default settings", e);
            Settings::default()
        }
    };
    let inputs = JobInputs::load_from_file(&cli.inputs)?;

    let formats = cli
        .formats
        .split(',')
        .filter(|part| !part.trim().is_empty())
        .map(ExportFormat::from_str)
        .collect::<Result<Vec<_>, _>>()?;

    info!(
        "Starting scraper. Mode={} | Scrolls={} | Jobs={}",
        if cli.online { "online" } else { "offline" },
        settings.scrolls_amount,
        inputs.job_count()
    );

    let session = ScrapeSession::new(&settings, cli.online)?;
    let records = session.run(&inputs);

    let exporter = ExportManager::new(&ExportConfig { output_directory: cli.output_dir.clone() })?;
    let base_name = format!("facebook_users_{}", current_timestamp_slug());
    let written = exporter.export_all(&records, &base_name, &formats)?;

    info!(
        "Done. Wrote {} records to {} in formats: {}",
        records.len(),
        cli.output_dir.display(),
        written
            .iter()
            .filter_map(|path| path.extension().and_then(|ext| ext.to_str()))
            .collect::<Vec<_>>()
            .join(",")
    );

    Ok(())
}
