//! CLI entry point for the NEO tracker.
//!
//! Provides subcommands for fetching the NASA NeoWs feed and showing it as a
//! table with summary stats and a size histogram, analyzing a saved feed
//! body offline, and storing an API key.

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use neo_tracker::{
    config::{
        API_KEY_ENV, DEFAULT_CONFIG_PATH, FEED_URL_ENV, KeyConfig, feed_endpoint, resolve_api_key,
    },
    feed::RawResponse,
    fetch::fetch_from,
    normalize::normalize,
    output::{
        display_rows, export_rows, print_pretty, render_histogram, render_json, render_summary,
        render_table,
    },
    parser::parse_feed,
    stats::{DEFAULT_BINS, Histogram},
    window::{DateSpan, FeedWindow},
};
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use tracing::{error, info};
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

const HISTOGRAM_WIDTH: usize = 40;

#[derive(Parser)]
#[command(name = "neo_tracker")]
#[command(about = "Track near-Earth objects from NASA's NeoWs feed", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch the feed starting today and display it
    Fetch {
        /// Days after today to include (1, 3 or 7)
        #[arg(short, long, default_value = "1")]
        days: DateSpan,

        /// Show potentially hazardous objects only
        #[arg(long, default_value_t = false)]
        hazardous_only: bool,

        /// Save the displayed rows (.csv for CSV, anything else for JSON)
        #[arg(short, long)]
        export: Option<PathBuf>,

        /// API key; overrides NASA_API_KEY and the config file
        #[arg(long)]
        api_key: Option<String>,

        /// Config file holding a saved API key
        #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
        config: PathBuf,

        /// Skip the size histogram
        #[arg(long, default_value_t = false)]
        no_histogram: bool,

        /// Print the summary and rows as JSON instead of the text dashboard
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Display a previously saved feed response
    Analyze {
        /// Path to a JSON feed body
        #[arg(value_name = "FILE")]
        source: PathBuf,

        /// Show potentially hazardous objects only
        #[arg(long, default_value_t = false)]
        hazardous_only: bool,

        /// Save the displayed rows (.csv for CSV, anything else for JSON)
        #[arg(short, long)]
        export: Option<PathBuf>,

        /// Skip the size histogram
        #[arg(long, default_value_t = false)]
        no_histogram: bool,

        /// Print the summary and rows as JSON instead of the text dashboard
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Save an API key to the config file
    SetKey {
        #[arg(value_name = "KEY")]
        key: String,

        #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
        config: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path =
        std::env::var("LOG_FILE_PATH").unwrap_or_else(|_| "logs/neo_tracker.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("neo_tracker.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse()?));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse()?));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Fetch {
            days,
            hazardous_only,
            export,
            api_key,
            config,
            no_histogram,
            json,
        } => {
            let key_config = KeyConfig::load_or_default(&config);
            let env_key = std::env::var(API_KEY_ENV).ok();
            let (api_key, key_source) =
                resolve_api_key(api_key.as_deref(), env_key.as_deref(), &key_config);
            info!(key_source = %key_source, "API key resolved");

            let endpoint = feed_endpoint(std::env::var(FEED_URL_ENV).ok().as_deref());
            let window = FeedWindow::from_today(days)?;

            let response = fetcher(endpoint, window, api_key).await?;
            present(&response, hazardous_only, export.as_deref(), !no_histogram, json)?;
        }
        Commands::Analyze {
            source,
            hazardous_only,
            export,
            no_histogram,
            json,
        } => {
            let bytes = std::fs::read(&source)
                .with_context(|| format!("failed to read '{}'", source.display()))?;
            let response = parse_feed(&bytes)
                .with_context(|| format!("'{}' is not a feed response", source.display()))?;
            present(&response, hazardous_only, export.as_deref(), !no_histogram, json)?;
        }
        Commands::SetKey { key, config } => {
            if key.trim().is_empty() {
                bail!("API key must not be empty");
            }
            KeyConfig::with_key(&key).save(&config)?;
            info!(path = %config.display(), "API key saved successfully");
        }
    }

    Ok(())
}

/// Runs the request on its own task so the main task stays free while the
/// round trip is in flight.
#[tracing::instrument(skip(endpoint, api_key), fields(start_date = %window.start, end_date = %window.end))]
async fn fetcher(endpoint: String, window: FeedWindow, api_key: String) -> Result<RawResponse> {
    info!("Fetching data from NASA API...");
    let started = std::time::Instant::now();

    let task =
        tokio::spawn(async move { fetch_from(&endpoint, window.start, window.end, &api_key).await });

    match task.await? {
        Ok(response) => {
            info!(
                elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX),
                element_count = response.element_count,
                "Feed fetched"
            );
            Ok(response)
        }
        Err(e) => {
            error!(error = %e, status = ?e.status(), "Error fetching data");
            Err(e.into())
        }
    }
}

/// Normalizes a feed body and writes the dashboard to stdout.
fn present(
    response: &RawResponse,
    hazardous_only: bool,
    export: Option<&Path>,
    show_histogram: bool,
    json: bool,
) -> Result<()> {
    let (objects, summary) = normalize(response, hazardous_only);
    print_pretty(&summary);

    let rows = display_rows(&objects);

    if json {
        println!("{}", render_json(&summary, &rows)?);
    } else {
        println!("{}", render_table(&rows));
        println!("{}", render_summary(&summary));
    }

    if show_histogram && !json {
        let sizes: Vec<f64> = objects.iter().map(|o| o.estimated_diameter_m).collect();
        let histogram = Histogram::from_values(&sizes, DEFAULT_BINS);
        println!();
        print!("{}", render_histogram(histogram.as_ref(), HISTOGRAM_WIDTH));
    }

    info!(
        displayed = rows.len(),
        hazardous_pct = summary.pct_hazardous(rows.len()),
        "Data loaded - {} asteroids displayed",
        rows.len()
    );

    if let Some(path) = export {
        export_rows(path, &rows)?;
        info!(path = %path.display(), "Data saved to {}", path.display());
    }

    Ok(())
}
