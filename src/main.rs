use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Mutex;
use tokio::sync::mpsc;
use tracing_subscriber::EnvFilter;

use simplepedia::api::ArticleClient;
use simplepedia::app::{App, AppEvent};
use simplepedia::config::Config;
use simplepedia::ui;

#[derive(Parser, Debug)]
#[command(
    name = "simplepedia",
    about = "Browse and edit a Simplepedia article collection in the terminal"
)]
struct Args {
    /// Base URL of the article API (e.g. http://localhost:3000/api/)
    #[arg(long, value_name = "URL", env = "SIMPLEPEDIA_API_URL")]
    api_url: Option<String>,

    /// Config file (default: ~/.config/simplepedia/config.toml)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Write logs to this file instead of stderr
    #[arg(long, value_name = "FILE")]
    log_file: Option<PathBuf>,
}

/// Set up tracing. The TUI owns stdout, so logs go to a file or stderr.
///
/// Without `RUST_LOG`, logging is off unless a log file was requested.
fn init_tracing(log_file: Option<&PathBuf>) -> Result<()> {
    let default_level = if log_file.is_some() { "info" } else { "off" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    match log_file {
        Some(path) => {
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Failed to open log file '{}'", path.display()))?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .init();
        }
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.log_file.as_ref())?;

    let config_path = match args.config {
        Some(path) => path,
        None => Config::default_path()?,
    };
    let config = Config::load(&config_path)
        .with_context(|| format!("Failed to load config from '{}'", config_path.display()))?
        .with_api_url_override(args.api_url);

    let client = ArticleClient::from_settings(&config.api_base_url, config.request_timeout_secs)
        .context("Invalid API configuration")?;
    tracing::info!(url = %client.collection_url(), "Using article API");

    let mut app = App::new(client);
    app.confirm_delete = config.confirm_delete;
    for warning in app.keybindings.apply_overrides(&config.keybindings) {
        tracing::warn!("{}", warning);
        eprintln!("Warning: {}", warning);
    }

    let (event_tx, event_rx) = mpsc::channel::<AppEvent>(32);
    ui::run(&mut app, event_tx, event_rx).await?;

    Ok(())
}
