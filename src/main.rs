use clap::{Parser, Subcommand};
use serde_json::Value;
use sqlsmith_client::config::LoggingSettings;
use sqlsmith_client::{Profile, RequestClient, RequestError, Settings, SettingsError};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use thiserror::Error;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// Command-line front end for the sqlsmith control server
#[derive(Debug, Parser)]
#[command(name = "sqlsmith-client", version, about)]
struct Cli {
    /// Server base URL, overrides the configured one
    #[arg(long, env = "SQLSMITH_BASE_URL")]
    base_url: Option<String>,

    /// Load configuration from this file instead of config/
    #[arg(long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the current run profile
    Profile,
    /// Replace the run profile with the contents of a JSON file
    Update { file: PathBuf },
    /// Trigger a run
    Run,
    /// Print server statistics
    Stats,
    /// Submit executor statistics from a JSON file
    Submit { file: PathBuf },
    /// Print the effective configuration
    Config,
}

#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Settings(#[from] SettingsError),

    #[error(transparent)]
    Request(#[from] RequestError),

    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid JSON in {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Failed to render response: {0}")]
    Render(#[from] serde_json::Error),
}

#[tokio::main]
async fn main() -> ExitCode {
    // Load .env file if present
    dotenv::dotenv().ok();

    let cli = Cli::parse();

    let settings = match load_settings(&cli) {
        Ok(settings) => settings,
        Err(e) => {
            init_logging(&LoggingSettings::default());
            error!("Failed to load configuration: {}", e);
            return ExitCode::FAILURE;
        }
    };

    init_logging(&settings.logging);

    match execute(cli.command, &settings).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(CliError::Request(e)) if e.is_operation_failure() => ExitCode::FAILURE,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn load_settings(cli: &Cli) -> Result<Settings, SettingsError> {
    let settings = match &cli.config {
        Some(path) => Settings::load_from(path)?,
        None => Settings::load()?,
    };

    settings.with_base_url(cli.base_url.clone())
}

fn init_logging(logging: &LoggingSettings) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&logging.level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr);

    if logging.format == "json" {
        subscriber.json().init();
    } else {
        subscriber.pretty().init();
    }
}

async fn execute(command: Command, settings: &Settings) -> Result<(), CliError> {
    match command {
        Command::Profile => {
            let profile = connect(settings)?.fetch_profile().await?;
            if let Ok(typed) = Profile::from_value(&profile) {
                info!("Profile: {}", typed.summary());
            }
            print_json(&profile)?;
        }
        Command::Update { file } => {
            let profile = read_json(&file)?;
            connect(settings)?.update_profile(&profile).await?;
            info!("Profile updated from {}", file.display());
        }
        Command::Run => {
            let result = connect(settings)?.run_request().await?;
            print_json(&result)?;
        }
        Command::Stats => {
            let stats = connect(settings)?.fetch_stats().await?;
            print_json(&stats)?;
        }
        Command::Submit { file } => {
            let stats = read_json(&file)?;
            connect(settings)?.submit_stats(&stats).await?;
            info!("Statistics submitted from {}", file.display());
        }
        Command::Config => print!("{}", settings.to_toml()?),
    }

    Ok(())
}

fn connect(settings: &Settings) -> Result<RequestClient, CliError> {
    let client = RequestClient::from_settings(settings)?;
    info!("Using sqlsmith server at {}", client.base_url());
    Ok(client)
}

fn read_json(path: &Path) -> Result<Value, CliError> {
    let content = std::fs::read_to_string(path).map_err(|source| CliError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    serde_json::from_str(&content).map_err(|source| CliError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

fn print_json(value: &Value) -> Result<(), CliError> {
    match value {
        Value::String(text) => println!("{}", text),
        other => println!("{}", serde_json::to_string_pretty(other)?),
    }
    Ok(())
}
