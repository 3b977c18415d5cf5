use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use eyre::Result;
use oncoscope_cli::config::{self, LogFormat, OncoscopeConfig, Overrides};
use oncoscope_cli::{render, repl};
use oncoscope_client::http::HttpBackend;
use oncoscope_core::form::FormState;
use oncoscope_session::SessionController;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "oncoscope")]
#[command(version, about = "Breast-cytology diagnostic session with supportive chat")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Backend base URL (overrides config and ONCOSCOPE_API_URL)
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// JSON schema document listing the model's features
    #[arg(long, global = true)]
    schema_file: Option<PathBuf>,

    /// Use all 30 catalog features instead of the reduced ten
    #[arg(long, global = true)]
    full_catalog: bool,

    /// Emit logs as JSON on stderr
    #[arg(long, global = true)]
    log_json: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Start an interactive session (default)
    Run,
    /// Load the schema and print its fields
    Fields,
    /// Probe the backend
    Health,
    /// Inspect or create the config file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the effective configuration
    Show,
    /// Write a config file with the effective values
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

fn init_tracing(format: LogFormat) {
    let builder = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr);

    match format {
        LogFormat::Json => builder.json().init(),
        LogFormat::Pretty => builder.init(),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();

    let mut config = config::load_config()?;
    config.apply_env();
    config.apply_overrides(&Overrides {
        api_url: cli.api_url,
        schema_file: cli.schema_file,
        full_catalog: cli.full_catalog,
        log_json: cli.log_json,
    });

    init_tracing(config.log_format);
    tracing::debug!(?config, "effective config");

    match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => run(&config).await,
        Commands::Fields => {
            let source = config.schema_source();
            let schema = source
                .load()
                .await
                .map_err(|e| eyre::eyre!("could not load schema from {}: {e}", source.describe()))?;
            println!("{} fields from {}", schema.len(), source.describe());
            println!("{}", render::fields(&FormState::with_schema(schema)));
            Ok(())
        }
        Commands::Health => {
            let backend = HttpBackend::new(&config.backend_config());
            let health = backend
                .health()
                .await
                .map_err(|e| eyre::eyre!("{} is unreachable: {e}", backend.base_url()))?;
            println!("{}: {}", backend.base_url(), health.status);
            Ok(())
        }
        Commands::Config { action } => match action {
            ConfigAction::Show => {
                println!("# {}", config::config_path()?.display());
                println!("{}", serde_json::to_string_pretty(&config)?);
                Ok(())
            }
            ConfigAction::Init { force } => {
                let path = config::config_path()?;
                if path.exists() && !force {
                    return Err(eyre::eyre!(
                        "{} already exists (use --force to overwrite)",
                        path.display()
                    ));
                }
                let saved = config::save_config(&config)?;
                println!("wrote {}", saved.display());
                Ok(())
            }
        },
    }
}

async fn run(config: &OncoscopeConfig) -> Result<()> {
    let backend = HttpBackend::new(&config.backend_config());
    let shared = Arc::new(backend.clone());
    let controller = Arc::new(SessionController::new(shared.clone(), shared));
    repl::run(controller, backend, config.schema_source()).await
}
