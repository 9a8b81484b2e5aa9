//! CLI definitions and entry point

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use super::commands;
use geopush::config::GeopushConfig;
use geopush::output::OutputMode;

/// geopush - Ingest geolocated message batches
#[derive(Parser, Debug)]
#[command(
    name = "geopush",
    version,
    about = "Ingest geolocated message batches",
    long_about = "Push batches of geolocated messages into a message store.\n\n\
                  Each message gets a stable identifier, already stored messages are\n\
                  skipped, and every batch that adds something is recorded as an\n\
                  import profile for later re-harvesting."
)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output in JSON format (machine-readable)
    #[arg(long, global = true)]
    pub json: bool,

    /// Configuration file (defaults to ~/.config/geopush/config.toml)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Push a batch of messages from a JSON file ('-' reads stdin)
    Push(PushArgs),

    /// Check whether a message is already stored
    Exists {
        /// JSON file holding one message ('-' reads stdin)
        file: PathBuf,

        /// Source type for a message that carries none
        #[arg(long)]
        source_type: Option<String>,
    },

    /// Serve the push API over HTTP
    Serve {
        /// Address to listen on (overrides the config)
        #[arg(long)]
        bind: Option<String>,
    },

    /// Show version
    Version,
}

/// Arguments of `geopush push`
#[derive(Args, Debug)]
pub struct PushArgs {
    /// JSON file holding the batch ('-' reads stdin)
    pub file: PathBuf,

    /// Source type for messages that carry none
    #[arg(long)]
    pub source_type: Option<String>,

    /// URL the batch was fetched from
    #[arg(long)]
    pub url: Option<String>,

    /// Account the batch belongs to
    #[arg(long)]
    pub screen_name: Option<String>,

    /// Harvesting frequency (hourly, daily, weekly, monthly, annually, never)
    #[arg(long)]
    pub harvesting_freq: Option<String>,

    /// Import profile lifetime in seconds
    #[arg(long)]
    pub lifetime: Option<String>,

    /// Host recorded as the pusher
    #[arg(long, default_value = "localhost")]
    pub client_host: String,

    /// Print the push response document wrapped in this callback
    #[arg(long)]
    pub callback: Option<String>,
}

/// Run the CLI
pub fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if cli.verbose {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    }

    let output_mode = if cli.json {
        OutputMode::Json
    } else {
        OutputMode::Human
    };

    match cli.command {
        Some(Command::Push(args)) => {
            let config = GeopushConfig::load(cli.config.as_deref())?;
            commands::push(&args, &config, output_mode)
        },
        Some(Command::Exists { file, source_type }) => {
            let config = GeopushConfig::load(cli.config.as_deref())?;
            commands::exists(&file, source_type.as_deref(), &config, output_mode)
        },
        Some(Command::Serve { bind }) => {
            let config = GeopushConfig::load(cli.config.as_deref())?;
            commands::serve(bind.as_deref(), &config)
        },
        Some(Command::Version) => {
            if output_mode == OutputMode::Json {
                println!(
                    "{}",
                    serde_json::json!({
                        "version": geopush::VERSION
                    })
                );
            } else {
                println!("geopush v{}", geopush::VERSION);
            }
            Ok(())
        },
        None => {
            if output_mode == OutputMode::Json {
                println!(
                    "{}",
                    serde_json::json!({
                        "version": geopush::VERSION,
                        "hint": "Use --help for usage"
                    })
                );
            } else {
                println!("geopush v{}", geopush::VERSION);
                println!("\nRun 'geopush --help' for usage");
                println!("Run 'geopush push <file>' to push a batch");
            }
            Ok(())
        },
    }
}
