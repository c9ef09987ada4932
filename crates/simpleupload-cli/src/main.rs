//! SimpleUpload CLI - Command-line client for a SimpleUpload server
//!
//! Provides commands for:
//! - Uploading a file and filing it into a saved directory
//! - Listing pending uploads, saved files and saved directories
//! - Moving pending uploads by hand
//! - Previewing the filename normalizer
//! - Managing the configuration

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use simpleupload_core::config::Config;
use tracing_subscriber::EnvFilter;

mod commands;
mod notifier;
mod output;

use commands::{
    clean::CleanCommand, completions::CompletionsCommand, config::ConfigCommand,
    list::Listing, move_file::MoveCommand, upload::UploadCommand, CommandContext,
};
use output::OutputFormat;

#[derive(Debug, Parser)]
#[command(
    name = "simpleupload",
    version,
    about = "Upload files to a SimpleUpload server and file them away"
)]
pub struct Cli {
    /// Output in JSON format
    #[arg(long, global = true)]
    json: bool,

    /// Verbose output (can be repeated: -v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Use alternate config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Minimal output
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Upload a file and move it into a saved directory
    Upload(UploadCommand),
    /// List saved directories
    Dirs,
    /// List uploads that were not moved yet
    Uploads,
    /// List saved files
    Saved,
    /// Move a pending upload to <directory>/<filename>
    Move(MoveCommand),
    /// Show how a filename would be normalized
    Clean(CleanCommand),
    /// View and manage configuration
    #[command(subcommand)]
    Config(ConfigCommand),
    /// Generate shell completions
    Completions(CompletionsCommand),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let format = if cli.json {
        OutputFormat::Json
    } else {
        OutputFormat::Human
    };
    let ctx = CommandContext::new(format, cli.quiet, cli.config.clone());

    init_tracing(&cli, &ctx);

    let result = match &cli.command {
        Commands::Upload(cmd) => cmd.execute(&ctx).await,
        Commands::Dirs => Listing::SavedDirs.execute(&ctx).await,
        Commands::Uploads => Listing::Uploads.execute(&ctx).await,
        Commands::Saved => Listing::SavedFiles.execute(&ctx).await,
        Commands::Move(cmd) => cmd.execute(&ctx).await,
        Commands::Clean(cmd) => cmd.execute(&ctx).await,
        Commands::Config(cmd) => cmd.execute(&ctx).await,
        Commands::Completions(cmd) => cmd.execute().await,
    };

    if let Err(e) = result {
        ctx.formatter().error(&format!("{:#}", e));
        std::process::exit(1);
    }

    Ok(())
}

/// Sets up tracing on stderr
///
/// `RUST_LOG` wins; otherwise `-q` means errors only, `-v`/`-vv` mean
/// debug/trace, and without flags the configured `logging.level` applies.
fn init_tracing(cli: &Cli, ctx: &CommandContext) {
    let filter = if cli.quiet {
        "error".to_string()
    } else {
        match cli.verbose {
            0 => Config::load_or_default(&ctx.config_path).logging.level,
            1 => "debug".to_string(),
            _ => "trace".to_string(),
        }
    };
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&filter))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
