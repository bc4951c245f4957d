use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use gametl_infrastructure::GametlPaths;

mod app;
mod commands;
mod logging;

#[derive(Parser)]
#[command(name = "gametl")]
#[command(about = "gametl - batch game-text translation", long_about = None)]
struct Cli {
    /// Keep config, cache, work files and logs under this directory
    #[arg(long, global = true, value_name = "DIR")]
    home: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Inspect or edit the translator configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
    /// Fetch the model list from the configured endpoint
    Models {
        /// Filter (defaults to the configured model text)
        #[arg(long, short)]
        query: Option<String>,
    },
    /// Select the input file (.txt or .csv)
    Select { path: PathBuf },
    /// Translate the selected file
    Run {
        /// Select this file first
        #[arg(long, short)]
        file: Option<PathBuf>,
        /// Print every thread's log when the job ends
        #[arg(long)]
        logs: bool,
    },
    /// Show where gametl keeps its files
    Paths,
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print every field
    Show,
    /// Print one field
    Get { field: String },
    /// Set one field (`off` disables an optional parameter)
    Set { field: String, value: String },
    /// Switch an optional sampling parameter on
    Enable { param: String },
    /// Switch an optional sampling parameter off
    Disable { param: String },
    /// Restore the built-in defaults
    Reset,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let paths = GametlPaths::new(cli.home)?;
    let _log_guard = logging::init(&paths.logs_dir())?;

    let state = app::bootstrap(paths).await;

    let result = match cli.command {
        Commands::Config { action } => match action {
            ConfigAction::Show => commands::config::show(&state),
            ConfigAction::Get { field } => commands::config::get(&state, &field),
            ConfigAction::Set { field, value } => commands::config::set(&state, &field, &value),
            ConfigAction::Enable { param } => commands::config::toggle(&state, &param, true),
            ConfigAction::Disable { param } => commands::config::toggle(&state, &param, false),
            ConfigAction::Reset => commands::config::reset(&state),
        },
        Commands::Models { query } => commands::models::list(&state, query).await,
        Commands::Select { path } => commands::select::select(&state, path),
        Commands::Run { file, logs } => commands::run::run(&state, file, logs).await,
        Commands::Paths => commands::paths::show(&state),
    };

    state.config.flush().await;
    result
}
