use std::path::PathBuf;

use clap::{Parser, Subcommand};
use pompompom_core::{FilePaths, DEFAULT_SETTINGS_FILE, DEFAULT_TASKS_FILE};
use tracing_subscriber::EnvFilter;

mod commands;
mod render;
mod repl;
mod ticker;

#[derive(Parser)]
#[command(name = "pompompom-cli", version, about = "Pomodoro timer with task tracking")]
struct Cli {
    /// Task file (CSV)
    #[arg(long, global = true, default_value = DEFAULT_TASKS_FILE)]
    tasks: PathBuf,
    /// Settings file (JSON, or TOML with a .toml extension)
    #[arg(long, global = true, default_value = DEFAULT_SETTINGS_FILE)]
    config: PathBuf,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the timer interactively
    Run(commands::timer::RunArgs),
    /// Task list editing
    Task {
        #[command(subcommand)]
        action: commands::task::TaskAction,
    },
    /// Settings management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("POMPOMPOM_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    init_tracing();
    let cli = Cli::parse();
    let paths = FilePaths {
        tasks: cli.tasks,
        settings: cli.config,
    };
    let result = match cli.command {
        Commands::Run(args) => commands::timer::run(paths, args),
        Commands::Task { action } => commands::task::run(paths, action),
        Commands::Config { action } => commands::config::run(&paths.settings, action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
