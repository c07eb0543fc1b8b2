use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;
mod render;

#[derive(Parser)]
#[command(name = "class-timetable", version, about = "Class Timetable CLI")]
struct Cli {
    /// Directory of <name>.json timetables (overrides the configured one)
    #[arg(long, global = true)]
    dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List people with a timetable
    People {
        #[arg(long)]
        json: bool,
    },
    /// Remember whose timetable to show by default
    Select {
        /// Person name (file stem, case-insensitive)
        name: String,
    },
    /// Show the current, upcoming and remaining classes once
    Now {
        #[command(flatten)]
        args: commands::now::NowArgs,
    },
    /// Keep showing live class state, refreshing on an interval
    Watch {
        #[command(flatten)]
        args: commands::watch::WatchArgs,
    },
    /// Print the full week
    Week {
        /// Person name (defaults to the selected one)
        #[arg(long)]
        person: Option<String>,
        /// Fail on malformed classes instead of skipping them
        #[arg(long)]
        strict: bool,
        #[arg(long)]
        json: bool,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

async fn run(cli: Cli) -> timetable_core::Result<()> {
    let ctx = commands::Context::new(cli.dir)?;
    match cli.command {
        Commands::People { json } => commands::people::run(&ctx, json),
        Commands::Select { name } => commands::people::select(ctx, &name),
        Commands::Now { args } => commands::now::run(&ctx, args).await,
        Commands::Watch { args } => commands::watch::run(&ctx, args).await,
        Commands::Week { person, strict, json } => {
            commands::week::run(&ctx, person.as_deref(), strict, json).await
        }
        Commands::Config { action } => commands::config::run(ctx, action),
    }
}

#[tokio::main]
async fn main() {
    init_tracing();
    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
