use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

mod commands;

use commands::check_paths::CheckPathsArgs;
use commands::fix_fragments::FixFragmentsArgs;
use commands::reconcile::ReconcileArgs;

#[derive(Parser)]
#[command(
    name = "catalog",
    version,
    about = "Reconcile a textbook problem catalog with its explanation fragments"
)]
struct Cli {
    /// Project root; `catalog.toml` and relative paths resolve against it
    #[arg(long, value_name = "DIR", default_value = ".")]
    root: PathBuf,

    /// Log level used when RUST_LOG is unset
    #[arg(long, value_name = "LEVEL", default_value = "warn")]
    log_level: String,

    /// Emit logs as JSON lines on stderr
    #[arg(long)]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Merge fragments and link rows into the catalog document
    Reconcile(ReconcileArgs),
    /// Report explanationPath values that do not resolve to a file
    CheckPaths(CheckPathsArgs),
    /// Rewrite full markup documents into bare explanation fragments
    FixFragments(FixFragmentsArgs),
}

fn init_tracing(level: &str, json: bool) {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let registry = tracing_subscriber::registry().with(env_filter);
    let result = if json {
        registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .try_init()
    } else {
        registry
            .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
            .try_init()
    };
    if let Err(err) = result {
        eprintln!("Warning: logging unavailable: {}", err);
    }
}

fn main() {
    let cli = Cli::parse();
    init_tracing(&cli.log_level, cli.log_json);

    let result = match cli.command {
        Commands::Reconcile(args) => commands::reconcile::run_reconcile_command(&cli.root, args),
        Commands::CheckPaths(args) => commands::check_paths::run_check_paths(&cli.root, args),
        Commands::FixFragments(args) => commands::fix_fragments::run_fix_fragments(args),
    };

    if let Err(err) = result {
        eprintln!("{}", err);
        std::process::exit(1);
    }
}
