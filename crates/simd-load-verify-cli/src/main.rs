use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

/// Top-level CLI argument parser for the `slv` command
#[derive(Parser)]
#[command(
    name = "slv",
    about = "simd-load-verify: alignment and load/convert verification for SIMD vector types",
    version
)]
struct Cli {
    /// Log check progress to stderr (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands for the `slv` CLI
#[derive(Subcommand)]
enum Commands {
    /// Run the verification suite
    Run {
        /// Path to a suite configuration YAML file
        #[arg(long)]
        config: Option<PathBuf>,
        /// Restrict to a backend (repeatable): scalar, sse, avx
        #[arg(long)]
        backend: Vec<String>,
        /// Restrict to a check (repeatable): alignment, load_array, load_cvt
        #[arg(long)]
        check: Vec<String>,
        /// Restrict to a vector type (repeatable), e.g. I32x4 or sse::I32x4
        #[arg(long)]
        vector: Vec<String>,
        /// Output format: text (default) or json
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Show the conversion lattice converting loads are walked against
    Lattice {
        /// Path to a suite configuration YAML file with a custom lattice
        #[arg(long)]
        config: Option<PathBuf>,
        /// Output format: text (default), json, or dot
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// List the registered vector types and their layout
    List,
    /// Validate a suite configuration file
    Validate {
        /// Path to the configuration YAML file
        config: PathBuf,
    },
}

/// Dispatch a parsed CLI subcommand to its handler
fn run_command(command: Commands) -> Result<(), Box<dyn std::error::Error>> {
    match command {
        Commands::Run {
            config,
            backend,
            check,
            vector,
            format,
        } => match commands::run::OutputFormat::from_str(&format) {
            Ok(fmt) => commands::run::run(
                config.as_deref(),
                &commands::run::Overrides {
                    backends: &backend,
                    checks: &check,
                    vectors: &vector,
                },
                fmt,
            ),
            Err(e) => Err(e.into()),
        },
        Commands::Lattice { config, format } => {
            match commands::lattice::LatticeFormat::from_str(&format) {
                Ok(fmt) => commands::lattice::run(config.as_deref(), fmt),
                Err(e) => Err(e.into()),
            }
        }
        Commands::List => commands::list::run(),
        Commands::Validate { config } => commands::validate::run(&config),
    }
}

/// Install the stderr log subscriber
fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Entry point: parse CLI arguments and run the selected subcommand
fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run_command(cli.command) {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
