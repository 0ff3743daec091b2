mod commands;
mod output;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "planilla",
    version,
    about = "Extract shipment manifests (planilla de carga) from PDF into spreadsheets"
)]
struct Cli {
    /// Enable DEBUG-level logs (per-page decisions)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract the Detalle and Resumen tables from a manifest PDF
    Extract {
        /// Path to the manifest PDF
        input_file: PathBuf,

        /// Output format: table (default) or json
        #[arg(short, long, default_value = "table")]
        output: String,

        /// Write a workbook with "Detalle" and "Resumen" sheets
        #[arg(long, value_name = "FILE")]
        xlsx: Option<PathBuf>,

        /// JSON file overriding extraction tolerances
        #[arg(short, long, value_name = "FILE")]
        config: Option<PathBuf>,
    },
    /// Show what the extractor decided for every page
    Inspect {
        /// Path to the manifest PDF
        input_file: PathBuf,

        /// JSON file overriding extraction tolerances
        #[arg(short, long, value_name = "FILE")]
        config: Option<PathBuf>,
    },
    /// Inspect and validate extraction configs
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the default configuration as JSON
    Show,
    /// Validate a config file
    Validate {
        /// Path to JSON config file
        file: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Extract {
            input_file,
            output,
            xlsx,
            config,
        } => commands::extract::run(input_file, &output, xlsx, config),
        Commands::Inspect { input_file, config } => commands::inspect::run(input_file, config),
        Commands::Config { action } => match action {
            ConfigAction::Show => commands::config::show(),
            ConfigAction::Validate { file } => commands::config::validate(&file),
        },
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
