// Copyright 2026 Daytona Controls Contributors
// SPDX-License-Identifier: Apache-2.0

//! Daytona timing-table compiler CLI
//!
//! Compiles an experiment intent into per-module FPGA timing tables.
//!
//! # Usage
//!
//! ```bash
//! # Compile an intent and write per-module CSVs
//! daytona-tt compile --intent intent.json --out tables/
//!
//! # Compile to JSON on stdout
//! daytona-tt compile --intent intent.json --json
//!
//! # Check an intent without compiling
//! daytona-tt validate --intent intent.json
//!
//! # Show effective configuration
//! daytona-tt config
//! ```

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use daytona_timing::registry::NameTable;
use daytona_timing::{
    compile, export, AddressRegistry, CompileOptions, Config, Intent, Result, VERSION,
};

/// Daytona timing-table compiler
#[derive(Parser)]
#[command(name = "daytona-tt")]
#[command(author = "Daytona Controls Contributors")]
#[command(version = VERSION)]
#[command(about = "Compile experiment intents into FPGA timing tables")]
struct Cli {
    /// Path to configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compile an intent into timing tables
    Compile {
        /// Path to the intent JSON file
        #[arg(short, long)]
        intent: PathBuf,

        /// Canonical-name table CSV (defaults to the built-in table)
        #[arg(long, env = "DAYTONA_NAME_TABLE")]
        names: Option<PathBuf>,

        /// Output directory for per-module CSV tables
        #[arg(short, long, default_value = "tables")]
        out: PathBuf,

        /// Abort on unresolved canonical names
        #[arg(long, env = "DAYTONA_STRICT_RESOLUTION")]
        strict: bool,

        /// Print the compiled tables as JSON to stdout instead of
        /// writing CSV files
        #[arg(long)]
        json: bool,
    },

    /// Validate an intent file without compiling
    Validate {
        /// Path to the intent JSON file
        #[arg(short, long)]
        intent: PathBuf,
    },

    /// Show effective configuration
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(&cli.log_level);

    let config = Config::load(cli.config.as_deref())?;
    config.validate()?;

    match cli.command {
        Commands::Compile {
            intent,
            names,
            out,
            strict,
            json,
        } => {
            let intent = Intent::from_json_file(&intent)?;
            let registry = load_registry(names.as_deref(), &config)?;
            let options = CompileOptions {
                strict_resolution: strict || config.compiler.strict_resolution,
            };

            let table = compile(&intent, &registry, &options)?;

            if json {
                println!("{}", serde_json::to_string_pretty(&table.modules)?);
            } else {
                std::fs::create_dir_all(&out)?;
                for (module, instructions) in &table.modules {
                    let path = out.join(format!("module_{}.csv", module));
                    std::fs::write(&path, export::render_table(instructions))?;
                    info!(
                        module,
                        path = %path.display(),
                        instructions = instructions.len(),
                        ticks = export::ticks_total(instructions),
                        "table written"
                    );
                }
                if let Some(words) = &table.ramp_words {
                    info!(segments = words.len(), "ramp words encoded");
                }
            }
        }

        Commands::Validate { intent } => {
            let intent = Intent::from_json_file(&intent)?;
            match intent.validate() {
                Ok(()) => {
                    println!("Intent is valid ({} topology)", intent.hdc_path);
                }
                Err(e) => {
                    eprintln!("Intent error: {}", e);
                    std::process::exit(1);
                }
            }
        }

        Commands::Config => {
            println!("{}", serde_yaml::to_string(&config)?);
        }
    }

    Ok(())
}

/// Initialize logging with tracing.
fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(true))
        .init();
}

/// Build the address registry from the CLI flag, the config file, or
/// the built-in table, in that order.
fn load_registry(names: Option<&Path>, config: &Config) -> Result<AddressRegistry> {
    let path = names
        .map(Path::to_path_buf)
        .or_else(|| config.compiler.name_table.as_ref().map(PathBuf::from));
    match path {
        Some(path) => Ok(AddressRegistry::new(NameTable::from_path(&path)?)),
        None => Ok(AddressRegistry::builtin()),
    }
}
