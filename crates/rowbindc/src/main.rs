//! The rowbind command-line front end.
//!
//! Provides the `rowbindc` command with the following subcommands:
//!
//! - `rowbindc parse [INPUT]` - Parse a JSON object or array of objects into
//!   fields, rows, named-parameter tokens and flattened data
//! - `rowbindc conditions [INPUT]` - Extract equality conditions from a JSON object
//!
//! `INPUT` is read from stdin when omitted. Results are printed as JSON.
//!
//! Options:
//! - `--allow-empty` - Keep zero values (`0`, `""`, `false`, `null`, ...)
//! - `--config` - Parser configuration file (TOML, `[parser]` table)
//! - `--marker` - Named-parameter marker, overrides the config file

use std::collections::BTreeMap;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, Subcommand};

use rowbind::{ParserConfig, Source};

#[derive(Parser)]
#[command(name = "rowbindc", version, about = "Extract SQL fields and parameters from JSON rows")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse rows into fields, named parameters and data
    Parse {
        /// JSON input file (stdin when omitted)
        input: Option<PathBuf>,

        /// Keep zero values instead of dropping them
        #[arg(long = "allow-empty")]
        allow_empty: bool,

        /// Parser configuration file (TOML)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Named-parameter marker (overrides the config file)
        #[arg(long)]
        marker: Option<String>,
    },
    /// Extract equality conditions from a single JSON object
    Conditions {
        /// JSON input file (stdin when omitted)
        input: Option<PathBuf>,

        /// Keep zero values instead of dropping them
        #[arg(long = "allow-empty")]
        allow_empty: bool,

        /// Parser configuration file (TOML)
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Parse {
            input,
            allow_empty,
            config,
            marker,
        } => run_parse(input.as_deref(), allow_empty, config.as_deref(), marker),
        Commands::Conditions {
            input,
            allow_empty,
            config,
        } => run_conditions(input.as_deref(), allow_empty, config.as_deref()),
    };

    match result {
        Ok(output) => println!("{}", output),
        Err(e) => {
            eprintln!("error: {}", e);
            process::exit(1);
        }
    }
}

/// Run the parser over a JSON document and render the result.
fn run_parse(
    input: Option<&Path>,
    allow_empty: bool,
    config: Option<&Path>,
    marker: Option<String>,
) -> Result<String, String> {
    let parser = load_parser(config, marker)?;
    let source = Source::from_json(read_input(input)?).map_err(|e| e.to_string())?;
    let result = parser
        .parse(&source, allow_empty)
        .map_err(|e| e.to_string())?;
    serde_json::to_string_pretty(&result).map_err(|e| format!("Failed to encode result: {}", e))
}

/// Extract conditions from a JSON object and render them sorted by key.
fn run_conditions(
    input: Option<&Path>,
    allow_empty: bool,
    config: Option<&Path>,
) -> Result<String, String> {
    let parser = load_parser(config, None)?;
    let source = Source::from_json(read_input(input)?).map_err(|e| e.to_string())?;
    let conditions = parser
        .extract_conditions(&source, allow_empty)
        .map_err(|e| e.to_string())?;
    let sorted: BTreeMap<_, _> = conditions.into_iter().collect();
    serde_json::to_string_pretty(&sorted).map_err(|e| format!("Failed to encode result: {}", e))
}

fn load_parser(config: Option<&Path>, marker: Option<String>) -> Result<rowbind::Parser, String> {
    let mut settings = match config {
        Some(path) => ParserConfig::from_file(path)?,
        None => ParserConfig::default(),
    };
    if let Some(marker) = marker {
        settings.marker = marker;
    }
    log::debug!("parser config: {:?}", settings);
    rowbind::Parser::new(settings)
}

fn read_input(input: Option<&Path>) -> Result<serde_json::Value, String> {
    let text = match input {
        Some(path) => std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read {}: {}", path.display(), e))?,
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .map_err(|e| format!("Failed to read stdin: {}", e))?;
            buf
        }
    };
    serde_json::from_str(&text).map_err(|e| format!("Failed to parse JSON input: {}", e))
}
