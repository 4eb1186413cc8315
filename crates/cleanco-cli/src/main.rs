use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use cleanco_core::{
    classify_with, custom_basename, CleancoConfig, CleancoError, Classification, Positions,
    PreparedTerms,
};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "cleanco", version, about = "Clean and classify company names")]
struct Cli {
    /// Config file (defaults to the user config, then built-in defaults).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log debug output to stderr.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Print results as JSON lines.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Strip legal-form terms from names.
    Basename(BasenameArgs),
    /// Report business types and countries a name points to.
    Classify(NamesArgs),
    /// List classification sources.
    Terms {
        /// List country sources instead of business types.
        #[arg(long)]
        countries: bool,
    },
}

#[derive(Debug, Args)]
struct BasenameArgs {
    /// Also strip leading terms.
    #[arg(long)]
    prefix: bool,

    /// Also strip interior terms.
    #[arg(long)]
    middle: bool,

    /// Keep trailing terms.
    #[arg(long)]
    no_suffix: bool,

    /// Repeat until the name stops changing, at most this many times.
    #[arg(long, default_value_t = 1)]
    passes: usize,

    #[command(flatten)]
    names: NamesArgs,
}

#[derive(Debug, Args)]
struct NamesArgs {
    /// Names to process. Read one per line from stdin when omitted.
    names: Vec<String>,
}

#[derive(Serialize)]
struct BasenameRecord<'a> {
    name: &'a str,
    basename: &'a str,
}

#[derive(Serialize)]
struct ClassifyRecord<'a> {
    name: &'a str,
    #[serde(flatten)]
    classification: &'a Classification,
}

#[derive(Serialize)]
struct SourceRecord<'a> {
    category: &'a str,
    term: &'a str,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "cleanco=debug" } else { "cleanco=warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(io::stderr)
        .init();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "cleanco failed");
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), CleancoError> {
    let config = CleancoConfig::load(cli.config.as_deref())?;
    let db = config.term_database()?;
    let mut out = io::stdout().lock();

    match cli.command {
        Command::Basename(args) => {
            let mut positions = config.positions();
            if args.prefix {
                positions |= Positions::PREFIX;
            }
            if args.middle {
                positions |= Positions::MIDDLE;
            }
            if args.no_suffix {
                positions.remove(Positions::SUFFIX);
            }
            let terms = PreparedTerms::from_database(&db);
            tracing::debug!(?positions, terms = terms.len(), "Reducing names");

            for name in read_names(args.names.names)? {
                let reduced = reduce(&name, &terms, positions, args.passes);
                if cli.json {
                    write_json(&mut out, &BasenameRecord { name: &name, basename: &reduced })?;
                } else {
                    writeln!(out, "{reduced}")?;
                }
            }
        }
        Command::Classify(args) => {
            for name in read_names(args.names)? {
                let classification = classify_with(&name, &db);
                if cli.json {
                    let record = ClassifyRecord { name: &name, classification: &classification };
                    write_json(&mut out, &record)?;
                } else {
                    writeln!(
                        out,
                        "{name}\ttypes: {}\tcountries: {}",
                        classification.business_types.join(", "),
                        classification.countries.join(", ")
                    )?;
                }
            }
        }
        Command::Terms { countries } => {
            let sources = if countries {
                db.country_sources()
            } else {
                db.business_type_sources()
            };
            for (category, term) in &sources {
                if cli.json {
                    write_json(&mut out, &SourceRecord { category, term })?;
                } else {
                    writeln!(out, "{category}\t{term}")?;
                }
            }
        }
    }

    Ok(())
}

/// Reduce repeatedly until the result is stable or `passes` runs are spent.
fn reduce(name: &str, terms: &PreparedTerms, positions: Positions, passes: usize) -> String {
    let mut current = custom_basename(name, terms, positions);
    for _ in 1..passes {
        let next = custom_basename(&current, terms, positions);
        if next == current {
            break;
        }
        current = next;
    }
    current
}

fn read_names(names: Vec<String>) -> Result<Vec<String>, CleancoError> {
    if !names.is_empty() {
        return Ok(names);
    }
    let mut lines = Vec::new();
    for line in io::stdin().lock().lines() {
        let line = line?;
        if !line.trim().is_empty() {
            lines.push(line);
        }
    }
    Ok(lines)
}

fn write_json<T: Serialize>(out: &mut impl Write, value: &T) -> Result<(), CleancoError> {
    let line = serde_json::to_string(value)?;
    writeln!(out, "{line}")?;
    Ok(())
}
