//! omrcorpus: OCR training corpus export for engraved music.
//!
//! omrcorpus takes a laid-out score (the [`scene`]), associates every
//! visible glyph with the staff it sits on, merges staff geometry observed
//! across measure fragments, sorts and validates the result and writes it
//! as a protobuf [`corpus::Layout`] ready for training an optical music
//! recognition model.
//!
//! # Modules
//!
//! - [`scene`]: Input element model handed over by the layout engine
//! - [`corpus`]: Protobuf output model and `.pb` reader/writer
//! - [`export`]: Staff location, geometry accumulation and piece collection
//! - [`validation`]: Canonical ordering and piece anomaly detection
//! - [`inspect`]: Summary statistics for written corpora
//! - [`error`]: Error types for omrcorpus operations

pub mod corpus;
pub mod error;
pub mod export;
pub mod inspect;
pub mod scene;
pub mod validation;

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

pub use error::CorpusError;

/// The omrcorpus CLI application.
#[derive(Parser)]
#[command(name = "omrcorpus")]
#[command(version, author, about)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Export a laid-out scene to a validated corpus file.
    Export(ExportArgs),
    /// Summarize a corpus file.
    Inspect(InspectArgs),
}

/// Report output formats.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum ReportFormat {
    Text,
    Json,
}

/// Arguments for the export subcommand.
#[derive(clap::Args)]
struct ExportArgs {
    /// Scene JSON produced by the layout engine.
    input: PathBuf,

    /// Output name; `.pb` is appended.
    #[arg(short, long)]
    output: PathBuf,

    /// Magnification applied to all page coordinates.
    #[arg(long, default_value_t = 1.0, env = "OMRCORPUS_MAG")]
    mag: f64,

    /// Additional element names allowed to have no staff.
    #[arg(long = "allow", value_name = "NAME")]
    allow: Vec<String>,

    /// Output format for the report.
    #[arg(long, value_enum, default_value = "text", env = "OMRCORPUS_REPORT")]
    report: ReportFormat,

    /// Exit non-zero if any piece was flagged or removed.
    #[arg(long, env = "OMRCORPUS_STRICT")]
    strict: bool,
}

/// Arguments for the inspect subcommand.
#[derive(clap::Args)]
struct InspectArgs {
    /// Corpus file (`.pb`).
    input: PathBuf,

    /// Output format for the report.
    #[arg(long, value_enum, default_value = "text")]
    output: ReportFormat,

    /// Number of categories to list.
    #[arg(long, default_value_t = 10)]
    top: usize,
}

/// Builds the log filter from `RUST_LOG`-style directives, falling back to
/// `warn` when none are given or they do not parse.
pub fn log_filter(directives: Option<&str>) -> EnvFilter {
    directives
        .filter(|d| !d.trim().is_empty())
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::new("warn"))
}

/// Serializes a report for `--report json` / `--output json`.
fn report_json<T: Serialize>(value: &T) -> Result<String, CorpusError> {
    serde_json::to_string_pretty(value).map_err(|source| CorpusError::ReportJson { source })
}

/// Run the omrcorpus CLI.
///
/// This is the main entry point for the CLI, called from `main.rs`.
pub fn run() -> Result<(), CorpusError> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Export(args)) => run_export(args),
        Some(Commands::Inspect(args)) => run_inspect(args),
        None => {
            println!("omrcorpus {}", env!("CARGO_PKG_VERSION"));
            println!();
            println!("OCR training corpus export for engraved music.");
            println!();
            println!("Run 'omrcorpus --help' for usage information.");
            Ok(())
        }
    }
}

/// Execute the export subcommand.
fn run_export(args: ExportArgs) -> Result<(), CorpusError> {
    let scene = scene::io_json::read_scene_json(&args.input)?;

    let mut opts = export::ExportOptions {
        magnification: args.mag,
        ..Default::default()
    };
    opts.staffless.extend(args.allow);

    let (path, outcome) = export::save_pieces(&scene, &args.output, &opts)?;

    match args.report {
        ReportFormat::Json => {
            let json = serde_json::json!({
                "path": path.display().to_string(),
                "staves": outcome.staff_count(),
                "pieces": outcome.piece_count(),
                "flagged": outcome.flagged_count(),
                "removed": outcome.removed_count(),
                "issues": outcome.report.issues,
            });
            println!("{}", report_json(&json)?);
        }
        ReportFormat::Text => {
            println!(
                "Wrote {} staves and {} pieces to {}",
                outcome.staff_count(),
                outcome.piece_count(),
                path.display()
            );
            print!("{}", outcome.report);
        }
    }

    let flagged = outcome.flagged_count();
    let removed = outcome.removed_count();
    if args.strict && (flagged > 0 || removed > 0) {
        return Err(CorpusError::ExportFlagged {
            flagged,
            removed,
            report: outcome.report,
        });
    }
    Ok(())
}

/// Execute the inspect subcommand.
fn run_inspect(args: InspectArgs) -> Result<(), CorpusError> {
    let layout = corpus::io_pb::read_layout(&args.input)?;
    let opts = inspect::InspectOptions {
        top_categories: args.top,
        ..Default::default()
    };
    let report = inspect::inspect_layout(&layout, &opts);

    match args.output {
        ReportFormat::Json => {
            println!("{}", report_json(&report)?);
        }
        ReportFormat::Text => print!("{}", report),
    }
    Ok(())
}
