//! Slidelabel: Sedeen whole-slide annotation parser.
//!
//! Slidelabel reads the XML files written by the Sedeen viewer and turns
//! them into labeled point and polygon annotations. Labels are reconstructed
//! from pen colors, exact duplicate shapes are dropped, and concentric
//! shapes drawn in the annular marker color are merged into polygons with
//! holes.
//!
//! # Modules
//!
//! - [`ir`]: Annotation types (SlideAnnotations, Annotation, Label, etc.)
//! - [`sedeen`]: The Sedeen XML reader and its parsing stages
//! - [`config`]: Label maps (renames and fixed vocabularies)
//! - [`inspect`]: Summary statistics for parsed slides
//! - [`error`]: Error types for slidelabel operations

pub mod config;
pub mod error;
pub mod inspect;
pub mod ir;
pub mod sedeen;

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};

pub use error::SlideLabelError;

/// The slidelabel CLI application.
#[derive(Parser)]
#[command(name = "slidelabel")]
#[command(version, author, about)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Convert a Sedeen XML file into annotation JSON.
    Convert(ConvertArgs),
    /// Show summary statistics for a Sedeen XML file.
    Inspect(InspectArgs),
    /// List the label vocabulary of a Sedeen XML file.
    Labels(LabelsArgs),
}

/// Options shared by every subcommand that parses a document.
#[derive(clap::Args)]
struct ParseArgs {
    /// Sedeen XML annotation file.
    input: PathBuf,

    /// Factor applied to every coordinate.
    #[arg(long, env = "SLIDELABEL_SCALE", default_value_t = 1.0)]
    scale: f64,

    /// YAML or JSON label map with renames and an optional fixed vocabulary.
    #[arg(long, env = "SLIDELABEL_LABEL_MAP")]
    label_map: Option<PathBuf>,

    /// Order in which discovered pen colors receive label values.
    #[arg(long, value_enum, default_value_t = LabelOrderArg::Sorted)]
    label_order: LabelOrderArg,
}

#[derive(Clone, Copy, ValueEnum)]
enum LabelOrderArg {
    Sorted,
    FirstSeen,
}

impl From<LabelOrderArg> for sedeen::LabelOrder {
    fn from(arg: LabelOrderArg) -> Self {
        match arg {
            LabelOrderArg::Sorted => sedeen::LabelOrder::Sorted,
            LabelOrderArg::FirstSeen => sedeen::LabelOrder::FirstSeen,
        }
    }
}

/// Arguments for the convert subcommand.
#[derive(clap::Args)]
struct ConvertArgs {
    #[command(flatten)]
    parse: ParseArgs,

    /// Output file (defaults to stdout).
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Pretty-print the JSON.
    #[arg(long)]
    pretty: bool,
}

/// Arguments for the inspect subcommand.
#[derive(clap::Args)]
struct InspectArgs {
    #[command(flatten)]
    parse: ParseArgs,

    /// Output format for the report ('text' or 'json').
    #[arg(long, default_value = "text")]
    output: String,

    /// Width of the label histogram bars.
    #[arg(
        long,
        default_value_t = 20,
        value_parser = clap::value_parser!(u16).range(0..=inspect::MAX_BAR_WIDTH as i64)
    )]
    bar_width: u16,
}

/// Arguments for the labels subcommand.
#[derive(clap::Args)]
struct LabelsArgs {
    #[command(flatten)]
    parse: ParseArgs,

    /// Output format ('text' or 'json').
    #[arg(long, default_value = "text")]
    output: String,
}

/// Run the slidelabel CLI.
///
/// This is the main entry point for the CLI, called from `main.rs`.
pub fn run() -> Result<(), SlideLabelError> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Convert(args)) => run_convert(args),
        Some(Commands::Inspect(args)) => run_inspect(args),
        Some(Commands::Labels(args)) => run_labels(args),
        None => {
            println!("slidelabel {}", env!("CARGO_PKG_VERSION"));
            println!();
            println!("Sedeen whole-slide annotation parser.");
            println!();
            println!("Run 'slidelabel --help' for usage information.");
            Ok(())
        }
    }
}

fn parse_input(args: &ParseArgs) -> Result<sedeen::ParseOutcome, SlideLabelError> {
    let mut opts = sedeen::ParseOptions::default()
        .with_scale(args.scale)
        .with_label_order(args.label_order.into());
    if let Some(path) = &args.label_map {
        opts = opts.with_label_map(config::read_label_map(path)?)?;
    }
    sedeen::read_sedeen_xml_outcome(&args.input, &opts)
}

fn check_output_format(output: &str) -> Result<(), SlideLabelError> {
    match output {
        "text" | "json" => Ok(()),
        other => Err(SlideLabelError::UnsupportedFormat(format!(
            "'{}' (supported: text, json)",
            other
        ))),
    }
}

fn to_json<T: serde::Serialize>(
    value: &T,
    pretty: bool,
    path: &Path,
) -> Result<String, SlideLabelError> {
    let rendered = if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    };
    rendered.map_err(|source| SlideLabelError::JsonWrite {
        path: path.to_path_buf(),
        source,
    })
}

/// Execute the convert subcommand.
fn run_convert(args: ConvertArgs) -> Result<(), SlideLabelError> {
    let outcome = parse_input(&args.parse)?;

    match &args.output {
        Some(path) => {
            let json = to_json(&outcome.slide, args.pretty, path)?;
            fs::write(path, json + "\n").map_err(SlideLabelError::Io)?;
            eprintln!(
                "Converted {} annotation(s) from {} to {}",
                outcome.slide.annotations.len(),
                args.parse.input.display(),
                path.display()
            );
        }
        None => {
            let json = to_json(&outcome.slide, args.pretty, Path::new("<stdout>"))?;
            let mut stdout = std::io::stdout().lock();
            writeln!(stdout, "{json}").map_err(SlideLabelError::Io)?;
        }
    }
    Ok(())
}

/// Execute the inspect subcommand.
fn run_inspect(args: InspectArgs) -> Result<(), SlideLabelError> {
    check_output_format(&args.output)?;
    let outcome = parse_input(&args.parse)?;

    let opts = inspect::InspectOptions {
        bar_width: usize::from(args.bar_width),
    };
    let report = inspect::inspect_outcome(&outcome, &opts);

    if args.output == "json" {
        println!("{}", to_json(&report, true, Path::new("<stdout>"))?);
    } else {
        print!("{}", report);
    }
    Ok(())
}

/// Execute the labels subcommand.
fn run_labels(args: LabelsArgs) -> Result<(), SlideLabelError> {
    check_output_format(&args.output)?;
    let outcome = parse_input(&args.parse)?;
    let labels = &outcome.slide.labels;

    if args.output == "json" {
        println!("{}", to_json(labels, true, Path::new("<stdout>"))?);
        return Ok(());
    }

    if labels.is_empty() {
        println!("No labels found.");
    }
    for label in labels {
        println!(
            "{:>4}  {:<16} {}",
            label.value,
            label.name,
            label.color.as_deref().unwrap_or("-")
        );
    }
    Ok(())
}
