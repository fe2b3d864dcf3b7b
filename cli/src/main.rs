//! odtkit CLI - inspect and edit OpenDocument Text files
//!
//! A command-line front end over the odtkit document views.

use clap::{Parser, Subcommand};
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use odtkit::render::{JsonFormat, RenderOptions};
use odtkit::{Document, StyleFamily};
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Inspect and edit OpenDocument Text (.odt) files
#[derive(Parser)]
#[command(
    name = "odtkit",
    version,
    about = "Inspect and edit OpenDocument Text files",
    long_about = "odtkit - cursor-style access to .odt documents.\n\n\
                  Prints the text or structure of a document and appends\n\
                  paragraphs and styles without touching the rest of the package."
)]
struct Cli {
    /// Log library events (same as RUST_LOG=odtkit=debug)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show document structure summary
    Info {
        /// Input file path
        input: PathBuf,

        /// Print the summary as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the document as plain text
    Text {
        /// Input file path
        input: PathBuf,

        /// Output file path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Keep a line for empty paragraphs
        #[arg(long)]
        empty: bool,

        /// Separator between table cells
        #[arg(long, default_value = "\t")]
        separator: String,
    },

    /// Print the document outline as JSON
    Json {
        /// Input file path
        input: PathBuf,

        /// Output file path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output compact JSON (no indentation)
        #[arg(long)]
        compact: bool,
    },

    /// Append a paragraph to the end of the body
    Append {
        /// Document to edit
        input: PathBuf,

        /// Paragraph text
        text: String,

        /// Paragraph style name
        #[arg(long, default_value = odtkit::tags::DEFAULT_PARAGRAPH_STYLE)]
        style: String,

        /// Run style name
        #[arg(long, default_value = odtkit::tags::DEFAULT_RUN_STYLE)]
        run_style: String,

        /// Write to this file instead of editing in place
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Add an automatic style definition
    Style {
        /// Document to edit
        input: PathBuf,

        /// Style name
        name: String,

        /// Style family: table, column, row, cell, paragraph or run
        family: StyleFamily,

        /// Formatting property as key=value (repeatable)
        #[arg(short, long = "property", value_parser = parse_property)]
        properties: Vec<(String, String)>,

        /// Write to this file instead of editing in place
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show version information
    Version,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "odtkit=debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)),
        )
        .with_writer(io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Info { input, json } => {
            let pb = create_spinner("Analyzing document...");

            let format = odtkit::detect_format_from_path(&input)?;
            let doc = Document::from_path(&input)?;
            let entries = doc.container_entries()?;
            let outline = odtkit::render::outline(&doc);

            pb.finish_and_clear();

            let paragraphs = outline.paragraphs().count();
            let tables: Vec<Vec<usize>> = outline.tables().map(|t| t.shape()).collect();
            let text = odtkit::render::to_text(&outline, &RenderOptions::default());
            let words = text.split_whitespace().count();

            if json {
                let summary = serde_json::json!({
                    "file": input.display().to_string(),
                    "format": format.name(),
                    "entries": entries,
                    "paragraphs": paragraphs,
                    "tables": tables,
                    "styles": outline.styles.len(),
                    "words": words,
                });
                println!("{}", serde_json::to_string_pretty(&summary)?);
                return Ok(());
            }

            println!("{}", "Document Information".cyan().bold());
            println!("{}", "─".repeat(40));
            println!(
                "{}: {}",
                "File".bold(),
                input.file_name().unwrap_or_default().to_string_lossy()
            );
            println!("{}: {}", "Format".bold(), format);
            println!("{}: {}", "Entries".bold(), entries.len());
            println!("{}: {}", "Paragraphs".bold(), paragraphs);
            println!("{}: {}", "Tables".bold(), tables.len());
            for (i, shape) in tables.iter().enumerate() {
                println!(
                    "  {} {}: {} rows, cells per row {:?}",
                    "Table".bold(),
                    i + 1,
                    shape.len(),
                    shape
                );
            }
            println!("{}: {}", "Automatic styles".bold(), outline.styles.len());

            println!("\n{}", "Content Statistics".cyan().bold());
            println!("{}", "─".repeat(40));
            println!("{}: {}", "Words".bold(), words);
            println!("{}: {}", "Characters".bold(), text.chars().count());
        }

        Commands::Text {
            input,
            output,
            empty,
            separator,
        } => {
            let pb = create_spinner("Reading document...");

            let doc = Document::from_path(&input)?;
            let options = RenderOptions::new()
                .with_empty_paragraphs(empty)
                .with_cell_separator(separator);
            let text = odtkit::render::to_text(&odtkit::render::outline(&doc), &options);

            pb.finish_and_clear();
            write_output(output.as_ref(), &text)?;
            report_written("text", output.as_ref());
        }

        Commands::Json {
            input,
            output,
            compact,
        } => {
            let pb = create_spinner("Reading document...");

            let doc = Document::from_path(&input)?;
            let format = if compact {
                JsonFormat::Compact
            } else {
                JsonFormat::Pretty
            };
            let json = odtkit::render::to_json(&odtkit::render::outline(&doc), format)?;

            pb.finish_and_clear();
            write_output(output.as_ref(), &json)?;
            report_written("JSON", output.as_ref());
        }

        Commands::Append {
            input,
            text,
            style,
            run_style,
            output,
        } => {
            let mut doc = Document::from_path(&input)?;
            let paragraph = doc.add_paragraph(&style)?;
            if !text.is_empty() {
                paragraph.add_run_with_style(&text, &run_style)?;
            }
            save(&doc, output.as_ref())?;
            println!(
                "{} Appended paragraph to {}",
                "✓".green().bold(),
                output.as_ref().unwrap_or(&input).display()
            );
        }

        Commands::Style {
            input,
            name,
            family,
            properties,
            output,
        } => {
            let mut doc = Document::from_path(&input)?;
            if doc.automatic_styles().is_none() {
                return Err(format!("{} has no automatic styles section", input.display()).into());
            }
            doc.styles().add_style(&name, family, &properties)?;
            save(&doc, output.as_ref())?;
            println!(
                "{} Added {} style {}",
                "✓".green().bold(),
                family,
                name.as_str().bold()
            );
        }

        Commands::Version => {
            print_version();
        }
    }

    Ok(())
}

fn save(doc: &Document, output: Option<&PathBuf>) -> odtkit::Result<()> {
    match output {
        Some(path) => doc.save_copy(path),
        None => doc.save(),
    }
}

fn parse_property(s: &str) -> Result<(String, String), String> {
    match s.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => {
            Ok((key.trim().to_string(), value.to_string()))
        }
        _ => Err(format!("expected key=value, got '{}'", s)),
    }
}

fn print_version() {
    println!("{} {}", "odtkit".green().bold(), env!("CARGO_PKG_VERSION"));
    println!("Cursor-style read/write access to OpenDocument Text files");
    println!();
    println!("Supported formats: ODT, OTT");
}

fn create_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner()
        .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"])
        .template("{spinner:.blue} {msg}")
    {
        pb.set_style(style);
    }
    pb.set_message(message.to_string());
    pb.enable_steady_tick(std::time::Duration::from_millis(100));
    pb
}

fn report_written(what: &str, output: Option<&PathBuf>) {
    if let Some(path) = output {
        println!(
            "{} Converted to {}: {}",
            "✓".green().bold(),
            what,
            path.display()
        );
    }
}

fn write_output(path: Option<&PathBuf>, content: &str) -> Result<(), Box<dyn std::error::Error>> {
    match path {
        Some(p) => {
            fs::write(p, content)?;
        }
        None => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            writeln!(handle, "{}", content)?;
        }
    }
    Ok(())
}
