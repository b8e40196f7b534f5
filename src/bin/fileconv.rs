//! CLI binary for fileconv.
//!
//! A thin shim over the library crate: pick a converter from the sniffed
//! media type, run one conversion, print the output path. Run with no
//! arguments for the interactive prompt flow.

use anyhow::{Context, Result};
use clap::Parser;
use dialoguer::Input;
use fileconv::{
    media_type, DocumentConfig, DocumentConverter, FileConverter, ImageConverter,
};
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use std::io;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tracing_subscriber::EnvFilter;

// ── ANSI colour helpers (no extra deps) ──────────────────────────────────────

fn green(s: &str) -> String {
    format!("\x1b[32m{s}\x1b[0m")
}
fn bold(s: &str) -> String {
    format!("\x1b[1m{s}\x1b[0m")
}
fn dim(s: &str) -> String {
    format!("\x1b[2m{s}\x1b[0m")
}

const AFTER_HELP: &str = r#"EXAMPLES:
  # Convert an image (writes photo.jpg next to the source)
  fileconv photo.png jpg

  # Convert a document via LibreOffice
  fileconv notes.odt pdf

  # Point at a specific soffice binary
  fileconv --soffice /opt/libreoffice/program/soffice report.docx pdf

  # Machine-readable report
  fileconv --json photo.png webp

  # No arguments: interactive prompts
  fileconv

SUPPORTED TARGETS:
  images     jpeg, jpg, png, webp, bmp, gif
  documents  pdf, docx, doc, odt, txt, rtf, html

The converter is chosen from the file's sniffed media type (magic bytes),
never from its name: image/* inputs use the built-in image codecs, document
inputs are handed to LibreOffice (soffice --headless).

ENVIRONMENT VARIABLES:
  FILECONV_SOFFICE   Path to the soffice binary
"#;

/// Convert a local file to another format.
#[derive(Parser, Debug)]
#[command(
    name = "fileconv",
    version,
    about = "Convert a local file to another format",
    long_about = "Convert a single local file to another format. Images are converted with \
built-in codecs; documents are delegated to LibreOffice. The input's actual type is sniffed \
from its content, so a mislabelled file is rejected up front.",
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// Path of the file to convert. Prompted for when omitted.
    input: Option<PathBuf>,

    /// Target format token, e.g. jpg, png, pdf. Prompted for when omitted.
    format: Option<String>,

    /// Path to the soffice binary (document conversion only).
    #[arg(long, env = "FILECONV_SOFFICE")]
    soffice: Option<PathBuf>,

    /// Print a JSON report instead of status lines.
    #[arg(long)]
    json: bool,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long)]
    verbose: bool,

    /// Suppress all output except errors.
    #[arg(short, long)]
    quiet: bool,
}

/// Machine-readable conversion report for `--json`.
#[derive(Serialize)]
struct Report {
    input: PathBuf,
    media_type: String,
    target: String,
    output: PathBuf,
    elapsed_ms: u64,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // ── Logging setup ────────────────────────────────────────────────────
    let filter = if cli.verbose {
        "debug"
    } else if cli.quiet || cli.json {
        "error"
    } else {
        "warn"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();

    // ── Collect input path and target format ─────────────────────────────
    let input = match cli.input {
        Some(path) => path,
        None => prompt_input_path()?,
    };
    let format = match cli.format {
        Some(fmt) => fmt,
        None => prompt_target_format()?,
    };

    // ── Pick a converter from the sniffed media type ─────────────────────
    let mime = media_type(&input)?;
    let show_spinner = !cli.quiet && !cli.json;
    let spinner = show_spinner.then(|| converting_spinner(&input, &format));

    let start = Instant::now();
    let result = run_conversion(&input, &mime, &format, cli.soffice);
    if let Some(bar) = &spinner {
        bar.finish_and_clear();
    }
    let output = result?;
    let elapsed_ms = start.elapsed().as_millis() as u64;

    // ── Report ───────────────────────────────────────────────────────────
    if cli.json {
        let report = Report {
            input,
            media_type: mime,
            target: format,
            output,
            elapsed_ms,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else if !cli.quiet {
        println!(
            "{} Conversion complete! {} {}",
            green("✔"),
            bold(&output.display().to_string()),
            dim(&format!("({elapsed_ms} ms)"))
        );
    }
    Ok(())
}

/// Run the conversion with the converter matching `mime`.
fn run_conversion(
    input: &Path,
    mime: &str,
    format: &str,
    soffice: Option<PathBuf>,
) -> Result<PathBuf> {
    let output = if mime.starts_with("image/") {
        let converter = ImageConverter::open(input)?;
        converter.convert(format)?
    } else {
        let config = DocumentConfig {
            soffice_path: soffice,
        };
        let converter = DocumentConverter::open_with(input, &config)?;
        converter.convert(format)?
    };
    Ok(output)
}

// ── Interactive prompts ──────────────────────────────────────────────────────

fn prompt_input_path() -> Result<PathBuf> {
    let path: String = Input::new()
        .with_prompt("Enter path of file to convert")
        .validate_with(|input: &String| -> Result<(), String> {
            if Path::new(input).exists() {
                Ok(())
            } else {
                Err(format!("'{input}' does not exist"))
            }
        })
        .interact_text()
        .context("Failed to read input path")?;
    Ok(PathBuf::from(path))
}

fn prompt_target_format() -> Result<String> {
    Input::new()
        .with_prompt("Enter the file format to convert to")
        .interact_text()
        .context("Failed to read target format")
}

fn converting_spinner(input: &Path, format: &str) -> ProgressBar {
    let bar = ProgressBar::new_spinner();
    bar.set_style(
        ProgressStyle::with_template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", "⠿"]),
    );
    bar.set_message(format!(
        "Converting {} to {format}…",
        input.display()
    ));
    bar.enable_steady_tick(Duration::from_millis(80));
    bar
}
