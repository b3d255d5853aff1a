//! CLI binary for pdf-layout-extract.
//!
//! A thin shim over the library crate that maps CLI flags to
//! `ExtractConfig` and prints results.

use anyhow::{Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use pdf_layout_extract::{
    extract, inspect, ExtractConfig, ExtractError, ExtractProgressCallback, PageSelection,
    ProgressCallback,
};
use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

// ── ANSI colour helpers (no extra deps) ──────────────────────────────────────

fn green(s: &str) -> String {
    format!("\x1b[32m{s}\x1b[0m")
}
fn red(s: &str) -> String {
    format!("\x1b[31m{s}\x1b[0m")
}
fn dim(s: &str) -> String {
    format!("\x1b[2m{s}\x1b[0m")
}
fn bold(s: &str) -> String {
    format!("\x1b[1m{s}\x1b[0m")
}
fn cyan(s: &str) -> String {
    format!("\x1b[36m{s}\x1b[0m")
}

// ── CLI progress callback using indicatif ────────────────────────────────────

/// Terminal progress callback: a live progress bar plus one log line per
/// completed page. The pipeline is sequential, so events arrive in page
/// order from a single thread.
struct CliProgressCallback {
    bar: ProgressBar,
}

impl CliProgressCallback {
    /// Create a callback whose progress-bar length is set by
    /// `on_extract_start` (called before any pages are processed).
    fn new_dynamic() -> Arc<Self> {
        let bar = ProgressBar::new(0); // length set in on_extract_start

        let spinner_style = ProgressStyle::with_template("{spinner:.cyan} {prefix:.bold}  {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", "⠿"]);

        bar.set_style(spinner_style);
        bar.set_prefix("Preparing");
        bar.set_message("Opening PDF…");
        bar.enable_steady_tick(Duration::from_millis(80));

        Arc::new(Self { bar })
    }

    /// Switch to the full progress-bar style once we know `total`.
    fn activate_bar(&self, total: usize) {
        let progress_style = ProgressStyle::with_template(
            "{spinner:.cyan} {prefix:.bold}  \
             [{bar:42.green/238}] {pos:>3}/{len} pages  \
             ⏱ {elapsed_precise}  ETA {eta_precise}",
        )
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏  ")
        .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", "⠿"]);

        self.bar.set_length(total as u64);
        self.bar.set_style(progress_style);
        self.bar.set_prefix("Extracting");
        self.bar.reset_eta();
    }
}

impl ExtractProgressCallback for CliProgressCallback {
    fn on_extract_start(&self, total_pages: usize) {
        self.activate_bar(total_pages);
        self.bar.println(format!(
            "{} {}",
            cyan("◆"),
            bold(&format!("Starting extraction of {total_pages} pages…"))
        ));
    }

    fn on_page_detected(
        &self,
        page_num: usize,
        text_blocks: usize,
        figure_blocks: usize,
        dropped: usize,
    ) {
        self.bar.set_message(format!(
            "page {page_num}: {text_blocks} text, {figure_blocks} figures ({dropped} dropped)"
        ));
    }

    fn on_page_complete(&self, page_num: usize, total: usize, entries: usize) {
        self.bar.println(format!(
            "  {} Page {:>3}/{:<3}  {}",
            green("✓"),
            page_num,
            total,
            dim(&format!("{entries:>3} entries")),
        ));
        self.bar.inc(1);
    }

    fn on_extract_complete(&self, total_pages: usize, figures_saved: usize) {
        self.bar.finish_and_clear();
        eprintln!(
            "{} {} pages extracted, {} figures saved",
            green("✔"),
            bold(&total_pages.to_string()),
            bold(&figures_saved.to_string()),
        );
    }
}

const AFTER_HELP: &str = r#"EXAMPLES:
  # Basic extraction → paper/extracted_text.txt + paper/page_N_image_M.png
  pdfextract paper.pdf

  # Choose the output directory
  pdfextract paper.pdf -o out/

  # Specific pages only
  pdfextract --pages 1-5 paper.pdf

  # Non-English document
  pdfextract --lang deu scan.pdf

  # Use a specific layout model export
  pdfextract --model models/publaynet.onnx paper.pdf

  # Inspect PDF metadata (no model or Tesseract needed)
  pdfextract --inspect-only paper.pdf

  # Machine-readable run summary
  pdfextract --json paper.pdf > run.json

OUTPUT LAYOUT:
  {input_basename}/
    extracted_text.txt        all recognised text; figures appear inline as
                              [Image: page_N_image_M.png] placeholders
    page_N_image_M.png        cropped figure regions, 1-based per page

ENVIRONMENT VARIABLES:
  LAYOUT_MODEL_PATH       Path to the ONNX layout model (same as --model)
  PDFIUM_LIB_PATH         Path to an existing libpdfium build
  TESSDATA_PREFIX         Tesseract language-data directory

SETUP:
  1. Install Tesseract:   apt install tesseract-ocr    (or brew install tesseract)
  2. Fetch the model:     an ONNX export of PubLayNet faster_rcnn_R_50_FPN_3x
  3. Extract:             pdfextract document.pdf
"#;

/// Extract text and figures from PDFs using layout detection and OCR.
#[derive(Parser, Debug)]
#[command(
    name = "pdfextract",
    version,
    about = "Extract text and figures from PDFs using layout detection and OCR",
    long_about = "Extract a PDF's text and figures by rendering each page, detecting layout \
regions with a PubLayNet-style ONNX model, saving figure regions as PNGs, and recognising \
text regions with Tesseract. Produces a single extracted_text.txt with inline figure \
placeholders.",
    arg_required_else_help = true,
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// Local PDF file path.
    input: String,

    /// Output directory (default: input file name without extension).
    #[arg(short, long, env = "PDFEXTRACT_OUTPUT_DIR")]
    output_dir: Option<PathBuf>,

    /// Rendering DPI (72–600).
    #[arg(long, env = "PDFEXTRACT_DPI", default_value_t = 300,
          value_parser = clap::value_parser!(u32).range(72..=600))]
    dpi: u32,

    /// Minimum detection confidence (0.0–1.0).
    #[arg(long, env = "PDFEXTRACT_SCORE_THRESHOLD", default_value_t = 0.5)]
    score_threshold: f32,

    /// Tesseract language code(s), e.g. eng or eng+fra.
    #[arg(long, env = "PDFEXTRACT_LANG", default_value = "eng")]
    lang: String,

    /// Path to the ONNX layout model.
    #[arg(long, env = "LAYOUT_MODEL_PATH")]
    model: Option<PathBuf>,

    /// Page selection: all, 5, 3-15, or 1,3,5,7.
    #[arg(long, env = "PDFEXTRACT_PAGES", default_value = "all")]
    pages: String,

    /// PDF user password for encrypted documents.
    #[arg(long, env = "PDFEXTRACT_PASSWORD")]
    password: Option<String>,

    /// Output a structured JSON run summary to stdout.
    #[arg(long, env = "PDFEXTRACT_JSON")]
    json: bool,

    /// Disable progress bar.
    #[arg(long, env = "PDFEXTRACT_NO_PROGRESS")]
    no_progress: bool,

    /// Print PDF metadata only, no extraction.
    #[arg(long)]
    inspect_only: bool,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long, env = "PDFEXTRACT_VERBOSE")]
    verbose: bool,

    /// Suppress all output except errors.
    #[arg(short, long, env = "PDFEXTRACT_QUIET")]
    quiet: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // ── Logging setup ────────────────────────────────────────────────────
    // Suppress INFO-level library logs when the progress bar is active;
    // the bar provides all the feedback that matters to the user.
    let show_progress = !cli.quiet && !cli.no_progress && !cli.json;
    let filter = if cli.verbose {
        "debug"
    } else if cli.quiet || show_progress {
        "error"
    } else {
        "info"
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();

    // ── Inspect-only mode ────────────────────────────────────────────────
    if cli.inspect_only {
        let meta =
            inspect(&cli.input, cli.password.as_deref()).context("Failed to inspect PDF")?;

        if cli.json {
            println!(
                "{}",
                serde_json::to_string_pretty(&meta).context("Failed to serialise metadata")?
            );
        } else {
            println!("File:         {}", cli.input);
            if let Some(ref t) = meta.title {
                println!("Title:        {}", t);
            }
            if let Some(ref a) = meta.author {
                println!("Author:       {}", a);
            }
            if let Some(ref s) = meta.subject {
                println!("Subject:      {}", s);
            }
            println!("Pages:        {}", meta.page_count);
            println!("PDF Version:  {}", meta.pdf_version);
            if let Some(ref p) = meta.producer {
                println!("Producer:     {}", p);
            }
            if let Some(ref c) = meta.creator {
                println!("Creator:      {}", c);
            }
        }
        return Ok(());
    }

    // ── Build config ─────────────────────────────────────────────────────
    let progress_cb: Option<ProgressCallback> = if show_progress {
        let cb = CliProgressCallback::new_dynamic();
        Some(cb as Arc<dyn ExtractProgressCallback>)
    } else {
        None
    };

    let config = build_config(&cli, progress_cb)?;

    // ── Run extraction ───────────────────────────────────────────────────
    let output = match extract(&cli.input, &config) {
        Ok(output) => output,
        Err(ExtractError::NoOcrEngine { .. }) => {
            // Exact historical contract: fixed message, exit code 1.
            println!("No OCR tool found");
            std::process::exit(1);
        }
        Err(e) => return Err(e).context("Extraction failed"),
    };

    if cli.json {
        let json = serde_json::to_string_pretty(&output).context("Failed to serialise output")?;
        println!("{json}");
    } else if !cli.quiet && !show_progress {
        // Inline summary only when the progress callback didn't print one.
        eprintln!(
            "Extracted {}/{} pages in {}ms",
            output.stats.processed_pages, output.stats.total_pages, output.stats.total_duration_ms
        );
    }

    if !cli.quiet && !cli.json {
        eprintln!(
            "   {} text regions  /  {} figures  {}  →  {}",
            dim(&output.stats.text_regions.to_string()),
            dim(&output.stats.figure_regions.to_string()),
            dim(&format!("({} dropped)", output.stats.dropped_regions)),
            bold(&output.text_path.display().to_string()),
        );
        if output.stats.dropped_regions > 0 && cli.verbose {
            eprintln!(
                "   {} Title/List/Table regions were discarded ({})",
                red(&output.stats.dropped_regions.to_string()),
                dim("use --verbose logs to see where"),
            );
        }
    }

    Ok(())
}

/// Map CLI args to `ExtractConfig`.
fn build_config(cli: &Cli, progress: Option<ProgressCallback>) -> Result<ExtractConfig> {
    let pages = parse_pages(&cli.pages)?;

    let mut builder = ExtractConfig::builder()
        .dpi(cli.dpi)
        .score_threshold(cli.score_threshold)
        .ocr_language(&cli.lang)
        .pages(pages);

    if let Some(ref model) = cli.model {
        builder = builder.model_path(model);
    }
    if let Some(ref dir) = cli.output_dir {
        builder = builder.output_dir(dir);
    }
    if let Some(ref password) = cli.password {
        builder = builder.password(password);
    }
    if let Some(cb) = progress {
        builder = builder.progress_callback(cb);
    }

    builder.build().context("Invalid configuration")
}

/// Parse `--pages` string into `PageSelection`.
fn parse_pages(s: &str) -> Result<PageSelection> {
    let s = s.trim().to_lowercase();

    if s == "all" {
        return Ok(PageSelection::All);
    }

    // Range: "3-15"
    if let Some((start, end)) = s.split_once('-') {
        let start: usize = start
            .trim()
            .parse()
            .context("Invalid start page in range")?;
        let end: usize = end.trim().parse().context("Invalid end page in range")?;

        if start < 1 {
            anyhow::bail!("Pages are 1-indexed, minimum is 1 (got {})", start);
        }
        if start > end {
            anyhow::bail!(
                "Invalid page range '{}-{}': start must be <= end",
                start,
                end
            );
        }

        return Ok(PageSelection::Range(start, end));
    }

    // Set: "1,3,5,7"
    if s.contains(',') {
        let pages: Vec<usize> = s
            .split(',')
            .map(|p| {
                p.trim()
                    .parse::<usize>()
                    .context(format!("Invalid page number: '{}'", p.trim()))
            })
            .collect::<Result<Vec<_>>>()?;

        for &p in &pages {
            if p < 1 {
                anyhow::bail!("Pages are 1-indexed, minimum is 1 (got {})", p);
            }
        }

        return Ok(PageSelection::Set(pages));
    }

    // Single page: "5"
    let page: usize = s.parse().context("Invalid page number")?;
    if page < 1 {
        anyhow::bail!("Pages are 1-indexed, minimum is 1 (got {})", page);
    }

    Ok(PageSelection::Single(page))
}
