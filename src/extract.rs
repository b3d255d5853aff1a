//! The extraction pipeline entry points.
//!
//! [`extract`] runs the whole sequence for one PDF: validate the input,
//! probe for an OCR engine, load the layout model, then for each selected
//! page rasterise → detect → split → save figures → OCR text regions, and
//! finally write `extracted_text.txt`. Everything is strictly sequential;
//! a failure at any point past the OCR probe aborts the run.

use crate::config::ExtractConfig;
use crate::error::ExtractError;
use crate::output::{DocumentMetadata, ExtractOutput, ExtractStats, OutputEntry, SavedFigure};
use crate::pipeline::detect::LayoutModel;
use crate::pipeline::{assemble, figures, input, ocr, render, split};
use crate::progress::{NoopProgressCallback, ProgressCallback};
use std::fs;
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Name of the assembled text file inside the output directory.
pub const OUTPUT_TEXT_FILENAME: &str = "extracted_text.txt";

/// Run the full extraction pipeline on `input`.
///
/// The output directory is `config.output_dir` if set, otherwise a
/// directory named after the input file (without extension) in the
/// current working directory. It is created if missing; files from a
/// previous run over the same document are overwritten.
pub fn extract(input: &str, config: &ExtractConfig) -> Result<ExtractOutput, ExtractError> {
    let run_start = Instant::now();
    let mut stats = ExtractStats::default();

    let pdf_path = input::resolve_input(input)?;
    info!("Extracting {}", pdf_path.display());

    // OCR availability is the one thing checked before any PDF work, so a
    // machine without Tesseract fails before spending time on rendering.
    let mut engine = ocr::first_engine(&config.ocr_language)?;
    debug!(
        "Using OCR engine '{}' for language '{}'",
        engine.name(),
        engine.language()
    );

    let model_path = config.resolved_model_path();
    let mut model = LayoutModel::load(&model_path)?;

    let metadata = render::extract_metadata(&pdf_path, config.password.as_deref())?;
    let total_pages = metadata.page_count;
    stats.total_pages = total_pages;

    let indices = config.pages.to_indices(total_pages);
    if indices.is_empty() {
        return Err(ExtractError::PageOutOfRange {
            page: first_requested_page(config),
            total: total_pages,
        });
    }
    stats.processed_pages = indices.len();

    let output_dir = config
        .output_dir
        .clone()
        .unwrap_or_else(|| input::default_output_dir(&pdf_path));
    fs::create_dir_all(&output_dir).map_err(|source| ExtractError::OutputDir {
        path: output_dir.clone(),
        source,
    })?;

    let progress: ProgressCallback = config
        .progress_callback
        .clone()
        .unwrap_or_else(|| Arc::new(NoopProgressCallback));
    progress.on_extract_start(indices.len());

    let mut entries: Vec<OutputEntry> = Vec::new();
    let mut saved_figures: Vec<SavedFigure> = Vec::new();

    render::with_document(&pdf_path, config.password.as_deref(), |document| {
        for &page_index in &indices {
            let page_num = page_index + 1;
            let entries_before = entries.len();

            let t = Instant::now();
            let image = render::render_page(document, page_index, config.dpi)?;
            stats.render_duration_ms += t.elapsed().as_millis() as u64;

            let t = Instant::now();
            let regions = model.detect(&image, config.score_threshold, page_num)?;
            stats.detect_duration_ms += t.elapsed().as_millis() as u64;

            let page = split::split(regions);
            progress.on_page_detected(
                page_num,
                page.text.len(),
                page.figures.len(),
                page.dropped,
            );
            stats.text_regions += page.text.len();
            stats.figure_regions += page.figures.len();
            stats.dropped_regions += page.dropped;

            let page_figures =
                figures::save_figures(&image, &page.figures, page_num, &output_dir)?;

            let t = Instant::now();
            let mut texts = Vec::with_capacity(page.text.len());
            for region in &page.text {
                let Some((x, y, w, h)) = region.bbox.to_crop(image.width(), image.height())
                else {
                    warn!(
                        "Page {}: degenerate text box {:?}, recording empty entry",
                        page_num, region.bbox
                    );
                    texts.push(String::new());
                    continue;
                };
                let cropped = image.crop_imm(x, y, w, h);
                texts.push(engine.recognize(&cropped, page_num)?);
            }
            stats.ocr_duration_ms += t.elapsed().as_millis() as u64;

            entries.extend(assemble::page_entries(&page_figures, texts));
            saved_figures.extend(page_figures);

            progress.on_page_complete(page_num, indices.len(), entries.len() - entries_before);
        }
        Ok(())
    })?;

    let text_path = output_dir.join(OUTPUT_TEXT_FILENAME);
    assemble::write_text(&assemble::assemble(&entries), &text_path)?;

    stats.total_duration_ms = run_start.elapsed().as_millis() as u64;
    progress.on_extract_complete(indices.len(), saved_figures.len());
    info!(
        "Done: {} pages, {} text regions, {} figures in {} ms",
        stats.processed_pages, stats.text_regions, stats.figure_regions, stats.total_duration_ms
    );

    Ok(ExtractOutput {
        entries,
        figures: saved_figures,
        output_dir,
        text_path,
        metadata,
        stats,
    })
}

/// Like [`extract`], but forces the output directory.
pub fn extract_to_dir(
    input: &str,
    output_dir: impl AsRef<Path>,
    config: &ExtractConfig,
) -> Result<ExtractOutput, ExtractError> {
    let mut config = config.clone();
    config.output_dir = Some(output_dir.as_ref().to_path_buf());
    extract(input, &config)
}

/// Read document metadata without rendering, detecting, or OCRing anything.
pub fn inspect(input: &str, password: Option<&str>) -> Result<DocumentMetadata, ExtractError> {
    let pdf_path = input::resolve_input(input)?;
    render::extract_metadata(&pdf_path, password)
}

/// The first page number the selection asked for, for error reporting.
fn first_requested_page(config: &ExtractConfig) -> usize {
    use crate::config::PageSelection::*;
    match &config.pages {
        All => 1,
        Single(p) => *p,
        Range(start, _) => *start,
        Set(pages) => pages.iter().copied().min().unwrap_or(1),
    }
}
