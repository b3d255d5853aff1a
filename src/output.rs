//! Output types: the assembled entry sequence, saved figures, document
//! metadata, and run statistics.
//!
//! The entry sequence reflects *processing order*, not necessarily the visual
//! top-to-bottom order of a page: for each page, all figure placeholders come
//! first (in detector order), then all recognised text blocks (in detector
//! order). This matches the behaviour of the pipeline exactly and is asserted
//! by the integration tests.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// One entry of the assembled output document.
///
/// Entries are newline-joined into `extracted_text.txt`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputEntry {
    /// Recognised text of one Text region. May be empty — empty OCR results
    /// are kept so the entry count always matches the region count.
    Text(String),
    /// Placeholder for a saved figure, carrying its output filename.
    Figure(String),
}

impl OutputEntry {
    /// Render the entry as it appears in the output file.
    pub fn render(&self) -> String {
        match self {
            OutputEntry::Text(s) => s.clone(),
            OutputEntry::Figure(filename) => format!("[Image: {filename}]"),
        }
    }

    /// True for figure placeholder entries.
    pub fn is_figure(&self) -> bool {
        matches!(self, OutputEntry::Figure(_))
    }
}

/// A figure region that was cropped and persisted as a PNG.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavedFigure {
    /// 1-based document page number.
    pub page: usize,
    /// 1-based sequence within the page, restarting at 1 for every page.
    pub index: usize,
    /// File name, e.g. `page_3_image_2.png`.
    pub filename: String,
    /// Full path of the written file.
    pub path: PathBuf,
}

impl SavedFigure {
    /// The deterministic figure file name for a page/sequence pair.
    pub fn filename_for(page: usize, index: usize) -> String {
        format!("page_{page}_image_{index}.png")
    }
}

/// Document metadata read from the PDF, without rendering any page.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DocumentMetadata {
    pub title: Option<String>,
    pub author: Option<String>,
    pub subject: Option<String>,
    pub creator: Option<String>,
    pub producer: Option<String>,
    pub creation_date: Option<String>,
    pub modification_date: Option<String>,
    pub page_count: usize,
    pub pdf_version: String,
}

/// Timing and counting statistics for one extraction run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExtractStats {
    /// Pages in the document.
    pub total_pages: usize,
    /// Pages actually processed (after page selection).
    pub processed_pages: usize,
    /// Text regions recognised via OCR.
    pub text_regions: usize,
    /// Figure regions cropped and saved.
    pub figure_regions: usize,
    /// Title/List/Table regions silently discarded by the splitter.
    pub dropped_regions: usize,
    /// Wall-clock milliseconds spent rasterising pages.
    pub render_duration_ms: u64,
    /// Wall-clock milliseconds spent in layout detection.
    pub detect_duration_ms: u64,
    /// Wall-clock milliseconds spent in OCR.
    pub ocr_duration_ms: u64,
    /// Total wall-clock milliseconds for the run.
    pub total_duration_ms: u64,
}

/// The complete result of an extraction run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractOutput {
    /// All output entries, in processing order.
    pub entries: Vec<OutputEntry>,
    /// Every figure PNG written, in processing order.
    pub figures: Vec<SavedFigure>,
    /// Directory the figures and text file were written into.
    pub output_dir: PathBuf,
    /// Path of the written `extracted_text.txt`.
    pub text_path: PathBuf,
    /// Metadata of the source document.
    pub metadata: DocumentMetadata,
    /// Run statistics.
    pub stats: ExtractStats,
}

impl ExtractOutput {
    /// The assembled text exactly as written to `extracted_text.txt`.
    pub fn assembled_text(&self) -> String {
        self.entries
            .iter()
            .map(OutputEntry::render)
            .collect::<Vec<_>>()
            .join("\n")
    }
}
