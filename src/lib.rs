//! # pdf-layout-extract
//!
//! Layout-aware text and figure extraction for scanned or digital PDFs.
//!
//! Each page is rasterised at high resolution, run through a PubLayNet-style
//! layout detection model (ONNX), and its regions are routed by class:
//! figures are cropped and saved as PNGs, text blocks are recognised with
//! Tesseract, and everything else (titles, lists, tables) is discarded. The
//! result is a single `extracted_text.txt` where each saved figure appears
//! as an inline `[Image: page_N_image_M.png]` placeholder.
//!
//! ## Pipeline
//!
//! ```text
//! input.pdf ─▶ rasterise (pdfium, 300 DPI)
//!           ─▶ detect layout regions (ort / ONNX)
//!           ─▶ split: Text | Figure   (Title/List/Table dropped)
//!           ─▶ figures → PNG crops    text → Tesseract OCR
//!           ─▶ extracted_text.txt     (figures before text, per page)
//! ```
//!
//! ## Quick start
//!
//! ```no_run
//! use pdf_layout_extract::{extract, ExtractConfig};
//!
//! # fn main() -> Result<(), pdf_layout_extract::ExtractError> {
//! let config = ExtractConfig::builder()
//!     .dpi(300)
//!     .score_threshold(0.5)
//!     .ocr_language("eng")
//!     .build()?;
//!
//! let output = extract("paper.pdf", &config)?;
//! println!(
//!     "{} entries, {} figures → {}",
//!     output.entries.len(),
//!     output.figures.len(),
//!     output.text_path.display()
//! );
//! # Ok(())
//! # }
//! ```
//!
//! ## Runtime requirements
//!
//! * a pdfium dynamic library (see the `pdfium-render` crate docs),
//! * an ONNX export of the layout model (`--model` / `LAYOUT_MODEL_PATH`),
//! * a Tesseract installation with data for the configured language.
//!
//! Missing Tesseract is detected before any PDF work and reported as
//! [`ExtractError::NoOcrEngine`]; every other failure is fatal to the run.

pub mod config;
pub mod error;
pub mod extract;
pub mod output;
pub mod pipeline;
pub mod progress;

pub use config::{ExtractConfig, ExtractConfigBuilder, PageSelection};
pub use error::ExtractError;
pub use extract::{extract, extract_to_dir, inspect, OUTPUT_TEXT_FILENAME};
pub use output::{DocumentMetadata, ExtractOutput, ExtractStats, OutputEntry, SavedFigure};
pub use pipeline::detect::{BBox, Region, RegionLabel};
pub use progress::{ExtractProgressCallback, NoopProgressCallback, ProgressCallback};
