//! Error types for the pdf-layout-extract library.
//!
//! The pipeline is deliberately all-or-nothing: every failure past the OCR
//! availability check aborts the whole run, so a single [`ExtractError`] enum
//! propagated up the call chain with `?` is the honest model. There is no
//! per-page recovery, no retry, and no partial-result guarantee — a run either
//! produces the complete output directory or an `Err`.
//!
//! The one locally-handled condition is [`ExtractError::NoOcrEngine`]: when no
//! Tesseract installation can be found the CLI prints a fixed message and
//! terminates cleanly with exit code 1 before any PDF work starts.

use std::path::PathBuf;
use thiserror::Error;

/// All errors returned by the pdf-layout-extract library.
///
/// Every variant is fatal to the run that produced it.
#[derive(Debug, Error)]
pub enum ExtractError {
    // ── Input errors ──────────────────────────────────────────────────────
    /// Input file was not found at the given path.
    #[error("PDF file not found: '{path}'\nCheck the path exists and is readable.")]
    FileNotFound { path: PathBuf },

    /// Process does not have read permission on the file.
    #[error("Permission denied reading '{path}'\nTry: chmod +r {path:?}")]
    PermissionDenied { path: PathBuf },

    /// The file exists and was read, but is not a PDF.
    #[error("File is not a valid PDF: '{path}'\nFirst bytes: {magic:?}")]
    NotAPdf { path: PathBuf, magic: [u8; 4] },

    // ── PDF errors ────────────────────────────────────────────────────────
    /// PDF header/trailer/xref is corrupt and cannot be parsed.
    #[error("PDF '{path}' is corrupt: {detail}\nTry repairing with: qpdf --decrypt input.pdf output.pdf")]
    CorruptPdf { path: PathBuf, detail: String },

    /// PDF requires a password but none was provided.
    #[error("PDF '{path}' is encrypted and requires a password.\nProvide it with --password <PASSWORD>.")]
    PasswordRequired { path: PathBuf },

    /// A password was provided but it is wrong.
    #[error("Wrong password for PDF '{path}'")]
    WrongPassword { path: PathBuf },

    /// Selected page numbers exceed the actual page count.
    #[error("Page {page} is out of range (document has {total} pages)")]
    PageOutOfRange { page: usize, total: usize },

    /// pdfium-render returned an error for a specific page.
    #[error("Rasterisation failed for page {page}: {detail}")]
    Rasterisation { page: usize, detail: String },

    // ── Detection errors ──────────────────────────────────────────────────
    /// The layout model could not be initialised.
    #[error(
        "Failed to load layout model from '{path}': {detail}\n\n\
The detector expects an ONNX export of the PubLayNet faster_rcnn_R_50_FPN_3x\n\
model. Point --model (or LAYOUT_MODEL_PATH) at the .onnx file."
    )]
    ModelLoad { path: PathBuf, detail: String },

    /// Layout detection failed on a rendered page.
    #[error("Layout detection failed on page {page}: {detail}")]
    Detection { page: usize, detail: String },

    // ── OCR errors ────────────────────────────────────────────────────────
    /// No OCR engine could be discovered on this system.
    ///
    /// The CLI maps this to the fixed "No OCR tool found" message and exit
    /// code 1 before any PDF processing happens.
    #[error(
        "No OCR tool found\n\n\
Tesseract could not be initialised for language '{language}'.\n\
Install it (e.g. apt install tesseract-ocr / brew install tesseract) and\n\
make sure the language data is present."
    )]
    NoOcrEngine { language: String },

    /// OCR invocation failed on a text region.
    #[error("OCR failed on page {page}: {detail}")]
    Ocr { page: usize, detail: String },

    // ── I/O errors ────────────────────────────────────────────────────────
    /// Could not create the output directory.
    #[error("Failed to create output directory '{path}': {source}")]
    OutputDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Could not save a cropped figure image.
    #[error("Failed to write figure '{path}': {detail}")]
    FigureWrite { path: PathBuf, detail: String },

    /// Could not write the final text file.
    #[error("Failed to write output file '{path}': {source}")]
    OutputWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ── Config errors ─────────────────────────────────────────────────────
    /// Builder validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // ── Pdfium binding errors ─────────────────────────────────────────────
    /// Could not bind to a pdfium library.
    #[error(
        "Failed to bind to pdfium library: {0}\n\n\
Install a pdfium build for your platform, or set PDFIUM_LIB_PATH to point\n\
at an existing libpdfium."
    )]
    PdfiumBindingFailed(String),
}
