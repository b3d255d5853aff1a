//! OCR: Tesseract engine discovery and per-region text recognition.
//!
//! Discovery probes the system Tesseract installation by initialising it for
//! the configured language. The probe runs once, before any PDF work, so a
//! machine without Tesseract fails fast with [`ExtractError::NoOcrEngine`]
//! instead of dying halfway through a document. The first discovered engine
//! is the one used for the whole run.
//!
//! leptess wants encoded image data, so each cropped region is PNG-encoded
//! in memory and handed over with `set_image_from_mem`.

use crate::error::ExtractError;
use image::DynamicImage;
use leptess::LepTess;
use std::io::Cursor;
use tracing::{debug, info};

/// A usable OCR engine, bound to a fixed recognition language.
pub struct OcrEngine {
    tess: LepTess,
    language: String,
}

impl std::fmt::Debug for OcrEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OcrEngine")
            .field("language", &self.language)
            .finish_non_exhaustive()
    }
}

impl OcrEngine {
    /// Engine identifier for logs and the CLI.
    pub fn name(&self) -> &'static str {
        "tesseract"
    }

    /// The language this engine was initialised for.
    pub fn language(&self) -> &str {
        &self.language
    }

    /// Recognise the text in a cropped region image.
    ///
    /// Returns the recognised string with trailing whitespace removed —
    /// possibly empty, which the caller still records as an entry.
    pub fn recognize(
        &mut self,
        image: &DynamicImage,
        page: usize,
    ) -> Result<String, ExtractError> {
        let ocr_err = |detail: String| ExtractError::Ocr { page, detail };

        let mut png_buf = Cursor::new(Vec::new());
        image
            .write_to(&mut png_buf, image::ImageFormat::Png)
            .map_err(|e| ocr_err(format!("failed to encode region to PNG: {e}")))?;

        self.tess
            .set_image_from_mem(png_buf.get_ref())
            .map_err(|e| ocr_err(format!("failed to set image: {e}")))?;

        let text = self
            .tess
            .get_utf8_text()
            .map_err(|e| ocr_err(format!("recognition failed: {e}")))?;

        let text = text.trim_end().to_string();
        debug!("Page {}: OCR produced {} bytes", page, text.len());
        Ok(text)
    }
}

/// Probe the system for available OCR engines.
///
/// Currently only Tesseract is supported, so the result has zero or one
/// element. An engine is "available" when it initialises successfully for
/// `language` — that covers both a missing binary and missing language data.
pub fn discover_engines(language: &str) -> Vec<OcrEngine> {
    match LepTess::new(None, language) {
        Ok(tess) => {
            info!("Discovered OCR engine: tesseract ({language})");
            vec![OcrEngine {
                tess,
                language: language.to_string(),
            }]
        }
        Err(e) => {
            debug!("Tesseract unavailable for '{language}': {e}");
            Vec::new()
        }
    }
}

/// The first discovered engine, or [`ExtractError::NoOcrEngine`].
pub fn first_engine(language: &str) -> Result<OcrEngine, ExtractError> {
    discover_engines(language)
        .into_iter()
        .next()
        .ok_or_else(|| ExtractError::NoOcrEngine {
            language: language.to_string(),
        })
}
