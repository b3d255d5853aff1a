//! Pipeline stages for text/figure extraction.
//!
//! Each submodule implements exactly one transformation step.
//! Keeping stages separate makes each independently testable and lets us
//! swap implementations (e.g. switch the rendering backend) without touching
//! other stages.
//!
//! ## Data Flow
//!
//! ```text
//! input ──▶ render ──▶ detect ──▶ split ──▶ figures + ocr ──▶ assemble
//! (path)   (pdfium)    (ort)    (partition) (crop/save, OCR)  (one file)
//! ```
//!
//! 1. [`input`]    — validate the user-supplied path and PDF magic bytes
//! 2. [`render`]   — rasterise one page at a time via pdfium at the
//!    configured DPI
//! 3. [`detect`]   — run the pretrained layout model over the page image
//! 4. [`split`]    — partition regions into text and figure groups
//! 5. [`figures`]  — crop figure regions, save PNGs, emit placeholders
//! 6. [`ocr`]      — crop text regions and recognise them with Tesseract
//! 7. [`assemble`] — newline-join every entry and write the text file once
//!
//! The whole pipeline runs on the calling thread, one page at a time, one
//! region at a time. The only mutable state is the entry accumulator owned by
//! the driver in [`crate::extract`].

pub mod assemble;
pub mod detect;
pub mod figures;
pub mod input;
pub mod ocr;
pub mod render;
pub mod split;
