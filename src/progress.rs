//! Progress-callback trait for per-page extraction events.
//!
//! Inject an [`Arc<dyn ExtractProgressCallback>`] via
//! [`crate::config::ExtractConfigBuilder::progress_callback`] to receive
//! events as the pipeline processes each page.
//!
//! # Why callbacks instead of channels?
//!
//! The callback approach is the least-invasive integration point: callers can
//! forward events to a log, a database record, or a terminal progress bar —
//! without the library knowing anything about how the host application
//! communicates. The pipeline is strictly sequential, so callbacks arrive in
//! page order from a single thread; the `Send + Sync` bound only exists so the
//! same callback object can be shared with other parts of the host program.

use std::sync::Arc;

/// Called by the extraction pipeline as it processes each page.
///
/// All methods have default no-op implementations so callers only override
/// what they care about.
pub trait ExtractProgressCallback: Send + Sync {
    /// Called once before any page is rendered.
    ///
    /// # Arguments
    /// * `total_pages` — number of pages that will be processed
    fn on_extract_start(&self, total_pages: usize) {
        let _ = total_pages;
    }

    /// Called after layout detection on a page, before any region is
    /// extracted. Mirrors the per-page block echo of the pipeline.
    ///
    /// # Arguments
    /// * `page_num`      — 1-indexed document page number
    /// * `text_blocks`   — regions that will go through OCR
    /// * `figure_blocks` — regions that will be cropped and saved
    /// * `dropped`       — Title/List/Table regions that are discarded
    fn on_page_detected(
        &self,
        page_num: usize,
        text_blocks: usize,
        figure_blocks: usize,
        dropped: usize,
    ) {
        let _ = (page_num, text_blocks, figure_blocks, dropped);
    }

    /// Called when a page has been fully extracted.
    ///
    /// # Arguments
    /// * `page_num`    — 1-indexed document page number
    /// * `total_pages` — pages being processed in this run
    /// * `entries`     — output entries this page contributed
    fn on_page_complete(&self, page_num: usize, total_pages: usize, entries: usize) {
        let _ = (page_num, total_pages, entries);
    }

    /// Called once after all pages have been processed and the text file
    /// has been written.
    ///
    /// # Arguments
    /// * `total_pages`   — pages processed
    /// * `figures_saved` — figure PNGs written to the output directory
    fn on_extract_complete(&self, total_pages: usize, figures_saved: usize) {
        let _ = (total_pages, figures_saved);
    }
}

/// A no-op implementation for callers that don't need progress events.
///
/// This is the default when no callback is configured.
pub struct NoopProgressCallback;

impl ExtractProgressCallback for NoopProgressCallback {}

/// Convenience alias matching the type stored in [`crate::config::ExtractConfig`].
pub type ProgressCallback = Arc<dyn ExtractProgressCallback>;
