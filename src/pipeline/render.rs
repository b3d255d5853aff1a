//! PDF rasterisation: render pages to `DynamicImage` via pdfium.
//!
//! ## Why compute the target width from page points?
//!
//! pdfium's render config takes pixel dimensions, not a DPI value. PDF page
//! geometry is expressed in points (1/72 inch), so `width_pt × dpi / 72`
//! yields the exact pixel width for the requested resolution. The default
//! 300 DPI therefore renders a US-Letter page at 2550 px — the resolution
//! both the layout model and Tesseract were tuned on. Same page + same DPI
//! always produces the same pixel content.

use crate::error::ExtractError;
use crate::output::DocumentMetadata;
use image::DynamicImage;
use pdfium_render::prelude::*;
use std::path::Path;
use tracing::debug;

/// Open the document at `path` and hand it to `f`.
///
/// The `Pdfium` binding and the document share a stack frame so the borrow
/// checker can see their lifetimes line up; callers do all their page work
/// inside the closure.
pub fn with_document<T>(
    path: &Path,
    password: Option<&str>,
    f: impl FnOnce(&PdfDocument) -> Result<T, ExtractError>,
) -> Result<T, ExtractError> {
    let pdfium = Pdfium::default();
    let document = pdfium
        .load_pdf_from_file(path, password)
        .map_err(|e| map_load_error(path, password, e))?;
    f(&document)
}

/// Map a pdfium load failure onto the password/corruption error variants.
fn map_load_error(path: &Path, password: Option<&str>, e: PdfiumError) -> ExtractError {
    let err_str = format!("{:?}", e);
    if err_str.contains("Password") || err_str.contains("password") {
        if password.is_some() {
            ExtractError::WrongPassword {
                path: path.to_path_buf(),
            }
        } else {
            ExtractError::PasswordRequired {
                path: path.to_path_buf(),
            }
        }
    } else {
        ExtractError::CorruptPdf {
            path: path.to_path_buf(),
            detail: err_str,
        }
    }
}

/// Rasterise one page (0-indexed) of an open document at the given DPI.
pub fn render_page(
    document: &PdfDocument,
    page_index: usize,
    dpi: u32,
) -> Result<DynamicImage, ExtractError> {
    let page_num = page_index + 1;
    let page = document
        .pages()
        .get(page_index as u16)
        .map_err(|e| ExtractError::Rasterisation {
            page: page_num,
            detail: format!("{:?}", e),
        })?;

    let scale = dpi as f32 / 72.0;
    let target_width = (page.width().value * scale).round() as i32;
    let max_height = (page.height().value * scale).ceil() as i32;

    let render_config = PdfRenderConfig::new()
        .set_target_width(target_width)
        .set_maximum_height(max_height);

    let bitmap =
        page.render_with_config(&render_config)
            .map_err(|e| ExtractError::Rasterisation {
                page: page_num,
                detail: format!("{:?}", e),
            })?;

    let image = bitmap.as_image();
    debug!(
        "Rendered page {} at {} DPI → {}x{} px",
        page_num,
        dpi,
        image.width(),
        image.height()
    );

    Ok(image)
}

/// Extract document metadata from a PDF without rendering any page.
pub fn extract_metadata(
    pdf_path: &Path,
    password: Option<&str>,
) -> Result<DocumentMetadata, ExtractError> {
    with_document(pdf_path, password, |document| {
        let metadata = document.metadata();
        let pages = document.pages();

        let get_meta = |tag: PdfDocumentMetadataTagType| -> Option<String> {
            metadata.get(tag).and_then(|t| {
                let v = t.value().to_string();
                if v.is_empty() {
                    None
                } else {
                    Some(v)
                }
            })
        };

        Ok(DocumentMetadata {
            title: get_meta(PdfDocumentMetadataTagType::Title),
            author: get_meta(PdfDocumentMetadataTagType::Author),
            subject: get_meta(PdfDocumentMetadataTagType::Subject),
            creator: get_meta(PdfDocumentMetadataTagType::Creator),
            producer: get_meta(PdfDocumentMetadataTagType::Producer),
            creation_date: get_meta(PdfDocumentMetadataTagType::CreationDate),
            modification_date: get_meta(PdfDocumentMetadataTagType::ModificationDate),
            page_count: pages.len() as usize,
            pdf_version: format!("{:?}", document.version()),
        })
    })
}
