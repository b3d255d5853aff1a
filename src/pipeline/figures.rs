//! Figure extraction: crop figure regions and persist them as PNGs.
//!
//! File names follow `page_{page}_image_{n}.png` with both numbers 1-based
//! and `n` restarting for every page, so a re-run over the same document
//! overwrites the previous run's files byte-for-byte.

use crate::error::ExtractError;
use crate::output::SavedFigure;
use crate::pipeline::detect::Region;
use image::DynamicImage;
use std::path::Path;
use tracing::{debug, warn};

/// Crop and save every figure region of one page, in detector order.
///
/// The caller has already created `output_dir`. Degenerate boxes (clamping to
/// zero area) produce no file and do not consume a sequence number; a real
/// detection virtually never degenerates, but an empty crop cannot be
/// encoded as a PNG.
pub fn save_figures(
    image: &DynamicImage,
    regions: &[Region],
    page: usize,
    output_dir: &Path,
) -> Result<Vec<SavedFigure>, ExtractError> {
    let (img_w, img_h) = (image.width(), image.height());
    let mut saved = Vec::with_capacity(regions.len());

    for region in regions {
        let Some((x, y, w, h)) = region.bbox.to_crop(img_w, img_h) else {
            warn!(
                "Page {}: skipping degenerate figure box {:?}",
                page, region.bbox
            );
            continue;
        };

        let index = saved.len() + 1;
        let filename = SavedFigure::filename_for(page, index);
        let path = output_dir.join(&filename);

        let cropped = image.crop_imm(x, y, w, h);
        cropped.save(&path).map_err(|e| ExtractError::FigureWrite {
            path: path.clone(),
            detail: e.to_string(),
        })?;

        debug!("Saved figure {} ({}x{} px)", path.display(), w, h);
        saved.push(SavedFigure {
            page,
            index,
            filename,
            path,
        });
    }

    Ok(saved)
}
