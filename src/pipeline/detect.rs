//! Layout detection: run a pretrained detection model over a page image.
//!
//! The model is an ONNX export of the PubLayNet `faster_rcnn_R_50_FPN_3x`
//! detector with the fixed five-class label map
//! `{0: Text, 1: Title, 2: List, 3: Table, 4: Figure}`. It is treated as a
//! black box: one float image tensor in, `(boxes, labels, scores)` out. The
//! expected export signature is
//!
//! ```text
//! input  : float32 [1, 3, H, W]   (RGB, 0–1)
//! output0: float32 [N, 4]         (x1, y1, x2, y2 in input pixels)
//! output1: int64   [N]            (class indices)
//! output2: float32 [N]            (confidence scores)
//! ```
//!
//! The session is loaded once per run and threaded through the per-page
//! calls; there is no module-level global.

use crate::error::ExtractError;
use image::DynamicImage;
use ort::{
    init, inputs,
    session::{builder::GraphOptimizationLevel, Session},
    value::Value,
};
use std::path::Path;
use tracing::{debug, info};

/// The five region classes the model was trained on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum RegionLabel {
    Text,
    Title,
    List,
    Table,
    Figure,
}

impl RegionLabel {
    /// Map a model class index onto a label. Unknown indices yield `None`
    /// and the detection is discarded.
    pub fn from_class_index(index: i64) -> Option<Self> {
        match index {
            0 => Some(RegionLabel::Text),
            1 => Some(RegionLabel::Title),
            2 => Some(RegionLabel::List),
            3 => Some(RegionLabel::Table),
            4 => Some(RegionLabel::Figure),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RegionLabel::Text => "Text",
            RegionLabel::Title => "Title",
            RegionLabel::List => "List",
            RegionLabel::Table => "Table",
            RegionLabel::Figure => "Figure",
        }
    }
}

/// Axis-aligned bounding box in page-image pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct BBox {
    pub x1: f32,
    pub y1: f32,
    pub x2: f32,
    pub y2: f32,
}

impl BBox {
    /// Convert to a clamped `(x, y, width, height)` crop rectangle for an
    /// image of the given dimensions. Returns `None` for degenerate boxes
    /// that clamp to zero area.
    pub fn to_crop(&self, img_width: u32, img_height: u32) -> Option<(u32, u32, u32, u32)> {
        let x = (self.x1.max(0.0) as u32).min(img_width);
        let y = (self.y1.max(0.0) as u32).min(img_height);
        let w = (self.x2.max(0.0) as u32).min(img_width).saturating_sub(x);
        let h = (self.y2.max(0.0) as u32).min(img_height).saturating_sub(y);
        if w == 0 || h == 0 {
            None
        } else {
            Some((x, y, w, h))
        }
    }
}

/// A detected layout region.
///
/// Regions are kept in the exact order the model emitted them. The pipeline
/// never re-sorts by position: downstream output order mirrors detector
/// order, which for this model is not guaranteed to be reading order.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct Region {
    pub label: RegionLabel,
    pub bbox: BBox,
    pub score: f32,
}

/// The loaded detection model.
#[derive(Debug)]
pub struct LayoutModel {
    session: Session,
}

impl LayoutModel {
    /// Load the ONNX model from disk.
    pub fn load(model_path: &Path) -> Result<Self, ExtractError> {
        if !model_path.exists() {
            return Err(ExtractError::ModelLoad {
                path: model_path.to_path_buf(),
                detail: "file does not exist".into(),
            });
        }

        // Initialise the ONNX runtime environment (idempotent).
        let _ = init();

        let session = Session::builder()
            .and_then(|b| b.with_optimization_level(GraphOptimizationLevel::Level3))
            .and_then(|b| b.with_intra_threads(1))
            .and_then(|b| b.commit_from_file(model_path))
            .map_err(|e| ExtractError::ModelLoad {
                path: model_path.to_path_buf(),
                detail: e.to_string(),
            })?;

        info!("Layout model loaded from {}", model_path.display());
        Ok(Self { session })
    }

    /// Detect layout regions on a rendered page.
    ///
    /// Detections below `score_threshold` and detections whose class index
    /// falls outside the label map are discarded; everything else is returned
    /// in model output order.
    pub fn detect(
        &mut self,
        image: &DynamicImage,
        score_threshold: f32,
        page: usize,
    ) -> Result<Vec<Region>, ExtractError> {
        let rgb = image.to_rgb8();
        let (width, height) = rgb.dimensions();

        // HWC u8 → CHW f32 in 0–1.
        let mut tensor = vec![0f32; 3 * (width as usize) * (height as usize)];
        let plane = (width as usize) * (height as usize);
        for (x, y, pixel) in rgb.enumerate_pixels() {
            let offset = y as usize * width as usize + x as usize;
            tensor[offset] = pixel[0] as f32 / 255.0;
            tensor[plane + offset] = pixel[1] as f32 / 255.0;
            tensor[2 * plane + offset] = pixel[2] as f32 / 255.0;
        }

        let detection_err = |detail: String| ExtractError::Detection { page, detail };

        let input = Value::from_array((
            [1_usize, 3, height as usize, width as usize],
            tensor.into_boxed_slice(),
        ))
        .map_err(|e| detection_err(e.to_string()))?;

        let outputs = self
            .session
            .run(inputs![input])
            .map_err(|e| detection_err(e.to_string()))?;

        let (_, boxes) = outputs[0]
            .try_extract_tensor::<f32>()
            .map_err(|e| detection_err(format!("boxes output: {e}")))?;
        let (_, labels) = outputs[1]
            .try_extract_tensor::<i64>()
            .map_err(|e| detection_err(format!("labels output: {e}")))?;
        let (_, scores) = outputs[2]
            .try_extract_tensor::<f32>()
            .map_err(|e| detection_err(format!("scores output: {e}")))?;

        let n = scores.len();
        if boxes.len() < 4 * n || labels.len() < n {
            return Err(detection_err(format!(
                "inconsistent output shapes: {} boxes values, {} labels, {} scores",
                boxes.len(),
                labels.len(),
                n
            )));
        }

        let mut regions = Vec::new();
        for i in 0..n {
            if scores[i] < score_threshold {
                continue;
            }
            let Some(label) = RegionLabel::from_class_index(labels[i]) else {
                debug!("Page {}: dropping unknown class index {}", page, labels[i]);
                continue;
            };
            regions.push(Region {
                label,
                bbox: BBox {
                    x1: boxes[4 * i],
                    y1: boxes[4 * i + 1],
                    x2: boxes[4 * i + 2],
                    y2: boxes[4 * i + 3],
                },
                score: scores[i],
            });
        }

        debug!(
            "Page {}: {} regions above threshold {}",
            page,
            regions.len(),
            score_threshold
        );
        Ok(regions)
    }
}
