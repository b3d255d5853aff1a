//! Region splitting: partition detections into text and figure groups.
//!
//! Only `Text` and `Figure` regions survive. Title, List, and Table regions
//! are intentionally discarded — this scope-narrowing is part of the tool's
//! contract, not an oversight, and the dropped count is surfaced in the run
//! statistics. Both output groups preserve the detector's original relative
//! order.

use crate::pipeline::detect::{Region, RegionLabel};

/// The result of splitting one page's detections.
#[derive(Debug, Default)]
pub struct SplitRegions {
    /// Regions that go through OCR, in detector order.
    pub text: Vec<Region>,
    /// Regions that are cropped and saved, in detector order.
    pub figures: Vec<Region>,
    /// Count of Title/List/Table regions that were discarded.
    pub dropped: usize,
}

/// Partition `regions` into text and figure groups, preserving order.
pub fn split(regions: Vec<Region>) -> SplitRegions {
    let mut out = SplitRegions::default();
    for region in regions {
        match region.label {
            RegionLabel::Text => out.text.push(region),
            RegionLabel::Figure => out.figures.push(region),
            RegionLabel::Title | RegionLabel::List | RegionLabel::Table => out.dropped += 1,
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::detect::BBox;

    fn region(label: RegionLabel, x1: f32) -> Region {
        Region {
            label,
            bbox: BBox {
                x1,
                y1: 0.0,
                x2: x1 + 10.0,
                y2: 10.0,
            },
            score: 0.9,
        }
    }

    #[test]
    fn split_preserves_relative_order() {
        let regions = vec![
            region(RegionLabel::Figure, 0.0),
            region(RegionLabel::Text, 1.0),
            region(RegionLabel::Figure, 2.0),
            region(RegionLabel::Text, 3.0),
        ];
        let split = split(regions);
        let text_x: Vec<f32> = split.text.iter().map(|r| r.bbox.x1).collect();
        let fig_x: Vec<f32> = split.figures.iter().map(|r| r.bbox.x1).collect();
        assert_eq!(text_x, vec![1.0, 3.0]);
        assert_eq!(fig_x, vec![0.0, 2.0]);
        assert_eq!(split.dropped, 0);
    }

    #[test]
    fn title_list_table_are_dropped() {
        let regions = vec![
            region(RegionLabel::Title, 0.0),
            region(RegionLabel::Text, 1.0),
            region(RegionLabel::List, 2.0),
            region(RegionLabel::Table, 3.0),
        ];
        let split = split(regions);
        assert_eq!(split.text.len(), 1);
        assert!(split.figures.is_empty());
        assert_eq!(split.dropped, 3);
    }

    #[test]
    fn empty_input_yields_empty_groups() {
        let split = split(Vec::new());
        assert!(split.text.is_empty());
        assert!(split.figures.is_empty());
        assert_eq!(split.dropped, 0);
    }
}
