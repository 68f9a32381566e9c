//! Builder for creating Detection objects from various input formats.

use crate::tracker::{BoundingBox, Detection, InvalidBoundingBox};

/// Builder for creating `Detection` objects from the bounding-box formats
/// annotation files use.
///
/// `build()` validates the box geometry, so malformed annotation rows are
/// rejected here instead of feeding NaN into the distance matrix.
#[derive(Debug, Clone, Default)]
pub struct DetectionBuilder {
    xtl: f64,
    ytl: f64,
    xbr: f64,
    ybr: f64,
    behavior: String,
    source_id: Option<u64>,
}

impl DetectionBuilder {
    /// Create a new detection builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set bounding box in TLBR format (xtl, ytl, xbr, ybr).
    pub fn tlbr(mut self, xtl: f64, ytl: f64, xbr: f64, ybr: f64) -> Self {
        self.xtl = xtl;
        self.ytl = ytl;
        self.xbr = xbr;
        self.ybr = ybr;
        self
    }

    /// Set bounding box in TLWH format (xtl, ytl, width, height).
    pub fn tlwh(mut self, xtl: f64, ytl: f64, w: f64, h: f64) -> Self {
        self.xtl = xtl;
        self.ytl = ytl;
        self.xbr = xtl + w;
        self.ybr = ytl + h;
        self
    }

    /// Set bounding box in XYWH format (center_x, center_y, width, height).
    pub fn xywh(mut self, cx: f64, cy: f64, w: f64, h: f64) -> Self {
        self.xtl = cx - w / 2.0;
        self.ytl = cy - h / 2.0;
        self.xbr = cx + w / 2.0;
        self.ybr = cy + h / 2.0;
        self
    }

    /// Set the behavior label.
    pub fn behavior(mut self, behavior: impl Into<String>) -> Self {
        self.behavior = behavior.into();
        self
    }

    /// Set the identifier the row carried in a previously tracked export.
    pub fn source_id(mut self, source_id: u64) -> Self {
        self.source_id = Some(source_id);
        self
    }

    /// Build the final `Detection`, validating the bounding box.
    pub fn build(self) -> Result<Detection, InvalidBoundingBox> {
        let bounding_box = BoundingBox::new(self.xtl, self.ytl, self.xbr, self.ybr)?;
        let mut det = Detection::new(self.behavior, bounding_box);
        if let Some(source_id) = self.source_id {
            det = det.with_source_id(source_id);
        }
        Ok(det)
    }
}
