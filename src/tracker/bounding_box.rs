//! Axis-aligned bounding box in image pixel space.

use nalgebra::Point2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error returned when a bounding box fails validation at construction.
///
/// Corners must satisfy `xtl <= xbr` and `ytl <= ybr`, and all four
/// coordinates must be finite. Rejecting bad boxes here keeps NaN out of
/// every distance computation downstream.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
#[error("malformed bounding box: ({xtl}, {ytl}, {xbr}, {ybr})")]
pub struct InvalidBoundingBox {
    pub xtl: f64,
    pub ytl: f64,
    pub xbr: f64,
    pub ybr: f64,
}

/// Bounding box in TLBR format: top-left and bottom-right corners,
/// image pixel coordinates.
///
/// Immutable value type; a tracked animal replaces its box wholesale
/// rather than mutating one.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    /// Top-left x coordinate
    pub xtl: f64,
    /// Top-left y coordinate
    pub ytl: f64,
    /// Bottom-right x coordinate
    pub xbr: f64,
    /// Bottom-right y coordinate
    pub ybr: f64,
}

impl BoundingBox {
    /// Create a bounding box from TLBR corners, validating geometry.
    pub fn new(xtl: f64, ytl: f64, xbr: f64, ybr: f64) -> Result<Self, InvalidBoundingBox> {
        let finite = xtl.is_finite() && ytl.is_finite() && xbr.is_finite() && ybr.is_finite();
        if !finite || xtl > xbr || ytl > ybr {
            return Err(InvalidBoundingBox { xtl, ytl, xbr, ybr });
        }
        Ok(Self { xtl, ytl, xbr, ybr })
    }

    /// Width of the box.
    #[inline]
    pub fn width(&self) -> f64 {
        self.xbr - self.xtl
    }

    /// Height of the box.
    #[inline]
    pub fn height(&self) -> f64 {
        self.ybr - self.ytl
    }

    /// Center point of the box, each coordinate rounded to one decimal
    /// place so that repeated runs over float-exported annotations stay
    /// stable.
    #[inline]
    pub fn center(&self) -> Point2<f64> {
        Point2::new(
            round_to_tenth((self.xtl + self.xbr) / 2.0),
            round_to_tenth((self.ytl + self.ybr) / 2.0),
        )
    }

    /// Half the diagonal length, computed on the unrounded extents.
    ///
    /// Serves as the matching radius for the animal owning this box: a
    /// detection further away than this is not the same animal.
    #[inline]
    pub fn half_diagonal(&self) -> f64 {
        let hor = self.width() / 2.0;
        let ver = self.height() / 2.0;
        (hor * hor + ver * ver).sqrt()
    }

    /// Convert to `[xtl, ytl, xbr, ybr]` for export.
    #[inline]
    pub fn to_array(&self) -> [f64; 4] {
        [self.xtl, self.ytl, self.xbr, self.ybr]
    }
}

#[inline]
fn round_to_tenth(v: f64) -> f64 {
    (v * 10.0).round() / 10.0
}
