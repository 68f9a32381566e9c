//! Tracked animal entity carried across frames.

use nalgebra::Point2;
use serde::{Deserialize, Serialize};

use crate::tracker::bounding_box::BoundingBox;

/// A single tracked animal.
///
/// Created when a detection matches no active animal, updated in place
/// while matches continue, and dropped from the active set the first frame
/// it goes unmatched. There is no lost-track buffer: a dropped id never
/// returns, and a reappearing animal gets a fresh one.
///
/// Doubles as the per-frame export record `(id, behavior, bounding_box)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackedAnimal {
    /// Unique identifier, assigned once at creation.
    pub id: u64,
    /// Behavior label observed when the animal was first detected.
    ///
    /// A match refreshes only the bounding box; the label keeps its
    /// creation-time value for the whole life of the id. Downstream
    /// consumers depend on this, so matched detections never overwrite it.
    pub behavior: String,
    /// Last known bounding box, overwritten each frame the animal matches.
    pub bounding_box: BoundingBox,
}

impl TrackedAnimal {
    pub fn new(id: u64, behavior: String, bounding_box: BoundingBox) -> Self {
        Self {
            id,
            behavior,
            bounding_box,
        }
    }

    /// Rounded center of the last known bounding box.
    #[inline]
    pub fn center(&self) -> Point2<f64> {
        self.bounding_box.center()
    }

    /// Matching radius for this animal: the half-diagonal of its last
    /// bounding box, so larger animals tolerate larger frame-to-frame
    /// displacement.
    #[inline]
    pub fn distance_limit(&self) -> f64 {
        self.bounding_box.half_diagonal()
    }

    /// Euclidean distance from this animal's center to `point`.
    #[inline]
    pub fn distance_to(&self, point: &Point2<f64>) -> f64 {
        nalgebra::distance(&self.center(), point)
    }
}
