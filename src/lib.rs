//! Frame-sequential identity tracking for drone wildlife footage.
//!
//! The tracker consumes an ordered sequence of per-frame detections
//! (bounding box + behavior label, no stable identity) and assigns stable
//! integer identifiers by frame-to-frame continuity: a greedy
//! mutual-nearest-neighbor match over box-center distances, with a
//! per-animal distance limit scaled to the animal's last known size.

pub mod integration;
pub mod tracker;

pub use integration::{DetectionBuilder, FrameSource, TrackingPipeline};
pub use tracker::{
    AssignmentResult, BoundingBox, Detection, HerdTracker, InvalidBoundingBox, TrackedAnimal,
};
