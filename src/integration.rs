//! Integration module for connecting annotation data sources with the tracker.
//!
//! This module provides the seams to the surrounding tooling: a
//! [`FrameSource`] trait for whatever loads per-frame detections, a
//! [`TrackingPipeline`] that drives a tracker over a source, and a
//! [`DetectionBuilder`] for the bounding-box formats annotation files use.

mod builder;
mod pipeline;
mod source;

pub use builder::DetectionBuilder;
pub use pipeline::TrackingPipeline;
pub use source::FrameSource;
