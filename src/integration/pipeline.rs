//! TrackingPipeline for combining frame loading with tracking.

use crate::tracker::{HerdTracker, TrackedAnimal};

use super::FrameSource;

/// A combined run that bundles a frame source with the identity tracker.
///
/// This struct provides a convenient way to process a whole flight
/// end-to-end by draining any `FrameSource` through the `HerdTracker`.
pub struct TrackingPipeline<S: FrameSource> {
    source: S,
    tracker: HerdTracker,
}

impl<S: FrameSource> TrackingPipeline<S> {
    /// Create a new tracking pipeline over the given frame source.
    pub fn new(source: S) -> Self {
        Self {
            source,
            tracker: HerdTracker::new(),
        }
    }

    /// Pull one frame from the source and reconcile it.
    ///
    /// Returns `Ok(None)` once the source is exhausted; otherwise the
    /// frame's active-animal snapshots, in active-set order.
    pub fn process_next(&mut self) -> Result<Option<Vec<TrackedAnimal>>, S::Error> {
        match self.source.next_frame()? {
            Some(detections) => Ok(Some(self.tracker.update(detections))),
            None => Ok(None),
        }
    }

    /// Drain the source and return one snapshot list per input frame.
    ///
    /// State carries forward strictly frame to frame; if the run errors
    /// partway, discard the partial output and restart from the first
    /// frame.
    pub fn run(&mut self) -> Result<Vec<Vec<TrackedAnimal>>, S::Error> {
        let mut output = Vec::new();
        while let Some(frame) = self.process_next()? {
            output.push(frame);
        }
        Ok(output)
    }

    /// Get a reference to the underlying frame source.
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Get a mutable reference to the underlying frame source.
    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }

    /// Get a reference to the underlying tracker.
    pub fn tracker(&self) -> &HerdTracker {
        &self.tracker
    }

    /// Get a mutable reference to the underlying tracker.
    pub fn tracker_mut(&mut self) -> &mut HerdTracker {
        &mut self.tracker
    }
}
