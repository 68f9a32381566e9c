//! Trait for per-frame detection suppliers.

use crate::tracker::Detection;

/// Trait for whatever loads per-frame detections for the tracker.
///
/// File parsing lives outside this crate; implement this trait on the
/// loader to feed a [`TrackingPipeline`](super::TrackingPipeline).
///
/// # Example
///
/// ```ignore
/// use herdtrack_rs::{Detection, FrameSource};
///
/// struct FlightFile {
///     // Parsed annotation frames here
/// }
///
/// impl FrameSource for FlightFile {
///     type Error = std::io::Error;
///
///     fn next_frame(&mut self) -> Result<Option<Vec<Detection>>, Self::Error> {
///         // Return Ok(Some(frame)) per frame, Ok(None) at the end
///         Ok(None)
///     }
/// }
/// ```
pub trait FrameSource {
    /// Error type for loading failures.
    type Error;

    /// Produce the next frame's detections, in frame order.
    ///
    /// Returns `Ok(None)` once the sequence is exhausted.
    fn next_frame(&mut self) -> Result<Option<Vec<Detection>>, Self::Error>;
}
