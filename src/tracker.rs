mod animal;
mod bounding_box;
mod herd_tracker;
mod matching;

pub use animal::TrackedAnimal;
pub use bounding_box::{BoundingBox, InvalidBoundingBox};
pub use herd_tracker::HerdTracker;
pub use matching::{
    AssignmentResult, Detection, distance_matrix, nearest_neighbor_assignment,
    remove_duplicate_detections,
};
