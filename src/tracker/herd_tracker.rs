//! Main frame-sequential identity tracker implementation.

use tracing::debug;

use crate::tracker::animal::TrackedAnimal;
use crate::tracker::matching::{self, AssignmentResult, Detection};

/// Frame-sequential identity tracker.
///
/// Reconciles each frame's detections against the animals carried over
/// from the previous frame and assigns stable ids: matched animals keep
/// their id and take the detection's box, unmatched detections become new
/// animals, unmatched animals drop out of the active set for good.
///
/// The id counter is owned tracker state rather than a process-wide
/// global, so independent runs over different flights never interfere.
pub struct HerdTracker {
    active_animals: Vec<TrackedAnimal>,
    next_id: u64,
    frame_id: u32,
}

impl Default for HerdTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl HerdTracker {
    pub fn new() -> Self {
        Self {
            active_animals: Vec::new(),
            next_id: 1,
            frame_id: 0,
        }
    }

    /// Animals currently considered visible, in active-set order.
    pub fn active_animals(&self) -> &[TrackedAnimal] {
        &self.active_animals
    }

    /// Reconcile one frame of detections and return the resulting active
    /// set as export snapshots.
    ///
    /// A matched animal has only its bounding box refreshed: the behavior
    /// label stays whatever it was at creation, which downstream exports
    /// rely on. On the first frame the active set is empty and every
    /// detection starts a new animal.
    pub fn update(&mut self, detections: Vec<Detection>) -> Vec<TrackedAnimal> {
        self.frame_id += 1;

        // Step 1: annotation rows re-exported from an earlier pass can
        // repeat a source id within one frame; keep the first row only.
        let detections = matching::remove_duplicate_detections(detections);

        // Step 2: center-distance matrix, rows in active-set order and
        // columns in frame order, then the greedy mutual pass over it.
        let dists = matching::distance_matrix(&self.active_animals, &detections);
        let limits: Vec<f64> = self
            .active_animals
            .iter()
            .map(|a| a.distance_limit())
            .collect();

        let AssignmentResult {
            matches,
            mut unmatched_animals,
            mut unmatched_detections,
        } = matching::nearest_neighbor_assignment(&dists, &limits);

        for &(animal_idx, det_idx) in &matches {
            self.active_animals[animal_idx].bounding_box = detections[det_idx].bounding_box;
        }

        // Step 3: last chance. A lone leftover animal and a lone leftover
        // detection are paired unconditionally, distance limit ignored.
        if let (&[animal_idx], &[det_idx]) =
            (unmatched_animals.as_slice(), unmatched_detections.as_slice())
        {
            debug!(
                frame = self.frame_id,
                animal = self.active_animals[animal_idx].id,
                "pairing last unmatched animal with last unmatched detection"
            );
            self.active_animals[animal_idx].bounding_box = detections[det_idx].bounding_box;
            unmatched_animals.clear();
            unmatched_detections.clear();
        }

        // Step 4: drop animals that went unmatched. No tombstone, no
        // resurrection: the id simply stops appearing.
        if !unmatched_animals.is_empty() {
            let mut keep = vec![true; self.active_animals.len()];
            for &animal_idx in &unmatched_animals {
                keep[animal_idx] = false;
            }
            let mut idx = 0;
            self.active_animals.retain(|_| {
                let kept = keep[idx];
                idx += 1;
                kept
            });
        }

        // Step 5: every leftover detection starts a new animal, in frame
        // order, appended after the survivors.
        for &det_idx in &unmatched_detections {
            let det = &detections[det_idx];
            self.active_animals.push(TrackedAnimal::new(
                self.next_id,
                det.behavior.clone(),
                det.bounding_box,
            ));
            self.next_id += 1;
        }

        self.active_animals.clone()
    }

    /// Run a fresh tracker over a whole ordered frame sequence.
    ///
    /// The output holds exactly one snapshot list per input frame, in
    /// input order.
    pub fn track_sequence<I>(frames: I) -> Vec<Vec<TrackedAnimal>>
    where
        I: IntoIterator<Item = Vec<Detection>>,
    {
        let mut tracker = Self::new();
        frames
            .into_iter()
            .map(|frame| tracker.update(frame))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tracker::bounding_box::BoundingBox;

    fn bbox(xtl: f64, ytl: f64, xbr: f64, ybr: f64) -> BoundingBox {
        BoundingBox::new(xtl, ytl, xbr, ybr).unwrap()
    }

    fn det(behavior: &str, xtl: f64, ytl: f64, xbr: f64, ybr: f64) -> Detection {
        Detection::new(behavior, bbox(xtl, ytl, xbr, ybr))
    }

    #[test]
    fn test_first_frame_creates_ids_in_input_order() {
        let mut tracker = HerdTracker::new();
        let frame = tracker.update(vec![
            det("Walk", 0.0, 0.0, 10.0, 10.0),
            det("Stand", 100.0, 100.0, 110.0, 110.0),
        ]);

        assert_eq!(frame.len(), 2);
        assert_eq!(frame[0].id, 1);
        assert_eq!(frame[0].behavior, "Walk");
        assert_eq!(frame[0].bounding_box, bbox(0.0, 0.0, 10.0, 10.0));
        assert_eq!(frame[1].id, 2);
        assert_eq!(frame[1].behavior, "Stand");
        assert_eq!(frame[1].bounding_box, bbox(100.0, 100.0, 110.0, 110.0));
    }

    #[test]
    fn test_nearby_detection_continues_track() {
        let mut tracker = HerdTracker::new();
        tracker.update(vec![det("Walk", 0.0, 0.0, 10.0, 10.0)]);

        // Center moves by sqrt(2), well inside the ~7.07 limit.
        let frame = tracker.update(vec![det("Walk", 1.0, 1.0, 11.0, 11.0)]);
        assert_eq!(frame.len(), 1);
        assert_eq!(frame[0].id, 1);
        assert_eq!(frame[0].bounding_box, bbox(1.0, 1.0, 11.0, 11.0));
    }

    #[test]
    fn test_match_keeps_creation_behavior_label() {
        let mut tracker = HerdTracker::new();
        tracker.update(vec![det("Walk", 0.0, 0.0, 10.0, 10.0)]);

        let frame = tracker.update(vec![det("Run", 1.0, 1.0, 11.0, 11.0)]);
        assert_eq!(frame[0].id, 1);
        assert_eq!(frame[0].behavior, "Walk");
    }

    #[test]
    fn test_far_detections_create_new_ids_and_drop_the_animal() {
        let mut tracker = HerdTracker::new();
        tracker.update(vec![det("Walk", 0.0, 0.0, 10.0, 10.0)]);

        // Two detections far beyond the limit: the old animal drops, both
        // detections start fresh ids. (A single far detection would take
        // the last-chance pairing instead.)
        let frame = tracker.update(vec![
            det("Stand", 500.0, 500.0, 510.0, 510.0),
            det("Graze", 600.0, 600.0, 610.0, 610.0),
        ]);

        let ids: Vec<u64> = frame.iter().map(|a| a.id).collect();
        assert_eq!(ids, vec![2, 3]);
    }

    #[test]
    fn test_last_chance_pairs_lone_leftovers_beyond_limit() {
        let mut tracker = HerdTracker::new();
        tracker.update(vec![det("Walk", 0.0, 0.0, 10.0, 10.0)]);

        let frame = tracker.update(vec![det("Stand", 500.0, 500.0, 510.0, 510.0)]);
        assert_eq!(frame.len(), 1);
        assert_eq!(frame[0].id, 1);
        assert_eq!(frame[0].bounding_box, bbox(500.0, 500.0, 510.0, 510.0));
        // Forced pairing is still a match: the label does not change.
        assert_eq!(frame[0].behavior, "Walk");
    }

    #[test]
    fn test_no_last_chance_with_two_leftover_animals() {
        let mut tracker = HerdTracker::new();
        tracker.update(vec![
            det("Walk", 0.0, 0.0, 10.0, 10.0),
            det("Stand", 100.0, 100.0, 110.0, 110.0),
        ]);

        let frame = tracker.update(vec![det("Run", 500.0, 500.0, 510.0, 510.0)]);
        assert_eq!(frame.len(), 1);
        assert_eq!(frame[0].id, 3);
        assert_eq!(frame[0].behavior, "Run");
    }

    #[test]
    fn test_empty_frame_drops_every_animal() {
        let mut tracker = HerdTracker::new();
        tracker.update(vec![
            det("Walk", 0.0, 0.0, 10.0, 10.0),
            det("Stand", 100.0, 100.0, 110.0, 110.0),
        ]);

        let frame = tracker.update(vec![]);
        assert!(frame.is_empty());
        assert!(tracker.active_animals().is_empty());
    }

    #[test]
    fn test_dropped_id_is_never_reused() {
        let mut tracker = HerdTracker::new();
        tracker.update(vec![
            det("Walk", 0.0, 0.0, 10.0, 10.0),
            det("Stand", 100.0, 100.0, 110.0, 110.0),
        ]);
        tracker.update(vec![]);

        // Same position as the original id 1, but it is a new animal now.
        let frame = tracker.update(vec![det("Walk", 0.0, 0.0, 10.0, 10.0)]);
        assert_eq!(frame.len(), 1);
        assert_eq!(frame[0].id, 3);
    }

    #[test]
    fn test_duplicate_source_ids_collapse_before_matching() {
        let mut tracker = HerdTracker::new();
        let frame = tracker.update(vec![
            det("Walk", 0.0, 0.0, 10.0, 10.0).with_source_id(4),
            det("Stand", 100.0, 100.0, 110.0, 110.0).with_source_id(4),
        ]);

        assert_eq!(frame.len(), 1);
        assert_eq!(frame[0].behavior, "Walk");
    }

    #[test]
    fn test_survivors_precede_new_animals_in_output() {
        let mut tracker = HerdTracker::new();
        tracker.update(vec![
            det("Walk", 0.0, 0.0, 10.0, 10.0),
            det("Stand", 100.0, 100.0, 110.0, 110.0),
        ]);

        // Animal 1 continues; animal 2 is replaced by two far detections.
        let frame = tracker.update(vec![
            det("Graze", 700.0, 700.0, 710.0, 710.0),
            det("Walk", 1.0, 1.0, 11.0, 11.0),
            det("Run", 800.0, 800.0, 810.0, 810.0),
        ]);

        let ids: Vec<u64> = frame.iter().map(|a| a.id).collect();
        assert_eq!(ids, vec![1, 3, 4]);
        assert_eq!(frame[1].behavior, "Graze");
        assert_eq!(frame[2].behavior, "Run");
    }

    #[test]
    fn test_track_sequence_preserves_frame_count() {
        let frames = vec![
            vec![det("Walk", 0.0, 0.0, 10.0, 10.0)],
            vec![],
            vec![det("Stand", 50.0, 50.0, 60.0, 60.0)],
            vec![],
        ];

        let output = HerdTracker::track_sequence(frames);
        assert_eq!(output.len(), 4);
        assert_eq!(output[0].len(), 1);
        assert!(output[1].is_empty());
        assert_eq!(output[2].len(), 1);
        assert!(output[3].is_empty());
    }
}
