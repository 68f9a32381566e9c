//! Matching utilities for frame-to-frame identity assignment.

use ndarray::{Array2, ArrayView1};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::tracker::animal::TrackedAnimal;
use crate::tracker::bounding_box::BoundingBox;

/// Detection input for the tracker: one observed animal in one frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Detection {
    /// Behavior label from the annotation ("Walk", "Stand", ...).
    pub behavior: String,
    /// Bounding box in TLBR image coordinates.
    pub bounding_box: BoundingBox,
    /// Identifier carried over from a previous tracking pass, if the
    /// annotation was tracked once already. Only consulted by
    /// [`remove_duplicate_detections`]; the tracker assigns its own ids.
    pub source_id: Option<u64>,
}

impl Detection {
    pub fn new(behavior: impl Into<String>, bounding_box: BoundingBox) -> Self {
        Self {
            behavior: behavior.into(),
            bounding_box,
            source_id: None,
        }
    }

    /// Attach the identifier the detection carried in its source file.
    pub fn with_source_id(mut self, source_id: u64) -> Self {
        self.source_id = Some(source_id);
        self
    }
}

/// Remove all but the first occurrence of each repeated source id,
/// preserving order otherwise.
///
/// Annotation exports that went through a tracking pass before can carry
/// the same id on two rows of one frame; only the first row counts.
/// Detections without a source id are always kept. Idempotent.
pub fn remove_duplicate_detections(detections: Vec<Detection>) -> Vec<Detection> {
    let mut seen = std::collections::HashSet::new();
    detections
        .into_iter()
        .filter(|det| match det.source_id {
            Some(id) => seen.insert(id),
            None => true,
        })
        .collect()
}

/// Compute the center-distance matrix between active animals and the
/// current frame's detections.
///
/// Returns a matrix of shape (A, D): cell (i, j) is the Euclidean distance
/// between animal i's last box center and detection j's box center, both
/// rounded as [`BoundingBox::center`] rounds. Either side empty yields an
/// empty matrix.
pub fn distance_matrix(animals: &[TrackedAnimal], detections: &[Detection]) -> Array2<f64> {
    let mut dists = Array2::zeros((animals.len(), detections.len()));
    for (i, animal) in animals.iter().enumerate() {
        for (j, det) in detections.iter().enumerate() {
            dists[[i, j]] = animal.distance_to(&det.bounding_box.center());
        }
    }
    dists
}

/// Outcome of one frame's assignment pass.
#[derive(Debug, Clone)]
pub struct AssignmentResult {
    /// Accepted (animal index, detection index) pairs.
    pub matches: Vec<(usize, usize)>,
    /// Animal indices left without a detection, ascending.
    pub unmatched_animals: Vec<usize>,
    /// Detection indices left without an animal, ascending.
    pub unmatched_detections: Vec<usize>,
}

/// Greedy mutual-nearest-neighbor assignment over a distance matrix.
///
/// Detection columns are visited in ascending order; the iteration order
/// is part of the contract, since it decides which side of a distance tie
/// wins. For each column j, the closest animal row i* is found, then the
/// closest column j* for that row; the pair is accepted only when the
/// choice is mutual (j* == j) and the distance is strictly below
/// `distance_limits[i*]`. Ties resolve to the first minimal index on both
/// axes.
///
/// `distance_limits` holds one matching radius per row of `cost_matrix`.
pub fn nearest_neighbor_assignment(
    cost_matrix: &Array2<f64>,
    distance_limits: &[f64],
) -> AssignmentResult {
    let (num_animals, num_detections) = cost_matrix.dim();
    debug_assert_eq!(distance_limits.len(), num_animals);

    if num_animals == 0 || num_detections == 0 {
        return AssignmentResult {
            matches: vec![],
            unmatched_animals: (0..num_animals).collect(),
            unmatched_detections: (0..num_detections).collect(),
        };
    }

    let mut matches = Vec::new();
    let mut animal_claimed = vec![false; num_animals];
    let mut detection_claimed = vec![false; num_detections];

    for j in 0..num_detections {
        let i = argmin(cost_matrix.column(j));
        let nearest_detection = argmin(cost_matrix.row(i));
        let dist = cost_matrix[[i, j]];

        if nearest_detection != j || dist >= distance_limits[i] {
            continue;
        }
        if detection_claimed[j] {
            // With ascending column order each column claims only itself,
            // so this cannot fire; kept as a guarded diagnostic. The
            // detection stays unmatched and becomes a new animal.
            warn!(
                detection = j,
                animal = i,
                "closest suitable detection already claimed, leaving unmatched"
            );
            continue;
        }

        detection_claimed[j] = true;
        animal_claimed[i] = true;
        matches.push((i, j));
    }

    let unmatched_animals = unclaimed_indices(&animal_claimed);
    let unmatched_detections = unclaimed_indices(&detection_claimed);

    AssignmentResult {
        matches,
        unmatched_animals,
        unmatched_detections,
    }
}

/// Index of the smallest value, first occurrence on ties.
fn argmin(values: ArrayView1<'_, f64>) -> usize {
    let mut best = 0;
    for (idx, &v) in values.iter().enumerate() {
        if v < values[best] {
            best = idx;
        }
    }
    best
}

fn unclaimed_indices(claimed: &[bool]) -> Vec<usize> {
    claimed
        .iter()
        .enumerate()
        .filter_map(|(i, &c)| if c { None } else { Some(i) })
        .collect()
}
