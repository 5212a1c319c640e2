//! Nearest-neighbor classification against a store snapshot.

use serde::Serialize;

use crate::types::error::FaceResult;
use crate::types::{euclidean_distance, Embedding, StoreSnapshot, UNKNOWN_LABEL};

/// Default acceptance threshold (Euclidean distance in embedding space).
pub const DEFAULT_MATCH_THRESHOLD: f32 = 0.6;

/// Outcome of classifying one query embedding.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Classification {
    /// Winning identity name, or `None` for "unknown".
    pub label: Option<String>,
    /// Minimum distance found, or `None` when the snapshot was empty.
    pub distance: Option<f32>,
}

impl Classification {
    /// The label to report to callers, with `"unknown"` standing in for an
    /// unmatched face.
    pub fn display_label(&self) -> &str {
        self.label.as_deref().unwrap_or(UNKNOWN_LABEL)
    }
}

/// Classify `query` against the snapshot.
///
/// Flattens the snapshot in insertion order and takes the stable argmin of
/// Euclidean distances: exact ties keep the earliest entry. The winner is
/// accepted only when its distance is strictly less than `threshold`;
/// otherwise the result is "unknown" with the distance still reported. A NaN
/// distance (NaN components in an embedding) never satisfies the acceptance
/// comparison and loses the argmin to any finite distance, so a corrupt
/// entry is never accepted and never shadows a finite match.
///
/// Deterministic for fixed inputs, never mutates the snapshot, and linear in
/// the total number of enrolled embeddings. A dimension mismatch anywhere in
/// the snapshot fails the whole call.
pub fn classify(
    query: &Embedding,
    snapshot: &StoreSnapshot,
    threshold: f32,
) -> FaceResult<Classification> {
    let mut best_label: Option<&str> = None;
    let mut best_distance: Option<f32> = None;

    for (name, embedding) in snapshot.flatten() {
        let distance = euclidean_distance(query, embedding)?;
        if best_distance.map_or(true, |b| b.is_nan() || distance < b) {
            best_distance = Some(distance);
            best_label = Some(name);
        }
    }

    match (best_label, best_distance) {
        (Some(label), Some(distance)) if distance < threshold => Ok(Classification {
            label: Some(label.to_string()),
            distance: Some(distance),
        }),
        (_, distance) => Ok(Classification {
            label: None,
            distance,
        }),
    }
}
