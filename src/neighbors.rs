//! Nearest-Neighbor Index
//!
//! Brute-force k-NN over normalized student rows by cosine distance. The
//! query student is a member of the indexed set, so the index excludes the
//! target's own row by id rather than trusting positional exclusion.

use std::cmp::Ordering;

use rayon::prelude::*;

use crate::types::{Neighbor, EPSILON};

#[derive(Debug, Clone)]
pub struct NeighborIndex {
    student_ids: Vec<String>,
    rows: Vec<Vec<f64>>,
}

impl NeighborIndex {
    /// Builds the index over normalized rows. Returns `None` below two rows:
    /// no neighbor distinct from the query itself can exist.
    pub fn fit(student_ids: Vec<String>, rows: Vec<Vec<f64>>) -> Option<Self> {
        if student_ids.len() != rows.len() || student_ids.len() < 2 {
            return None;
        }
        Some(Self { student_ids, rows })
    }

    /// The k nearest rows to `query` by cosine distance, nearest first,
    /// excluding `target_student_id`. Distance ties break by student id
    /// ascending so results are reproducible.
    pub fn query(&self, target_student_id: &str, query: &[f64], k: usize) -> Vec<Neighbor> {
        let mut scored: Vec<Neighbor> = self
            .student_ids
            .par_iter()
            .zip(self.rows.par_iter())
            .filter(|(id, _)| id.as_str() != target_student_id)
            .map(|(id, row)| Neighbor {
                student_id: id.clone(),
                distance: cosine_distance(query, row),
            })
            .collect();

        scored.sort_by(|a, b| {
            a.distance
                .partial_cmp(&b.distance)
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.student_id.cmp(&b.student_id))
        });
        scored.truncate(k);
        scored
    }
}

/// Cosine distance `1 - cos(a, b)`; a zero-norm vector has similarity 0 and
/// therefore distance 1.
pub fn cosine_distance(a: &[f64], b: &[f64]) -> f64 {
    1.0 - cosine_similarity(a, b)
}

fn cosine_similarity(a: &[f64], b: &[f64]) -> f64 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }
    let dot: f64 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f64 = a.iter().map(|x| x * x).sum::<f64>().sqrt();
    let norm_b: f64 = b.iter().map(|x| x * x).sum::<f64>().sqrt();
    if norm_a < EPSILON || norm_b < EPSILON {
        return 0.0;
    }
    (dot / (norm_a * norm_b)).clamp(-1.0, 1.0)
}
