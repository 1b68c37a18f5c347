//! Course Recommendation
//!
//! Collaborative filtering over the interaction matrix: normalize, find the
//! nearest students by cosine distance, then harvest their high-progress
//! courses. Anticipated data gaps degrade to the popularity fallback instead
//! of failing; the outcome type tells callers which path ran.

use std::cmp::Ordering;

use tracing::{debug, info};

use crate::matrix::InteractionMatrix;
use crate::neighbors::NeighborIndex;
use crate::scaler::StandardScaler;
use crate::snapshot::Snapshot;
use crate::types::{RecommendationOutcome, DEFAULT_NEIGHBORS, PROGRESS_SIGNAL_MIN};

/// Recommends up to `n` courses for a student. Cold-start conditions (no
/// records, unknown student, fewer than two students) fall back to
/// popularity ranking. A personalized result may hold fewer than `n` courses
/// when candidates run out; it is never topped up from popularity.
pub fn recommend(snapshot: &Snapshot, student_id: &str, n: usize) -> RecommendationOutcome {
    let Some(matrix) = InteractionMatrix::from_records(snapshot.enrollments()) else {
        info!(student_id, "no interaction records, using popularity fallback");
        return RecommendationOutcome::Fallback(popular(snapshot, n));
    };

    if !matrix.contains_student(student_id) {
        info!(student_id, "student absent from interaction table, using popularity fallback");
        return RecommendationOutcome::Fallback(popular(snapshot, n));
    }

    let scaler = StandardScaler::fit(&matrix);
    let normalized = scaler.transform_matrix(&matrix);
    let Some(index) = NeighborIndex::fit(matrix.student_ids().to_vec(), normalized) else {
        info!(student_id, "fewer than two students, using popularity fallback");
        return RecommendationOutcome::Fallback(popular(snapshot, n));
    };

    let Some(raw_row) = matrix.row_of(student_id) else {
        return RecommendationOutcome::Fallback(popular(snapshot, n));
    };
    let query = scaler.transform_row(raw_row);
    let neighbors = index.query(student_id, &query, DEFAULT_NEIGHBORS);

    let enrolled = snapshot.enrolled_courses(student_id);
    let mut picked: Vec<String> = Vec::new();

    'neighbors: for neighbor in &neighbors {
        let Some(row) = matrix.row_of(&neighbor.student_id) else {
            continue;
        };

        // High-progress courses of this neighbor, best first, id tie-break.
        let mut liked: Vec<(&str, f64)> = matrix
            .course_ids()
            .iter()
            .enumerate()
            .filter(|(col, _)| row[*col] > PROGRESS_SIGNAL_MIN)
            .map(|(col, course_id)| (course_id.as_str(), row[col]))
            .collect();
        liked.sort_by(|a, b| {
            b.1.partial_cmp(&a.1)
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.0.cmp(b.0))
        });

        for (course_id, _) in liked {
            if enrolled.contains(course_id) || picked.iter().any(|c| c == course_id) {
                continue;
            }
            picked.push(course_id.to_string());
            if picked.len() >= n {
                break 'neighbors;
            }
        }
    }

    picked.truncate(n);
    debug!(
        student_id,
        neighbors = neighbors.len(),
        picked = picked.len(),
        "personalized recommendation computed"
    );
    RecommendationOutcome::Personalized(picked)
}

/// Ranks published courses by total enrollment count descending, ties by
/// course id ascending, up to `n`.
pub fn popular(snapshot: &Snapshot, n: usize) -> Vec<String> {
    let counts = snapshot.enrollment_counts();
    let mut ranked: Vec<(&str, usize)> = snapshot
        .published_courses()
        .map(|c| (c.id.as_str(), counts.get(c.id.as_str()).copied().unwrap_or(0)))
        .collect();

    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
    ranked
        .into_iter()
        .take(n)
        .map(|(id, _)| id.to_string())
        .collect()
}
