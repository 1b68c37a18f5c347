//! User-Course Interaction Matrix
//!
//! Dense table of progress percentages, rebuilt from scratch from the
//! current record snapshot on every request. Rows are distinct student ids,
//! columns distinct course ids, both kept sorted so traversal order (and
//! every downstream tie-break) is reproducible.

use std::collections::HashMap;

use crate::types::InteractionRecord;

#[derive(Debug, Clone)]
pub struct InteractionMatrix {
    student_ids: Vec<String>,
    course_ids: Vec<String>,
    row_index: HashMap<String, usize>,
    col_index: HashMap<String, usize>,
    values: Vec<f64>,
}

impl InteractionMatrix {
    /// Builds the matrix from the full record snapshot, unfiltered: every
    /// record contributes a cell regardless of course status or completion.
    /// Returns `None` for an empty snapshot. Duplicate (student, course)
    /// pairs are rejected at snapshot validation; here the last record wins.
    pub fn from_records(records: &[InteractionRecord]) -> Option<Self> {
        if records.is_empty() {
            return None;
        }

        let mut student_ids: Vec<String> = records.iter().map(|r| r.student_id.clone()).collect();
        student_ids.sort();
        student_ids.dedup();

        let mut course_ids: Vec<String> = records.iter().map(|r| r.course_id.clone()).collect();
        course_ids.sort();
        course_ids.dedup();

        let row_index: HashMap<String, usize> = student_ids
            .iter()
            .enumerate()
            .map(|(i, id)| (id.clone(), i))
            .collect();
        let col_index: HashMap<String, usize> = course_ids
            .iter()
            .enumerate()
            .map(|(i, id)| (id.clone(), i))
            .collect();

        let cols = course_ids.len();
        let mut values = vec![0.0; student_ids.len() * cols];
        for record in records {
            let row = row_index[&record.student_id];
            let col = col_index[&record.course_id];
            values[row * cols + col] = record.progress_percentage;
        }

        Some(Self {
            student_ids,
            course_ids,
            row_index,
            col_index,
            values,
        })
    }

    pub fn row_count(&self) -> usize {
        self.student_ids.len()
    }

    pub fn col_count(&self) -> usize {
        self.course_ids.len()
    }

    pub fn student_ids(&self) -> &[String] {
        &self.student_ids
    }

    pub fn course_ids(&self) -> &[String] {
        &self.course_ids
    }

    pub fn contains_student(&self, student_id: &str) -> bool {
        self.row_index.contains_key(student_id)
    }

    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.values[row * self.course_ids.len() + col]
    }

    pub fn row(&self, row: usize) -> &[f64] {
        let cols = self.course_ids.len();
        &self.values[row * cols..(row + 1) * cols]
    }

    /// The raw progress row for a student, if present
    pub fn row_of(&self, student_id: &str) -> Option<&[f64]> {
        self.row_index.get(student_id).map(|&row| self.row(row))
    }
}
