//! Common Types and Constants
//!
//! Shared data structures used across all personalization modules. Input
//! records mirror the snapshot shape handed over by the platform services
//! (camelCase field names on the wire).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ==================== Constants ====================

/// Number of neighbors consulted per recommendation query
pub const DEFAULT_NEIGHBORS: usize = 5;

/// A neighbor's course only counts as a signal above this raw progress
pub const PROGRESS_SIGNAL_MIN: f64 = 50.0;

/// Average quiz score below which a student is considered struggling
pub const STRUGGLING_BELOW: f64 = 60.0;

/// Average quiz score above which a student is considered advanced
pub const ADVANCED_ABOVE: f64 = 85.0;

/// Numerical stability epsilon
pub const EPSILON: f64 = 1e-10;

// ==================== Input Records ====================

/// One student's progress signal on one course
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InteractionRecord {
    pub student_id: String,
    pub course_id: String,
    /// Progress in percent, [0, 100]
    pub progress_percentage: f64,
    pub completed: bool,
}

/// A quiz attempt; `completed_at` is unset while the attempt is in flight,
/// `score` may be missing even on completed attempts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizAttempt {
    pub student_id: String,
    pub course_id: String,
    pub score: Option<f64>,
    pub completed_at: Option<DateTime<Utc>>,
}

/// Course publication status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CourseStatus {
    Draft,
    Published,
    Archived,
}

/// Course metadata relevant to ranking
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    pub id: String,
    pub status: CourseStatus,
}

/// A module inside a course, positioned by `order`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseModule {
    pub id: String,
    pub course_id: String,
    pub order: i32,
}

/// A lesson inside a module
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lesson {
    pub id: String,
    pub module_id: String,
    pub order: i32,
    pub title: String,
    pub is_preview: bool,
}

// ==================== Results ====================

/// A ranked neighbor returned by the index, nearest first
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Neighbor {
    pub student_id: String,
    pub distance: f64,
}

/// Recommendation result, distinguishing genuine personalization from the
/// cold-start popularity fallback
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "source", content = "courseIds")]
pub enum RecommendationOutcome {
    Personalized(Vec<String>),
    Fallback(Vec<String>),
}

impl RecommendationOutcome {
    pub fn course_ids(&self) -> &[String] {
        match self {
            Self::Personalized(ids) | Self::Fallback(ids) => ids,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, Self::Fallback(_))
    }
}

/// Performance tier derived from the average quiz score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PerformanceTier {
    Struggling,
    Normal,
    Advanced,
}

impl PerformanceTier {
    pub fn from_average(average_score: f64) -> Self {
        if average_score < STRUGGLING_BELOW {
            Self::Struggling
        } else if average_score > ADVANCED_ABOVE {
            Self::Advanced
        } else {
            Self::Normal
        }
    }
}

/// Per-module slice of an adjusted learning path
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PathSegment {
    pub module_id: String,
    pub lesson_ids: Vec<String>,
}

/// An adjusted learning path: module segments in module order, each holding
/// the selected lessons in lesson order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LearningPath {
    pub tier: PerformanceTier,
    pub average_score: Option<f64>,
    pub segments: Vec<PathSegment>,
}

impl LearningPath {
    /// Flattened lesson ids across all segments
    pub fn lesson_ids(&self) -> Vec<String> {
        self.segments
            .iter()
            .flat_map(|s| s.lesson_ids.iter().cloned())
            .collect()
    }
}

// ==================== Tests ====================
