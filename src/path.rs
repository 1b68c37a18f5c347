//! Adaptive Learning Path
//!
//! Reorders and filters a course's lesson sequence per student based on quiz
//! performance. Struggling students get foundational content, advanced
//! students skip the basics; with no usable performance signal the standard
//! path is returned unfiltered.

use tracing::debug;

use crate::snapshot::Snapshot;
use crate::types::{LearningPath, Lesson, PathSegment, PerformanceTier};

#[derive(Debug, thiserror::Error)]
pub enum PathError {
    #[error("course not found: {0}")]
    UnknownCourse(String),
}

/// Builds the learning path for a (student, course) pair.
///
/// The average is taken over completed attempts that carry a score; unscored
/// attempts contribute to neither numerator nor denominator. Without any
/// scored attempt the standard path is returned.
pub fn adjust_path(
    snapshot: &Snapshot,
    student_id: &str,
    course_id: &str,
) -> Result<LearningPath, PathError> {
    if !snapshot.has_course(course_id) {
        return Err(PathError::UnknownCourse(course_id.to_string()));
    }

    let scores: Vec<f64> = snapshot
        .completed_attempts(student_id, course_id)
        .filter_map(|a| a.score)
        .collect();

    if scores.is_empty() {
        debug!(student_id, course_id, "no scored attempts, returning standard path");
        return Ok(standard_path(snapshot, course_id));
    }

    let average = scores.iter().sum::<f64>() / scores.len() as f64;
    let tier = PerformanceTier::from_average(average);
    debug!(student_id, course_id, average, ?tier, "adjusting learning path");

    let mut segments = Vec::new();
    for module in snapshot.modules_of(course_id) {
        let lessons = snapshot.lessons_of(&module.id);
        let lesson_ids = select_lessons(tier, &lessons);
        // A module whose filter keeps nothing is simply absent.
        if lesson_ids.is_empty() {
            continue;
        }
        segments.push(PathSegment {
            module_id: module.id.clone(),
            lesson_ids,
        });
    }

    Ok(LearningPath {
        tier,
        average_score: Some(average),
        segments,
    })
}

/// Every lesson of the course in (module order, lesson order).
fn standard_path(snapshot: &Snapshot, course_id: &str) -> LearningPath {
    let mut segments = Vec::new();
    for module in snapshot.modules_of(course_id) {
        let lesson_ids: Vec<String> = snapshot
            .lessons_of(&module.id)
            .iter()
            .map(|l| l.id.clone())
            .collect();
        if lesson_ids.is_empty() {
            continue;
        }
        segments.push(PathSegment {
            module_id: module.id.clone(),
            lesson_ids,
        });
    }
    LearningPath {
        tier: PerformanceTier::Normal,
        average_score: None,
        segments,
    }
}

fn select_lessons(tier: PerformanceTier, lessons: &[&Lesson]) -> Vec<String> {
    // Midpoint over the module's full lesson count, before filtering.
    let midpoint = lessons.len() as i32 / 2;
    lessons
        .iter()
        .filter(|lesson| match tier {
            PerformanceTier::Struggling => {
                lesson.is_preview || title_contains(&lesson.title, "intro")
            }
            PerformanceTier::Advanced => {
                title_contains(&lesson.title, "advanced") || lesson.order > midpoint
            }
            PerformanceTier::Normal => true,
        })
        .map(|lesson| lesson.id.clone())
        .collect()
}

fn title_contains(title: &str, token: &str) -> bool {
    title.to_lowercase().contains(token)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    use crate::types::{Course, CourseModule, CourseStatus, QuizAttempt};

    fn lesson(id: &str, module: &str, order: i32, title: &str, is_preview: bool) -> Lesson {
        Lesson {
            id: id.to_string(),
            module_id: module.to_string(),
            order,
            title: title.to_string(),
            is_preview,
        }
    }

    fn attempt(student: &str, course: &str, score: Option<f64>, completed: bool) -> QuizAttempt {
        QuizAttempt {
            student_id: student.to_string(),
            course_id: course.to_string(),
            score,
            completed_at: completed.then(|| Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap()),
        }
    }

    fn course_snapshot(lessons: Vec<Lesson>, attempts: Vec<QuizAttempt>) -> Snapshot {
        Snapshot::new(
            vec![Course { id: "c1".into(), status: CourseStatus::Published }],
            vec![
                CourseModule { id: "m1".into(), course_id: "c1".into(), order: 1 },
                CourseModule { id: "m2".into(), course_id: "c1".into(), order: 2 },
            ],
            lessons,
            vec![],
            attempts,
        )
        .unwrap()
    }

    #[test]
    fn test_unknown_course_is_an_error() {
        let snapshot = course_snapshot(vec![], vec![]);
        assert!(matches!(
            adjust_path(&snapshot, "u1", "c9"),
            Err(PathError::UnknownCourse(_))
        ));
    }

    #[test]
    fn test_no_attempts_returns_standard_path() {
        let snapshot = course_snapshot(
            vec![
                lesson("l3", "m2", 1, "Deep Dive", false),
                lesson("l2", "m1", 2, "Core Concepts", false),
                lesson("l1", "m1", 1, "Intro", true),
            ],
            vec![],
        );

        let path = adjust_path(&snapshot, "u1", "c1").unwrap();
        assert_eq!(path.tier, PerformanceTier::Normal);
        assert_eq!(path.average_score, None);
        assert_eq!(path.lesson_ids(), vec!["l1", "l2", "l3"]);
    }

    #[test]
    fn test_incomplete_attempts_do_not_count() {
        let snapshot = course_snapshot(
            vec![lesson("l1", "m1", 1, "Intro", true), lesson("l2", "m1", 2, "Core", false)],
            vec![attempt("u1", "c1", Some(30.0), false)],
        );

        let path = adjust_path(&snapshot, "u1", "c1").unwrap();
        assert_eq!(path.average_score, None);
        assert_eq!(path.lesson_ids(), vec!["l1", "l2"]);
    }

    #[test]
    fn test_unscored_attempts_excluded_from_average() {
        let snapshot = course_snapshot(
            vec![lesson("l1", "m1", 1, "Intro", true), lesson("l2", "m1", 2, "Core", false)],
            vec![
                attempt("u1", "c1", Some(90.0), true),
                attempt("u1", "c1", None, true),
                attempt("u1", "c1", Some(90.0), true),
            ],
        );

        // Average must be 90, not 60: the null score drops out entirely.
        let path = adjust_path(&snapshot, "u1", "c1").unwrap();
        assert_eq!(path.average_score, Some(90.0));
        assert_eq!(path.tier, PerformanceTier::Advanced);
    }

    #[test]
    fn test_all_attempts_unscored_degrades_to_standard_path() {
        let snapshot = course_snapshot(
            vec![lesson("l1", "m1", 1, "Intro", true), lesson("l2", "m1", 2, "Core", false)],
            vec![attempt("u1", "c1", None, true)],
        );

        let path = adjust_path(&snapshot, "u1", "c1").unwrap();
        assert_eq!(path.average_score, None);
        assert_eq!(path.lesson_ids(), vec!["l1", "l2"]);
    }

    #[test]
    fn test_struggling_keeps_preview_and_intro_lessons() {
        let snapshot = course_snapshot(
            vec![
                lesson("l1", "m1", 1, "Intro", true),
                lesson("l2", "m1", 2, "Core Concepts", false),
            ],
            vec![attempt("u1", "c1", Some(55.0), true)],
        );

        let path = adjust_path(&snapshot, "u1", "c1").unwrap();
        assert_eq!(path.tier, PerformanceTier::Struggling);
        assert_eq!(path.lesson_ids(), vec!["l1"]);
    }

    #[test]
    fn test_struggling_intro_match_is_case_insensitive_substring() {
        let snapshot = course_snapshot(
            vec![
                lesson("l1", "m1", 1, "An INTRODUCTION to Rust", false),
                lesson("l2", "m1", 2, "Ownership", false),
            ],
            vec![attempt("u1", "c1", Some(40.0), true)],
        );

        let path = adjust_path(&snapshot, "u1", "c1").unwrap();
        assert_eq!(path.lesson_ids(), vec!["l1"]);
    }

    #[test]
    fn test_advanced_keeps_back_half_and_advanced_titles() {
        let snapshot = course_snapshot(
            vec![
                lesson("l1", "m1", 1, "Advanced Warmup", false),
                lesson("l2", "m1", 2, "Basics", false),
                lesson("l3", "m1", 3, "Practice", false),
                lesson("l4", "m1", 4, "Project", false),
                lesson("l5", "m1", 5, "Wrap Up", false),
            ],
            vec![attempt("u1", "c1", Some(95.0), true)],
        );

        // Midpoint of 5 lessons is 2: orders 3..5 pass, plus the
        // advanced-titled opener.
        let path = adjust_path(&snapshot, "u1", "c1").unwrap();
        assert_eq!(path.tier, PerformanceTier::Advanced);
        assert_eq!(path.lesson_ids(), vec!["l1", "l3", "l4", "l5"]);
    }

    #[test]
    fn test_module_with_no_matching_lessons_is_absent() {
        let snapshot = course_snapshot(
            vec![
                lesson("l1", "m1", 1, "Intro", true),
                lesson("l2", "m2", 1, "Core Concepts", false),
            ],
            vec![attempt("u1", "c1", Some(50.0), true)],
        );

        let path = adjust_path(&snapshot, "u1", "c1").unwrap();
        let module_ids: Vec<&str> = path.segments.iter().map(|s| s.module_id.as_str()).collect();
        assert_eq!(module_ids, ["m1"]);
    }

    #[test]
    fn test_normal_tier_keeps_everything_in_order() {
        let snapshot = course_snapshot(
            vec![
                lesson("l2", "m1", 2, "Core", false),
                lesson("l1", "m1", 1, "Intro", true),
                lesson("l3", "m2", 1, "More", false),
            ],
            vec![attempt("u1", "c1", Some(70.0), true)],
        );

        let path = adjust_path(&snapshot, "u1", "c1").unwrap();
        assert_eq!(path.tier, PerformanceTier::Normal);
        assert_eq!(path.lesson_ids(), vec!["l1", "l2", "l3"]);
    }
}
