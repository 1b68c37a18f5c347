//! Request-Scoped Record Snapshot
//!
//! Bundles the course catalog, enrollment records, and quiz attempts handed
//! over by the platform services for a single request. Construction
//! validates what the source system left implicit: required ids are
//! non-empty, references resolve, progress values are in range, and each
//! (student, course) pair enrolls at most once.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::types::{Course, CourseModule, InteractionRecord, Lesson, QuizAttempt};

#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    #[error("empty {field} on a {record} record")]
    EmptyId {
        record: &'static str,
        field: &'static str,
    },
    #[error("progress out of range for student {student_id} on course {course_id}: {value}")]
    InvalidProgress {
        student_id: String,
        course_id: String,
        value: f64,
    },
    #[error("duplicate enrollment for student {student_id} on course {course_id}")]
    DuplicateEnrollment {
        student_id: String,
        course_id: String,
    },
    #[error("{record} references unknown course {course_id}")]
    UnknownCourse {
        record: &'static str,
        course_id: String,
    },
    #[error("lesson {lesson_id} references unknown module {module_id}")]
    UnknownModule {
        lesson_id: String,
        module_id: String,
    },
    #[error("snapshot parse failed: {0}")]
    Malformed(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    courses: Vec<Course>,
    modules: Vec<CourseModule>,
    lessons: Vec<Lesson>,
    enrollments: Vec<InteractionRecord>,
    quiz_attempts: Vec<QuizAttempt>,
}

impl Snapshot {
    pub fn new(
        courses: Vec<Course>,
        modules: Vec<CourseModule>,
        lessons: Vec<Lesson>,
        enrollments: Vec<InteractionRecord>,
        quiz_attempts: Vec<QuizAttempt>,
    ) -> Result<Self, SnapshotError> {
        let snapshot = Self {
            courses,
            modules,
            lessons,
            enrollments,
            quiz_attempts,
        };
        snapshot.validate()?;
        Ok(snapshot)
    }

    /// Deserializes and validates an externally supplied snapshot document.
    pub fn from_json(raw: &str) -> Result<Self, SnapshotError> {
        let snapshot: Self = serde_json::from_str(raw)?;
        snapshot.validate()?;
        Ok(snapshot)
    }

    fn validate(&self) -> Result<(), SnapshotError> {
        let course_ids: HashSet<&str> = self.courses.iter().map(|c| c.id.as_str()).collect();
        let module_ids: HashSet<&str> = self.modules.iter().map(|m| m.id.as_str()).collect();

        for course in &self.courses {
            if course.id.is_empty() {
                return Err(SnapshotError::EmptyId { record: "course", field: "id" });
            }
        }

        for module in &self.modules {
            if module.id.is_empty() {
                return Err(SnapshotError::EmptyId { record: "module", field: "id" });
            }
            if !course_ids.contains(module.course_id.as_str()) {
                return Err(SnapshotError::UnknownCourse {
                    record: "module",
                    course_id: module.course_id.clone(),
                });
            }
        }

        for lesson in &self.lessons {
            if lesson.id.is_empty() {
                return Err(SnapshotError::EmptyId { record: "lesson", field: "id" });
            }
            if !module_ids.contains(lesson.module_id.as_str()) {
                return Err(SnapshotError::UnknownModule {
                    lesson_id: lesson.id.clone(),
                    module_id: lesson.module_id.clone(),
                });
            }
        }

        let mut seen_pairs: HashSet<(&str, &str)> = HashSet::new();
        for record in &self.enrollments {
            if record.student_id.is_empty() {
                return Err(SnapshotError::EmptyId { record: "enrollment", field: "studentId" });
            }
            if record.course_id.is_empty() {
                return Err(SnapshotError::EmptyId { record: "enrollment", field: "courseId" });
            }
            if !course_ids.contains(record.course_id.as_str()) {
                return Err(SnapshotError::UnknownCourse {
                    record: "enrollment",
                    course_id: record.course_id.clone(),
                });
            }
            if !record.progress_percentage.is_finite()
                || record.progress_percentage < 0.0
                || record.progress_percentage > 100.0
            {
                return Err(SnapshotError::InvalidProgress {
                    student_id: record.student_id.clone(),
                    course_id: record.course_id.clone(),
                    value: record.progress_percentage,
                });
            }
            if !seen_pairs.insert((record.student_id.as_str(), record.course_id.as_str())) {
                return Err(SnapshotError::DuplicateEnrollment {
                    student_id: record.student_id.clone(),
                    course_id: record.course_id.clone(),
                });
            }
        }

        for attempt in &self.quiz_attempts {
            if attempt.student_id.is_empty() {
                return Err(SnapshotError::EmptyId { record: "quizAttempt", field: "studentId" });
            }
            if !course_ids.contains(attempt.course_id.as_str()) {
                return Err(SnapshotError::UnknownCourse {
                    record: "quizAttempt",
                    course_id: attempt.course_id.clone(),
                });
            }
        }

        Ok(())
    }

    pub fn enrollments(&self) -> &[InteractionRecord] {
        &self.enrollments
    }

    pub fn has_course(&self, course_id: &str) -> bool {
        self.courses.iter().any(|c| c.id == course_id)
    }

    /// Courses the student holds at least one enrollment record for,
    /// regardless of progress.
    pub fn enrolled_courses(&self, student_id: &str) -> HashSet<&str> {
        self.enrollments
            .iter()
            .filter(|r| r.student_id == student_id)
            .map(|r| r.course_id.as_str())
            .collect()
    }

    /// Enrollment count per course, zero for courses with no records.
    pub fn enrollment_counts(&self) -> HashMap<&str, usize> {
        let mut counts: HashMap<&str, usize> = self.courses.iter().map(|c| (c.id.as_str(), 0)).collect();
        for record in &self.enrollments {
            if let Some(count) = counts.get_mut(record.course_id.as_str()) {
                *count += 1;
            }
        }
        counts
    }

    pub fn published_courses(&self) -> impl Iterator<Item = &Course> {
        self.courses
            .iter()
            .filter(|c| c.status == crate::types::CourseStatus::Published)
    }

    /// Modules of a course in (order, id) order.
    pub fn modules_of(&self, course_id: &str) -> Vec<&CourseModule> {
        let mut modules: Vec<&CourseModule> = self
            .modules
            .iter()
            .filter(|m| m.course_id == course_id)
            .collect();
        modules.sort_by(|a, b| a.order.cmp(&b.order).then_with(|| a.id.cmp(&b.id)));
        modules
    }

    /// Lessons of a module in (order, id) order.
    pub fn lessons_of(&self, module_id: &str) -> Vec<&Lesson> {
        let mut lessons: Vec<&Lesson> = self
            .lessons
            .iter()
            .filter(|l| l.module_id == module_id)
            .collect();
        lessons.sort_by(|a, b| a.order.cmp(&b.order).then_with(|| a.id.cmp(&b.id)));
        lessons
    }

    /// Completed quiz attempts for a (student, course) pair.
    pub fn completed_attempts<'a>(
        &'a self,
        student_id: &'a str,
        course_id: &'a str,
    ) -> impl Iterator<Item = &'a QuizAttempt> + 'a {
        self.quiz_attempts.iter().filter(move |a| {
            a.student_id == student_id && a.course_id == course_id && a.completed_at.is_some()
        })
    }
}
