//! Benchmark suite for kecheng-algo
//!
//! Run with: cargo bench

use criterion::{criterion_group, criterion_main, Criterion};
use kecheng_algo::{recommend, Course, CourseStatus, InteractionRecord, Snapshot};

/// Deterministic synthetic snapshot: 50 students across 20 courses.
fn synthetic_snapshot() -> Snapshot {
    let courses: Vec<Course> = (0..20)
        .map(|c| Course {
            id: format!("c{:02}", c),
            status: CourseStatus::Published,
        })
        .collect();

    let mut enrollments = Vec::new();
    for s in 0..50u64 {
        for c in 0..20u64 {
            if (s * 7 + c * 13) % 3 == 0 {
                enrollments.push(InteractionRecord {
                    student_id: format!("u{:02}", s),
                    course_id: format!("c{:02}", c),
                    progress_percentage: ((s * 11 + c * 17) % 101) as f64,
                    completed: false,
                });
            }
        }
    }

    Snapshot::new(courses, vec![], vec![], enrollments, vec![]).unwrap()
}

fn bench_recommend(c: &mut Criterion) {
    let snapshot = synthetic_snapshot();
    c.bench_function("recommend 50x20", |b| {
        b.iter(|| recommend(&snapshot, "u12", 5))
    });
}

fn bench_cold_start(c: &mut Criterion) {
    let snapshot = synthetic_snapshot();
    c.bench_function("recommend cold start 50x20", |b| {
        b.iter(|| recommend(&snapshot, "stranger", 5))
    });
}

criterion_group!(benches, bench_recommend, bench_cold_start);
criterion_main!(benches);
