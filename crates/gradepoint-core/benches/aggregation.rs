use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rust_decimal::Decimal;

use gradepoint_core::cumulative::combine_cumulative;
use gradepoint_core::grade::score_to_grade;
use gradepoint_core::model::CourseRecord;
use gradepoint_core::term::aggregate_term;

fn make_courses(n: usize) -> Vec<CourseRecord> {
    (0..n)
        .map(|i| {
            let credits = Decimal::from(1 + (i % 4) as i64);
            let course = if i % 2 == 0 {
                CourseRecord::numeric(format!("course-{i}"), credits, (i % 101) as f64)
            } else {
                CourseRecord::letter(format!("course-{i}"), credits, "B+")
            };
            match i % 7 {
                0 => course.mark_excluded(),
                3 => course.mark_repeated(),
                _ => course,
            }
        })
        .collect()
}

fn bench_score_to_grade(c: &mut Criterion) {
    let mut group = c.benchmark_group("score_to_grade");

    group.bench_function("top", |b| b.iter(|| score_to_grade(black_box(98.0))));
    group.bench_function("bottom", |b| b.iter(|| score_to_grade(black_box(12.0))));
    group.bench_function("nan", |b| b.iter(|| score_to_grade(black_box(f64::NAN))));

    group.finish();
}

fn bench_aggregate_term(c: &mut Criterion) {
    let mut group = c.benchmark_group("aggregate_term");

    for n in [6, 60, 600] {
        let courses = make_courses(n);
        group.bench_function(format!("{n}_courses"), |b| {
            b.iter(|| aggregate_term(black_box(&courses)))
        });
    }

    group.finish();
}

fn bench_combine(c: &mut Criterion) {
    let term = aggregate_term(&make_courses(6));

    c.bench_function("combine_cumulative", |b| {
        b.iter(|| {
            combine_cumulative(
                black_box(Decimal::new(325, 2)),
                black_box(Decimal::from(90)),
                black_box(term.total_quality_points),
                black_box(term.total_credits),
                None,
            )
        })
    });
}

criterion_group!(benches, bench_score_to_grade, bench_aggregate_term, bench_combine);
criterion_main!(benches);
