//! Term aggregator.
//!
//! Reduces a term's course records to credit and quality-point totals,
//! applying the exclusion and repeat-cap rules course by course.

use rust_decimal::Decimal;

use crate::grade::{GradeLabel, GradePoint, LetterGrade};
use crate::model::{CourseRecord, CourseStatus, ProcessedCourse, TermTotals};

/// Resolve one course record.
pub fn process_course(record: &CourseRecord) -> ProcessedCourse {
    if record.excluded {
        return ProcessedCourse {
            record: record.clone(),
            resolved_letter: None,
            grade_point: None,
            was_capped: false,
            quality_points: Decimal::ZERO,
            status: CourseStatus::Excluded,
        };
    }

    let resolved = record.grade.resolve();
    let (letter, grade_point, status) =
        if record.repeated && resolved.grade_point > GradePoint::REPEAT_CAP {
            (
                GradeLabel::Letter(LetterGrade::BPlus),
                GradePoint::REPEAT_CAP,
                CourseStatus::Capped,
            )
        } else {
            (resolved.letter, resolved.grade_point, CourseStatus::Included)
        };

    ProcessedCourse {
        record: record.clone(),
        resolved_letter: Some(letter),
        grade_point: Some(grade_point),
        was_capped: status == CourseStatus::Capped,
        quality_points: grade_point.quality_points(record.credits),
        status,
    }
}

/// Aggregate a term. Output courses keep input order.
///
/// A term with no counted credits has a GPA of zero.
pub fn aggregate_term(records: &[CourseRecord]) -> TermTotals {
    let mut courses = Vec::with_capacity(records.len());
    let mut total_credits = Decimal::ZERO;
    // Sum of credits × thirds; divided by three once at the end.
    let mut total_thirds = Decimal::ZERO;

    for record in records {
        let course = process_course(record);
        if course.counts_toward_totals() {
            let thirds = course.grade_point.map_or(0, GradePoint::thirds);
            total_credits = total_credits.saturating_add(record.credits);
            total_thirds =
                total_thirds.saturating_add(record.credits.saturating_mul(Decimal::from(thirds)));
        }
        tracing::debug!(
            course = %record.name,
            status = %course.status,
            quality_points = %course.quality_points,
            "processed course"
        );
        courses.push(course);
    }

    let three = Decimal::from(3);
    let total_quality_points = total_thirds / three;
    let gpa = if total_credits > Decimal::ZERO {
        total_thirds
            .checked_div(three.saturating_mul(total_credits))
            .unwrap_or(Decimal::ZERO)
    } else {
        Decimal::ZERO
    };

    TermTotals {
        courses,
        total_credits,
        total_quality_points,
        gpa,
    }
}
