//! CSV course export.

use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use csv::WriterBuilder;
use serde::Serialize;

use gradepoint_core::model::ProcessedCourse;
use gradepoint_core::report::{format_decimal, GradeReport};

/// One exported row per course.
#[derive(Debug, Serialize)]
struct CourseRow<'a> {
    course: &'a str,
    credits: String,
    grade_type: String,
    grade_input: String,
    letter: String,
    grade_point: String,
    quality_points: String,
    status: String,
}

impl<'a> CourseRow<'a> {
    fn new(course: &'a ProcessedCourse, precision: u32) -> Self {
        Self {
            course: &course.record.name,
            credits: course.record.credits.normalize().to_string(),
            grade_type: course.record.grade.grade_type().to_string(),
            grade_input: course.record.grade.to_string(),
            letter: course
                .resolved_letter
                .map(|l| l.to_string())
                .unwrap_or_default(),
            grade_point: course
                .grade_point
                .map(|p| format_decimal(p.to_decimal(), precision))
                .unwrap_or_default(),
            quality_points: format_decimal(course.quality_points, precision),
            status: course.status.to_string(),
        }
    }
}

/// Write the course table of a report as CSV with a header row.
pub fn write_courses_csv<W: Write>(report: &GradeReport, writer: W, precision: u32) -> Result<()> {
    let mut writer = WriterBuilder::new().has_headers(true).from_writer(writer);

    for course in &report.term.courses {
        writer.serialize(CourseRow::new(course, precision))?;
    }
    writer.flush()?;

    Ok(())
}

/// Render the course table as a CSV string.
pub fn courses_csv_string(report: &GradeReport, precision: u32) -> Result<String> {
    let mut buf = Vec::new();
    write_courses_csv(report, &mut buf, precision)?;
    String::from_utf8(buf).context("CSV output was not valid UTF-8")
}

/// Write a CSV course export to a file.
pub fn write_csv_report(report: &GradeReport, path: &Path, precision: u32) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let file = std::fs::File::create(path)
        .with_context(|| format!("failed to create {}", path.display()))?;
    write_courses_csv(report, file, precision)
}
