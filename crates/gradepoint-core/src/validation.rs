//! Pre-flight validation of term sheets.
//!
//! Every problem is collected; nothing here stops at the first issue. The
//! engine never calls into this module.

use std::fmt;

use rust_decimal::Decimal;

use crate::config::ValidationLimits;
use crate::grade::LetterGrade;
use crate::model::{CourseRecord, GradeInput, PriorRecord, TermSheet};

/// A user-facing problem with a term sheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationIssue {
    /// Zero-based course position, if the issue concerns one course.
    pub course_index: Option<usize>,
    /// Course name, if the course has one.
    pub course_name: Option<String>,
    pub message: String,
}

impl ValidationIssue {
    fn sheet(message: impl Into<String>) -> Self {
        Self {
            course_index: None,
            course_name: None,
            message: message.into(),
        }
    }

    fn course(index: usize, course: &CourseRecord, message: impl Into<String>) -> Self {
        Self {
            course_index: Some(index),
            course_name: (!course.name.trim().is_empty()).then(|| course.name.clone()),
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.course_index, &self.course_name) {
            (Some(i), Some(name)) => write!(f, "course {} ({name}): {}", i + 1, self.message),
            (Some(i), None) => write!(f, "course {}: {}", i + 1, self.message),
            _ => f.write_str(&self.message),
        }
    }
}

/// Validate a sheet against institutional limits.
pub fn validate_sheet(sheet: &TermSheet, limits: &ValidationLimits) -> Vec<ValidationIssue> {
    let mut issues = validate_courses(&sheet.courses, limits);
    if let Some(prior) = &sheet.prior {
        issues.extend(validate_prior(prior, limits));
    }
    issues
}

/// Validate a course list on its own.
pub fn validate_courses(courses: &[CourseRecord], limits: &ValidationLimits) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();

    if courses.is_empty() {
        issues.push(ValidationIssue::sheet("at least one course is required"));
        return issues;
    }

    for (i, course) in courses.iter().enumerate() {
        if course.credits <= Decimal::ZERO {
            issues.push(ValidationIssue::course(
                i,
                course,
                format!("credits must be greater than 0 (got {})", course.credits),
            ));
        } else if course.credits > limits.max_credits {
            issues.push(ValidationIssue::course(
                i,
                course,
                format!(
                    "credits must be at most {} (got {})",
                    limits.max_credits, course.credits
                ),
            ));
        }

        match &course.grade {
            GradeInput::Numeric { score } if score.is_nan() => {
                issues.push(ValidationIssue::course(i, course, "score must be a number"));
            }
            GradeInput::Numeric { score } if !(0.0..=100.0).contains(score) => {
                issues.push(ValidationIssue::course(
                    i,
                    course,
                    format!("score must be between 0 and 100 (got {score})"),
                ));
            }
            GradeInput::Letter { letter } if letter.trim().is_empty() => {
                issues.push(ValidationIssue::course(i, course, "select a letter grade"));
            }
            GradeInput::Letter { letter } if letter.parse::<LetterGrade>().is_err() => {
                issues.push(ValidationIssue::course(
                    i,
                    course,
                    format!("unknown letter grade '{letter}'"),
                ));
            }
            _ => {}
        }
    }

    if courses.iter().all(|c| c.excluded) {
        issues.push(ValidationIssue::sheet(
            "cannot compute GPA with no included courses",
        ));
    }

    issues
}

/// Validate the prior cumulative record.
pub fn validate_prior(prior: &PriorRecord, limits: &ValidationLimits) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();

    if prior.gpa < Decimal::ZERO || prior.gpa > limits.max_gpa {
        issues.push(ValidationIssue::sheet(format!(
            "previous CGPA must be between 0 and {} (got {})",
            limits.max_gpa, prior.gpa
        )));
    }
    if prior.credits < Decimal::ZERO {
        issues.push(ValidationIssue::sheet(format!(
            "previous credits cannot be negative (got {})",
            prior.credits
        )));
    } else if prior.credits > limits.max_prior_credits {
        issues.push(ValidationIssue::sheet(format!(
            "previous credits must be at most {} (got {})",
            limits.max_prior_credits, prior.credits
        )));
    }
    if let Some(qp) = prior.quality_points {
        let max_qp = limits.max_prior_credits.saturating_mul(limits.max_gpa);
        if qp < Decimal::ZERO {
            issues.push(ValidationIssue::sheet(format!(
                "previous quality points cannot be negative (got {qp})"
            )));
        } else if qp > max_qp {
            issues.push(ValidationIssue::sheet(format!(
                "previous quality points must be at most {max_qp} (got {qp})"
            )));
        }
    }

    issues
}
