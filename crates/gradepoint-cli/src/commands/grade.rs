//! The `gradepoint grade` command.

use anyhow::Result;
use rust_decimal::Decimal;

use gradepoint_core::grade::{score_from_str, LetterGrade};
use gradepoint_core::report::format_decimal;
use gradepoint_core::{letter_to_grade_point, point_to_letter, score_to_grade};

pub fn execute(score: Option<String>, letter: Option<String>, point: Option<Decimal>) -> Result<()> {
    if let Some(raw) = score {
        println!("{}", describe_score(&raw));
    }
    if let Some(raw) = letter {
        println!("{}", describe_letter(&raw));
    }
    if let Some(point) = point {
        println!("Point {} -> {}", point.normalize(), point_to_letter(point));
    }
    Ok(())
}

fn describe_score(raw: &str) -> String {
    let grade = score_to_grade(score_from_str(raw));
    match grade.letter.letter() {
        Some(letter) => format!(
            "Score {} -> {letter} ({} = {})",
            raw.trim(),
            grade.grade_point,
            format_decimal(grade.grade_point.to_decimal(), 2)
        ),
        None => format!("Score '{}' -> Invalid (not a number)", raw.trim()),
    }
}

fn describe_letter(raw: &str) -> String {
    match raw.parse::<LetterGrade>() {
        Ok(letter) => {
            let point = letter.grade_point();
            format!(
                "Letter {letter} -> {point} = {}",
                format_decimal(point.to_decimal(), 2)
            )
        }
        Err(_) => format!(
            "Letter '{}' -> {} (unknown letter, counts as 0)",
            raw.trim(),
            letter_to_grade_point(raw)
        ),
    }
}
