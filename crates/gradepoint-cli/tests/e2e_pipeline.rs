//! End-to-end pipeline tests over the bundled term sheets.
//!
//! These tests drive parse → validate → calculate → render through the
//! library crates, then feed one term's results into the next.

use std::path::Path;

use gradepoint_core::config::ValidationLimits;
use gradepoint_core::engine::calculate;
use gradepoint_core::grade::LetterGrade;
use gradepoint_core::model::{CourseStatus, PriorRecord, PriorSource};
use gradepoint_core::parser::{load_term_directory, parse_term_sheet};
use gradepoint_core::report::{format_decimal, GradeReport};
use gradepoint_core::validation::validate_sheet;
use gradepoint_report::{courses_csv_string, generate_html};
use rust_decimal::Decimal;

fn sheet_path(name: &str) -> std::path::PathBuf {
    Path::new("../../terms").join(name)
}

#[test]
fn e2e_spring_term() {
    let sheet = parse_term_sheet(&sheet_path("spring-2025.toml")).unwrap();
    assert!(validate_sheet(&sheet, &ValidationLimits::default()).is_empty());

    let report = calculate(&sheet);
    let term = &report.term;

    assert_eq!(term.total_credits, Decimal::from(9));
    // 10 + 28/3 + 0, kept exact until display.
    assert_eq!(format_decimal(term.total_quality_points, 2), "19.33");
    assert_eq!(format_decimal(term.gpa, 2), "2.15");
    assert_eq!(term.courses[0].quality_points, Decimal::from(10));

    let cumulative = report.cumulative.as_ref().unwrap();
    assert_eq!(cumulative.prior_source, PriorSource::Derived);
    assert_eq!(cumulative.previous_quality_points, Decimal::from(90));
    assert_eq!(cumulative.new_total_credits, Decimal::from(39));
    assert_eq!(format_decimal(cumulative.cgpa, 2), "2.80");
    assert_eq!(report.headline_gpa(), cumulative.cgpa);
}

#[test]
fn e2e_fall_term_caps_and_excludes() {
    let sheet = parse_term_sheet(&sheet_path("fall-2025.toml")).unwrap();
    let report = calculate(&sheet);
    let term = &report.term;

    let data_structures = &term.courses[0];
    assert_eq!(data_structures.status, CourseStatus::Capped);
    assert!(data_structures.was_capped);
    assert_eq!(data_structures.quality_points, Decimal::from(10));

    let seminar = &term.courses[2];
    assert_eq!(seminar.status, CourseStatus::Excluded);
    assert_eq!(seminar.quality_points, Decimal::ZERO);
    assert_eq!(term.excluded_count(), 1);

    assert_eq!(term.total_credits, Decimal::from(10));
    assert_eq!(format_decimal(term.gpa, 2), "3.27");

    let cumulative = report.cumulative.as_ref().unwrap();
    assert_eq!(cumulative.prior_source, PriorSource::Explicit);
    assert_eq!(cumulative.previous_quality_points, Decimal::new(10933, 2));
    assert_eq!(cumulative.new_total_credits, Decimal::from(49));
    assert_eq!(format_decimal(cumulative.cgpa, 2), "2.90");
}

#[test]
fn e2e_chained_terms_match_single_combination() {
    let spring = calculate(&parse_term_sheet(&sheet_path("spring-2025.toml")).unwrap());
    let spring_cumulative = spring.cumulative.clone().unwrap();

    let mut fall_sheet = parse_term_sheet(&sheet_path("fall-2025.toml")).unwrap();
    fall_sheet.prior = Some(PriorRecord {
        gpa: spring_cumulative.cgpa,
        credits: spring_cumulative.new_total_credits,
        quality_points: Some(spring_cumulative.new_total_quality_points),
    });
    let fall = calculate(&fall_sheet);
    let fall_cumulative = fall.cumulative.unwrap();

    assert_eq!(
        fall_cumulative.new_total_quality_points,
        spring_cumulative.new_total_quality_points + fall.term.total_quality_points
    );
    assert_eq!(fall_cumulative.new_total_credits, Decimal::from(49));
    assert_eq!(format_decimal(fall_cumulative.cgpa, 2), "2.90");
}

#[test]
fn e2e_report_survives_json_round_trip() {
    let report = calculate(&parse_term_sheet(&sheet_path("fall-2025.toml")).unwrap());

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("report.json");
    report.save_json(&path).unwrap();

    let loaded = GradeReport::load_json(&path).unwrap();
    assert_eq!(loaded, report);
}

#[test]
fn e2e_renderers_agree_on_figures() {
    let report = calculate(&parse_term_sheet(&sheet_path("spring-2025.toml")).unwrap());

    let csv = courses_csv_string(&report, 2).unwrap();
    assert_eq!(csv.lines().count(), 4);
    assert!(csv.contains("Technical Writing,4,letter,C+,C+,2.33,9.33,included"));

    let html = generate_html(&report, 2);
    assert!(html.contains("<td class=\"gpa\">2.15</td>"));
    assert!(html.contains("<td class=\"gpa\">2.80</td>"));

    let markdown = report.to_markdown(2);
    assert!(markdown.contains("**Term GPA:** 2.15"));

    let distribution = report.term.letter_distribution();
    assert_eq!(
        distribution,
        vec![
            (LetterGrade::BPlus, 1),
            (LetterGrade::CPlus, 1),
            (LetterGrade::F, 1)
        ]
    );
}

#[test]
fn e2e_bundled_directory_loads_every_sheet() {
    let sheets = load_term_directory(Path::new("../../terms")).unwrap();
    let names: Vec<&str> = sheets.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["Fall 2025", "Spring 2025"]);
}
