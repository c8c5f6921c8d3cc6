//! The `gradepoint calc` command.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use comfy_table::{Cell, Table};
use rust_decimal::Decimal;

use gradepoint_core::config::load_config_from;
use gradepoint_core::engine::calculate;
use gradepoint_core::model::{PriorRecord, PriorSource, TermSheet};
use gradepoint_core::parser::parse_term_sheet;
use gradepoint_core::report::{format_decimal, GradeReport};
use gradepoint_core::validation::validate_sheet;
use gradepoint_report::{courses_csv_string, generate_html, write_csv_report, write_html_report};

const FORMATS: [&str; 5] = ["table", "json", "csv", "html", "markdown"];

/// Parsed `calc` arguments.
pub struct CalcArgs {
    pub term: PathBuf,
    pub prev_gpa: Option<Decimal>,
    pub prev_credits: Option<Decimal>,
    pub prev_qp: Option<Decimal>,
    pub format: String,
    /// `Some(None)` means the flag was given without a directory.
    pub output: Option<Option<PathBuf>>,
    pub precision: Option<u32>,
    pub config: Option<PathBuf>,
}

pub fn execute(args: CalcArgs) -> Result<()> {
    let config = load_config_from(args.config.as_deref())?;
    let precision = args.precision.unwrap_or(config.display.precision);
    anyhow::ensure!(precision <= 10, "precision must be at most 10");

    let formats = parse_formats(&args.format)?;

    let mut sheet = parse_term_sheet(&args.term)?;
    apply_prior_overrides(&mut sheet, args.prev_gpa, args.prev_credits, args.prev_qp);

    let issues = validate_sheet(&sheet, &config.limits);
    if !issues.is_empty() {
        eprintln!("Validation failed for {}:", args.term.display());
        for issue in &issues {
            eprintln!("  - {issue}");
        }
        anyhow::bail!("{} validation error(s), nothing calculated", issues.len());
    }

    let report = calculate(&sheet);

    let output_dir = args
        .output
        .map(|dir| dir.unwrap_or_else(|| config.output_dir.clone()));

    match &output_dir {
        Some(dir) => write_outputs(&report, &formats, dir, precision)?,
        None => {
            for fmt in &formats {
                match *fmt {
                    "json" => println!("{}", serde_json::to_string_pretty(&report)?),
                    "csv" => print!("{}", courses_csv_string(&report, precision)?),
                    "html" => println!("{}", generate_html(&report, precision)),
                    "markdown" => print!("{}", report.to_markdown(precision)),
                    _ => print_tables(&report, precision),
                }
            }
        }
    }

    Ok(())
}

fn parse_formats(raw: &str) -> Result<Vec<&'static str>> {
    if raw.trim() == "all" {
        return Ok(FORMATS.to_vec());
    }
    raw.split(',')
        .map(|s| {
            let s = match s.trim() {
                "md" => "markdown",
                other => other,
            };
            FORMATS
                .iter()
                .copied()
                .find(|f| *f == s)
                .ok_or_else(|| {
                    anyhow::anyhow!(
                        "unknown format: '{s}' (expected {} or all)",
                        FORMATS.join(", ")
                    )
                })
        })
        .collect()
}

/// CLI flags replace individual fields of the sheet's prior record; any
/// flag creates a prior record if the sheet has none.
fn apply_prior_overrides(
    sheet: &mut TermSheet,
    gpa: Option<Decimal>,
    credits: Option<Decimal>,
    quality_points: Option<Decimal>,
) {
    if gpa.is_none() && credits.is_none() && quality_points.is_none() {
        return;
    }
    let prior = sheet.prior.get_or_insert(PriorRecord {
        gpa: Decimal::ZERO,
        credits: Decimal::ZERO,
        quality_points: None,
    });
    if let Some(gpa) = gpa {
        prior.gpa = gpa;
    }
    if let Some(credits) = credits {
        prior.credits = credits;
    }
    if quality_points.is_some() {
        prior.quality_points = quality_points;
    }
}

fn write_outputs(report: &GradeReport, formats: &[&str], dir: &Path, precision: u32) -> Result<()> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("failed to create output directory {}", dir.display()))?;
    let timestamp = report.created_at.format("%Y-%m-%dT%H%M%S").to_string();
    tracing::debug!(dir = %dir.display(), ?formats, "writing report files");

    for fmt in formats {
        match *fmt {
            "json" => {
                let path = dir.join(format!("report-{timestamp}.json"));
                report.save_json(&path)?;
                eprintln!("Results saved to: {}", path.display());
            }
            "csv" => {
                let path = dir.join(format!("courses-{timestamp}.csv"));
                write_csv_report(report, &path, precision)?;
                eprintln!("CSV export: {}", path.display());
            }
            "html" => {
                let path = dir.join(format!("report-{timestamp}.html"));
                write_html_report(report, &path, precision)?;
                eprintln!("HTML report: {}", path.display());
            }
            "markdown" => {
                let path = dir.join(format!("report-{timestamp}.md"));
                std::fs::write(&path, report.to_markdown(precision))
                    .with_context(|| format!("failed to write {}", path.display()))?;
                eprintln!("Markdown report: {}", path.display());
            }
            _ => print_tables(report, precision),
        }
    }

    Ok(())
}

fn print_tables(report: &GradeReport, precision: u32) {
    let fmt = |d: Decimal| format_decimal(d, precision);

    let mut courses = Table::new();
    courses.set_header(vec![
        "Course", "Credits", "Grade", "Letter", "Points", "QP", "Status",
    ]);
    for c in &report.term.courses {
        courses.add_row(vec![
            Cell::new(&c.record.name),
            Cell::new(c.record.credits.normalize()),
            Cell::new(&c.record.grade),
            Cell::new(
                c.resolved_letter
                    .map(|l| l.to_string())
                    .unwrap_or_else(|| "-".into()),
            ),
            Cell::new(
                c.grade_point
                    .map(|p| fmt(p.to_decimal()))
                    .unwrap_or_else(|| "-".into()),
            ),
            Cell::new(fmt(c.quality_points)),
            Cell::new(c.status),
        ]);
    }

    let mut summary = Table::new();
    summary.set_header(vec!["", "Credits", "Quality Points", "GPA"]);
    summary.add_row(vec![
        Cell::new("Term"),
        Cell::new(report.term.total_credits.normalize()),
        Cell::new(fmt(report.term.total_quality_points)),
        Cell::new(fmt(report.term.gpa)),
    ]);
    if let Some(c) = &report.cumulative {
        let label = match c.prior_source {
            PriorSource::Explicit => "Previous (explicit QP)",
            PriorSource::Derived => "Previous",
        };
        summary.add_row(vec![
            Cell::new(label),
            Cell::new(c.previous_credits.normalize()),
            Cell::new(fmt(c.previous_quality_points)),
            Cell::new("-"),
        ]);
        summary.add_row(vec![
            Cell::new("Cumulative"),
            Cell::new(c.new_total_credits.normalize()),
            Cell::new(fmt(c.new_total_quality_points)),
            Cell::new(fmt(c.cgpa)),
        ]);
    }

    println!("{}\n", report.term_name);
    println!("{courses}\n");
    println!("{summary}");
}
