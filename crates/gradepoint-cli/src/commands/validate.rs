//! The `gradepoint validate` command.

use std::path::PathBuf;

use anyhow::Result;

use gradepoint_core::config::load_config_from;
use gradepoint_core::parser::{load_term_directory, parse_term_sheet};
use gradepoint_core::validation::validate_sheet;

pub fn execute(term_path: PathBuf, config: Option<PathBuf>) -> Result<()> {
    let config = load_config_from(config.as_deref())?;

    let sheets = if term_path.is_dir() {
        load_term_directory(&term_path)?
    } else {
        vec![parse_term_sheet(&term_path)?]
    };

    if sheets.is_empty() {
        anyhow::bail!("no term sheets found in {}", term_path.display());
    }

    let mut total_issues = 0;

    for sheet in &sheets {
        println!("Term sheet: {} ({} courses)", sheet.name, sheet.courses.len());

        let issues = validate_sheet(sheet, &config.limits);
        for issue in &issues {
            println!("  ERROR: {issue}");
        }
        total_issues += issues.len();
    }

    if total_issues > 0 {
        anyhow::bail!("{total_issues} validation error(s) found");
    }

    println!("All term sheets valid.");
    Ok(())
}
