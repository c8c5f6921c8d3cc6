//! The `gradepoint init` command.

use std::path::Path;

use anyhow::Result;

pub fn execute() -> Result<()> {
    write_if_missing(Path::new("gradepoint.toml"), SAMPLE_CONFIG)?;

    std::fs::create_dir_all("terms")?;
    write_if_missing(Path::new("terms/example.toml"), EXAMPLE_TERM)?;

    println!("\nNext steps:");
    println!("  1. Edit terms/example.toml with your courses");
    println!("  2. Run: gradepoint validate --term terms/example.toml");
    println!("  3. Run: gradepoint calc --term terms/example.toml");

    Ok(())
}

fn write_if_missing(path: &Path, content: &str) -> Result<()> {
    if path.exists() {
        println!("{} already exists, skipping.", path.display());
    } else {
        std::fs::write(path, content)?;
        println!("Created {}", path.display());
    }
    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# gradepoint configuration

output_dir = "./gradepoint-reports"

[limits]
max_credits = 6
max_gpa = 4.0
max_prior_credits = 1000

[display]
precision = 2
"#;

const EXAMPLE_TERM: &str = r#"[term]
name = "Example Term"

# Remove this section for a first term.
[prior]
gpa = 3.0
credits = 30
# quality_points = 90.0

[[courses]]
name = "Calculus I"
credits = 3
grade_type = "numeric"
score = 88

[[courses]]
name = "Technical Writing"
credits = 4
grade_type = "letter"
letter = "C+"

[[courses]]
name = "Data Structures"
credits = 3
grade_type = "numeric"
score = 97
repeated = true

[[courses]]
name = "Physical Education"
credits = 1
grade_type = "letter"
letter = "A"
excluded = true
"#;
