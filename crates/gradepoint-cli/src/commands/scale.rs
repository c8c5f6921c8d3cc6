//! The `gradepoint scale` command.

use anyhow::Result;
use comfy_table::{Cell, Table};

use gradepoint_core::grade::SCORE_SCALE;
use gradepoint_core::report::format_decimal;

pub fn execute() -> Result<()> {
    let mut table = Table::new();
    table.set_header(vec!["Letter", "Min score", "Grade point", "Decimal"]);

    for (lower, letter) in SCORE_SCALE {
        let point = letter.grade_point();
        table.add_row(vec![
            Cell::new(letter),
            Cell::new(lower),
            Cell::new(point),
            Cell::new(format_decimal(point.to_decimal(), 2)),
        ]);
    }

    println!("{table}");
    println!("Repeated courses are capped at B+ (10/3).");
    Ok(())
}
