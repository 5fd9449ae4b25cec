//! Human-facing import summary.

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, ContentArrangement, Table};

use crate::commands::ImportOutcome;

pub fn print_summary(outcome: &ImportOutcome) {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            header_cell("Entity"),
            header_cell("Rows"),
            header_cell("Imported"),
            header_cell("Errors"),
            header_cell("Outbox"),
        ]);
    let outbox = match (outcome.dry_run, outcome.outbox_pending) {
        (true, _) => "dry run".to_string(),
        (false, Some(pending)) => pending.to_string(),
        (false, None) => "-".to_string(),
    };
    table.add_row(vec![
        Cell::new(&outcome.entity),
        number_cell(outcome.rows_read),
        number_cell(outcome.result.imported),
        number_cell(outcome.result.errors.len()),
        Cell::new(outbox).set_alignment(CellAlignment::Right),
    ]);
    println!("{table}");
    println!("{}", outcome.result.message);
    for error in &outcome.result.errors {
        println!("  - {error}");
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label).add_attribute(Attribute::Bold)
}

fn number_cell(value: usize) -> Cell {
    Cell::new(value).set_alignment(CellAlignment::Right)
}
