use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use datesplit_cli::types::RunSummary;

pub fn print_summary(summary: &RunSummary) {
    println!("{}", summary_table(summary));
}

fn summary_table(summary: &RunSummary) -> Table {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Item"), header_cell("Value")]);
    apply_table_style(&mut table);
    table.add_row(vec![
        Cell::new("Input"),
        Cell::new(summary.input.display()),
    ]);
    table.add_row(vec![
        Cell::new("Output"),
        Cell::new(summary.export.display()),
    ]);
    table.add_row(vec![Cell::new("Mode"), Cell::new(summary.mode)]);
    table.add_row(vec![Cell::new("Rows read"), count_cell(summary.rows)]);
    table.add_row(vec![
        Cell::new("Records written"),
        count_cell(summary.records)
            .fg(Color::Green)
            .add_attribute(Attribute::Bold),
    ]);
    table.add_row(vec![
        Cell::new("Duration"),
        Cell::new(format!("{} ms", summary.elapsed.as_millis()))
            .set_alignment(CellAlignment::Right),
    ]);
    table
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(100);
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn count_cell(value: usize) -> Cell {
    Cell::new(value).set_alignment(CellAlignment::Right)
}
