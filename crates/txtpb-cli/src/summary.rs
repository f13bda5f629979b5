//! Terminal reporting for validation results.

use std::path::Path;

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use txtpb_validate::{ValidateError, ValidatedMessage};

pub fn print_success(result: &ValidatedMessage) {
    println!("Successfully validated {}", result.input.display());
    println!("{}", success_table(result));
}

pub fn print_failure(input: &Path, error: &ValidateError) {
    eprintln!("{}", failure_message(input, error));
}

/// Report line for a failed run, naming the input, the error and its stage.
pub fn failure_message(input: &Path, error: &ValidateError) -> String {
    format!(
        "error: failed parsing {}: {error} (stage: {})",
        input.display(),
        error.stage()
    )
}

pub fn success_table(result: &ValidatedMessage) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Input"),
        header_cell("Schema"),
        header_cell("Message"),
        header_cell("Fields"),
    ]);
    apply_table_style(&mut table);
    if let Some(column) = table.column_mut(3) {
        column.set_cell_alignment(CellAlignment::Right);
    }
    table.add_row(vec![
        Cell::new(result.input.display()),
        Cell::new(&result.headers.proto_file),
        Cell::new(result.message_name()).fg(Color::Green),
        Cell::new(result.populated_fields()),
    ]);
    table
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}
