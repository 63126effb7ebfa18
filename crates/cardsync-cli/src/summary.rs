use cardsync_cli::sync::{CardOutcome, CycleReport};
use cardsync_client::{CustomFieldDefinition, TableSchema};
use cardsync_model::FieldDefinitions;
use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

/// One column cardsync can write, checked against the destination table.
pub struct ColumnCoverage {
    pub column: &'static str,
    /// The destination table has a column with this name.
    pub present: bool,
    /// The current field mapping feeds this column.
    pub written: bool,
}

pub fn print_cycle_summary(report: &CycleReport) {
    println!("List: {} ({})", report.list_name, report.list_id);
    println!(
        "Cycle: {} -> {}",
        report.started_at.format("%Y-%m-%d %H:%M:%S"),
        report.finished_at.format("%H:%M:%S")
    );
    if report.dry_run {
        println!("Dry run: records were not submitted");
    }
    if report.cards.is_empty() {
        println!("No cards in list.");
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Card"),
        header_cell("Fields"),
        header_cell("Columns"),
        header_cell("Outcome"),
        header_cell("Detail"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    align_column(&mut table, 2, CellAlignment::Right);
    align_column(&mut table, 3, CellAlignment::Center);
    for card in &report.cards {
        let columns = card.record.as_ref().map(|record| record.len());
        let (outcome, detail) = outcome_cells(&card.outcome);
        table.add_row(vec![
            Cell::new(&card.card_name),
            Cell::new(card.fields_read),
            columns.map_or_else(|| dim_cell("-"), Cell::new),
            outcome,
            detail,
        ]);
    }
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        dim_cell("-"),
        dim_cell("-"),
        count_cell(report.succeeded(), "ok", Color::Green).add_attribute(Attribute::Bold),
        count_cell(report.failed(), "failed", Color::Red).add_attribute(Attribute::Bold),
    ]);
    println!("{table}");
}

pub fn print_field_definitions(
    definitions: &[CustomFieldDefinition],
    mapping: &FieldDefinitions,
) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Name"),
        header_cell("ID"),
        header_cell("Type"),
        header_cell("Mapped as"),
    ]);
    apply_table_style(&mut table);
    for definition in definitions {
        let mapped = match mapping.name_for(&definition.id) {
            Some(name) => Cell::new(name).fg(Color::Green),
            None => dim_cell("-"),
        };
        table.add_row(vec![
            Cell::new(&definition.name),
            Cell::new(&definition.id),
            Cell::new(&definition.field_type),
            mapped,
        ]);
    }
    println!("{table}");
    let unmatched: Vec<&str> = mapping
        .iter()
        .filter(|(_, id)| !definitions.iter().any(|definition| definition.id == *id))
        .map(|(name, _)| name)
        .collect();
    if !unmatched.is_empty() {
        eprintln!("Mapped fields missing from the board:");
        for name in unmatched {
            eprintln!("- {name}");
        }
    }
}

pub fn print_table_schema(table_schema: &TableSchema, coverage: &[ColumnCoverage]) {
    println!("Table: {} ({})", table_schema.name, table_schema.id);
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Column"),
        header_cell("Type"),
        header_cell("Written"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Center);
    for column in &table_schema.fields {
        let written = coverage
            .iter()
            .any(|entry| entry.written && entry.column == column.name);
        table.add_row(vec![
            Cell::new(&column.name),
            Cell::new(&column.column_type),
            if written {
                Cell::new("✓")
                    .fg(Color::Green)
                    .add_attribute(Attribute::Bold)
            } else {
                dim_cell("-")
            },
        ]);
    }
    println!("{table}");
    let missing: Vec<&str> = coverage
        .iter()
        .filter(|entry| entry.written && !entry.present)
        .map(|entry| entry.column)
        .collect();
    if !missing.is_empty() {
        eprintln!("Columns written by cardsync but missing from the table:");
        for name in missing {
            eprintln!("- {name}");
        }
    }
}

fn outcome_cells(outcome: &CardOutcome) -> (Cell, Cell) {
    match outcome {
        CardOutcome::Submitted { record_id } => (
            Cell::new("created").fg(Color::Green),
            Cell::new(record_id),
        ),
        CardOutcome::DryRun => (Cell::new("dry run").fg(Color::Yellow), dim_cell("-")),
        CardOutcome::Failed(reason) => (
            Cell::new("failed")
                .fg(Color::Red)
                .add_attribute(Attribute::Bold),
            Cell::new(reason),
        ),
    }
}

fn count_cell(count: usize, label: &str, color: Color) -> Cell {
    let text = format!("{count} {label}");
    if count > 0 {
        Cell::new(text).fg(color)
    } else {
        dim_cell(text)
    }
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
