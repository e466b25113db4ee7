use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use mcat_transform::CatalogRules;

use crate::types::JobSummary;

pub fn print_summary(summary: &JobSummary) {
    println!("Job: {}", summary.job);
    println!("Input: {}", summary.input.display());
    println!("Output: {}", summary.output.display());
    if let Some(path) = &summary.counters_out {
        println!("Counters: {}", path.display());
    }
    println!(
        "Lines read: {}  Records written: {}  Elapsed: {} ms",
        summary.lines_read,
        summary.records_written,
        summary.elapsed.as_millis()
    );
    println!("{}", counters_table(summary));
}

fn counters_table(summary: &JobSummary) -> Table {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Counter"), header_cell("Count")]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    if summary.counters.is_empty() {
        table.add_row(vec![dim_cell("no quality issues"), dim_cell("-")]);
        return table;
    }
    for (name, count) in summary.counters.iter() {
        table.add_row(vec![Cell::new(name), count_cell(count)]);
    }
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(summary.counters.total()).add_attribute(Attribute::Bold),
    ]);
    table
}

pub fn rules_table(rules: &CatalogRules) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("#"),
        header_cell("Column"),
        header_cell("Kind"),
        header_cell("Bounds"),
        header_cell("Default"),
        header_cell("Counter prefix"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    for (index, rule) in rules.iter().enumerate() {
        table.add_row(vec![
            Cell::new(index),
            Cell::new(rule.column).add_attribute(Attribute::Bold),
            Cell::new(rule.kind.label()),
            optional_cell(rule.bounds_label()),
            optional_cell(rule.default_value()),
            Cell::new(rule.counter_prefix),
        ]);
    }
    table
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(80);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn count_cell(count: u64) -> Cell {
    if count > 0 {
        Cell::new(count).fg(Color::Yellow)
    } else {
        dim_cell(count)
    }
}

fn optional_cell(value: Option<String>) -> Cell {
    match value {
        Some(value) => Cell::new(value),
        None => dim_cell("-"),
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
