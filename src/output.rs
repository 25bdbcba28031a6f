use comfy_table::{presets::UTF8_FULL_CONDENSED, Cell, CellAlignment, ContentArrangement, Table};

use crate::filter::FilterOptions;
use crate::series::SeriesView;

pub fn format_cost(cost: f64) -> String {
    format!("${:.2}", cost)
}

fn describe_filter(view: &SeriesView) -> String {
    let model = view.filter.model().unwrap_or("all models");
    let kind = view.filter.kind().unwrap_or("all types");
    format!("{model}, {kind}")
}

pub fn build_table(view: &SeriesView) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![Cell::new("Date"), Cell::new("Cost")]);

    for (label, value) in view.labels.iter().zip(&view.values) {
        table.add_row(vec![
            Cell::new(label),
            Cell::new(format_cost(*value)).set_alignment(CellAlignment::Right),
        ]);
    }

    table.add_row(vec![
        Cell::new("TOTAL"),
        Cell::new(format_cost(view.total)).set_alignment(CellAlignment::Right),
    ]);

    table
}

pub fn print_table(view: &SeriesView) {
    println!("{} ({})", view.title, describe_filter(view));
    if view.is_empty() {
        println!("No costs for this selection.");
        return;
    }
    println!("{}", build_table(view));
}

pub fn print_json(view: &SeriesView) {
    println!(
        "{}",
        serde_json::to_string_pretty(view).expect("JSON serialization failed")
    );
}

pub fn print_options(options: &FilterOptions) {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![Cell::new("Models"), Cell::new("Types")]);

    let rows = options.models.len().max(options.types.len());
    for i in 0..rows {
        table.add_row(vec![
            Cell::new(options.models.get(i).map(String::as_str).unwrap_or("")),
            Cell::new(options.types.get(i).map(String::as_str).unwrap_or("")),
        ]);
    }

    println!("{table}");
}
