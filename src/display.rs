use crate::models::{DATE_FMT, Expense};
use crate::report::Summary;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, ContentArrangement, Table};

pub fn format_money(amount: f64, currency: &str) -> String {
    format!("{currency}{amount:.2}")
}

/// Grid of expenses with the ID, Amount, Category, Description and Date columns.
pub fn expense_table(expenses: &[Expense], currency: &str) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(
            ["ID", "Amount", "Category", "Description", "Date"]
                .into_iter()
                .map(|h| Cell::new(h).add_attribute(Attribute::Bold)),
        );
    for e in expenses {
        table.add_row(vec![
            Cell::new(e.id),
            Cell::new(format_money(e.amount, currency)).set_alignment(CellAlignment::Right),
            Cell::new(&e.category),
            Cell::new(&e.description),
            Cell::new(e.date.format(DATE_FMT)),
        ]);
    }
    table
}

pub fn summary_lines(summary: &Summary, currency: &str) -> Vec<String> {
    summary
        .by_category
        .iter()
        .map(|(category, amount)| format!(" - {category}: {}", format_money(*amount, currency)))
        .collect()
}
