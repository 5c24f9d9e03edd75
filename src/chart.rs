use std::fmt::Write;

const BAR_WIDTH: usize = 40;
const BAR: char = '█';

/// Horizontal bar chart of spending per category. Bars are scaled against
/// the largest total; any non-zero total gets at least one cell.
pub fn render_bar_chart(totals: &[(String, f64)], currency: &str) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Spending by Category");
    if totals.is_empty() {
        return out;
    }

    let label_width = totals
        .iter()
        .map(|(c, _)| c.chars().count())
        .max()
        .unwrap_or(0)
        .max("Category".len());
    let max = totals.iter().map(|(_, v)| *v).fold(0.0_f64, f64::max);

    let _ = writeln!(out, "{:label_width$} | Amount ({currency})", "Category");
    let _ = writeln!(out, "{}", "-".repeat(label_width + 3 + BAR_WIDTH));
    for (category, amount) in totals {
        let cells = bar_cells(*amount, max);
        let pad = label_width.saturating_sub(category.chars().count());
        let _ = writeln!(
            out,
            "{category}{} | {} {currency}{amount:.2}",
            " ".repeat(pad),
            BAR.to_string().repeat(cells)
        );
    }
    out
}

fn bar_cells(amount: f64, max: f64) -> usize {
    if max <= 0.0 || amount <= 0.0 {
        return 0;
    }
    let scaled = (amount / max * BAR_WIDTH as f64).round() as usize;
    scaled.clamp(1, BAR_WIDTH)
}
