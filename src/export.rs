use crate::models::{DATE_FMT, Expense};
use anyhow::{Context, Result};
use csv::WriterBuilder;
use std::fs;
use std::path::Path;
use tracing::debug;

const HEADERS: [&str; 5] = ["id", "amount", "category", "description", "date"];

/// Writes one row per expense, overwriting `path`. The header row is always
/// written, so an empty selection produces a header-only file.
pub fn write_spreadsheet(path: &Path, expenses: &[Expense]) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut writer = WriterBuilder::new()
        .has_headers(false)
        .from_path(path)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    writer.write_record(HEADERS)?;
    for e in expenses {
        writer.write_record([
            e.id.to_string(),
            e.amount.to_string(),
            e.category.clone(),
            e.description.clone(),
            e.date.format(DATE_FMT).to_string(),
        ])?;
    }
    writer.flush()?;
    debug!(path = %path.display(), rows = expenses.len(), "exported expenses");
    Ok(())
}
