use crate::models::Expense;
use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::{Serializer, Value};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::{debug, warn};

/// Result of reading the data file. Problems that only cost us data are
/// reported in `warnings` rather than failing the load.
#[derive(Debug, Default)]
pub struct LoadReport {
    pub expenses: Vec<Expense>,
    pub warnings: Vec<String>,
}

pub fn load_expenses(path: &Path) -> Result<LoadReport> {
    if !path.exists() {
        debug!(path = %path.display(), "no data file, starting empty");
        return Ok(LoadReport::default());
    }
    let bytes = fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
    let content = match String::from_utf8(bytes) {
        Ok(content) => content,
        Err(e) => return Ok(corrupt(path, &e.to_string())),
    };
    if content.trim().is_empty() {
        return Ok(LoadReport::default());
    }

    let entries = match serde_json::from_str::<Value>(&content) {
        Ok(Value::Array(entries)) => entries,
        Ok(_) => return Ok(corrupt(path, "top level is not a list of expenses")),
        Err(e) => return Ok(corrupt(path, &e.to_string())),
    };

    let mut report = LoadReport::default();
    for (index, entry) in entries.into_iter().enumerate() {
        match serde_json::from_value::<Expense>(entry) {
            Ok(expense) => report.expenses.push(expense),
            Err(e) => {
                warn!(path = %path.display(), index, error = %e, "skipping malformed expense");
                report
                    .warnings
                    .push(format!("Skipped malformed expense at position {}: {e}", index + 1));
            }
        }
    }
    debug!(path = %path.display(), count = report.expenses.len(), "loaded expenses");
    Ok(report)
}

fn corrupt(path: &Path, reason: &str) -> LoadReport {
    warn!(path = %path.display(), reason, "corrupted expenses file");
    LoadReport {
        expenses: Vec::new(),
        warnings: vec!["Corrupted expenses file. Starting fresh.".to_string()],
    }
}

pub fn save_expenses(path: &Path, expenses: &[Expense]) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let file =
        File::create(path).with_context(|| format!("Failed to write {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    let mut ser = Serializer::with_formatter(&mut writer, PrettyFormatter::with_indent(b"    "));
    expenses.serialize(&mut ser)?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    debug!(path = %path.display(), count = expenses.len(), "saved expenses");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn expense(id: u32, amount: f64, category: &str, date: &str) -> Expense {
        Expense::new(
            id,
            amount,
            category.to_string(),
            format!("{category} #{id}"),
            NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
        )
    }

    #[test]
    fn test_missing_file_is_empty() {
        let dir = TempDir::new().unwrap();
        let report = load_expenses(&dir.path().join("expenses.json")).unwrap();
        assert!(report.expenses.is_empty());
        assert!(report.warnings.is_empty());
    }

    #[test]
    fn test_blank_file_is_empty() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("expenses.json");
        fs::write(&path, "  \n").unwrap();
        let report = load_expenses(&path).unwrap();
        assert!(report.expenses.is_empty());
        assert!(report.warnings.is_empty());
    }

    #[test]
    fn test_invalid_json_warns_and_starts_empty() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("expenses.json");
        fs::write(&path, "[{\"id\": 1,").unwrap();
        let report = load_expenses(&path).unwrap();
        assert!(report.expenses.is_empty());
        assert_eq!(report.warnings.len(), 1);
        assert!(report.warnings[0].contains("Corrupted"));
    }

    #[test]
    fn test_non_utf8_warns_and_starts_empty() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("expenses.json");
        fs::write(&path, b"\x5b\xff\xfe\x5d").unwrap();
        let report = load_expenses(&path).unwrap();
        assert!(report.expenses.is_empty());
        assert_eq!(report.warnings, vec!["Corrupted expenses file. Starting fresh."]);
    }

    #[test]
    fn test_non_array_warns_and_starts_empty() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("expenses.json");
        fs::write(&path, r#"{"expenses": []}"#).unwrap();
        let report = load_expenses(&path).unwrap();
        assert!(report.expenses.is_empty());
        assert_eq!(report.warnings.len(), 1);
    }

    #[test]
    fn test_malformed_entry_is_skipped() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("expenses.json");
        fs::write(
            &path,
            r#"[
                {"id": 1, "amount": 5.0, "category": "Food", "description": "", "date": "2024-01-02"},
                {"id": 2, "amount": "lots", "category": "Food"},
                {"id": 3, "amount": 7.5, "category": "Bills", "description": "gas", "date": "2024-01-03"}
            ]"#,
        )
        .unwrap();
        let report = load_expenses(&path).unwrap();
        let ids: Vec<u32> = report.expenses.iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![1, 3]);
        assert_eq!(report.warnings.len(), 1);
        assert!(report.warnings[0].contains("position 2"));
    }

    #[test]
    fn test_save_then_load_preserves_order() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("expenses.json");
        let expenses = vec![
            expense(2, 3.25, "Travel", "2024-02-10"),
            expense(1, 12.5, "Food", "2024-03-01"),
            expense(2, 0.0, "food", "2024-03-02"),
        ];
        save_expenses(&path, &expenses).unwrap();
        let report = load_expenses(&path).unwrap();
        assert_eq!(report.expenses, expenses);
        assert!(report.warnings.is_empty());
    }

    #[test]
    fn test_save_overwrites_corrupt_content() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("expenses.json");
        fs::write(&path, "garbage").unwrap();
        save_expenses(&path, &[expense(1, 1.0, "Food", "2024-01-01")]).unwrap();
        let text = fs::read_to_string(&path).unwrap();
        assert!(!text.contains("garbage"));
        assert!(text.contains("\n        \"category\": \"Food\""));
        assert_eq!(load_expenses(&path).unwrap().expenses.len(), 1);
    }
}
