//! Interactive numbered menu over an [`ExpenseStore`].
//!
//! The loop reads from any `BufRead` and writes to any `Write`, so the same
//! code drives the terminal and the tests. Closing the input behaves like
//! choosing Exit.

use crate::chart::render_bar_chart;
use crate::display::{expense_table, format_money, summary_lines};
use crate::error::ExpenseError;
use crate::export::write_spreadsheet;
use crate::models::{Expense, Month, parse_amount, parse_date, parse_id};
use crate::store::ExpenseStore;
use anyhow::Result;
use colored::*;
use std::io::{BufRead, Write};
use std::path::PathBuf;
use tracing::{debug, error, info, warn};

const OPTIONS: [&str; 8] = [
    "Add Expense",
    "View Expenses",
    "View Summary",
    "Delete Expense",
    "Export to spreadsheet",
    "Search by category",
    "View Charts",
    "Exit",
];

pub struct Menu<'a, R, W> {
    store: &'a mut ExpenseStore,
    input: R,
    out: W,
    currency: String,
    export_path: PathBuf,
}

impl<'a, R: BufRead, W: Write> Menu<'a, R, W> {
    pub fn new(
        store: &'a mut ExpenseStore,
        input: R,
        out: W,
        currency: String,
        export_path: PathBuf,
    ) -> Self {
        Self {
            store,
            input,
            out,
            currency,
            export_path,
        }
    }

    /// Runs until Exit is chosen or input ends. The store is saved on the way out.
    pub fn run(&mut self) -> Result<()> {
        loop {
            self.print_menu()?;
            let Some(choice) = self.prompt("Choose an option (1-8): ")? else {
                return self.exit();
            };
            match choice.trim() {
                "1" => {
                    self.add()?;
                    self.persist()?;
                }
                "2" => self.view()?,
                "3" => self.summary()?,
                "4" => {
                    self.delete()?;
                    self.persist()?;
                }
                "5" => self.export()?,
                "6" => self.search()?,
                "7" => self.charts()?,
                "8" => return self.exit(),
                other => {
                    warn!(choice = other, "invalid menu choice");
                    writeln!(self.out, "{}", "❌ Invalid choice!".red())?;
                }
            }
        }
    }

    pub fn warn_all(&mut self, warnings: &[String]) -> Result<()> {
        for w in warnings {
            writeln!(self.out, "{}", format!("⚠️ {w}").red())?;
        }
        Ok(())
    }

    fn print_menu(&mut self) -> Result<()> {
        writeln!(self.out)?;
        writeln!(self.out, "{}", "=== Expense Tracker ===".blue())?;
        for (n, label) in OPTIONS.iter().enumerate() {
            writeln!(self.out, "{}. {label}", n + 1)?;
        }
        Ok(())
    }

    /// `None` once the input is exhausted.
    fn prompt(&mut self, text: &str) -> Result<Option<String>> {
        write!(self.out, "{text}")?;
        self.out.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let trimmed = line.trim_end_matches(['\n', '\r']).len();
        line.truncate(trimmed);
        Ok(Some(line))
    }

    fn report(&mut self, err: &ExpenseError) -> Result<()> {
        if err.is_input() {
            warn!(error = %err, "rejected input");
        }
        let msg = match err {
            ExpenseError::InvalidAmount(_) => "❌ Invalid amount entered!".to_string(),
            ExpenseError::InvalidId(_) => "❌ Invalid ID!".to_string(),
            ExpenseError::NotFound(_) => "❌ Expense not found.".to_string(),
            ExpenseError::Empty => {
                writeln!(self.out, "{}", "No expenses found.".yellow())?;
                return Ok(());
            }
            other => format!("❌ {other}"),
        };
        writeln!(self.out, "{}", msg.red())?;
        Ok(())
    }

    fn persist(&mut self) -> Result<()> {
        if let Err(e) = self.store.save() {
            error!(error = %e, "failed to save expenses");
            writeln!(self.out, "{}", format!("❌ Could not save expenses: {e:#}").red())?;
        }
        Ok(())
    }

    fn exit(&mut self) -> Result<()> {
        info!(count = self.store.len(), path = %self.store.path().display(), "saving on exit");
        self.store.save()?;
        writeln!(self.out, "{}", "Goodbye! 👋".magenta())?;
        Ok(())
    }

    fn add(&mut self) -> Result<()> {
        let amount_prompt = format!("Enter amount: {}", self.currency);
        let Some(amount) = self.prompt(&amount_prompt)? else {
            return Ok(());
        };
        let amount = match parse_amount(&amount) {
            Ok(a) => a,
            Err(e) => return self.report(&e),
        };
        let Some(category) = self.prompt("Enter category (e.g., Food, Travel, Bills): ")? else {
            return Ok(());
        };
        let Some(description) = self.prompt("Enter description: ")? else {
            return Ok(());
        };
        let Some(date) = self.prompt("Enter date (YYYY-MM-DD) or leave blank for today: ")? else {
            return Ok(());
        };
        let date = match parse_date(&date) {
            Ok(d) => d,
            Err(e) => return self.report(&e),
        };
        let added = self.store.add(
            amount,
            category.trim().to_string(),
            description.trim().to_string(),
            date,
        );
        if let Err(e) = added {
            return self.report(&e);
        }
        writeln!(self.out, "{}", "✅ Expense added successfully!".green())?;
        Ok(())
    }

    fn print_table(&mut self, expenses: &[Expense]) -> Result<()> {
        if expenses.is_empty() {
            return self.report(&ExpenseError::Empty);
        }
        writeln!(self.out, "{}", expense_table(expenses, &self.currency))?;
        Ok(())
    }

    fn view(&mut self) -> Result<()> {
        let expenses = match self.store.view() {
            Ok(e) => e.to_vec(),
            Err(e) => return self.report(&e),
        };
        self.print_table(&expenses)
    }

    fn summary(&mut self) -> Result<()> {
        let summary = match self.store.summary() {
            Ok(s) => s,
            Err(e) if e.is_empty() => {
                writeln!(self.out, "{}", "No expenses to summarize.".yellow())?;
                return Ok(());
            }
            Err(e) => return self.report(&e),
        };
        let total = format!("💰 Total spent: {}", format_money(summary.total, &self.currency));
        writeln!(self.out, "{}", total.cyan())?;
        for line in summary_lines(&summary, &self.currency) {
            writeln!(self.out, "{line}")?;
        }
        Ok(())
    }

    fn delete(&mut self) -> Result<()> {
        let Some(input) = self.prompt("Enter ID of expense to delete: ")? else {
            return Ok(());
        };
        let result = parse_id(&input).and_then(|id| self.store.delete(id));
        match result {
            Ok(_) => writeln!(self.out, "{}", "✅ Expense deleted.".green())?,
            Err(e) => self.report(&e)?,
        }
        Ok(())
    }

    fn export(&mut self) -> Result<()> {
        let month = loop {
            let Some(input) =
                self.prompt("Enter the month of which expenses you would like to export (MM): ")?
            else {
                return Ok(());
            };
            match Month::parse(&input) {
                Ok(m) => break m,
                Err(e) => writeln!(self.out, "{}", e.to_string().red())?,
            }
        };
        let rows = self.store.for_month(month);
        debug!(month = month.number(), rows = rows.len(), "exporting month");
        match write_spreadsheet(&self.export_path, &rows) {
            Ok(()) => {
                let msg = format!(
                    "✅ Exported {} expense(s) to {}",
                    rows.len(),
                    self.export_path.display()
                );
                writeln!(self.out, "{}", msg.green())?;
            }
            Err(e) => {
                error!(error = %e, "export failed");
                writeln!(self.out, "{}", format!("❌ Export failed: {e:#}").red())?;
            }
        }
        Ok(())
    }

    fn search(&mut self) -> Result<()> {
        let counts = match self.store.category_counts() {
            Ok(c) => c,
            Err(e) => return self.report(&e),
        };
        for (category, count) in &counts {
            writeln!(self.out, "{category}: {count}")?;
        }
        let Some(choice) = self.prompt("Please choose a category to view: ")? else {
            return Ok(());
        };
        let found = self.store.search(choice.trim());
        self.print_table(&found)
    }

    fn charts(&mut self) -> Result<()> {
        let totals = match self.store.category_totals() {
            Ok(t) => t,
            Err(e) if e.is_empty() => {
                writeln!(self.out, "{}", "No expenses to display charts.".yellow())?;
                return Ok(());
            }
            Err(e) => return self.report(&e),
        };
        write!(self.out, "{}", render_bar_chart(&totals, &self.currency))?;
        Ok(())
    }
}
