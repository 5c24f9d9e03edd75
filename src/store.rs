use crate::error::{ExpenseError, ExpenseResult};
use crate::models::{Expense, Month};
use crate::report::{self, Summary};
use crate::storage::{load_expenses, save_expenses};
use anyhow::Result;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// How a new record's id is chosen.
///
/// `CollectionLength` reproduces the historical behaviour: the id is the
/// number of records currently held plus one, so a delete followed by an add
/// can hand out an id that is still in use. `MaxPlusOne` never collides.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum IdPolicy {
    #[default]
    CollectionLength,
    MaxPlusOne,
}

impl IdPolicy {
    fn next_id(self, expenses: &[Expense]) -> ExpenseResult<u32> {
        let last = match self {
            IdPolicy::CollectionLength => {
                u32::try_from(expenses.len()).map_err(|_| ExpenseError::IdsExhausted(u32::MAX))?
            }
            IdPolicy::MaxPlusOne => expenses.iter().map(|e| e.id).max().unwrap_or(0),
        };
        last.checked_add(1).ok_or(ExpenseError::IdsExhausted(last))
    }
}

/// The in-memory expense collection bound to its data file.
#[derive(Debug)]
pub struct ExpenseStore {
    path: PathBuf,
    expenses: Vec<Expense>,
    id_policy: IdPolicy,
}

impl ExpenseStore {
    /// Loads the data file. Returned warnings describe content that was
    /// discarded while loading.
    pub fn open(path: &Path, id_policy: IdPolicy) -> Result<(Self, Vec<String>)> {
        let report = load_expenses(path)?;
        info!(path = %path.display(), count = report.expenses.len(), ?id_policy, "opened expense store");
        let store = ExpenseStore {
            path: path.to_path_buf(),
            expenses: report.expenses,
            id_policy,
        };
        Ok((store, report.warnings))
    }

    pub fn save(&self) -> Result<()> {
        save_expenses(&self.path, &self.expenses)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn len(&self) -> usize {
        self.expenses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.expenses.is_empty()
    }

    /// Appends a record. The caller persists afterwards.
    pub fn add(
        &mut self,
        amount: f64,
        category: String,
        description: String,
        date: NaiveDate,
    ) -> ExpenseResult<&Expense> {
        let id = self.id_policy.next_id(&self.expenses)?;
        debug!(id, amount, %category, %date, "adding expense");
        self.expenses
            .push(Expense::new(id, amount, category, description, date));
        Ok(&self.expenses[self.expenses.len() - 1])
    }

    /// Removes the first record carrying `id`. The caller persists afterwards.
    pub fn delete(&mut self, id: i64) -> ExpenseResult<Expense> {
        let pos = self
            .expenses
            .iter()
            .position(|e| i64::from(e.id) == id)
            .ok_or(ExpenseError::NotFound(id))?;
        debug!(id, "deleting expense");
        Ok(self.expenses.remove(pos))
    }

    pub fn view(&self) -> ExpenseResult<&[Expense]> {
        if self.is_empty() {
            return Err(ExpenseError::Empty);
        }
        Ok(&self.expenses)
    }

    pub fn category_counts(&self) -> ExpenseResult<Vec<(String, usize)>> {
        Ok(report::category_counts(self.view()?))
    }

    /// Owned copies of the records whose category matches, ignoring case.
    pub fn search(&self, category: &str) -> Vec<Expense> {
        self.expenses
            .iter()
            .filter(|e| e.in_category(category))
            .cloned()
            .collect()
    }

    pub fn summary(&self) -> ExpenseResult<Summary> {
        Ok(report::summarize(self.view()?))
    }

    pub fn category_totals(&self) -> ExpenseResult<Vec<(String, f64)>> {
        Ok(report::category_totals(self.view()?))
    }

    pub fn for_month(&self, month: Month) -> Vec<Expense> {
        self.expenses
            .iter()
            .filter(|e| month.matches(&e.date))
            .cloned()
            .collect()
    }
}
