//! Aggregations over a snapshot of expenses.
//!
//! Search groups categories case-insensitively while the summary and chart
//! keep the exact category text.

use crate::models::Expense;
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub total: f64,
    /// Exact category text to summed amount, in first-encountered order.
    pub by_category: Vec<(String, f64)>,
}

/// Number of records per lower-cased category, in first-encountered order.
pub fn category_counts(expenses: &[Expense]) -> Vec<(String, usize)> {
    let mut counts: Vec<(String, usize)> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();
    for e in expenses {
        let key = e.category.to_lowercase();
        match index.get(&key) {
            Some(&i) => counts[i].1 += 1,
            None => {
                index.insert(key.clone(), counts.len());
                counts.push((key, 1));
            }
        }
    }
    counts
}

/// Summed amount per exact category string, in first-encountered order.
pub fn category_totals(expenses: &[Expense]) -> Vec<(String, f64)> {
    let mut totals: Vec<(String, f64)> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();
    for e in expenses {
        match index.get(e.category.as_str()) {
            Some(&i) => totals[i].1 += e.amount,
            None => {
                index.insert(&e.category, totals.len());
                totals.push((e.category.clone(), e.amount));
            }
        }
    }
    totals
}

pub fn summarize(expenses: &[Expense]) -> Summary {
    Summary {
        total: expenses.iter().map(|e| e.amount).sum(),
        by_category: category_totals(expenses),
    }
}
