//! Error types for the expense store and its menu operations.
//!
//! Every variant here is recoverable: the menu reports it and returns to the
//! main loop. Storage failures travel as `anyhow::Error` instead.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExpenseError {
    #[error("Invalid amount entered: {0:?}")]
    InvalidAmount(String),

    #[error("Invalid ID: {0:?}")]
    InvalidId(String),

    #[error("Invalid date {0:?}, expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error("Please enter a valid 2-digit month between 01 and 12")]
    InvalidMonth(String),

    #[error("Expense not found: {0}")]
    NotFound(i64),

    /// No id is left above the highest one in use.
    #[error("No expense id available after {0}")]
    IdsExhausted(u32),

    /// The collection holds no records.
    #[error("No expenses found")]
    Empty,
}

impl ExpenseError {
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    /// True for bad user input, as opposed to storage failures.
    pub fn is_input(&self) -> bool {
        matches!(
            self,
            Self::InvalidAmount(_) | Self::InvalidId(_) | Self::InvalidDate(_) | Self::InvalidMonth(_)
        )
    }
}

pub type ExpenseResult<T> = Result<T, ExpenseError>;
