use chrono::{Datelike, Local, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{ExpenseError, ExpenseResult};

pub const DATE_FMT: &str = "%Y-%m-%d";

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Expense {
    pub id: u32,
    pub amount: f64,
    pub category: String,
    pub description: String,
    pub date: NaiveDate,
}

impl Expense {
    pub fn new(id: u32, amount: f64, category: String, description: String, date: NaiveDate) -> Self {
        Self {
            id,
            amount,
            category,
            description,
            date,
        }
    }

    /// Category comparison used by search: case-insensitive.
    pub fn in_category(&self, category: &str) -> bool {
        self.category.to_lowercase() == category.to_lowercase()
    }
}

pub fn parse_amount(input: &str) -> ExpenseResult<f64> {
    let amount: f64 = input
        .trim()
        .parse()
        .map_err(|_| ExpenseError::InvalidAmount(input.to_string()))?;
    if !amount.is_finite() || amount < 0.0 {
        return Err(ExpenseError::InvalidAmount(input.to_string()));
    }
    Ok(amount)
}

/// Any integer is accepted; ids that match nothing are reported as not found.
pub fn parse_id(input: &str) -> ExpenseResult<i64> {
    input
        .trim()
        .parse()
        .map_err(|_| ExpenseError::InvalidId(input.to_string()))
}

/// Blank input means today.
pub fn parse_date(input: &str) -> ExpenseResult<NaiveDate> {
    let s = input.trim();
    if s.is_empty() {
        return Ok(Local::now().date_naive());
    }
    NaiveDate::parse_from_str(s, DATE_FMT).map_err(|_| ExpenseError::InvalidDate(input.to_string()))
}

/// Calendar month as entered for export, `01` through `12`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Month(u32);

impl Month {
    pub fn parse(input: &str) -> ExpenseResult<Self> {
        let invalid = || ExpenseError::InvalidMonth(input.to_string());
        if input.len() != 2 || !input.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        let n: u32 = input.parse().map_err(|_| invalid())?;
        if !(1..=12).contains(&n) {
            return Err(invalid());
        }
        Ok(Month(n))
    }

    pub fn number(&self) -> u32 {
        self.0
    }

    pub fn matches(&self, date: &NaiveDate) -> bool {
        date.month() == self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("12.50").unwrap(), 12.5);
        assert_eq!(parse_amount(" 3 ").unwrap(), 3.0);
        assert_eq!(parse_amount("0").unwrap(), 0.0);
        assert!(parse_amount("abc").is_err());
        assert!(parse_amount("").is_err());
        assert!(parse_amount("-4").is_err());
        assert!(parse_amount("inf").is_err());
        assert!(parse_amount("NaN").is_err());
    }

    #[test]
    fn test_parse_id() {
        assert_eq!(parse_id("3").unwrap(), 3);
        assert!(parse_id("x").is_err());
        assert!(parse_id("1.5").is_err());
        assert_eq!(parse_id("-3").unwrap(), -3);
        assert_eq!(parse_id(" 0 ").unwrap(), 0);
    }

    #[test]
    fn test_parse_date() {
        let date = parse_date("2024-03-01").unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
        assert_eq!(parse_date("  ").unwrap(), Local::now().date_naive());
        assert!(parse_date("01/03/2024").is_err());
        assert!(parse_date("2024-02-30").is_err());
    }

    #[test]
    fn test_month_parse() {
        assert_eq!(Month::parse("02").unwrap().number(), 2);
        assert_eq!(Month::parse("12").unwrap().number(), 12);
        assert!(Month::parse("2").is_err());
        assert!(Month::parse("00").is_err());
        assert!(Month::parse("13").is_err());
        assert!(Month::parse("1a").is_err());
        assert!(Month::parse("+1").is_err());
        assert!(Month::parse("002").is_err());
        assert!(Month::parse(" 02").is_err());
        assert!(Month::parse("02 ").is_err());
    }

    #[test]
    fn test_month_matches_date() {
        let feb = Month::parse("02").unwrap();
        assert!(feb.matches(&NaiveDate::from_ymd_opt(2024, 2, 10).unwrap()));
        assert!(!feb.matches(&NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()));
    }

    #[test]
    fn test_storage_shape() {
        let e = Expense::new(
            1,
            12.5,
            "Food".into(),
            "lunch".into(),
            NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
        );
        let value = serde_json::to_value(&e).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "id": 1,
                "amount": 12.5,
                "category": "Food",
                "description": "lunch",
                "date": "2024-03-01"
            })
        );
    }

    #[test]
    fn test_in_category_ignores_case() {
        let e = Expense::new(
            1,
            1.0,
            "Food".into(),
            String::new(),
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        );
        assert!(e.in_category("food"));
        assert!(e.in_category("FOOD"));
        assert!(!e.in_category("travel"));
    }
}
