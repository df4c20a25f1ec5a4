//! Calendar-month accounting periods (`YYYY-MM`).

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Local, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::errors::{Error, Result, ValidationError};

const MIN_YEAR: i32 = 1;
const MAX_YEAR: i32 = 9999;

/// A calendar month used as the unit of depreciation and reporting.
///
/// Ordering follows the calendar because `year` is compared before `month`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Period {
    year: i32,
    month: u32,
}

impl Period {
    pub fn new(year: i32, month: u32) -> Result<Self> {
        if !(1..=12).contains(&month) {
            return Err(Error::Validation(ValidationError::InvalidInput(format!(
                "Month {} is outside 1..=12",
                month
            ))));
        }
        if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
            return Err(Error::Validation(ValidationError::InvalidInput(format!(
                "Year {} is outside {}..={}",
                year, MIN_YEAR, MAX_YEAR
            ))));
        }
        Ok(Self { year, month })
    }

    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn current() -> Self {
        Self::from_date(Local::now().date_naive())
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn first_day(&self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year, self.month, 1).unwrap_or(NaiveDate::MIN)
    }

    pub fn last_day(&self) -> NaiveDate {
        self.next()
            .first_day()
            .pred_opt()
            .unwrap_or_else(|| self.first_day())
    }

    pub fn next(&self) -> Self {
        self.add_months(1)
    }

    pub fn prev(&self) -> Self {
        self.add_months(-1)
    }

    /// December of the same year.
    pub fn end_of_year(&self) -> Self {
        Self {
            year: self.year,
            month: 12,
        }
    }

    pub fn add_months(&self, months: i64) -> Self {
        let index = self.ordinal() + months;
        Self {
            year: index.div_euclid(12) as i32,
            month: (index.rem_euclid(12) + 1) as u32,
        }
    }

    /// Signed number of months from `self` to `other` (`other - self`).
    pub fn months_until(&self, other: Period) -> i64 {
        other.ordinal() - self.ordinal()
    }

    /// Iterates from `self` through `end`, inclusive. Empty when `end < self`.
    pub fn range_to(self, end: Period) -> impl Iterator<Item = Period> {
        let count = self.months_until(end) + 1;
        (0..count.max(0)).map(move |offset| self.add_months(offset))
    }

    fn ordinal(&self) -> i64 {
        self.year as i64 * 12 + (self.month as i64 - 1)
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for Period {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || {
            Error::Validation(ValidationError::InvalidInput(format!(
                "Invalid period '{}', expected YYYY-MM",
                s
            )))
        };
        let trimmed = s.trim();
        // Full dates are accepted and truncated to their month.
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
            return Self::new(date.year(), date.month()).map_err(|_| invalid());
        }
        let (year, month) = trimmed.split_once('-').ok_or_else(invalid)?;
        let year: i32 = year.parse().map_err(|_| invalid())?;
        let month: u32 = month.parse().map_err(|_| invalid())?;
        Self::new(year, month).map_err(|_| invalid())
    }
}

impl TryFrom<String> for Period {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<Period> for String {
    fn from(period: Period) -> Self {
        period.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_and_formats() {
        let p: Period = "2024-03".parse().unwrap();
        assert_eq!(p.year(), 2024);
        assert_eq!(p.month(), 3);
        assert_eq!(p.to_string(), "2024-03");

        let from_date: Period = "2024-03-17".parse().unwrap();
        assert_eq!(from_date, p);
    }

    #[test]
    fn rejects_bad_input() {
        assert!("2024-13".parse::<Period>().is_err());
        assert!("2024".parse::<Period>().is_err());
        assert!("abcd-01".parse::<Period>().is_err());
    }

    #[test]
    fn rejects_years_without_calendar_dates() {
        assert!("300000-06".parse::<Period>().is_err());
        assert!("0000-06".parse::<Period>().is_err());
        assert!("-5-06".parse::<Period>().is_err());
        assert!(Period::new(10_000, 1).is_err());
        assert!(serde_json::from_str::<Period>("\"300000-06\"").is_err());

        let last = Period::new(9999, 12).unwrap();
        assert_eq!(last.last_day(), NaiveDate::from_ymd_opt(9999, 12, 31).unwrap());
    }

    #[test]
    fn month_arithmetic_crosses_years() {
        let p = Period::new(2023, 11).unwrap();
        assert_eq!(p.add_months(3), Period::new(2024, 2).unwrap());
        assert_eq!(Period::new(2024, 1).unwrap().prev(), Period::new(2023, 12).unwrap());
        assert_eq!(p.months_until(Period::new(2024, 2).unwrap()), 3);
        assert_eq!(Period::new(2024, 2).unwrap().months_until(p), -3);
    }

    #[test]
    fn last_day_handles_february() {
        assert_eq!(
            Period::new(2024, 2).unwrap().last_day(),
            NaiveDate::from_ymd_opt(2024, 2, 29).unwrap()
        );
        assert_eq!(
            Period::new(2023, 12).unwrap().last_day(),
            NaiveDate::from_ymd_opt(2023, 12, 31).unwrap()
        );
    }

    #[test]
    fn range_is_inclusive() {
        let start = Period::new(2024, 11).unwrap();
        let periods: Vec<String> = start
            .range_to(Period::new(2025, 1).unwrap())
            .map(|p| p.to_string())
            .collect();
        assert_eq!(periods, vec!["2024-11", "2024-12", "2025-01"]);
        assert_eq!(start.range_to(start.prev()).count(), 0);
    }

    #[test]
    fn serde_uses_string_form() {
        let p = Period::new(2025, 6).unwrap();
        assert_eq!(serde_json::to_string(&p).unwrap(), "\"2025-06\"");
        let back: Period = serde_json::from_str("\"2025-06\"").unwrap();
        assert_eq!(back, p);
    }
}
