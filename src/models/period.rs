//! Calendar month values.
//!
//! [`YearMonth`] is the unit used by the hire-date filters, the salary trend
//! series and the payslip period. It is written and parsed as `YYYY-MM`.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Months, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::EngineError;

/// A calendar month, stored as the first day of that month.
///
/// # Example
///
/// ```
/// use payroll_engine::models::YearMonth;
/// use chrono::NaiveDate;
///
/// let april: YearMonth = "2025-04".parse().unwrap();
/// assert_eq!(april.last_day(), NaiveDate::from_ymd_opt(2025, 4, 30).unwrap());
/// assert_eq!(april.label(), "Apr, 25");
/// assert_eq!(april.to_string(), "2025-04");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct YearMonth(NaiveDate);

impl YearMonth {
    /// Creates a month from a year and a 1-based month number.
    ///
    /// Returns `None` if the month is outside 1..=12 or the year is out of
    /// the supported calendar range.
    pub fn new(year: i32, month: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, 1).map(Self)
    }

    /// Returns the month containing the given date.
    pub fn from_date(date: NaiveDate) -> Self {
        Self(date.with_day(1).unwrap_or(date))
    }

    /// The calendar year.
    pub fn year(&self) -> i32 {
        self.0.year()
    }

    /// The 1-based month number.
    pub fn month(&self) -> u32 {
        self.0.month()
    }

    /// The first day of the month.
    pub fn first_day(&self) -> NaiveDate {
        self.0
    }

    /// The last day of the month.
    pub fn last_day(&self) -> NaiveDate {
        self.0
            .checked_add_months(Months::new(1))
            .and_then(|next| next.pred_opt())
            .unwrap_or(NaiveDate::MAX)
    }

    /// Number of days in the month.
    pub fn days(&self) -> u32 {
        self.last_day().day()
    }

    /// The month before this one.
    pub fn pred(&self) -> Option<Self> {
        self.0.checked_sub_months(Months::new(1)).map(Self)
    }

    /// Short chart label, e.g. `"Apr, 25"`.
    pub fn label(&self) -> String {
        self.0.format("%b, %y").to_string()
    }

    /// Long period label, e.g. `"April 2025"`.
    pub fn long_label(&self) -> String {
        self.0.format("%B %Y").to_string()
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year(), self.month())
    }
}

impl FromStr for YearMonth {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || EngineError::InvalidFilter {
            field: "month".to_string(),
            message: format!("expected YYYY-MM, got '{}'", s),
        };

        let (year, month) = s.trim().split_once('-').ok_or_else(invalid)?;
        if year.len() != 4 || month.is_empty() || month.len() > 2 {
            return Err(invalid());
        }
        let year: i32 = year.parse().map_err(|_| invalid())?;
        let month: u32 = month.parse().map_err(|_| invalid())?;

        Self::new(year, month).ok_or_else(invalid)
    }
}

impl Serialize for YearMonth {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for YearMonth {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_parse_valid_month() {
        let ym: YearMonth = "2024-02".parse().unwrap();
        assert_eq!(ym.year(), 2024);
        assert_eq!(ym.month(), 2);
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        for raw in ["2024", "2024-13", "2024-00", "24-01", "abcd-01", "2024-001", ""] {
            assert!(raw.parse::<YearMonth>().is_err(), "accepted {raw:?}");
        }
    }

    #[test]
    fn test_last_day_handles_leap_february() {
        assert_eq!(YearMonth::new(2024, 2).unwrap().last_day(), date(2024, 2, 29));
        assert_eq!(YearMonth::new(2025, 2).unwrap().last_day(), date(2025, 2, 28));
        assert_eq!(YearMonth::new(2025, 12).unwrap().last_day(), date(2025, 12, 31));
    }

    #[test]
    fn test_pred_crosses_year_boundary() {
        let jan = YearMonth::new(2025, 1).unwrap();
        assert_eq!(jan.pred(), YearMonth::new(2024, 12));
    }

    #[test]
    fn test_labels() {
        let dec = YearMonth::new(2024, 12).unwrap();
        assert_eq!(dec.label(), "Dec, 24");
        assert_eq!(dec.long_label(), "December 2024");
    }

    #[test]
    fn test_from_date_truncates_to_first() {
        let ym = YearMonth::from_date(date(2025, 4, 17));
        assert_eq!(ym.first_day(), date(2025, 4, 1));
        assert_eq!(ym.days(), 30);
    }

    #[test]
    fn test_serde_uses_yyyy_mm() {
        let ym = YearMonth::new(2025, 3).unwrap();
        assert_eq!(serde_json::to_string(&ym).unwrap(), "\"2025-03\"");
        let back: YearMonth = serde_json::from_str("\"2025-03\"").unwrap();
        assert_eq!(back, ym);
    }
}
