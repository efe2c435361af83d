//! Fiscal quarter type.
//!
//! Execution reports are bounded to fixed calendar quarters:
//! Q1 Jan 1 - Mar 31, Q2 Apr 1 - Jun 30, Q3 Jul 1 - Sep 30,
//! Q4 Oct 1 - Dec 31.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while interpreting fiscal inputs.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FiscalError {
    /// Quarter outside 1..=4.
    #[error("Invalid quarter: {0}")]
    InvalidQuarter(u32),
}

/// A calendar quarter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Quarter {
    /// January through March.
    Q1,
    /// April through June.
    Q2,
    /// July through September.
    Q3,
    /// October through December.
    Q4,
}

impl Quarter {
    /// Parses a quarter number (1-4).
    ///
    /// # Errors
    ///
    /// Returns [`FiscalError::InvalidQuarter`] for anything outside 1..=4.
    pub fn parse(quarter: u32) -> Result<Self, FiscalError> {
        match quarter {
            1 => Ok(Self::Q1),
            2 => Ok(Self::Q2),
            3 => Ok(Self::Q3),
            4 => Ok(Self::Q4),
            other => Err(FiscalError::InvalidQuarter(other)),
        }
    }

    /// Quarter number (1-4).
    #[must_use]
    pub const fn number(&self) -> u32 {
        match self {
            Self::Q1 => 1,
            Self::Q2 => 2,
            Self::Q3 => 3,
            Self::Q4 => 4,
        }
    }

    /// Inclusive start and end dates of this quarter in the given year.
    ///
    /// # Panics
    ///
    /// Never panics for representable years; the month/day combinations
    /// are fixed and always valid.
    #[must_use]
    pub fn date_range(&self, year: i32) -> (NaiveDate, NaiveDate) {
        let (start_month, end_month, end_day) = match self {
            Self::Q1 => (1, 3, 31),
            Self::Q2 => (4, 6, 30),
            Self::Q3 => (7, 9, 30),
            Self::Q4 => (10, 12, 31),
        };

        let start = NaiveDate::from_ymd_opt(year, start_month, 1).expect("valid quarter start");
        let end = NaiveDate::from_ymd_opt(year, end_month, end_day).expect("valid quarter end");
        (start, end)
    }

    /// Display label, e.g. `"Q1 2025"`.
    #[must_use]
    pub fn label(&self, year: i32) -> String {
        format!("Q{} {year}", self.number())
    }

    /// Abbreviated name of the quarter's final month, e.g. `"MAR"`.
    #[must_use]
    pub const fn end_month_name(&self) -> &'static str {
        match self {
            Self::Q1 => "MAR",
            Self::Q2 => "JUN",
            Self::Q3 => "SEP",
            Self::Q4 => "DEC",
        }
    }

    /// Year-end projection label, e.g. `"31 DEC 2025"`.
    #[must_use]
    pub fn projection_label(year: i32) -> String {
        format!("31 DEC {year}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_quarters() {
        assert_eq!(Quarter::parse(1), Ok(Quarter::Q1));
        assert_eq!(Quarter::parse(4), Ok(Quarter::Q4));
    }

    #[test]
    fn test_parse_invalid_quarter() {
        assert_eq!(Quarter::parse(0), Err(FiscalError::InvalidQuarter(0)));
        assert_eq!(Quarter::parse(5), Err(FiscalError::InvalidQuarter(5)));
    }

    #[test]
    fn test_date_ranges() {
        let (start, end) = Quarter::Q1.date_range(2025);
        assert_eq!(start, NaiveDate::from_ymd_opt(2025, 1, 1).unwrap());
        assert_eq!(end, NaiveDate::from_ymd_opt(2025, 3, 31).unwrap());

        let (start, end) = Quarter::Q2.date_range(2025);
        assert_eq!(start, NaiveDate::from_ymd_opt(2025, 4, 1).unwrap());
        assert_eq!(end, NaiveDate::from_ymd_opt(2025, 6, 30).unwrap());

        let (start, end) = Quarter::Q3.date_range(2025);
        assert_eq!(start, NaiveDate::from_ymd_opt(2025, 7, 1).unwrap());
        assert_eq!(end, NaiveDate::from_ymd_opt(2025, 9, 30).unwrap());

        let (start, end) = Quarter::Q4.date_range(2025);
        assert_eq!(start, NaiveDate::from_ymd_opt(2025, 10, 1).unwrap());
        assert_eq!(end, NaiveDate::from_ymd_opt(2025, 12, 31).unwrap());
    }

    #[test]
    fn test_labels() {
        assert_eq!(Quarter::Q3.label(2025), "Q3 2025");
        assert_eq!(Quarter::Q3.end_month_name(), "SEP");
        assert_eq!(Quarter::projection_label(2025), "31 DEC 2025");
    }
}
