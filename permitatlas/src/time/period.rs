use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::utils::errors::{PermitError, Result};

/// # Period
/// A calendar month within the analysis horizon.
///
/// ## Example
/// ```
/// use permitatlas::prelude::*;
/// let period = Period::new(2023, 7).unwrap();
/// assert_eq!(period.year(), 2023);
/// assert_eq!(period.month(), 7);
/// assert_eq!(period.to_string(), "2023-07");
/// ```
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Period {
    year: i32,
    month: u32,
}

impl Period {
    pub fn new(year: i32, month: u32) -> Result<Period> {
        if !(1..=12).contains(&month) {
            return Err(PermitError::InvalidValueErr(format!(
                "Month {} is outside 1..=12",
                month
            )));
        }
        Ok(Period { year, month })
    }

    pub fn from_date(date: NaiveDate) -> Period {
        Period {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    /// The month immediately after this one.
    pub fn next(&self) -> Period {
        if self.month == 12 {
            Period {
                year: self.year + 1,
                month: 1,
            }
        } else {
            Period {
                year: self.year,
                month: self.month + 1,
            }
        }
    }

    /// All months from `start` to `end`, inclusive.
    pub fn range(start: Period, end: Period) -> Vec<Period> {
        let mut periods = Vec::new();
        let mut current = start;
        while current <= end {
            periods.push(current);
            current = current.next();
        }
        periods
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for Period {
    type Err = PermitError;

    fn from_str(s: &str) -> Result<Period> {
        let (year, month) = s
            .split_once('-')
            .ok_or_else(|| PermitError::ParsingErr(format!("Invalid period '{}'", s)))?;
        let year = year
            .parse::<i32>()
            .map_err(|_| PermitError::ParsingErr(format!("Invalid year in period '{}'", s)))?;
        let month = month
            .parse::<u32>()
            .map_err(|_| PermitError::ParsingErr(format!("Invalid month in period '{}'", s)))?;
        Period::new(year, month)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_invalid_month() {
        assert!(Period::new(2023, 0).is_err());
        assert!(Period::new(2023, 13).is_err());
        assert!(Period::new(2023, 12).is_ok());
    }

    #[test]
    fn test_from_date() {
        let date = NaiveDate::from_ymd_opt(2019, 3, 15).unwrap();
        assert_eq!(Period::from_date(date), Period::new(2019, 3).unwrap());
    }

    #[test]
    fn test_next_rolls_over_year() {
        let dec = Period::new(2020, 12).unwrap();
        assert_eq!(dec.next(), Period::new(2021, 1).unwrap());
        let jun = Period::new(2020, 6).unwrap();
        assert_eq!(jun.next(), Period::new(2020, 7).unwrap());
    }

    #[test]
    fn test_range_spans_years() {
        let start = Period::new(2019, 1).unwrap();
        let end = Period::new(2023, 12).unwrap();
        let periods = Period::range(start, end);
        assert_eq!(periods.len(), 60);
        assert_eq!(periods[0], start);
        assert_eq!(periods[59], end);
    }

    #[test]
    fn test_ordering_is_chronological() {
        let a = Period::new(2019, 12).unwrap();
        let b = Period::new(2020, 1).unwrap();
        assert!(a < b);
    }

    #[test]
    fn test_display_parse_round_trip() {
        let period = Period::new(2021, 4).unwrap();
        let parsed: Period = period.to_string().parse().unwrap();
        assert_eq!(parsed, period);
        assert!("2021".parse::<Period>().is_err());
        assert!("2021-13".parse::<Period>().is_err());
    }
}
