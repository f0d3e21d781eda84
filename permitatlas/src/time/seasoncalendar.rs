use serde::{Deserialize, Serialize};

use crate::time::enums::Season;
use crate::time::period::Period;
use crate::utils::errors::{PermitError, Result};

/// # SeasonCalendar
/// Fixed partition of the twelve months into peak and off-peak regimes.
/// Classification is a pure function of month-of-year and stays constant
/// for the whole analysis.
///
/// ## Example
/// ```
/// use permitatlas::prelude::*;
/// let calendar = SeasonCalendar::default();
/// let july = Period::new(2023, 7).unwrap();
/// let april = Period::new(2023, 4).unwrap();
/// assert_eq!(calendar.classify(july), Season::Peak);
/// assert_eq!(calendar.classify(april), Season::OffPeak);
/// ```
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct SeasonCalendar {
    peak_months: [bool; 12],
}

impl SeasonCalendar {
    pub fn new(peak_months: &[u32]) -> Result<SeasonCalendar> {
        let mut flags = [false; 12];
        for &month in peak_months {
            if !(1..=12).contains(&month) {
                return Err(PermitError::InvalidValueErr(format!(
                    "Peak month {} is outside 1..=12",
                    month
                )));
            }
            flags[(month - 1) as usize] = true;
        }
        Ok(SeasonCalendar { peak_months: flags })
    }

    pub fn classify(&self, period: Period) -> Season {
        if self.peak_months[(period.month() - 1) as usize] {
            Season::Peak
        } else {
            Season::OffPeak
        }
    }

    pub fn peak_months(&self) -> Vec<u32> {
        self.peak_months
            .iter()
            .enumerate()
            .filter(|(_, &peak)| peak)
            .map(|(i, _)| i as u32 + 1)
            .collect()
    }
}

impl Default for SeasonCalendar {
    /// June through September plus December through February, the high
    /// seasons of the trekking calendar.
    fn default() -> Self {
        SeasonCalendar {
            peak_months: [
                true, true, false, false, false, true, true, true, true, false, false, true,
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_invalid_month() {
        assert!(SeasonCalendar::new(&[0]).is_err());
        assert!(SeasonCalendar::new(&[13]).is_err());
        assert!(SeasonCalendar::new(&[1, 12]).is_ok());
    }

    #[test]
    fn test_default_peak_set() {
        let calendar = SeasonCalendar::default();
        assert_eq!(calendar.peak_months(), vec![1, 2, 6, 7, 8, 9, 12]);
    }

    #[test]
    fn test_classification_ignores_year() {
        let calendar = SeasonCalendar::default();
        for year in [2019, 2020, 2023] {
            let july = Period::new(year, 7).unwrap();
            let may = Period::new(year, 5).unwrap();
            assert_eq!(calendar.classify(july), Season::Peak);
            assert_eq!(calendar.classify(may), Season::OffPeak);
        }
    }

    #[test]
    fn test_duplicate_months_collapse() {
        let calendar = SeasonCalendar::new(&[6, 6, 7]).unwrap();
        assert_eq!(calendar.peak_months(), vec![6, 7]);
    }
}
