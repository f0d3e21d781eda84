use serde::{Deserialize, Serialize};
use statrs::statistics::Statistics;

use crate::demand::demandtable::DemandTable;
use crate::segments::enums::Segment;
use crate::time::enums::Season;
use crate::time::seasoncalendar::SeasonCalendar;
use crate::utils::errors::{PermitError, Result};

/// # SegmentSummary
/// Descriptive statistics of one segment's monthly permit series.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SegmentSummary {
    segment: Segment,
    count: usize,
    mean: f64,
    std_dev: f64,
    min: f64,
    max: f64,
    total: f64,
}

impl SegmentSummary {
    pub fn segment(&self) -> Segment {
        self.segment
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn mean(&self) -> f64 {
        self.mean
    }

    pub fn std_dev(&self) -> f64 {
        self.std_dev
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    pub fn total(&self) -> f64 {
        self.total
    }
}

/// Per-segment descriptive statistics over the monthly series.
pub fn segment_summaries(table: &DemandTable) -> Vec<SegmentSummary> {
    let mut summaries = Vec::new();
    for segment in table.segments() {
        let series = table.segment_series(segment);
        if series.is_empty() {
            continue;
        }
        summaries.push(SegmentSummary {
            segment,
            count: series.len(),
            mean: series.iter().mean(),
            std_dev: if series.len() > 1 {
                series.iter().std_dev()
            } else {
                0.0
            },
            min: Statistics::min(series.iter()),
            max: Statistics::max(series.iter()),
            total: series.iter().sum(),
        });
    }
    summaries
}

/// # SeasonSplit
/// Average monthly total permits in each regime.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SeasonSplit {
    peak_mean: f64,
    off_peak_mean: f64,
}

impl SeasonSplit {
    pub fn peak_mean(&self) -> f64 {
        self.peak_mean
    }

    pub fn off_peak_mean(&self) -> f64 {
        self.off_peak_mean
    }

    pub fn ratio(&self) -> f64 {
        self.peak_mean / self.off_peak_mean
    }
}

/// Splits monthly totals by the calendar's regimes. Fails when either
/// regime has no months in the table.
pub fn season_split(table: &DemandTable, calendar: &SeasonCalendar) -> Result<SeasonSplit> {
    let mut peak = Vec::new();
    let mut off_peak = Vec::new();
    for (period, total) in table.monthly_totals() {
        match calendar.classify(period) {
            Season::Peak => peak.push(total),
            Season::OffPeak => off_peak.push(total),
        }
    }
    if peak.is_empty() || off_peak.is_empty() {
        return Err(PermitError::InvalidValueErr(
            "Both regimes need at least one period for a season split".to_string(),
        ));
    }
    Ok(SeasonSplit {
        peak_mean: peak.iter().mean(),
        off_peak_mean: off_peak.iter().mean(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::period::Period;

    fn table() -> DemandTable {
        let mut table = DemandTable::new();
        for month in 1..=12 {
            let period = Period::new(2023, month).unwrap();
            // higher counts in the default peak months
            let peak = [1, 2, 6, 7, 8, 9, 12].contains(&month);
            let permits = if peak { 150.0 } else { 100.0 };
            table
                .add_record(period, Segment::ForeignNonResident, permits)
                .unwrap();
            table.add_record(period, Segment::EastAfrican, 20.0).unwrap();
        }
        table
    }

    #[test]
    fn test_segment_summaries() {
        let summaries = segment_summaries(&table());
        assert_eq!(summaries.len(), 2);
        let east = summaries
            .iter()
            .find(|summary| summary.segment() == Segment::EastAfrican)
            .unwrap();
        assert_eq!(east.count(), 12);
        assert_eq!(east.mean(), 20.0);
        assert_eq!(east.std_dev(), 0.0);
        assert_eq!(east.min(), 20.0);
        assert_eq!(east.max(), 20.0);
        assert_eq!(east.total(), 240.0);

        let foreign = summaries
            .iter()
            .find(|summary| summary.segment() == Segment::ForeignNonResident)
            .unwrap();
        assert_eq!(foreign.min(), 100.0);
        assert_eq!(foreign.max(), 150.0);
        assert!(foreign.std_dev() > 0.0);
    }

    #[test]
    fn test_season_split_means() {
        let split = season_split(&table(), &SeasonCalendar::default()).unwrap();
        assert_eq!(split.peak_mean(), 170.0);
        assert_eq!(split.off_peak_mean(), 120.0);
        assert!((split.ratio() - 170.0 / 120.0).abs() < 1e-12);
    }

    #[test]
    fn test_season_split_requires_both_regimes() {
        let mut table = DemandTable::new();
        let july = Period::new(2023, 7).unwrap();
        table
            .add_record(july, Segment::ForeignNonResident, 100.0)
            .unwrap();
        assert!(season_split(&table, &SeasonCalendar::default()).is_err());
    }
}
