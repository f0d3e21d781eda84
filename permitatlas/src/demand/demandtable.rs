use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::segments::enums::Segment;
use crate::time::period::Period;
use crate::utils::errors::{PermitError, Result};

/// # DemandRecord
/// One (period, segment) baseline permit count in row form, used when
/// the table crosses a serialization boundary.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct DemandRecord {
    period: Period,
    segment: Segment,
    permits: f64,
}

impl DemandRecord {
    pub fn new(period: Period, segment: Segment, permits: f64) -> DemandRecord {
        DemandRecord {
            period,
            segment,
            permits,
        }
    }

    pub fn period(&self) -> Period {
        self.period
    }

    pub fn segment(&self) -> Segment {
        self.segment
    }

    pub fn permits(&self) -> f64 {
        self.permits
    }
}

/// # DemandTable
/// Baseline permit counts keyed by (period, segment). Built once by the
/// upstream preparation stage and read-only afterwards; iteration order
/// is deterministic.
///
/// ## Example
/// ```
/// use permitatlas::prelude::*;
/// let period = Period::new(2023, 1).unwrap();
/// let mut table = DemandTable::new();
/// table.add_record(period, Segment::EastAfrican, 120.0).unwrap();
/// assert_eq!(table.get(period, Segment::EastAfrican).unwrap(), 120.0);
/// assert_eq!(table.years_spanned(), 1);
/// ```
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct DemandTable {
    records: BTreeMap<(Period, Segment), f64>,
}

impl DemandTable {
    pub fn new() -> DemandTable {
        DemandTable {
            records: BTreeMap::new(),
        }
    }

    pub fn add_record(&mut self, period: Period, segment: Segment, permits: f64) -> Result<()> {
        if !permits.is_finite() || permits < 0.0 {
            return Err(PermitError::InvalidValueErr(format!(
                "Permit count for {} / {} must be non-negative, got {}",
                period,
                segment.code(),
                permits
            )));
        }
        if self.records.contains_key(&(period, segment)) {
            return Err(PermitError::InvalidValueErr(format!(
                "Duplicate demand record for {} / {}",
                period,
                segment.code()
            )));
        }
        self.records.insert((period, segment), permits);
        Ok(())
    }

    pub fn get(&self, period: Period, segment: Segment) -> Result<f64> {
        self.records.get(&(period, segment)).copied().ok_or_else(|| {
            PermitError::NotFoundErr(format!(
                "No demand record for {} / {}",
                period,
                segment.code()
            ))
        })
    }

    pub fn iter(&self) -> impl Iterator<Item = (Period, Segment, f64)> + '_ {
        self.records
            .iter()
            .map(|(&(period, segment), &permits)| (period, segment, permits))
    }

    /// Distinct periods, chronological.
    pub fn periods(&self) -> Vec<Period> {
        let set: BTreeSet<Period> = self.records.keys().map(|&(period, _)| period).collect();
        set.into_iter().collect()
    }

    /// Distinct segments present in the table.
    pub fn segments(&self) -> Vec<Segment> {
        let set: BTreeSet<Segment> = self.records.keys().map(|&(_, segment)| segment).collect();
        set.into_iter().collect()
    }

    /// Number of distinct calendar years present, used for
    /// annualization.
    pub fn years_spanned(&self) -> usize {
        let years: BTreeSet<i32> = self.records.keys().map(|&(period, _)| period.year()).collect();
        years.len()
    }

    pub fn total_permits(&self) -> f64 {
        self.records.values().sum()
    }

    /// One segment's monthly series, chronological.
    pub fn segment_series(&self, segment: Segment) -> Vec<f64> {
        self.records
            .iter()
            .filter(|(&(_, s), _)| s == segment)
            .map(|(_, &permits)| permits)
            .collect()
    }

    /// Total permits per period across all segments, chronological.
    pub fn monthly_totals(&self) -> Vec<(Period, f64)> {
        let mut totals: BTreeMap<Period, f64> = BTreeMap::new();
        for (&(period, _), &permits) in &self.records {
            *totals.entry(period).or_insert(0.0) += permits;
        }
        totals.into_iter().collect()
    }

    pub fn records(&self) -> Vec<DemandRecord> {
        self.records
            .iter()
            .map(|(&(period, segment), &permits)| DemandRecord::new(period, segment, permits))
            .collect()
    }

    pub fn from_records(records: &[DemandRecord]) -> Result<DemandTable> {
        let mut table = DemandTable::new();
        for record in records {
            table.add_record(record.period(), record.segment(), record.permits())?;
        }
        Ok(table)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_year_table() -> DemandTable {
        let mut table = DemandTable::new();
        for year in [2022, 2023] {
            for month in 1..=12 {
                let period = Period::new(year, month).unwrap();
                table
                    .add_record(period, Segment::ForeignNonResident, 100.0)
                    .unwrap();
                table.add_record(period, Segment::EastAfrican, 20.0).unwrap();
            }
        }
        table
    }

    #[test]
    fn test_rejects_negative_and_non_finite_permits() {
        let period = Period::new(2023, 1).unwrap();
        let mut table = DemandTable::new();
        assert!(table
            .add_record(period, Segment::EastAfrican, -1.0)
            .is_err());
        assert!(table
            .add_record(period, Segment::EastAfrican, f64::NAN)
            .is_err());
    }

    #[test]
    fn test_rejects_duplicate_key() {
        let period = Period::new(2023, 1).unwrap();
        let mut table = DemandTable::new();
        table.add_record(period, Segment::EastAfrican, 10.0).unwrap();
        assert!(table.add_record(period, Segment::EastAfrican, 20.0).is_err());
    }

    #[test]
    fn test_years_spanned_counts_distinct_years() {
        assert_eq!(two_year_table().years_spanned(), 2);
    }

    #[test]
    fn test_totals_and_series() {
        let table = two_year_table();
        assert_eq!(table.total_permits(), 24.0 * 120.0);
        let series = table.segment_series(Segment::EastAfrican);
        assert_eq!(series.len(), 24);
        assert!(series.iter().all(|&permits| permits == 20.0));
    }

    #[test]
    fn test_monthly_totals_sum_segments() {
        let table = two_year_table();
        let totals = table.monthly_totals();
        assert_eq!(totals.len(), 24);
        assert!(totals.iter().all(|&(_, total)| total == 120.0));
    }

    #[test]
    fn test_record_round_trip() {
        let table = two_year_table();
        let rebuilt = DemandTable::from_records(&table.records()).unwrap();
        assert_eq!(rebuilt, table);
    }

    #[test]
    fn test_missing_record_lookup() {
        let table = two_year_table();
        let period = Period::new(2023, 1).unwrap();
        assert!(table.get(period, Segment::RestOfAfrica).is_err());
    }
}
