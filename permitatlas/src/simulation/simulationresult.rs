use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::segments::enums::Segment;
use crate::time::period::Period;
use crate::utils::errors::{PermitError, Result};

/// # SimulationRecord
/// Projected price, demand and revenue for one (period, segment) under
/// a scenario. `clamped` marks records where the linear elasticity
/// response drove demand below zero and it was floored.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct SimulationRecord {
    period: Period,
    segment: Segment,
    price: f64,
    permits: f64,
    revenue: f64,
    clamped: bool,
}

impl SimulationRecord {
    pub fn new(
        period: Period,
        segment: Segment,
        price: f64,
        permits: f64,
        revenue: f64,
        clamped: bool,
    ) -> SimulationRecord {
        SimulationRecord {
            period,
            segment,
            price,
            permits,
            revenue,
            clamped,
        }
    }

    pub fn period(&self) -> Period {
        self.period
    }

    pub fn segment(&self) -> Segment {
        self.segment
    }

    pub fn price(&self) -> f64 {
        self.price
    }

    pub fn permits(&self) -> f64 {
        self.permits
    }

    pub fn revenue(&self) -> f64 {
        self.revenue
    }

    pub fn clamped(&self) -> bool {
        self.clamped
    }
}

/// # SimulationResult
/// The complete per-(period, segment) projection for one scenario plus
/// its aggregates. Recomputed fresh per scenario, never mutated.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SimulationResult {
    scenario_name: String,
    records: Vec<SimulationRecord>,
    years_spanned: usize,
}

impl SimulationResult {
    pub fn new(
        scenario_name: String,
        records: Vec<SimulationRecord>,
        years_spanned: usize,
    ) -> SimulationResult {
        SimulationResult {
            scenario_name,
            records,
            years_spanned,
        }
    }

    pub fn scenario_name(&self) -> &str {
        &self.scenario_name
    }

    pub fn records(&self) -> &[SimulationRecord] {
        &self.records
    }

    pub fn record(&self, period: Period, segment: Segment) -> Result<&SimulationRecord> {
        self.records
            .iter()
            .find(|record| record.period() == period && record.segment() == segment)
            .ok_or_else(|| {
                PermitError::NotFoundErr(format!(
                    "No simulation record for {} / {}",
                    period,
                    segment.code()
                ))
            })
    }

    pub fn total_revenue(&self) -> f64 {
        self.records.iter().map(|record| record.revenue()).sum()
    }

    pub fn total_permits(&self) -> f64 {
        self.records.iter().map(|record| record.permits()).sum()
    }

    pub fn years_spanned(&self) -> usize {
        self.years_spanned
    }

    /// Total revenue divided by the number of distinct years covered.
    pub fn annualized_revenue(&self) -> f64 {
        if self.years_spanned == 0 {
            return 0.0;
        }
        self.total_revenue() / self.years_spanned as f64
    }

    pub fn monthly_mean_revenue(&self) -> f64 {
        let months = self.revenue_by_period();
        if months.is_empty() {
            return 0.0;
        }
        months.iter().map(|(_, revenue)| revenue).sum::<f64>() / months.len() as f64
    }

    /// Percent change of annualized revenue against the reference run.
    pub fn revenue_vs(&self, baseline: &SimulationResult) -> Result<f64> {
        let reference = baseline.annualized_revenue();
        if reference == 0.0 {
            return Err(PermitError::InvalidValueErr(
                "Baseline annualized revenue is zero".to_string(),
            ));
        }
        Ok((self.annualized_revenue() / reference - 1.0) * 100.0)
    }

    pub fn clamped_count(&self) -> usize {
        self.records.iter().filter(|record| record.clamped()).count()
    }

    pub fn has_clamping(&self) -> bool {
        self.clamped_count() > 0
    }

    /// Total revenue per period across segments, chronological.
    pub fn revenue_by_period(&self) -> Vec<(Period, f64)> {
        let mut totals: BTreeMap<Period, f64> = BTreeMap::new();
        for record in &self.records {
            *totals.entry(record.period()).or_insert(0.0) += record.revenue();
        }
        totals.into_iter().collect()
    }
}
