use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::scenarios::scenario::Scenario;
use crate::segments::enums::Segment;
use crate::segments::segmentcatalog::SegmentCatalog;
use crate::simulation::simulationresult::SimulationResult;
use crate::utils::errors::Result;

/// # ComparisonRow
/// Scenario-level aggregates against the baseline run.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ComparisonRow {
    scenario: String,
    annual_revenue: f64,
    monthly_revenue: f64,
    total_permits: f64,
    revenue_vs_baseline_pct: f64,
}

impl ComparisonRow {
    pub fn scenario(&self) -> &str {
        &self.scenario
    }

    pub fn annual_revenue(&self) -> f64 {
        self.annual_revenue
    }

    pub fn monthly_revenue(&self) -> f64 {
        self.monthly_revenue
    }

    pub fn total_permits(&self) -> f64 {
        self.total_permits
    }

    pub fn revenue_vs_baseline_pct(&self) -> f64 {
        self.revenue_vs_baseline_pct
    }
}

/// # ScenarioComparison
/// Ranks scenario results by annualized revenue.
///
/// ## Example
/// ```
/// use permitatlas::prelude::*;
/// let catalog = SegmentCatalog::new()
///     .with_segment(Segment::ForeignNonResident, 800.0, -0.3)
///     .unwrap();
/// let mut demand = DemandTable::new();
/// let july = Period::new(2023, 7).unwrap();
/// demand.add_record(july, Segment::ForeignNonResident, 100.0).unwrap();
/// let calendar = SeasonCalendar::default();
/// let simulator = RevenueSimulator::new(&demand, &catalog, &calendar);
///
/// let baseline = simulator.baseline().unwrap();
/// let uplift = simulator
///     .simulate(
///         &Scenario::new("uplift")
///             .with_multiplier(Segment::ForeignNonResident, 1.30, 0.85)
///             .unwrap(),
///     )
///     .unwrap();
/// let comparison =
///     ScenarioComparison::from_results(&baseline, &[baseline.clone(), uplift]).unwrap();
/// assert_eq!(comparison.best().unwrap().scenario(), "uplift");
/// ```
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ScenarioComparison {
    rows: Vec<ComparisonRow>,
}

impl ScenarioComparison {
    pub fn from_results(
        baseline: &SimulationResult,
        results: &[SimulationResult],
    ) -> Result<ScenarioComparison> {
        let mut rows = Vec::with_capacity(results.len());
        for result in results {
            rows.push(ComparisonRow {
                scenario: result.scenario_name().to_string(),
                annual_revenue: result.annualized_revenue(),
                monthly_revenue: result.monthly_mean_revenue(),
                total_permits: result.total_permits(),
                revenue_vs_baseline_pct: result.revenue_vs(baseline)?,
            });
        }
        Ok(ScenarioComparison { rows })
    }

    pub fn rows(&self) -> &[ComparisonRow] {
        &self.rows
    }

    /// Rows ordered by descending annualized revenue.
    pub fn ranked(&self) -> Vec<&ComparisonRow> {
        let mut ranked: Vec<&ComparisonRow> = self.rows.iter().collect();
        ranked.sort_by(|a, b| {
            b.annual_revenue
                .partial_cmp(&a.annual_revenue)
                .unwrap_or(Ordering::Equal)
        });
        ranked
    }

    pub fn best(&self) -> Option<&ComparisonRow> {
        self.ranked().into_iter().next()
    }
}

/// # PricingRecommendation
/// The concrete price structure a scenario implies for one segment.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct PricingRecommendation {
    segment: Segment,
    current_price: f64,
    peak_price: f64,
    off_peak_price: f64,
    peak_change_pct: f64,
    off_peak_change_pct: f64,
}

impl PricingRecommendation {
    pub fn segment(&self) -> Segment {
        self.segment
    }

    pub fn current_price(&self) -> f64 {
        self.current_price
    }

    pub fn peak_price(&self) -> f64 {
        self.peak_price
    }

    pub fn off_peak_price(&self) -> f64 {
        self.off_peak_price
    }

    pub fn peak_change_pct(&self) -> f64 {
        self.peak_change_pct
    }

    pub fn off_peak_change_pct(&self) -> f64 {
        self.off_peak_change_pct
    }
}

/// Derives the recommended price table for a scenario, one row per
/// catalog segment.
pub fn pricing_recommendations(
    catalog: &SegmentCatalog,
    scenario: &Scenario,
) -> Result<Vec<PricingRecommendation>> {
    scenario.validate_against(catalog)?;
    let mut recommendations = Vec::with_capacity(catalog.len());
    for segment in catalog.segments() {
        let current_price = catalog.price(segment)?;
        let multiplier = scenario.multiplier(segment)?;
        recommendations.push(PricingRecommendation {
            segment,
            current_price,
            peak_price: current_price * multiplier.peak(),
            off_peak_price: current_price * multiplier.off_peak(),
            peak_change_pct: (multiplier.peak() - 1.0) * 100.0,
            off_peak_change_pct: (multiplier.off_peak() - 1.0) * 100.0,
        });
    }
    Ok(recommendations)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::demand::demandtable::DemandTable;
    use crate::simulation::revenuesimulator::RevenueSimulator;
    use crate::time::period::Period;
    use crate::time::seasoncalendar::SeasonCalendar;

    fn setup() -> (DemandTable, SegmentCatalog, SeasonCalendar) {
        let mut demand = DemandTable::new();
        for month in 1..=12 {
            let period = Period::new(2023, month).unwrap();
            demand
                .add_record(period, Segment::ForeignNonResident, 100.0)
                .unwrap();
            demand.add_record(period, Segment::EastAfrican, 50.0).unwrap();
        }
        let catalog = SegmentCatalog::new()
            .with_segment(Segment::ForeignNonResident, 800.0, -0.3)
            .unwrap()
            .with_segment(Segment::EastAfrican, 100.0, -1.8)
            .unwrap();
        (demand, catalog, SeasonCalendar::default())
    }

    fn scenario(name: &str, peak: f64, off_peak: f64) -> Scenario {
        Scenario::new(name)
            .with_multiplier(Segment::ForeignNonResident, peak, off_peak)
            .unwrap()
            .with_multiplier(Segment::EastAfrican, 1.0, 1.0)
            .unwrap()
    }

    #[test]
    fn test_baseline_row_is_zero_delta() {
        let (demand, catalog, calendar) = setup();
        let simulator = RevenueSimulator::new(&demand, &catalog, &calendar);
        let baseline = simulator.baseline().unwrap();
        let comparison =
            ScenarioComparison::from_results(&baseline, &[baseline.clone()]).unwrap();
        assert_eq!(comparison.rows().len(), 1);
        assert!(comparison.rows()[0].revenue_vs_baseline_pct().abs() < 1e-12);
    }

    #[test]
    fn test_ranking_orders_by_annual_revenue() {
        let (demand, catalog, calendar) = setup();
        let simulator = RevenueSimulator::new(&demand, &catalog, &calendar);
        let baseline = simulator.baseline().unwrap();
        let results = simulator
            .simulate_all(&[
                scenario("mild", 1.1, 0.95),
                scenario("strong", 1.3, 1.0),
                scenario("flat", 1.0, 1.0),
            ])
            .unwrap();
        let comparison = ScenarioComparison::from_results(&baseline, &results).unwrap();
        let ranked = comparison.ranked();
        // -0.3 elasticity keeps peak increases revenue-positive
        assert_eq!(ranked[0].scenario(), "strong");
        assert_eq!(ranked[2].scenario(), "flat");
        assert_eq!(comparison.best().unwrap().scenario(), "strong");
    }

    #[test]
    fn test_recommendation_rows() {
        let (_, catalog, _) = setup();
        let recommendations =
            pricing_recommendations(&catalog, &scenario("moderate", 1.30, 0.85)).unwrap();
        assert_eq!(recommendations.len(), 2);
        let foreign = &recommendations[0];
        assert_eq!(foreign.segment(), Segment::ForeignNonResident);
        assert_eq!(foreign.peak_price(), 1040.0);
        assert_eq!(foreign.off_peak_price(), 680.0);
        assert!((foreign.peak_change_pct() - 30.0).abs() < 1e-9);
        assert!((foreign.off_peak_change_pct() + 15.0).abs() < 1e-9);
    }

    #[test]
    fn test_recommendations_require_complete_scenario() {
        let (_, catalog, _) = setup();
        let partial = Scenario::new("partial")
            .with_multiplier(Segment::EastAfrican, 1.0, 0.7)
            .unwrap();
        assert!(pricing_recommendations(&catalog, &partial).is_err());
    }
}
