use rayon::iter::{IntoParallelRefIterator, ParallelIterator};

use crate::demand::demandtable::DemandTable;
use crate::scenarios::scenario::Scenario;
use crate::segments::segmentcatalog::SegmentCatalog;
use crate::simulation::simulationresult::{SimulationRecord, SimulationResult};
use crate::time::seasoncalendar::SeasonCalendar;
use crate::utils::errors::Result;

/// # RevenueSimulator
/// Applies a pricing scenario to the baseline demand table and projects
/// price, demand and revenue per (period, segment).
///
/// The demand response is the linear percentage-change approximation:
/// `demand_change_pct = price_change_pct * elasticity`, floored at zero
/// demand. The simulator is a pure function of its inputs; running the
/// same scenario twice yields exactly equal results, and scenarios can
/// be evaluated in parallel against the shared read-only inputs.
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
///
/// let simulator = RevenueSimulator::new(&demand, &catalog, &calendar);
/// let scenario = Scenario::new("peak uplift")
///     .with_multiplier(Segment::ForeignNonResident, 1.30, 0.85)
///     .unwrap();
/// let result = simulator.simulate(&scenario).unwrap();
/// let record = result.record(july, Segment::ForeignNonResident).unwrap();
/// assert_eq!(record.price(), 1040.0);
/// assert_eq!(record.permits(), 91.0);
/// ```
pub struct RevenueSimulator<'a> {
    demand: &'a DemandTable,
    catalog: &'a SegmentCatalog,
    calendar: &'a SeasonCalendar,
}

impl<'a> RevenueSimulator<'a> {
    pub fn new(
        demand: &'a DemandTable,
        catalog: &'a SegmentCatalog,
        calendar: &'a SeasonCalendar,
    ) -> RevenueSimulator<'a> {
        RevenueSimulator {
            demand,
            catalog,
            calendar,
        }
    }

    pub fn simulate(&self, scenario: &Scenario) -> Result<SimulationResult> {
        scenario.validate_against(self.catalog)?;

        let mut records = Vec::with_capacity(self.demand.len());
        for (period, segment, baseline) in self.demand.iter() {
            let entry = self.catalog.entry(segment)?;
            let season = self.calendar.classify(period);
            let multiplier = scenario.multiplier(segment)?.for_season(season);

            let new_price = entry.price() * multiplier;
            let price_change_pct = new_price / entry.price() - 1.0;
            let demand_change_pct = price_change_pct * entry.elasticity();
            let raw_demand = baseline * (1.0 + demand_change_pct);
            let clamped = raw_demand < 0.0;
            let new_demand = if clamped { 0.0 } else { raw_demand };
            let revenue = new_demand * new_price;

            records.push(SimulationRecord::new(
                period, segment, new_price, new_demand, revenue, clamped,
            ));
        }
        Ok(SimulationResult::new(
            scenario.name().to_string(),
            records,
            self.demand.years_spanned(),
        ))
    }

    /// Evaluates scenarios independently across worker threads; inputs
    /// are shared read-only, results are private per scenario.
    pub fn simulate_all(&self, scenarios: &[Scenario]) -> Result<Vec<SimulationResult>> {
        scenarios
            .par_iter()
            .map(|scenario| self.simulate(scenario))
            .collect()
    }

    /// The all-multipliers-1.0 reference run under current pricing.
    pub fn baseline(&self) -> Result<SimulationResult> {
        let scenario = Scenario::baseline("Current Pricing", &self.catalog.segments());
        self.simulate(&scenario)
    }
}
