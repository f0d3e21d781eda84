//! The concrete configuration of the permit pricing analysis: current
//! prices, literature elasticities, segment shares, the peak-month set,
//! estimated annual permit volumes and the three candidate pricing
//! policies.

use crate::demand::baselinebuilder::{BaselineBuilder, DemandAdjustment, NoiseSpec};
use crate::demand::demandtable::DemandTable;
use crate::demand::seasonality::SeasonalityProfile;
use crate::scenarios::scenario::Scenario;
use crate::segments::enums::Segment;
use crate::segments::segmentcatalog::SegmentCatalog;
use crate::time::period::Period;
use crate::time::seasoncalendar::SeasonCalendar;
use crate::utils::errors::Result;

/// Current permit prices (USD) and segment elasticities.
pub fn current_catalog() -> Result<SegmentCatalog> {
    SegmentCatalog::new()
        .with_segment(Segment::ForeignNonResident, 800.0, -0.3)?
        .with_segment(Segment::ForeignResident, 700.0, -0.6)?
        .with_segment(Segment::RestOfAfrica, 500.0, -1.2)?
        .with_segment(Segment::EastAfrican, 100.0, -1.8)
}

pub fn season_calendar() -> SeasonCalendar {
    SeasonCalendar::default()
}

/// Permit share of each visitor category.
pub fn segment_shares() -> Vec<(Segment, f64)> {
    vec![
        (Segment::ForeignNonResident, 0.65),
        (Segment::ForeignResident, 0.10),
        (Segment::RestOfAfrica, 0.15),
        (Segment::EastAfrican, 0.10),
    ]
}

/// Estimated annual permit volumes, 40% of Bwindi park visitors.
pub fn annual_permit_estimates() -> Vec<(i32, f64)> {
    vec![
        (2019, 12_000.0),
        (2020, 3_200.0),
        (2021, 4_800.0),
        (2022, 11_200.0),
        (2023, 14_200.0),
    ]
}

/// 2023 monthly arrival totals used to derive the seasonality profile.
pub fn monthly_arrival_totals() -> [f64; 12] {
    [
        105_000.0, 98_000.0, 84_000.0, 76_000.0, 80_000.0, 112_000.0, 128_000.0, 124_000.0,
        108_000.0, 86_000.0, 82_000.0, 118_000.0,
    ]
}

/// Travel-disruption windows: March 2020 onwards collapsed demand to
/// 10%, 2021 recovered to 60%.
pub fn disruption_adjustments() -> Result<Vec<DemandAdjustment>> {
    Ok(vec![
        DemandAdjustment::new(Period::new(2020, 3)?, Period::new(2020, 12)?, 0.1)?,
        DemandAdjustment::new(Period::new(2021, 1)?, Period::new(2021, 12)?, 0.6)?,
    ])
}

/// The all-1.0 reference policy over the catalog's segments.
pub fn current_pricing_scenario(catalog: &SegmentCatalog) -> Scenario {
    Scenario::baseline("Current Pricing", &catalog.segments())
}

/// Peak increases weighted towards inelastic foreign demand, off-peak
/// discounts deepest for the most price-sensitive segments; East
/// African peak pricing untouched.
pub fn moderate_scenario() -> Result<Scenario> {
    Scenario::new("Moderate Dynamic Pricing")
        .with_multiplier(Segment::ForeignNonResident, 1.30, 0.85)?
        .with_multiplier(Segment::ForeignResident, 1.20, 0.80)?
        .with_multiplier(Segment::RestOfAfrica, 1.10, 0.75)?
        .with_multiplier(Segment::EastAfrican, 1.0, 0.70)
}

pub fn aggressive_scenario() -> Result<Scenario> {
    Scenario::new("Aggressive Pricing")
        .with_multiplier(Segment::ForeignNonResident, 1.50, 0.90)?
        .with_multiplier(Segment::ForeignResident, 1.35, 0.85)?
        .with_multiplier(Segment::RestOfAfrica, 1.20, 0.70)?
        .with_multiplier(Segment::EastAfrican, 1.0, 0.60)
}

/// The deterministic 2019-2023 baseline table; pass a [`NoiseSpec`] to
/// reproduce the jittered variant of the original preparation step.
pub fn default_baseline(noise: Option<NoiseSpec>) -> Result<DemandTable> {
    let seasonality = SeasonalityProfile::from_monthly_totals(&monthly_arrival_totals())?;
    let mut builder = BaselineBuilder::new(seasonality);
    for (year, permits) in annual_permit_estimates() {
        builder = builder.with_annual_permits(year, permits);
    }
    for (segment, share) in segment_shares() {
        builder = builder.with_segment_share(segment, share);
    }
    for adjustment in disruption_adjustments()? {
        builder = builder.with_adjustment(adjustment);
    }
    if let Some(noise) = noise {
        builder = builder.with_noise(noise);
    }
    builder.build()
}
