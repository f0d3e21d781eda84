use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use permitatlas::prelude::*;
use permitatlas::presets;
use serde::{Deserialize, Serialize};

use crate::errors::{AnalysisError, Result};

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct CatalogEntryConfig {
    pub segment: Segment,
    pub price: f64,
    pub elasticity: f64,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct MultiplierConfig {
    pub peak: f64,
    pub off_peak: f64,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ScenarioConfig {
    pub name: String,
    pub multipliers: BTreeMap<Segment, MultiplierConfig>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct AdjustmentConfig {
    pub from: String,
    pub to: String,
    pub factor: f64,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy)]
pub struct NoiseConfig {
    pub seed: u64,
    pub lo: f64,
    pub hi: f64,
}

/// JSON configuration of a full analysis run. Every section converts
/// into a validated library type before use, so a bad file fails with a
/// specific error instead of producing NaN projections.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct AnalysisConfig {
    pub catalog: Vec<CatalogEntryConfig>,
    pub peak_months: Vec<u32>,
    pub annual_permits: BTreeMap<i32, f64>,
    pub monthly_arrivals: [f64; 12],
    pub segment_shares: BTreeMap<Segment, f64>,
    pub adjustments: Vec<AdjustmentConfig>,
    pub scenarios: Vec<ScenarioConfig>,
    pub noise: Option<NoiseConfig>,
}

impl AnalysisConfig {
    /// The built-in configuration mirroring the published analysis.
    pub fn preset() -> Result<AnalysisConfig> {
        let catalog = presets::current_catalog()?;
        let mut catalog_entries = Vec::new();
        for segment in catalog.segments() {
            catalog_entries.push(CatalogEntryConfig {
                segment,
                price: catalog.price(segment)?,
                elasticity: catalog.elasticity(segment)?,
            });
        }

        let mut scenarios = Vec::new();
        for scenario in [
            presets::current_pricing_scenario(&catalog),
            presets::moderate_scenario()?,
            presets::aggressive_scenario()?,
        ] {
            scenarios.push(scenario_config(&scenario)?);
        }

        let mut adjustments = Vec::new();
        for adjustment in presets::disruption_adjustments()? {
            adjustments.push(AdjustmentConfig {
                from: adjustment.start().to_string(),
                to: adjustment.end().to_string(),
                factor: adjustment.factor(),
            });
        }

        Ok(AnalysisConfig {
            catalog: catalog_entries,
            peak_months: presets::season_calendar().peak_months(),
            annual_permits: presets::annual_permit_estimates().into_iter().collect(),
            monthly_arrivals: presets::monthly_arrival_totals(),
            segment_shares: presets::segment_shares().into_iter().collect(),
            adjustments,
            scenarios,
            noise: None,
        })
    }

    pub fn from_path(path: &Path) -> Result<AnalysisConfig> {
        let text = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Overrides the noise section with the jitter bounds of the
    /// original preparation step under an explicit seed.
    pub fn with_seed(mut self, seed: u64) -> AnalysisConfig {
        self.noise = Some(NoiseConfig {
            seed,
            lo: 0.95,
            hi: 1.05,
        });
        self
    }

    pub fn catalog(&self) -> Result<SegmentCatalog> {
        if self.catalog.is_empty() {
            return Err(AnalysisError::ConfigError(
                "Catalog has no segments".to_string(),
            ));
        }
        let mut catalog = SegmentCatalog::new();
        for entry in &self.catalog {
            catalog.add_segment(entry.segment, entry.price, entry.elasticity)?;
        }
        Ok(catalog)
    }

    pub fn season_calendar(&self) -> Result<SeasonCalendar> {
        Ok(SeasonCalendar::new(&self.peak_months)?)
    }

    pub fn scenarios(&self) -> Result<Vec<Scenario>> {
        if self.scenarios.is_empty() {
            return Err(AnalysisError::ConfigError(
                "No scenarios configured".to_string(),
            ));
        }
        let mut scenarios = Vec::new();
        for config in &self.scenarios {
            let mut scenario = Scenario::new(config.name.clone());
            for (&segment, multiplier) in &config.multipliers {
                scenario =
                    scenario.with_multiplier(segment, multiplier.peak, multiplier.off_peak)?;
            }
            scenarios.push(scenario);
        }
        Ok(scenarios)
    }

    pub fn baseline_table(&self) -> Result<DemandTable> {
        let seasonality = SeasonalityProfile::from_monthly_totals(&self.monthly_arrivals)?;
        let mut builder = BaselineBuilder::new(seasonality);
        for (&year, &permits) in &self.annual_permits {
            builder = builder.with_annual_permits(year, permits);
        }
        for (&segment, &share) in &self.segment_shares {
            builder = builder.with_segment_share(segment, share);
        }
        for adjustment in &self.adjustments {
            let start: Period = adjustment.from.parse()?;
            let end: Period = adjustment.to.parse()?;
            builder =
                builder.with_adjustment(DemandAdjustment::new(start, end, adjustment.factor)?);
        }
        if let Some(noise) = self.noise {
            builder = builder.with_noise(NoiseSpec::new(noise.seed, noise.lo, noise.hi)?);
        }
        Ok(builder.build()?)
    }
}

fn scenario_config(scenario: &Scenario) -> Result<ScenarioConfig> {
    let mut multipliers = BTreeMap::new();
    for segment in scenario.segments() {
        let multiplier = scenario.multiplier(segment)?;
        multipliers.insert(
            segment,
            MultiplierConfig {
                peak: multiplier.peak(),
                off_peak: multiplier.off_peak(),
            },
        );
    }
    Ok(ScenarioConfig {
        name: scenario.name().to_string(),
        multipliers,
    })
}
