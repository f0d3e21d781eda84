use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::segments::enums::Segment;
use crate::segments::segmentcatalog::SegmentCatalog;
use crate::time::enums::Season;
use crate::utils::errors::{PermitError, Result};

/// # SeasonalMultiplier
/// Peak and off-peak price multipliers relative to current price.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct SeasonalMultiplier {
    peak: f64,
    off_peak: f64,
}

impl SeasonalMultiplier {
    pub fn new(peak: f64, off_peak: f64) -> Result<SeasonalMultiplier> {
        for (label, value) in [("peak", peak), ("off-peak", off_peak)] {
            if !value.is_finite() || value <= 0.0 {
                return Err(PermitError::InvalidValueErr(format!(
                    "The {} multiplier must be positive, got {}",
                    label, value
                )));
            }
        }
        Ok(SeasonalMultiplier { peak, off_peak })
    }

    pub fn for_season(&self, season: Season) -> f64 {
        match season {
            Season::Peak => self.peak,
            Season::OffPeak => self.off_peak,
        }
    }

    pub fn peak(&self) -> f64 {
        self.peak
    }

    pub fn off_peak(&self) -> f64 {
        self.off_peak
    }
}

/// # Scenario
/// A named pricing policy: one seasonal multiplier pair per segment.
/// Multipliers are scenario-local; a scenario holding no entry for a
/// catalog segment is a configuration error surfaced before simulation,
/// never a silent multiplier of 1.0.
///
/// ## Example
/// ```
/// use permitatlas::prelude::*;
/// let scenario = Scenario::new("Moderate Dynamic Pricing")
///     .with_multiplier(Segment::ForeignNonResident, 1.30, 0.85)
///     .unwrap();
/// let multiplier = scenario.multiplier(Segment::ForeignNonResident).unwrap();
/// assert_eq!(multiplier.for_season(Season::Peak), 1.30);
/// assert!(scenario.multiplier(Segment::EastAfrican).is_err());
/// ```
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Scenario {
    name: String,
    multipliers: BTreeMap<Segment, SeasonalMultiplier>,
}

impl Scenario {
    pub fn new(name: impl Into<String>) -> Scenario {
        Scenario {
            name: name.into(),
            multipliers: BTreeMap::new(),
        }
    }

    /// The all-1.0 reference policy over the given segments.
    pub fn baseline(name: impl Into<String>, segments: &[Segment]) -> Scenario {
        let multipliers = segments
            .iter()
            .map(|&segment| {
                (
                    segment,
                    SeasonalMultiplier {
                        peak: 1.0,
                        off_peak: 1.0,
                    },
                )
            })
            .collect();
        Scenario {
            name: name.into(),
            multipliers,
        }
    }

    pub fn with_multiplier(
        mut self,
        segment: Segment,
        peak: f64,
        off_peak: f64,
    ) -> Result<Scenario> {
        let multiplier = SeasonalMultiplier::new(peak, off_peak)?;
        self.multipliers.insert(segment, multiplier);
        Ok(self)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn multiplier(&self, segment: Segment) -> Result<SeasonalMultiplier> {
        self.multipliers.get(&segment).copied().ok_or_else(|| {
            PermitError::MissingSegmentErr(format!(
                "Scenario '{}' has no multiplier for {}",
                self.name,
                segment.code()
            ))
        })
    }

    /// Checks that every catalog segment has a multiplier.
    pub fn validate_against(&self, catalog: &SegmentCatalog) -> Result<()> {
        for segment in catalog.segments() {
            self.multiplier(segment)?;
        }
        Ok(())
    }

    pub fn segments(&self) -> Vec<Segment> {
        self.multipliers.keys().copied().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> SegmentCatalog {
        SegmentCatalog::new()
            .with_segment(Segment::ForeignNonResident, 800.0, -0.3)
            .unwrap()
            .with_segment(Segment::EastAfrican, 100.0, -1.8)
            .unwrap()
    }

    #[test]
    fn test_missing_segment_is_an_error() {
        let scenario = Scenario::new("partial")
            .with_multiplier(Segment::ForeignNonResident, 1.3, 0.85)
            .unwrap();
        let result = scenario.validate_against(&catalog());
        assert!(matches!(result, Err(PermitError::MissingSegmentErr(_))));
    }

    #[test]
    fn test_complete_scenario_validates() {
        let scenario = Scenario::new("complete")
            .with_multiplier(Segment::ForeignNonResident, 1.3, 0.85)
            .unwrap()
            .with_multiplier(Segment::EastAfrican, 1.0, 0.7)
            .unwrap();
        assert!(scenario.validate_against(&catalog()).is_ok());
    }

    #[test]
    fn test_baseline_is_all_ones() {
        let scenario = Scenario::baseline("Current Pricing", &Segment::all());
        for segment in Segment::all() {
            let multiplier = scenario.multiplier(segment).unwrap();
            assert_eq!(multiplier.for_season(Season::Peak), 1.0);
            assert_eq!(multiplier.for_season(Season::OffPeak), 1.0);
        }
    }

    #[test]
    fn test_multiplier_bounds() {
        assert!(SeasonalMultiplier::new(0.0, 0.85).is_err());
        assert!(SeasonalMultiplier::new(1.3, -0.85).is_err());
        assert!(SeasonalMultiplier::new(1.3, f64::NAN).is_err());
        assert!(SeasonalMultiplier::new(1.3, 0.85).is_ok());
    }

    #[test]
    fn test_serde_round_trip() {
        let scenario = Scenario::new("Aggressive Pricing")
            .with_multiplier(Segment::ForeignNonResident, 1.5, 0.9)
            .unwrap()
            .with_multiplier(Segment::EastAfrican, 1.0, 0.6)
            .unwrap();
        let json = serde_json::to_string(&scenario).unwrap();
        let parsed: Scenario = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, scenario);
    }
}
