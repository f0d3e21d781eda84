use std::collections::BTreeMap;

use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, Uniform};
use serde::{Deserialize, Serialize};

use crate::demand::demandtable::DemandTable;
use crate::demand::seasonality::SeasonalityProfile;
use crate::segments::enums::Segment;
use crate::time::period::Period;
use crate::utils::errors::{PermitError, Result};

const SHARE_SUM_TOLERANCE: f64 = 1e-6;

/// # DemandAdjustment
/// Scales every monthly total inside an inclusive period window, e.g. a
/// travel-disruption year.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct DemandAdjustment {
    start: Period,
    end: Period,
    factor: f64,
}

impl DemandAdjustment {
    pub fn new(start: Period, end: Period, factor: f64) -> Result<DemandAdjustment> {
        if start > end {
            return Err(PermitError::InvalidValueErr(format!(
                "Adjustment window {}..{} is reversed",
                start, end
            )));
        }
        if !factor.is_finite() || factor <= 0.0 {
            return Err(PermitError::InvalidValueErr(format!(
                "Adjustment factor must be positive, got {}",
                factor
            )));
        }
        Ok(DemandAdjustment { start, end, factor })
    }

    pub fn applies_to(&self, period: Period) -> bool {
        self.start <= period && period <= self.end
    }

    pub fn start(&self) -> Period {
        self.start
    }

    pub fn end(&self) -> Period {
        self.end
    }

    pub fn factor(&self) -> f64 {
        self.factor
    }
}

/// # NoiseSpec
/// Explicitly seeded uniform jitter for the baseline. Noise is opt-in so
/// that an unseeded random source can never undermine downstream
/// determinism; the same seed always reproduces the same table.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct NoiseSpec {
    seed: u64,
    lo: f64,
    hi: f64,
}

impl NoiseSpec {
    pub fn new(seed: u64, lo: f64, hi: f64) -> Result<NoiseSpec> {
        if !lo.is_finite() || !hi.is_finite() || lo <= 0.0 || lo >= hi {
            return Err(PermitError::InvalidValueErr(format!(
                "Noise bounds must satisfy 0 < lo < hi, got {}..{}",
                lo, hi
            )));
        }
        Ok(NoiseSpec { seed, lo, hi })
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn lo(&self) -> f64 {
        self.lo
    }

    pub fn hi(&self) -> f64 {
        self.hi
    }
}

/// # BaselineBuilder
/// Builds the baseline demand table from annual permit totals, a
/// seasonality profile and per-segment shares: monthly total = annual /
/// 12 x seasonality index, scaled by any adjustment windows, truncated
/// to whole permits, then split across segments.
///
/// Construction is fully deterministic unless a [`NoiseSpec`] is given.
///
/// ## Example
/// ```
/// use permitatlas::prelude::*;
/// let table = BaselineBuilder::new(SeasonalityProfile::uniform())
///     .with_annual_permits(2023, 12000.0)
///     .with_segment_share(Segment::ForeignNonResident, 0.75)
///     .with_segment_share(Segment::EastAfrican, 0.25)
///     .build()
///     .unwrap();
/// let january = Period::new(2023, 1).unwrap();
/// assert_eq!(table.get(january, Segment::ForeignNonResident).unwrap(), 750.0);
/// assert_eq!(table.len(), 24);
/// ```
#[derive(Debug, Clone)]
pub struct BaselineBuilder {
    seasonality: SeasonalityProfile,
    annual_permits: BTreeMap<i32, f64>,
    shares: BTreeMap<Segment, f64>,
    adjustments: Vec<DemandAdjustment>,
    noise: Option<NoiseSpec>,
}

impl BaselineBuilder {
    pub fn new(seasonality: SeasonalityProfile) -> BaselineBuilder {
        BaselineBuilder {
            seasonality,
            annual_permits: BTreeMap::new(),
            shares: BTreeMap::new(),
            adjustments: Vec::new(),
            noise: None,
        }
    }

    pub fn with_annual_permits(mut self, year: i32, permits: f64) -> BaselineBuilder {
        self.annual_permits.insert(year, permits);
        self
    }

    pub fn with_segment_share(mut self, segment: Segment, share: f64) -> BaselineBuilder {
        self.shares.insert(segment, share);
        self
    }

    pub fn with_adjustment(mut self, adjustment: DemandAdjustment) -> BaselineBuilder {
        self.adjustments.push(adjustment);
        self
    }

    pub fn with_noise(mut self, noise: NoiseSpec) -> BaselineBuilder {
        self.noise = Some(noise);
        self
    }

    fn validate(&self) -> Result<()> {
        if self.annual_permits.is_empty() {
            return Err(PermitError::InvalidValueErr(
                "No annual permit totals provided".to_string(),
            ));
        }
        for (&year, &permits) in &self.annual_permits {
            if !permits.is_finite() || permits < 0.0 {
                return Err(PermitError::InvalidValueErr(format!(
                    "Annual permits for {} must be non-negative, got {}",
                    year, permits
                )));
            }
        }
        if self.shares.is_empty() {
            return Err(PermitError::InvalidValueErr(
                "No segment shares provided".to_string(),
            ));
        }
        let mut share_sum = 0.0;
        for (&segment, &share) in &self.shares {
            if !share.is_finite() || share <= 0.0 || share > 1.0 {
                return Err(PermitError::InvalidValueErr(format!(
                    "Share for {} must be in (0, 1], got {}",
                    segment.code(),
                    share
                )));
            }
            share_sum += share;
        }
        if (share_sum - 1.0).abs() > SHARE_SUM_TOLERANCE {
            return Err(PermitError::InvalidValueErr(format!(
                "Segment shares must sum to 1.0, got {}",
                share_sum
            )));
        }
        Ok(())
    }

    pub fn build(&self) -> Result<DemandTable> {
        self.validate()?;

        let mut rng = self.noise.map(|noise| StdRng::seed_from_u64(noise.seed()));
        let mut table = DemandTable::new();
        for (&year, &annual) in &self.annual_permits {
            for month in 1..=12 {
                let period = Period::new(year, month)?;
                let mut monthly = annual / 12.0 * self.seasonality.index(period);
                for adjustment in &self.adjustments {
                    if adjustment.applies_to(period) {
                        monthly *= adjustment.factor();
                    }
                }
                if let (Some(rng), Some(noise)) = (rng.as_mut(), self.noise.as_ref()) {
                    monthly *= Uniform::new(noise.lo(), noise.hi()).sample(rng);
                }
                // whole permits only
                let monthly = monthly.floor();
                for (&segment, &share) in &self.shares {
                    table.add_record(period, segment, (monthly * share).floor())?;
                }
            }
        }
        Ok(table)
    }
}
