use serde::{Deserialize, Serialize};

use crate::time::period::Period;
use crate::utils::errors::{PermitError, Result};

/// # SeasonalityProfile
/// Twelve monthly demand indices normalized to a mean of 1.0, derived
/// from raw monthly arrival totals.
///
/// ## Example
/// ```
/// use permitatlas::prelude::*;
/// let profile = SeasonalityProfile::uniform();
/// let july = Period::new(2023, 7).unwrap();
/// assert_eq!(profile.index(july), 1.0);
/// ```
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SeasonalityProfile {
    indices: [f64; 12],
}

impl SeasonalityProfile {
    /// Builds indices as each month's total divided by the twelve-month
    /// mean.
    pub fn from_monthly_totals(totals: &[f64; 12]) -> Result<SeasonalityProfile> {
        for (i, &total) in totals.iter().enumerate() {
            if !total.is_finite() || total <= 0.0 {
                return Err(PermitError::InvalidValueErr(format!(
                    "Monthly total for month {} must be positive, got {}",
                    i + 1,
                    total
                )));
            }
        }
        let mean = totals.iter().sum::<f64>() / 12.0;
        let mut indices = [0.0; 12];
        for (i, &total) in totals.iter().enumerate() {
            indices[i] = total / mean;
        }
        Ok(SeasonalityProfile { indices })
    }

    /// A flat profile with every month at 1.0.
    pub fn uniform() -> SeasonalityProfile {
        SeasonalityProfile { indices: [1.0; 12] }
    }

    pub fn index(&self, period: Period) -> f64 {
        self.indices[(period.month() - 1) as usize]
    }

    pub fn indices(&self) -> &[f64; 12] {
        &self.indices
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_indices_normalize_to_unit_mean() {
        let totals = [
            120.0, 110.0, 90.0, 80.0, 85.0, 130.0, 150.0, 145.0, 125.0, 95.0, 90.0, 140.0,
        ];
        let profile = SeasonalityProfile::from_monthly_totals(&totals).unwrap();
        let mean: f64 = profile.indices().iter().sum::<f64>() / 12.0;
        assert!((mean - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_relative_ordering_preserved() {
        let totals = [
            120.0, 110.0, 90.0, 80.0, 85.0, 130.0, 150.0, 145.0, 125.0, 95.0, 90.0, 140.0,
        ];
        let profile = SeasonalityProfile::from_monthly_totals(&totals).unwrap();
        let july = Period::new(2023, 7).unwrap();
        let april = Period::new(2023, 4).unwrap();
        assert!(profile.index(july) > profile.index(april));
    }

    #[test]
    fn test_rejects_non_positive_totals() {
        let mut totals = [100.0; 12];
        totals[3] = 0.0;
        assert!(SeasonalityProfile::from_monthly_totals(&totals).is_err());
        totals[3] = -5.0;
        assert!(SeasonalityProfile::from_monthly_totals(&totals).is_err());
    }
}
