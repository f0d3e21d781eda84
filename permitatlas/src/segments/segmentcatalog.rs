use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::segments::enums::Segment;
use crate::utils::errors::{PermitError, Result};

/// # SegmentEntry
/// Current unit price and price elasticity of demand for one segment.
/// Validated at construction: a zero price would make percentage-change
/// arithmetic undefined, and a non-negative elasticity would imply
/// upward-sloping demand.
///
/// ## Example
/// ```
/// use permitatlas::prelude::*;
/// let entry = SegmentEntry::new(800.0, -0.3).unwrap();
/// assert_eq!(entry.price(), 800.0);
/// assert_eq!(entry.elasticity(), -0.3);
/// assert!(SegmentEntry::new(0.0, -0.3).is_err());
/// assert!(SegmentEntry::new(800.0, 0.1).is_err());
/// ```
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct SegmentEntry {
    price: f64,
    elasticity: f64,
}

impl SegmentEntry {
    pub fn new(price: f64, elasticity: f64) -> Result<SegmentEntry> {
        if !price.is_finite() || price <= 0.0 {
            return Err(PermitError::InvalidCatalogErr(format!(
                "Price must be positive and finite, got {}",
                price
            )));
        }
        if !elasticity.is_finite() || elasticity >= 0.0 {
            return Err(PermitError::InvalidCatalogErr(format!(
                "Elasticity must be negative and finite, got {}",
                elasticity
            )));
        }
        Ok(SegmentEntry { price, elasticity })
    }

    pub fn price(&self) -> f64 {
        self.price
    }

    pub fn elasticity(&self) -> f64 {
        self.elasticity
    }
}

/// # SegmentCatalog
/// Store of per-segment pricing parameters. Shared read-only across all
/// scenario evaluations.
///
/// ## Example
/// ```
/// use permitatlas::prelude::*;
/// let catalog = SegmentCatalog::new()
///     .with_segment(Segment::ForeignNonResident, 800.0, -0.3)
///     .unwrap();
/// assert_eq!(catalog.price(Segment::ForeignNonResident).unwrap(), 800.0);
/// assert!(catalog.price(Segment::EastAfrican).is_err());
/// ```
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct SegmentCatalog {
    entries: BTreeMap<Segment, SegmentEntry>,
}

impl SegmentCatalog {
    pub fn new() -> SegmentCatalog {
        SegmentCatalog {
            entries: BTreeMap::new(),
        }
    }

    pub fn with_segment(
        mut self,
        segment: Segment,
        price: f64,
        elasticity: f64,
    ) -> Result<SegmentCatalog> {
        self.add_segment(segment, price, elasticity)?;
        Ok(self)
    }

    pub fn add_segment(&mut self, segment: Segment, price: f64, elasticity: f64) -> Result<()> {
        let entry = SegmentEntry::new(price, elasticity)?;
        self.entries.insert(segment, entry);
        Ok(())
    }

    pub fn entry(&self, segment: Segment) -> Result<&SegmentEntry> {
        self.entries.get(&segment).ok_or_else(|| {
            PermitError::NotFoundErr(format!("No catalog entry for {}", segment.code()))
        })
    }

    pub fn price(&self, segment: Segment) -> Result<f64> {
        Ok(self.entry(segment)?.price())
    }

    pub fn elasticity(&self, segment: Segment) -> Result<f64> {
        Ok(self.entry(segment)?.elasticity())
    }

    pub fn segments(&self) -> Vec<Segment> {
        self.entries.keys().copied().collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_zero_price() {
        let result = SegmentCatalog::new().with_segment(Segment::EastAfrican, 0.0, -1.8);
        assert!(matches!(result, Err(PermitError::InvalidCatalogErr(_))));
    }

    #[test]
    fn test_rejects_negative_price() {
        let result = SegmentCatalog::new().with_segment(Segment::EastAfrican, -100.0, -1.8);
        assert!(result.is_err());
    }

    #[test]
    fn test_rejects_non_negative_elasticity() {
        assert!(SegmentCatalog::new()
            .with_segment(Segment::RestOfAfrica, 500.0, 0.0)
            .is_err());
        assert!(SegmentCatalog::new()
            .with_segment(Segment::RestOfAfrica, 500.0, 1.2)
            .is_err());
    }

    #[test]
    fn test_rejects_non_finite_values() {
        assert!(SegmentCatalog::new()
            .with_segment(Segment::ForeignResident, f64::NAN, -0.6)
            .is_err());
        assert!(SegmentCatalog::new()
            .with_segment(Segment::ForeignResident, 700.0, f64::NEG_INFINITY)
            .is_err());
    }

    #[test]
    fn test_missing_segment_lookup() {
        let catalog = SegmentCatalog::new()
            .with_segment(Segment::ForeignNonResident, 800.0, -0.3)
            .unwrap();
        assert!(matches!(
            catalog.elasticity(Segment::EastAfrican),
            Err(PermitError::NotFoundErr(_))
        ));
    }

    #[test]
    fn test_segments_listed_in_declaration_order() {
        let catalog = SegmentCatalog::new()
            .with_segment(Segment::EastAfrican, 100.0, -1.8)
            .unwrap()
            .with_segment(Segment::ForeignNonResident, 800.0, -0.3)
            .unwrap();
        assert_eq!(
            catalog.segments(),
            vec![Segment::ForeignNonResident, Segment::EastAfrican]
        );
        assert_eq!(catalog.len(), 2);
    }
}
