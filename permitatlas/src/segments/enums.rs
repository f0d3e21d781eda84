use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::utils::errors::{PermitError, Result};

/// # Segment
/// Visitor category buying trekking permits. A closed set so that a
/// misspelled name is a compile error rather than a runtime lookup
/// failure.
///
/// ## Example
/// ```
/// use permitatlas::prelude::*;
/// assert_eq!(Segment::all().len(), 4);
/// assert_eq!(Segment::ForeignNonResident.code(), "Foreign_NonResident");
/// let parsed: Segment = "East_African".parse().unwrap();
/// assert_eq!(parsed, Segment::EastAfrican);
/// ```
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Segment {
    ForeignNonResident,
    ForeignResident,
    RestOfAfrica,
    EastAfrican,
}

impl Segment {
    pub fn all() -> [Segment; 4] {
        [
            Segment::ForeignNonResident,
            Segment::ForeignResident,
            Segment::RestOfAfrica,
            Segment::EastAfrican,
        ]
    }

    /// Column identifier used in the tabular data files.
    pub fn code(&self) -> &'static str {
        match self {
            Segment::ForeignNonResident => "Foreign_NonResident",
            Segment::ForeignResident => "Foreign_Resident",
            Segment::RestOfAfrica => "Rest_of_Africa",
            Segment::EastAfrican => "East_African",
        }
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Segment::ForeignNonResident => write!(f, "Foreign Non-Resident"),
            Segment::ForeignResident => write!(f, "Foreign Resident"),
            Segment::RestOfAfrica => write!(f, "Rest of Africa"),
            Segment::EastAfrican => write!(f, "East African"),
        }
    }
}

impl FromStr for Segment {
    type Err = PermitError;

    fn from_str(s: &str) -> Result<Segment> {
        match s {
            "Foreign_NonResident" => Ok(Segment::ForeignNonResident),
            "Foreign_Resident" => Ok(Segment::ForeignResident),
            "Rest_of_Africa" => Ok(Segment::RestOfAfrica),
            "East_African" => Ok(Segment::EastAfrican),
            _ => Err(PermitError::ParsingErr(format!(
                "Unknown segment '{}'",
                s
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_parse_round_trip() {
        for segment in Segment::all() {
            let parsed: Segment = segment.code().parse().unwrap();
            assert_eq!(parsed, segment);
        }
    }

    #[test]
    fn test_unknown_segment_rejected() {
        assert!("Domestic".parse::<Segment>().is_err());
    }
}
