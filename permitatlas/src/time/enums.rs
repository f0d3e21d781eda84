use std::fmt;

use serde::{Deserialize, Serialize};

/// # Season
/// Demand regime of a calendar month. The analysis partitions the year
/// into two regimes with different pricing multipliers.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Season {
    Peak,
    OffPeak,
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Season::Peak => write!(f, "Peak"),
            Season::OffPeak => write!(f, "Off-Peak"),
        }
    }
}
